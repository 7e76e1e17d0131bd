use crate::span::Span;

#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Token {
        Token { kind, span }
    }

    /// True when this token can begin an operand, which is what makes two
    /// adjacent operands an implicit multiplication.
    pub fn starts_operand(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Number | TokenKind::Identifier | TokenKind::Delimiter(Delimiter::LParen)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    String,
    Number,

    Operator(Operator),

    Delimiter(Delimiter),

    Invalid,
    EOF,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    ForwardSlash,
    Caret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Assign,

    // Grouping
    LParen,
    RParen,
    LBracket,
    RBracket,

    // Punctuation
    Comma,
    Period,
}
