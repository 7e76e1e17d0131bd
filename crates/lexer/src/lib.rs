mod cursor;
pub mod span;
pub mod token;

use cursor::Cursor;
use token::*;

#[derive(Clone)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source_code: &'a str) -> Lexer<'a> {
        Lexer {
            cursor: Cursor::new(source_code.chars()),
        }
    }

    /// Byte offset of the next unread character.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.cursor.span();

        let kind = match self.cursor.consume() {
            Some(ch) => self.read_kind(ch),
            None => TokenKind::EOF,
        };

        Token::new(kind, start.to(self.cursor.span()))
    }

    fn read_kind(&mut self, ch: char) -> TokenKind {
        match ch {
            '+' => TokenKind::Operator(Operator::Plus),
            '-' => TokenKind::Operator(Operator::Minus),
            '*' => TokenKind::Operator(Operator::Star),
            '/' => TokenKind::Operator(Operator::ForwardSlash),
            '^' => TokenKind::Operator(Operator::Caret),

            '=' => TokenKind::Delimiter(Delimiter::Assign),
            '(' => TokenKind::Delimiter(Delimiter::LParen),
            ')' => TokenKind::Delimiter(Delimiter::RParen),
            '[' => TokenKind::Delimiter(Delimiter::LBracket),
            ']' => TokenKind::Delimiter(Delimiter::RBracket),
            ',' => TokenKind::Delimiter(Delimiter::Comma),
            '.' if !self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) => {
                TokenKind::Delimiter(Delimiter::Period)
            }

            '"' => self.read_string(),
            '0'..='9' | '.' => self.read_number(),
            ch if ch.is_alphabetic() || ch == '_' => self.read_identifier(),
            _ => TokenKind::Invalid,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.cursor.peek().is_some_and(|ch| ch.is_whitespace()) {
            self.cursor.consume();
        }
    }

    fn read_string(&mut self) -> TokenKind {
        while let Some(ch) = self.cursor.consume() {
            if ch == '"' {
                return TokenKind::String;
            }
        }

        TokenKind::Invalid
    }

    fn read_identifier(&mut self) -> TokenKind {
        while self
            .cursor
            .peek()
            .is_some_and(|ch| ch.is_alphanumeric() || ch == '_')
        {
            self.cursor.consume();
        }

        TokenKind::Identifier
    }

    fn read_number(&mut self) -> TokenKind {
        while self
            .cursor
            .peek()
            .is_some_and(|ch| ch.is_ascii_digit() || ch == '.')
        {
            self.cursor.consume();
        }

        TokenKind::Number
    }
}

/// Lexes `input` into a token list ending with a single `EOF` token.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::EOF;

        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
