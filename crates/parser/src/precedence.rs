use opal_ir::Operator;
use opal_lexer::token::{self, Token, TokenKind};

/// The binary operator spelled by `token`, if any.
pub(crate) fn binary_operator(token: &Token) -> Option<Operator> {
    match token.kind {
        TokenKind::Operator(operator) => Some(match operator {
            token::Operator::Plus => Operator::Add,
            token::Operator::Minus => Operator::Subtract,
            token::Operator::Star => Operator::Multiply,
            token::Operator::ForwardSlash => Operator::Divide,
            token::Operator::Caret => Operator::Pow,
        }),

        _ => None,
    }
}
