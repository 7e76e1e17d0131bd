mod declaration;
mod expr;
mod precedence;

pub use declaration::parse_declarations;

use opal_errors::OpalError;
use opal_ir::{Instruction, Operation};
use opal_lexer::token::*;
use opal_lexer::Lexer;
use opal_location::Location;

use thin_vec::ThinVec;

/// Parses an infix expression into its postfix [`Operation`].
pub fn parse(input: &str) -> Result<Operation, OpalError> {
    Parser::new(input).parse()
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    input: &'a str,

    /// Full text `input` was sliced from, and the byte offset of the slice,
    /// so that locations are reported against what the caller passed in.
    origin: &'a str,
    offset: usize,

    instructions: ThinVec<Instruction>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Parser<'a> {
        Parser::with_origin(input, 0, input)
    }

    pub(crate) fn with_origin(origin: &'a str, offset: usize, input: &'a str) -> Parser<'a> {
        Parser {
            lexer: Lexer::new(input),
            input,
            origin,
            offset,
            instructions: ThinVec::new(),
        }
    }

    pub fn parse(mut self) -> Result<Operation, OpalError> {
        let token = self.peek_token();

        if token.kind == TokenKind::EOF {
            return Err(OpalError::expected(
                self.token_location(&token),
                "an expression",
                self.token_value(&token),
            ));
        }

        self.parse_expression(None)?;
        self.expect_end()?;

        Ok(Operation::new(self.instructions))
    }

    /// Fails unless every token has been consumed.
    fn expect_end(&mut self) -> Result<(), OpalError> {
        let token = self.next_token();

        match token.kind {
            TokenKind::EOF => Ok(()),

            TokenKind::Delimiter(Delimiter::RParen) => Err(OpalError::mismatched(
                self.token_location(&token),
                "')' without a matching '('",
                self.token_value(&token),
            )),

            _ => Err(OpalError::unexpected(
                self.token_location(&token),
                "token",
                self.token_value(&token),
            )),
        }
    }

    #[inline]
    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    #[inline]
    fn next_token(&mut self) -> Token {
        self.lexer.next_token()
    }

    #[inline]
    fn peek_token(&self) -> Token {
        self.lexer.clone().next_token()
    }

    /// Source text of a token, with a readable stand-in for the end of input.
    #[inline]
    fn token_value(&self, token: &Token) -> &'a str {
        match token.kind {
            TokenKind::EOF => "<end of input>",
            _ => token.span.text(self.input),
        }
    }

    fn token_location(&self, token: &Token) -> Location {
        Location::of(self.origin, self.offset + token.span.start)
    }

    #[inline]
    fn expect(&mut self, expected: TokenKind) -> bool {
        if self.peek_token().kind == expected {
            self.next_token();

            true
        } else {
            false
        }
    }
}
