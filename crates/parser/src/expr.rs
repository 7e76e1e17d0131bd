use crate::*;

use precedence::binary_operator;

use opal_ir::{Directive, Function, Operator, Priority};

use std::f64::consts::{E, PI};

impl<'a> Parser<'a> {
    /// Parses one operand and every operator that binds tighter than
    /// `enclosing`, appending instructions in postfix order. The caller still
    /// owns `enclosing` and emits it once this returns.
    pub(crate) fn parse_expression(&mut self, enclosing: Option<Priority>) -> Result<(), OpalError> {
        self.parse_operand()?;

        loop {
            let token = self.peek_token();

            let (operator, explicit) = match binary_operator(&token) {
                Some(operator) => (operator, true),
                None if token.starts_operand() => (Operator::Multiply, false),
                None => break,
            };

            if enclosing >= Some(operator.priority()) {
                break;
            }

            if explicit {
                self.next_token();
            }

            self.parse_expression(Some(operator.priority()))?;

            self.emit(Instruction::Operator(operator));
        }

        Ok(())
    }

    fn parse_operand(&mut self) -> Result<(), OpalError> {
        let token = self.peek_token();

        match token.kind {
            TokenKind::Operator(opal_lexer::token::Operator::Minus) => self.parse_negative(),
            TokenKind::Delimiter(Delimiter::LParen) => self.parse_parentheses(),
            TokenKind::Number => self.parse_number(),
            TokenKind::Identifier => self.parse_identifier(),

            TokenKind::EOF => Err(OpalError::expected(
                self.token_location(&token),
                "an operand",
                self.token_value(&token),
            )),

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

    fn parse_negative(&mut self) -> Result<(), OpalError> {
        self.next_token();

        self.parse_expression(Some(Priority::Unary))?;

        self.emit(Instruction::Negative);

        Ok(())
    }

    fn parse_parentheses(&mut self) -> Result<(), OpalError> {
        let open = self.next_token();

        let token = self.peek_token();

        if token.kind == TokenKind::Delimiter(Delimiter::RParen) {
            return Err(OpalError::expected(
                self.token_location(&token),
                "an expression inside '()'",
                self.token_value(&token),
            ));
        }

        self.parse_expression(None)?;

        let token = self.peek_token();

        if !self.expect(TokenKind::Delimiter(Delimiter::RParen)) {
            return Err(OpalError::mismatched(
                self.token_location(&open),
                "'(' without a matching ')'",
                self.token_value(&token),
            ));
        }

        Ok(())
    }

    fn parse_number(&mut self) -> Result<(), OpalError> {
        let token = self.next_token();
        let literal = self.token_value(&token);

        let value = literal.parse::<f64>().map_err(|_| {
            OpalError::unexpected(self.token_location(&token), "number", literal)
        })?;

        self.emit(Instruction::Constant(value));

        Ok(())
    }

    fn parse_identifier(&mut self) -> Result<(), OpalError> {
        let token = self.next_token();
        let name = self.token_value(&token);

        if self.peek_token().kind == TokenKind::Delimiter(Delimiter::LParen) {
            return self.parse_function_call(&token);
        }

        self.emit(match name {
            "pi" | "π" => Instruction::Constant(PI),
            "e" => Instruction::Constant(E),
            _ => Instruction::variable(name),
        });

        Ok(())
    }

    fn parse_function_call(&mut self, name_token: &Token) -> Result<(), OpalError> {
        let name = self.token_value(name_token);

        let Some(function) = Function::from_name(name) else {
            return Err(OpalError::undefined(
                self.token_location(name_token),
                "function",
                name,
            ));
        };

        self.next_token();

        let arity = function.arity();

        for index in 0..arity {
            if index > 0 {
                let token = self.peek_token();

                if !self.expect(TokenKind::Delimiter(Delimiter::Comma)) {
                    return Err(self.arity_error(name, arity, &token));
                }
            }

            let token = self.peek_token();

            if token.kind == TokenKind::Delimiter(Delimiter::RParen) {
                return Err(self.arity_error(name, arity, &token));
            }

            self.parse_expression(None)?;
        }

        let token = self.peek_token();

        match token.kind {
            TokenKind::Delimiter(Delimiter::RParen) => {
                self.next_token();
            }

            TokenKind::Delimiter(Delimiter::Comma) => {
                return Err(self.arity_error(name, arity, &token));
            }

            _ => {
                return Err(OpalError::expected(
                    self.token_location(&token),
                    "')' to close the argument list",
                    self.token_value(&token),
                ))
            }
        }

        self.emit(Instruction::Function(function));

        Ok(())
    }

    fn arity_error(&self, name: &str, arity: usize, token: &Token) -> OpalError {
        OpalError::new_parse(
            self.token_location(token),
            self.token_value(token),
            format!(
                "'{}' takes {} {}",
                name,
                arity,
                match arity == 1 {
                    true => "argument",
                    false => "arguments",
                }
            ),
        )
    }

    /// Right-hand side of `sprite.Direction = ...`, which also accepts the
    /// direction keywords.
    pub(crate) fn parse_direction(&mut self) -> Result<(), OpalError> {
        let mut lookahead = self.lexer.clone();

        let token = lookahead.next_token();

        if token.kind == TokenKind::Identifier && lookahead.next_token().kind == TokenKind::EOF {
            if let Some(value) = Directive::direction_keyword(self.token_value(&token)) {
                self.next_token();
                self.emit(Instruction::Constant(value));

                return Ok(());
            }
        }

        self.parse_expression(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    use opal_errors::OpalError;
    use opal_ir::{Function, Instruction, Operator};

    use pretty_assertions::assert_eq;

    use std::f64::consts::PI;

    fn x() -> Instruction {
        Instruction::positional()
    }

    fn c(value: f64) -> Instruction {
        Instruction::Constant(value)
    }

    fn op(operator: Operator) -> Instruction {
        Instruction::Operator(operator)
    }

    fn instructions(input: &str) -> Vec<Instruction> {
        parse(input).unwrap().instructions().to_vec()
    }

    fn error(input: &str) -> OpalError {
        parse(input).unwrap_err()
    }

    #[test]
    fn products_bind_tighter_than_sums() {
        assert_eq!(
            instructions("2 * (x + 4) + 7"),
            vec![
                c(2.0),
                x(),
                c(4.0),
                op(Operator::Add),
                op(Operator::Multiply),
                c(7.0),
                op(Operator::Add),
            ]
        );

        assert_eq!(
            instructions("1 + 2 * 3"),
            vec![
                c(1.0),
                c(2.0),
                c(3.0),
                op(Operator::Multiply),
                op(Operator::Add),
            ]
        );
    }

    #[test]
    fn equal_priorities_evaluate_left_to_right() {
        assert_eq!(
            instructions("8 - 3 - 1"),
            vec![
                c(8.0),
                c(3.0),
                op(Operator::Subtract),
                c(1.0),
                op(Operator::Subtract),
            ]
        );

        assert_eq!(
            instructions("3 * x ^ 2"),
            vec![
                c(3.0),
                x(),
                op(Operator::Multiply),
                c(2.0),
                op(Operator::Pow),
            ]
        );
    }

    #[test]
    fn leading_minus_is_negation() {
        assert_eq!(
            instructions("-x * 2"),
            vec![x(), Instruction::Negative, c(2.0), op(Operator::Multiply)]
        );

        assert_eq!(
            instructions("2 * -sqrt(x)"),
            vec![
                c(2.0),
                x(),
                Instruction::Function(Function::Sqrt),
                Instruction::Negative,
                op(Operator::Multiply),
            ]
        );

        assert_eq!(
            instructions("--x"),
            vec![x(), Instruction::Negative, Instruction::Negative]
        );
    }

    #[test]
    fn adjacent_operands_multiply() {
        assert_eq!(
            instructions("2x"),
            vec![c(2.0), x(), op(Operator::Multiply)]
        );

        assert_eq!(
            instructions("2pi + 1"),
            vec![c(2.0), c(PI), op(Operator::Multiply), c(1.0), op(Operator::Add)]
        );

        assert_eq!(
            instructions("3(x + 1)"),
            vec![c(3.0), x(), c(1.0), op(Operator::Add), op(Operator::Multiply)]
        );
    }

    #[test]
    fn function_calls_take_declared_arity() {
        assert_eq!(
            instructions("min(7, 6)"),
            vec![c(7.0), c(6.0), Instruction::Function(Function::Min)]
        );

        assert_eq!(
            instructions("max(cos(x), 2 * x)"),
            vec![
                x(),
                Instruction::Function(Function::Cos),
                c(2.0),
                x(),
                op(Operator::Multiply),
                Instruction::Function(Function::Max),
            ]
        );
    }

    #[test]
    fn named_variables_and_symbols() {
        assert_eq!(
            instructions("speed * π"),
            vec![Instruction::variable("speed"), c(PI), op(Operator::Multiply)]
        );
    }

    #[test]
    fn unmatched_closing_parenthesis() {
        let error = error("(x + 1))");

        assert_eq!(error.location().map(|l| l.index), Some(7));
        assert_eq!(error.token(), Some(")"));
    }

    #[test]
    fn unclosed_parenthesis() {
        let error = error("2 * (x + 1");

        assert_eq!(error.location().map(|l| l.index), Some(4));
        assert_eq!(error.token(), Some("<end of input>"));
    }

    #[test]
    fn unknown_function() {
        let error = error("2 + tan(x)");

        assert_eq!(error.to_string(), "1:5: undefined function 'tan'");
        assert_eq!(error.location().map(|l| l.index), Some(4));
    }

    #[test]
    fn wrong_argument_counts() {
        assert_eq!(error("min(1)").to_string(), "1:6: 'min' takes 2 arguments");
        assert_eq!(error("cos(1, 2)").to_string(), "1:6: 'cos' takes 1 argument");
        assert_eq!(error("sqrt()").to_string(), "1:6: 'sqrt' takes 1 argument");
        assert_eq!(error("max(x,)").to_string(), "1:7: 'max' takes 2 arguments");
    }

    #[test]
    fn trailing_operator_waits_for_an_operand() {
        let error = error("2 * x +");

        assert_eq!(error.location().map(|l| l.index), Some(7));
        assert_eq!(error.token(), Some("<end of input>"));
    }

    #[test]
    fn stray_tokens() {
        assert_eq!(error("2 $ 3").token(), Some("$"));
        assert_eq!(error("").token(), Some("<end of input>"));
        assert_eq!(error("1.2.3").token(), Some("1.2.3"));
    }
}
