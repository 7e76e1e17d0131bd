use crate::*;

use opal_ir::Directive;

use log::debug;

/// Parses newline-separated `sprite.<target> = <expression>` statements into a
/// single operation. Lines whose left-hand side is not a recognized sprite
/// target are skipped.
pub fn parse_declarations(text: &str) -> Result<Operation, OpalError> {
    let mut instructions = ThinVec::new();
    let mut offset = 0;

    for (number, line) in text.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += line.len();

        let statement = line.trim();

        if statement.is_empty() || statement.starts_with('#') {
            continue;
        }

        let content = line.trim_end_matches(&['\r', '\n'][..]);

        let mut parser = Parser::with_origin(text, start, content);

        match parser.parse_declaration()? {
            Some(directive) => {
                instructions.extend(parser.instructions);
                instructions.push(Instruction::Directive(directive));
            }

            None => debug!("skipping line {}: {:?}", number + 1, statement),
        }
    }

    Ok(Operation::new(instructions))
}

impl<'a> Parser<'a> {
    /// Parses one declaration line, leaving the right-hand side in
    /// `self.instructions`. Returns `None` when the left-hand side is not a
    /// sprite target.
    fn parse_declaration(&mut self) -> Result<Option<Directive>, OpalError> {
        let Some(directive) = self.parse_target() else {
            return Ok(None);
        };

        if !self.expect(TokenKind::Delimiter(Delimiter::Assign)) {
            return Ok(None);
        }

        match directive {
            Directive::Direction => self.parse_direction()?,
            _ => {
                let token = self.peek_token();

                if token.kind == TokenKind::EOF {
                    return Err(OpalError::expected(
                        self.token_location(&token),
                        "an expression",
                        self.token_value(&token),
                    ));
                }

                self.parse_expression(None)?
            }
        }

        self.expect_end()?;

        Ok(Some(directive))
    }

    fn parse_target(&mut self) -> Option<Directive> {
        if self.next_identifier()? != "sprite" || !self.expect_period() {
            return None;
        }

        match self.next_identifier()? {
            "Direction" => Some(Directive::Direction),
            "Animation" => Some(Directive::Animation),

            "Hitbox" => match self.expect_period() && self.next_identifier()? == "Top" {
                true => Some(Directive::HitboxTop),
                false => None,
            },

            "Variables" => {
                if !self.expect(TokenKind::Delimiter(Delimiter::LBracket)) {
                    return None;
                }

                let token = self.next_token();

                if token.kind != TokenKind::String
                    || !self.expect(TokenKind::Delimiter(Delimiter::RBracket))
                {
                    return None;
                }

                let quoted = self.token_value(&token);

                Some(Directive::Variable(quoted[1..quoted.len() - 1].to_owned()))
            }

            _ => None,
        }
    }

    fn next_identifier(&mut self) -> Option<&'a str> {
        let token = self.next_token();

        match token.kind {
            TokenKind::Identifier => Some(self.token_value(&token)),
            _ => None,
        }
    }

    #[inline]
    fn expect_period(&mut self) -> bool {
        self.expect(TokenKind::Delimiter(Delimiter::Period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use opal_ir::Operator;

    use pretty_assertions::assert_eq;

    fn x() -> Instruction {
        Instruction::positional()
    }

    #[test]
    fn parses_every_sprite_target() {
        let op = parse_declarations(
            "sprite.Direction = LeftDirection\n\
             sprite.Variables[\"Angle\"] = x * 2\n\
             sprite.Hitbox.Top = 4\n\
             sprite.Animation = 1 + 1\n",
        )
        .unwrap();

        assert_eq!(
            op.instructions(),
            &[
                Instruction::Constant(Directive::LEFT_DIRECTION),
                Instruction::Directive(Directive::Direction),
                x(),
                Instruction::Constant(2.0),
                Instruction::Operator(Operator::Multiply),
                Instruction::Directive(Directive::Variable("Angle".to_owned())),
                Instruction::Constant(4.0),
                Instruction::Directive(Directive::HitboxTop),
                Instruction::Constant(1.0),
                Instruction::Constant(1.0),
                Instruction::Operator(Operator::Add),
                Instruction::Directive(Directive::Animation),
            ]
        );
        assert_eq!(op.validate(), Ok(0));
    }

    #[test]
    fn direction_accepts_expressions() {
        let op = parse_declarations("sprite.Direction = RightDirection - x").unwrap();

        assert_eq!(
            op.instructions(),
            &[
                Instruction::variable("RightDirection"),
                x(),
                Instruction::Operator(Operator::Subtract),
                Instruction::Directive(Directive::Direction),
            ]
        );
    }

    #[test]
    fn skips_unrecognized_lines() {
        let op = parse_declarations(
            "# comment\n\
             \n\
             sprite.Speed = 3\n\
             enemy.Hitbox.Top = 1\n\
             sprite.Hitbox.Bottom = 2\n\
             sprite.Variables[Angle] = 2\n\
             just some text\n\
             sprite.Hitbox.Top = 7",
        )
        .unwrap();

        assert_eq!(
            op.instructions(),
            &[
                Instruction::Constant(7.0),
                Instruction::Directive(Directive::HitboxTop),
            ]
        );
    }

    #[test]
    fn reports_errors_against_the_whole_text() {
        let error = parse_declarations("sprite.Hitbox.Top = 1\nsprite.Animation = 2 *").unwrap_err();

        let location = error.location().unwrap();

        assert_eq!((location.line, location.column), (2, 23));
        assert_eq!(location.index, 44);
    }

    #[test]
    fn missing_right_hand_side_is_an_error() {
        assert!(parse_declarations("sprite.Hitbox.Top =").is_err());
    }
}
