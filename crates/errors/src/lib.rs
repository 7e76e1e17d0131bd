pub use opal_location::Location;

use derive_more::{Display, Error};

#[derive(Error, Display, Debug, Clone, PartialEq)]
pub enum OpalError {
    /// Malformed expression or declaration text. `token` is the offending
    /// token as written in the input.
    #[display(fmt = "{location}: {content}")]
    Parse {
        location: Location,
        token: String,
        content: String,
    },

    /// Malformed bytecode. `offset` is the byte at which decoding stopped.
    #[display(fmt = "byte {offset}: {content}")]
    Decode { offset: usize, content: String },

    /// Encoding an operation that cannot be expressed in bytecode.
    #[display(fmt = "unable to encode {content}")]
    Encode { content: String },

    #[display(fmt = "instruction {position} ({instruction}): stack underflow")]
    StackUnderflow {
        position: usize,
        instruction: String,
    },

    #[display(fmt = "operation leaves {remaining} values on the stack")]
    Unbalanced { remaining: usize },
}

impl OpalError {
    pub fn new_parse(location: Location, token: &str, content: String) -> OpalError {
        OpalError::Parse {
            location,
            token: token.to_owned(),
            content,
        }
    }

    pub fn unexpected(location: Location, stmt: &str, got: &str) -> OpalError {
        OpalError::new_parse(location, got, format!("unexpected {} '{}'", stmt, got))
    }

    pub fn expected(location: Location, expected: &str, got: &str) -> OpalError {
        OpalError::new_parse(location, got, format!("expected {} got '{}'", expected, got))
    }

    pub fn undefined(location: Location, stmt: &str, identifier: &str) -> OpalError {
        OpalError::new_parse(
            location,
            identifier,
            format!("undefined {} '{}'", stmt, identifier),
        )
    }

    pub fn mismatched(location: Location, stmt: &str, got: &str) -> OpalError {
        OpalError::new_parse(location, got, format!("mismatched {}", stmt))
    }

    pub fn decode(offset: usize, content: String) -> OpalError {
        OpalError::Decode { offset, content }
    }

    pub fn unknown_tag(offset: usize, tag: u8) -> OpalError {
        let content = if tag.is_ascii_graphic() {
            format!("unknown tag '{}' (0x{:02x})", tag as char, tag)
        } else {
            format!("unknown tag 0x{:02x}", tag)
        };

        OpalError::decode(offset, content)
    }

    pub fn truncated(offset: usize, needed: usize, remaining: usize) -> OpalError {
        OpalError::decode(
            offset,
            format!(
                "truncated payload, {} bytes needed but {} remaining",
                needed, remaining
            ),
        )
    }

    pub fn underflow(position: usize, instruction: &impl ToString) -> OpalError {
        OpalError::StackUnderflow {
            position,
            instruction: instruction.to_string(),
        }
    }

    /// The source location of a parse error.
    pub fn location(&self) -> Option<Location> {
        match self {
            OpalError::Parse { location, .. } => Some(*location),
            _ => None,
        }
    }

    /// The offending token of a parse error.
    pub fn token(&self) -> Option<&str> {
        match self {
            OpalError::Parse { token, .. } => Some(token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_display_their_location() {
        let error = OpalError::unexpected(Location::new(1, 9, 8), "token", ")");

        assert_eq!(error.to_string(), "1:9: unexpected token ')'");
        assert_eq!(error.location().map(|l| l.index), Some(8));
        assert_eq!(error.token(), Some(")"));
    }

    #[test]
    fn unknown_tags_name_printable_bytes() {
        assert_eq!(
            OpalError::unknown_tag(3, b'Q').to_string(),
            "byte 3: unknown tag 'Q' (0x51)"
        );
        assert_eq!(
            OpalError::unknown_tag(0, 0x01).to_string(),
            "byte 0: unknown tag 0x01"
        );
    }
}
