use derive_more::Display;

/// A position inside source text. `index` is the byte offset from the start of
/// the text, `line` and `column` are 1-based.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
#[display(fmt = "{line}:{column}")]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub index: usize,
}

impl Location {
    pub const fn new(line: usize, column: usize, index: usize) -> Location {
        Location {
            line,
            column,
            index,
        }
    }

    /// Resolves a byte offset of `input` into a full location.
    pub fn of(input: &str, index: usize) -> Location {
        let mut location = Location::default();

        for (offset, ch) in input.char_indices() {
            if offset >= index {
                break;
            }

            if ch == '\n' {
                location.line += 1;
                location.column = 1;
            } else {
                location.column += 1;
            }
        }

        location.index = index.min(input.len());

        location
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_lines_and_columns() {
        let input = "a = 1\nsprite.Hitbox.Top = )";

        assert_eq!(Location::of(input, 0), Location::new(1, 1, 0));
        assert_eq!(Location::of(input, 4), Location::new(1, 5, 4));
        assert_eq!(Location::of(input, 26), Location::new(2, 21, 26));
    }

    #[test]
    fn clamps_past_the_end() {
        assert_eq!(Location::of("2 +", 10), Location::new(1, 4, 3));
    }
}
