use std::ops::Add;

/// Byte range `start..end` of a token in the lexed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn text<'s>(&self, input: &'s str) -> &'s str {
        &input[self.start..self.end]
    }

    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }
}

impl Add<usize> for Span {
    type Output = Span;

    fn add(self, rhs: usize) -> Self::Output {
        Span {
            start: self.start + rhs,
            end: self.end + rhs,
        }
    }
}
