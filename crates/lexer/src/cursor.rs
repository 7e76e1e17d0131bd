use crate::span::Span;

use std::str::Chars;

#[derive(Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(chars: Chars<'a>) -> Cursor<'a> {
        Cursor { chars, pos: 0 }
    }

    /// Consumes one character, advancing `pos` by its UTF-8 width.
    #[inline]
    pub fn consume(&mut self) -> Option<char> {
        let ch = self.chars.next()?;

        self.pos += ch.len_utf8();

        Some(ch)
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.pos, self.pos)
    }
}
