//! Forward-only text cursor with save/restore.

use crate::error::Error;

/// A position captured by [`TextCursor::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavePoint(usize);

/// A cursor over a borrowed text.
///
/// The cursor only moves forward, except through [`TextCursor::restore`],
/// which is how parsers backtrack after a failed alternative.
#[derive(Debug, Clone)]
pub struct TextCursor<'a> {
    text: &'a str,
    /// Byte offset into `text`, always on a char boundary.
    pos: usize,
}

impl<'a> TextCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// The complete text, including what has been consumed.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The unconsumed remainder.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes and returns the next character.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character if it satisfies `predicate`.
    pub fn next_if(&mut self, predicate: impl FnOnce(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(c) if predicate(c) => {
                self.pos += c.len_utf8();
                Some(c)
            }
            _ => None,
        }
    }

    /// Consumes `c` if it is the next character.
    pub fn eat(&mut self, c: char) -> bool {
        self.next_if(|n| n == c).is_some()
    }

    /// Consumes characters while `predicate` holds, returning the consumed slice.
    pub fn take_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.next_if(&mut predicate).is_some() {}
        &self.text[start..self.pos]
    }

    pub fn save(&self) -> SavePoint {
        SavePoint(self.pos)
    }

    pub fn restore(&mut self, save: SavePoint) {
        self.pos = save.0;
    }

    /// Text consumed since `save`.
    pub fn since(&self, save: SavePoint) -> &'a str {
        &self.text[save.0..self.pos]
    }

    /// Current position counted in characters from the start of the text.
    pub fn position(&self) -> usize {
        self.text[..self.pos].chars().count()
    }

    /// Error for the character under the cursor, or end of text when exhausted.
    pub fn invalid_character(&self) -> Error {
        if self.is_empty() {
            Error::end_of_text(self.text, "more text")
        } else {
            Error::invalid_character(self.text, self.position())
        }
    }

    /// Fails with [`TextCursor::invalid_character`] unless the cursor is exhausted.
    pub fn expect_empty(&self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.invalid_character())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_restore() {
        let mut cursor = TextCursor::new("abc");
        let save = cursor.save();
        assert_eq!(cursor.next_char(), Some('a'));
        assert_eq!(cursor.next_char(), Some('b'));
        cursor.restore(save);
        assert_eq!(cursor.remaining(), "abc");
    }

    #[test]
    fn test_take_while_and_since() {
        let mut cursor = TextCursor::new("abc123");
        let save = cursor.save();
        assert_eq!(cursor.take_while(|c| c.is_ascii_alphabetic()), "abc");
        assert_eq!(cursor.since(save), "abc");
        assert_eq!(cursor.remaining(), "123");
    }

    #[test]
    fn test_position_counts_chars() {
        let mut cursor = TextCursor::new("äöx");
        cursor.next_char();
        cursor.next_char();
        assert_eq!(cursor.position(), 2);
        assert_eq!(
            cursor.invalid_character(),
            Error::InvalidCharacter {
                text: "äöx".into(),
                position: 2,
                character: 'x',
            }
        );
    }

    #[test]
    fn test_invalid_character_at_end() {
        let mut cursor = TextCursor::new("a");
        cursor.next_char();
        assert!(matches!(cursor.invalid_character(), Error::EndOfText { .. }));
        assert!(cursor.expect_empty().is_ok());
    }
}
