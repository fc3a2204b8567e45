//! A forward/backward scanner over text input.
//!
//! [`StringCursor`] keeps an explicit byte position into a borrowed `&str`
//! and always stops on character boundaries. Positions reported in errors
//! are character offsets, so they stay meaningful for non-ASCII input.

use crate::{Error, Result};

/// Scanner state: the borrowed input plus the current byte position.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::snbt::StringCursor;
///
/// let mut cursor = StringCursor::new("  abc123;");
/// cursor.skip_whitespace();
/// assert_eq!(cursor.take_while(|c| c.is_ascii_alphabetic()), "abc");
/// assert_eq!(cursor.take_while(|c| c.is_ascii_digit()), "123");
/// assert_eq!(cursor.expect(&[';']).unwrap(), ';');
/// assert!(cursor.at_end());
/// ```
#[derive(Clone, Debug)]
pub struct StringCursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> StringCursor<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        StringCursor { input, position: 0 }
    }

    /// The whole input, independent of the position.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// The current byte position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves to a byte position previously returned by [`position`](Self::position).
    ///
    /// Positions past the end clamp to the end.
    pub fn set_position(&mut self, position: usize) {
        let mut position = position.min(self.input.len());
        while !self.input.is_char_boundary(position) {
            position -= 1;
        }
        self.position = position;
    }

    /// The current position counted in characters.
    #[must_use]
    pub fn char_offset(&self) -> usize {
        self.char_offset_of(self.position)
    }

    fn char_offset_of(&self, position: usize) -> usize {
        self.input[..position].chars().count()
    }

    /// Everything from the current position on.
    #[inline]
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    #[inline]
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `n` places ahead; `peek_nth(0)` is [`peek`](Self::peek).
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Steps back over one character and returns it.
    pub fn prev(&mut self) -> Option<char> {
        let ch = self.input[..self.position].chars().next_back()?;
        self.position -= ch.len_utf8();
        Some(ch)
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    /// Consumes the longest run of characters matching `pred`.
    pub fn take_while<P>(&mut self, mut pred: P) -> &'a str
    where
        P: FnMut(char) -> bool,
    {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.position += ch.len_utf8();
        }
        &self.input[start..self.position]
    }

    /// Consumes `ch` if it is next.
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.position += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes the next character, which must be one of `expected`.
    pub fn expect(&mut self, expected: &[char]) -> Result<char> {
        match self.peek() {
            Some(ch) if expected.contains(&ch) => {
                self.position += ch.len_utf8();
                Ok(ch)
            }
            found => {
                let expected: Vec<String> = expected.iter().map(|c| format!("'{}'", c)).collect();
                let found = found.map_or_else(|| "end of input".to_string(), |c| format!("'{}'", c));
                Err(self.error(&format!(
                    "Expected {} but found {}",
                    expected.join(" or "),
                    found
                )))
            }
        }
    }

    /// A syntax error at the current position.
    #[must_use]
    pub fn error(&self, msg: &str) -> Error {
        self.error_at(self.position, msg)
    }

    /// A syntax error at an earlier byte position.
    #[must_use]
    pub fn error_at(&self, position: usize, msg: &str) -> Error {
        Error::syntax(msg, self.input, self.char_offset_of(position.min(self.input.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_and_backward() {
        let mut cursor = StringCursor::new("aé");
        assert_eq!(cursor.prev(), None);
        assert_eq!(cursor.next(), Some('a'));
        assert_eq!(cursor.next(), Some('é'));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.char_offset(), 2);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.prev(), Some('é'));
        assert_eq!(cursor.rest(), "é");
    }

    #[test]
    fn test_lookahead() {
        let cursor = StringCursor::new("[I;");
        assert_eq!(cursor.peek(), Some('['));
        assert_eq!(cursor.peek_nth(2), Some(';'));
        assert_eq!(cursor.peek_nth(3), None);
    }

    #[test]
    fn test_error_uses_char_offset() {
        let mut cursor = StringCursor::new("éé?");
        cursor.take_while(|c| c == 'é');
        let err = cursor.expect(&[',', '}']).unwrap_err();
        assert_eq!(err.syntax_index(), Some(2));
        assert!(err.to_string().contains("Expected ',' or '}' but found '?'"));
    }

    #[test]
    fn test_expect_at_end() {
        let mut cursor = StringCursor::new("");
        let err = cursor.expect(&[']']).unwrap_err();
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn test_set_position_snaps_to_boundary() {
        let mut cursor = StringCursor::new("é!");
        cursor.set_position(1);
        assert_eq!(cursor.position(), 0);
        cursor.set_position(99);
        assert!(cursor.at_end());
    }
}
