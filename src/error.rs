//! Error types for every codec in the crate.
//!
//! All fallible operations return [`Result`], whose error side is a single
//! [`Error`] enum. The variants map onto the three failure families of the
//! format:
//!
//! - **Validation**: a value model invariant was violated (string too long,
//!   heterogeneous list, non-finite float, bad operator argument, ...)
//! - **Format**: malformed or truncated binary input, including input whose
//!   compression cannot be detected
//! - **Syntax**: malformed stringified text, carrying the full input and the
//!   character offset of the failure
//!
//! Two auxiliary variants cover nesting that exceeds the configured depth
//! limit and failures inside the compression streams.
//!
//! ## Examples
//!
//! ```rust
//! use nbt_codec::{from_snbt, Error};
//!
//! let err = from_snbt("{a: [B; 1, 2, 300]}").unwrap_err();
//! assert!(err.is_syntax());
//! assert_eq!(err.syntax_index(), Some(14));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents every failure the codecs can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value model invariant was violated
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed or truncated binary data
    #[error("Format error: {0}")]
    Format(String),

    /// Binary data whose compression could not be detected
    #[error("Unknown compression: {0}")]
    UnknownCompression(String),

    /// Malformed stringified text
    #[error("Syntax error at index {index}: {msg}\n{}", excerpt(.input, .index))]
    Syntax {
        msg: String,
        input: String,
        index: usize,
    },

    /// Compound/list nesting deeper than the configured maximum
    #[error("Nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Failure while inflating, deflating, reading or writing
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Creates a validation error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::Error;
    ///
    /// let err = Error::validation("list contains different types");
    /// assert!(err.is_validation());
    /// ```
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Creates a binary format error.
    pub fn format<T: fmt::Display>(msg: T) -> Self {
        Error::Format(msg.to_string())
    }

    /// Creates a syntax error pointing at `index` (a character offset) in `input`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::Error;
    ///
    /// let err = Error::syntax("expected ':'", "{a 1}", 3);
    /// assert!(err.to_string().contains("index 3"));
    /// assert!(err.to_string().contains("{a 1}"));
    /// ```
    pub fn syntax(msg: &str, input: &str, index: usize) -> Self {
        Error::Syntax {
            msg: msg.to_string(),
            input: input.to_string(),
            index,
        }
    }

    /// Creates an I/O error for compression or reader/writer failures.
    pub fn io<T: fmt::Display>(msg: T) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for value model violations.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns `true` for malformed binary input, including undetectable compression.
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_) | Error::UnknownCompression(_))
    }

    /// Returns `true` for malformed text input.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// The character offset of a syntax error, if this is one.
    #[must_use]
    pub fn syntax_index(&self) -> Option<usize> {
        match self {
            Error::Syntax { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Renders the line around `index` with a caret under the failing character.
fn excerpt(input: &str, index: &usize) -> String {
    const RADIUS: usize = 24;

    let chars: Vec<char> = input.chars().collect();
    let index = (*index).min(chars.len());
    let start = index.saturating_sub(RADIUS);
    let end = (index + RADIUS).min(chars.len());

    let mut line = String::new();
    if start > 0 {
        line.push_str("...");
    }
    let prefix_width = line.chars().count();
    for ch in &chars[start..end] {
        // keep the excerpt on one line so the caret lines up
        line.push(if ch.is_control() { ' ' } else { *ch });
    }
    if end < chars.len() {
        line.push_str("...");
    }

    format!("{}\n{}^", line, " ".repeat(prefix_width + index - start))
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_points_at_index() {
        let rendered = excerpt("{a: 1b, b: ?}", &11);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("{a: 1b, b: ?}"));
        assert_eq!(lines.next(), Some("           ^"));
    }

    #[test]
    fn test_excerpt_truncates_long_input() {
        let input = format!("{}?{}", "x".repeat(100), "y".repeat(100));
        let rendered = excerpt(&input, &100);
        let first = rendered.lines().next().unwrap();
        assert!(first.starts_with("..."));
        assert!(first.ends_with("..."));
        let caret = rendered.lines().nth(1).unwrap();
        assert_eq!(first.chars().nth(caret.len() - 1), Some('?'));
    }

    #[test]
    fn test_classification() {
        assert!(Error::format("truncated").is_format());
        assert!(Error::UnknownCompression("0x50".into()).is_format());
        assert!(!Error::validation("x").is_format());
        assert_eq!(Error::syntax("bad", "abc", 2).syntax_index(), Some(2));
        assert_eq!(Error::io("boom").syntax_index(), None);
    }
}
