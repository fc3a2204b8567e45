//! Configuration for the binary and text codecs.
//!
//! - [`BinaryOptions`]: byte order ([`Edition`]), [`Compression`] and the
//!   nesting limit for the binary format
//! - [`SnbtOptions`]: layout ([`SnbtMode`]), quoting ([`QuoteStyle`]) and
//!   the other knobs of the text serializer
//! - [`ParseOptions`]: the nesting limit for the text parser
//!
//! Every option has a `with_*` builder method and can be set independently.
//!
//! ## Examples
//!
//! ```rust
//! use nbt_codec::{BinaryOptions, Compression, QuoteStyle, SnbtMode, SnbtOptions};
//!
//! let binary = BinaryOptions::bedrock().with_compression(Compression::None);
//!
//! let text = SnbtOptions::new()
//!     .with_mode(SnbtMode::Multiline)
//!     .with_indent("  ")
//!     .with_quote(QuoteStyle::ForceSingle);
//! ```

/// Nesting limit applied when no other is configured.
///
/// Depth counts compounds, lists and arrays; a document root is depth 1.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Byte order of the binary format.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::Edition;
///
/// assert!(!Edition::Java.is_little_endian());
/// assert!(Edition::Bedrock.is_little_endian());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Edition {
    /// Big-endian fields
    #[default]
    Java,
    /// Little-endian fields
    Bedrock,
}

impl Edition {
    #[inline]
    #[must_use]
    pub const fn is_little_endian(self) -> bool {
        matches!(self, Edition::Bedrock)
    }
}

/// Whole-buffer compression of a binary document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    /// Decoding sniffs the first bytes: `1F 8B` is gzip, a leading valid tag
    /// id is uncompressed, anything else is rejected. Encoding uses gzip.
    #[default]
    Auto,
    Gzip,
    Zlib,
    None,
}

/// Options for [`crate::from_bytes`] and [`crate::to_bytes`].
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{BinaryOptions, Compression, Edition};
///
/// let options = BinaryOptions::java();
/// assert_eq!(options.edition, Edition::Java);
/// assert_eq!(options.compression, Compression::Auto);
///
/// let options = BinaryOptions::new(Edition::Bedrock).with_max_depth(64);
/// assert_eq!(options.max_depth, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryOptions {
    pub edition: Edition,
    pub compression: Compression,
    pub max_depth: usize,
}

impl Default for BinaryOptions {
    fn default() -> Self {
        BinaryOptions {
            edition: Edition::default(),
            compression: Compression::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BinaryOptions {
    #[must_use]
    pub fn new(edition: Edition) -> Self {
        BinaryOptions {
            edition,
            ..Default::default()
        }
    }

    /// Big-endian options with automatic compression.
    #[must_use]
    pub fn java() -> Self {
        Self::new(Edition::Java)
    }

    /// Little-endian options with automatic compression.
    #[must_use]
    pub fn bedrock() -> Self {
        Self::new(Edition::Bedrock)
    }

    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Layout of the stringified notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SnbtMode {
    /// No optional whitespace: `{a:1b,b:[I;1,2]}`
    Compact,
    /// One line with spacing: `{ a: 1b, b: [I; 1, 2] }`
    #[default]
    Pretty,
    /// Containers whose pretty form exceeds the line width are broken
    /// into one member per line, indented.
    Multiline,
}

/// Which quote character the serializer wraps strings in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum QuoteStyle {
    /// Double quotes, unless the string contains `"` and no `'`
    #[default]
    PreferDouble,
    /// Single quotes, unless the string contains `'` and no `"`
    PreferSingle,
    ForceDouble,
    ForceSingle,
}

impl QuoteStyle {
    /// Picks the quote character for `s`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::QuoteStyle;
    ///
    /// assert_eq!(QuoteStyle::PreferDouble.quote_for("plain"), '"');
    /// assert_eq!(QuoteStyle::PreferDouble.quote_for("say \"hi\""), '\'');
    /// assert_eq!(QuoteStyle::ForceDouble.quote_for("say \"hi\""), '"');
    /// ```
    #[must_use]
    pub fn quote_for(self, s: &str) -> char {
        match self {
            QuoteStyle::PreferDouble if s.contains('"') && !s.contains('\'') => '\'',
            QuoteStyle::PreferDouble | QuoteStyle::ForceDouble => '"',
            QuoteStyle::PreferSingle if s.contains('\'') && !s.contains('"') => '"',
            QuoteStyle::PreferSingle | QuoteStyle::ForceSingle => '\'',
        }
    }
}

/// Options for the stringified-notation serializer.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{SnbtMode, SnbtOptions, QuoteStyle};
///
/// let options = SnbtOptions::default();
/// assert_eq!(options.mode, SnbtMode::Pretty);
/// assert_eq!(options.quote, QuoteStyle::PreferDouble);
/// assert_eq!(options.indent, "    ");
/// assert!(options.unquoted_keys);
/// assert!(!options.bool_literals);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnbtOptions {
    pub mode: SnbtMode,
    /// One level of indentation in [`SnbtMode::Multiline`]
    pub indent: String,
    pub quote: QuoteStyle,
    /// Write compound member names bare when they match `[A-Za-z_.][A-Za-z0-9_.+-]*`
    pub unquoted_keys: bool,
    /// Write string values bare under the same rule, except `true`/`false`
    pub unquoted_strings: bool,
    /// Write Byte payloads valued 0 or 1 as `false`/`true`
    pub bool_literals: bool,
    /// Longest pretty rendering a multiline container keeps on one line
    pub line_width: usize,
}

impl Default for SnbtOptions {
    fn default() -> Self {
        SnbtOptions {
            mode: SnbtMode::default(),
            indent: "    ".to_string(),
            quote: QuoteStyle::default(),
            unquoted_keys: true,
            unquoted_strings: false,
            bool_literals: false,
            line_width: 33,
        }
    }
}

impl SnbtOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compact output, everything else default.
    #[must_use]
    pub fn compact() -> Self {
        Self::new().with_mode(SnbtMode::Compact)
    }

    /// Multiline output, everything else default.
    #[must_use]
    pub fn multiline() -> Self {
        Self::new().with_mode(SnbtMode::Multiline)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: SnbtMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    #[must_use]
    pub fn with_quote(mut self, quote: QuoteStyle) -> Self {
        self.quote = quote;
        self
    }

    #[must_use]
    pub fn with_unquoted_keys(mut self, unquoted: bool) -> Self {
        self.unquoted_keys = unquoted;
        self
    }

    #[must_use]
    pub fn with_unquoted_strings(mut self, unquoted: bool) -> Self {
        self.unquoted_strings = unquoted;
        self
    }

    #[must_use]
    pub fn with_bool_literals(mut self, bool_literals: bool) -> Self {
        self.bool_literals = bool_literals;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }
}

/// Nesting limit for the stringified-notation parser and for generic
/// value conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_for_prefer_single() {
        assert_eq!(QuoteStyle::PreferSingle.quote_for("plain"), '\'');
        assert_eq!(QuoteStyle::PreferSingle.quote_for("it's"), '"');
        assert_eq!(QuoteStyle::PreferSingle.quote_for("it's \"x\""), '\'');
        assert_eq!(QuoteStyle::ForceSingle.quote_for("it's"), '\'');
    }

    #[test]
    fn test_builders_are_independent() {
        let options = SnbtOptions::compact()
            .with_bool_literals(true)
            .with_line_width(80)
            .with_unquoted_keys(false)
            .with_unquoted_strings(true);
        assert_eq!(options.mode, SnbtMode::Compact);
        assert!(options.bool_literals);
        assert_eq!(options.line_width, 80);
        assert!(!options.unquoted_keys);
        assert!(options.unquoted_strings);
        assert_eq!(options.quote, QuoteStyle::PreferDouble);
    }

    #[test]
    fn test_binary_defaults() {
        let options = BinaryOptions::default();
        assert_eq!(options.edition, Edition::Java);
        assert_eq!(options.compression, Compression::Auto);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ParseOptions::new().max_depth, DEFAULT_MAX_DEPTH);
    }
}
