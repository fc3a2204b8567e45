//! # nbt_codec
//!
//! Codecs for the Named Binary Tag (NBT) format: a typed tree of twelve
//! payload kinds used to store game world and entity data.
//!
//! ## Representations
//!
//! - **Binary**: the compact wire layout, big-endian (Java edition) or
//!   little-endian (Bedrock edition), optionally gzip- or zlib-compressed
//! - **Stringified (SNBT)**: a human-editable text notation with typed
//!   number suffixes, typed arrays and operator calls like `uuid(...)`
//! - **Generic**: a JSON-like [`Value`] tree, classified into the narrowest
//!   payload kinds on the way in
//!
//! All three meet in the same value model: [`Payload`] for values and
//! [`Tag`] for named values, with the format's limits checked whenever a
//! value is built.
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! nbt_codec = "0.1"
//! ```
//!
//! ### Text to binary and back
//!
//! ```rust
//! use nbt_codec::{from_bytes, from_snbt_tag, to_bytes, BinaryOptions, Payload};
//!
//! let root = from_snbt_tag("{name: 'Steve', level: 30, pos: [I; 1, 64, -3]}").unwrap();
//!
//! let bytes = to_bytes(&root, &BinaryOptions::java()).unwrap();
//! assert_eq!(&bytes[..2], &[0x1f, 0x8b]); // gzip by default
//!
//! let back = from_bytes(&bytes, &BinaryOptions::java()).unwrap();
//! assert_eq!(back, root);
//! assert_eq!(back.payload().get("level"), Some(&Payload::Int(30)));
//! ```
//!
//! ### Formatting text
//!
//! ```rust
//! use nbt_codec::{from_snbt, to_snbt, to_snbt_with_options, SnbtOptions};
//!
//! let payload = from_snbt("{foo: 1b, bar: [I; 1, 2, 3]}").unwrap();
//! assert_eq!(to_snbt(&payload), "{ foo: 1b, bar: [I; 1, 2, 3] }");
//! assert_eq!(
//!     to_snbt_with_options(&payload, &SnbtOptions::compact()),
//!     "{foo:1b,bar:[I;1,2,3]}"
//! );
//! ```
//!
//! ### Working with JSON-like data
//!
//! ```rust
//! use nbt_codec::{from_value, to_value, value, Payload};
//!
//! let payload = from_value(&value!({"hp": 300, "tags": ["a", "b"]})).unwrap();
//! assert_eq!(payload.get("hp"), Some(&Payload::Short(300)));
//! assert_eq!(to_value(&payload), value!({"hp": 300, "tags": ["a", "b"]}));
//! ```
//!
//! ## Limits
//!
//! - Strings and names: at most 65535 UTF-8 bytes
//! - Arrays and lists: at most 2^31 - 1 elements
//! - Nesting: [`DEFAULT_MAX_DEPTH`] levels unless configured otherwise
//!
//! ## Logging
//!
//! The codecs emit `tracing` events at `debug` and `trace` level. No
//! subscriber is installed.

pub mod binary;
pub mod error;
pub mod generic;
pub mod macros;
pub mod map;
pub mod options;
pub mod payload;
pub mod snbt;
pub mod tag;
pub mod value;

pub use error::{Error, Result};
pub use map::ValueMap;
pub use options::{
    BinaryOptions, Compression, Edition, ParseOptions, QuoteStyle, SnbtMode, SnbtOptions,
    DEFAULT_MAX_DEPTH,
};
pub use payload::{Payload, TagId, MAX_ARRAY_LEN, MAX_STRING_LEN};
pub use tag::Tag;
pub use value::{Number, Value};

pub use generic::{from_value, tag_from_value, tag_to_value, to_value};

use std::io;

/// Decodes a binary document into a root tag.
///
/// See [`binary::from_bytes`].
///
/// # Errors
///
/// Returns a format error for truncated or malformed data, an
/// [`Error::UnknownCompression`] when automatic detection fails, and
/// [`Error::DepthLimitExceeded`] for documents nested too deeply.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_bytes(data: &[u8], options: &BinaryOptions) -> Result<Tag> {
    binary::from_bytes(data, options)
}

/// Encodes a tag as a binary document, compressed per `options`.
///
/// # Errors
///
/// Returns a validation error if the tree breaks a value model limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes(tag: &Tag, options: &BinaryOptions) -> Result<Vec<u8>> {
    binary::to_bytes(tag, options)
}

/// Reads a whole binary document from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{from_reader, BinaryOptions};
/// use std::io::Cursor;
///
/// let data = Cursor::new(vec![0x0a, 0x00, 0x00, 0x00]);
/// let root = from_reader(data, &BinaryOptions::java()).unwrap();
/// assert!(root.payload().as_compound().unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns an I/O error if reading fails, otherwise as [`from_bytes`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R, options: &BinaryOptions) -> Result<Tag>
where
    R: io::Read,
{
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    from_bytes(&data, options)
}

/// Encodes a tag and writes the binary document to an I/O stream.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{to_writer, BinaryOptions, Compression, Payload, Tag};
///
/// let root = Tag::root(Payload::compound(vec![])).unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &root, &BinaryOptions::bedrock().with_compression(Compression::None)).unwrap();
/// assert_eq!(buffer, vec![0x0a, 0x00, 0x00, 0x00]);
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, tag: &Tag, options: &BinaryOptions) -> Result<()>
where
    W: io::Write,
{
    let bytes = to_bytes(tag, options)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Parses stringified notation into a payload.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{from_snbt, Payload};
///
/// assert_eq!(from_snbt("[1s, 2s]").unwrap(), Payload::List(vec![Payload::Short(1), Payload::Short(2)]));
/// ```
///
/// # Errors
///
/// Returns a syntax error with the offending character offset for
/// malformed text, and a validation error for values that break the
/// value model.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_snbt(input: &str) -> Result<Payload> {
    snbt::from_str(input)
}

/// Parses stringified notation that must describe a compound, returned as
/// a root tag.
///
/// # Errors
///
/// As [`from_snbt`], plus a validation error when the value is not a compound.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_snbt_tag(input: &str) -> Result<Tag> {
    snbt::tag_from_str(input)
}

/// Renders a payload with the default [`SnbtOptions`].
#[must_use]
pub fn to_snbt(payload: &Payload) -> String {
    snbt::to_string(payload, &SnbtOptions::default())
}

/// Renders a payload with custom options.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{to_snbt_with_options, Payload, SnbtOptions};
///
/// let options = SnbtOptions::new().with_bool_literals(true);
/// assert_eq!(to_snbt_with_options(&Payload::Byte(1), &options), "true");
/// ```
#[must_use]
pub fn to_snbt_with_options(payload: &Payload, options: &SnbtOptions) -> String {
    snbt::to_string(payload, options)
}
