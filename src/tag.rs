//! Named tags.
//!
//! A [`Tag`] pairs a name with one [`Payload`]. A *root* tag stands for a
//! whole document: its name is empty and its payload is a compound. Both
//! rules, and the 65535-byte name limit, are checked when the tag is built
//! and whenever its name or payload is replaced.

use crate::options::{BinaryOptions, SnbtOptions};
use crate::payload::{check_name_len, Payload, TagId};
use crate::value::Value;
use crate::{Error, Result};
use std::fmt;

/// A name paired with a payload, optionally marked as a document root.
///
/// Equality compares name and payload; the root marker is not part of it.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{Payload, Tag};
///
/// let health = Tag::new("Health", Payload::Float(20.0)).unwrap();
/// assert_eq!(health.name(), "Health");
/// assert!(!health.is_root());
///
/// let root = Tag::root(Payload::compound(vec![health])).unwrap();
/// assert!(root.is_root());
///
/// // a root must hold a compound
/// assert!(Tag::root(Payload::Int(1)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Tag {
    name: String,
    payload: Payload,
    root: bool,
}

impl Tag {
    /// Creates a named, non-root tag.
    pub fn new(name: impl Into<String>, payload: Payload) -> Result<Self> {
        Self::with_root_flag(name, payload, false)
    }

    /// Creates a document root: empty name, compound payload.
    pub fn root(payload: Payload) -> Result<Self> {
        Self::with_root_flag(String::new(), payload, true)
    }

    /// Creates a tag with an explicit root marker.
    pub fn with_root_flag(name: impl Into<String>, payload: Payload, root: bool) -> Result<Self> {
        let name = name.into();
        validate(&name, &payload, root)?;
        payload.validate()?;
        Ok(Tag {
            name,
            payload,
            root,
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Renames the tag, re-running the construction checks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::{Payload, Tag};
    ///
    /// let mut tag = Tag::new("a", Payload::Byte(1)).unwrap();
    /// tag.set_name("b").unwrap();
    /// assert_eq!(tag.name(), "b");
    ///
    /// let mut root = Tag::root(Payload::compound(vec![])).unwrap();
    /// assert!(root.set_name("named").is_err());
    /// assert_eq!(root.name(), "");
    /// ```
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate(&name, &self.payload, self.root)?;
        self.name = name;
        Ok(())
    }

    /// Replaces the payload, re-running the construction checks.
    pub fn set_payload(&mut self, payload: Payload) -> Result<()> {
        validate(&self.name, &payload, self.root)?;
        payload.validate()?;
        self.payload = payload;
        Ok(())
    }

    #[must_use]
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Turns this tag into a document root, dropping its name.
    pub fn into_root(self) -> Result<Self> {
        Tag::root(self.payload)
    }

    /// Encodes this tag in the binary format.
    pub fn to_bytes(&self, options: &BinaryOptions) -> Result<Vec<u8>> {
        crate::binary::to_bytes(self, options)
    }

    /// Renders this tag in stringified notation.
    ///
    /// A root renders as its compound; any other tag renders as a
    /// single-member compound `{name: value}`.
    #[must_use]
    pub fn to_snbt(&self, options: &SnbtOptions) -> String {
        crate::snbt::ser::tag_to_string(self, options)
    }

    /// Converts this tag into the generic value tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        crate::generic::tag_to_value(self)
    }
}

fn validate(name: &str, payload: &Payload, root: bool) -> Result<()> {
    check_name_len(name)?;
    if root && !name.is_empty() {
        return Err(Error::validation("Root tag name must be empty"));
    }
    if root && payload.tag_id() != TagId::Compound {
        return Err(Error::validation(format!(
            "Root tag must be a compound tag, got {}",
            payload.tag_id()
        )));
    }
    Ok(())
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.payload == other.payload
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_snbt(&SnbtOptions::default()))
    }
}
