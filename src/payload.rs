//! Typed payloads of the value model.
//!
//! A [`Payload`] is one of the twelve value kinds the format knows about,
//! identified on the wire by its [`TagId`]. Scalars carry native-width
//! integers and floats; arrays carry native vectors; a [`Payload::List`]
//! holds payloads that all share one tag id; a [`Payload::Compound`] holds
//! named [`Tag`]s in order.
//!
//! ## Validation
//!
//! The invariants that the Rust types cannot express (finite floats, the
//! 65535-byte string limit, array lengths below 2³¹, homogeneous lists) are
//! checked by the fallible constructors ([`Payload::float`],
//! [`Payload::string`], [`Payload::list`], ...) and by [`Payload::replace`].
//! Every codec builds payloads through these constructors, and the binary
//! encoder re-checks each node through [`Payload::validate`] so a
//! hand-assembled variant can never produce a corrupt document.
//!
//! ```rust
//! use nbt_codec::{Payload, TagId};
//!
//! let list = Payload::list(vec![Payload::Int(1), Payload::Int(2)]).unwrap();
//! assert_eq!(list.tag_id(), TagId::List);
//!
//! assert!(Payload::list(vec![Payload::Int(1), Payload::Byte(2)]).is_err());
//! assert!(Payload::float(f32::NAN).is_err());
//!
//! // integers entering through `integer` wrap to the target width
//! assert_eq!(Payload::integer(TagId::Byte, 128).unwrap(), Payload::Byte(-128));
//! ```

use crate::options::SnbtOptions;
use crate::tag::Tag;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Longest string (and tag name) in UTF-8 bytes.
pub const MAX_STRING_LEN: usize = 65_535;

/// Longest array or list; lengths are written as signed 32-bit counts.
pub const MAX_ARRAY_LEN: usize = i32::MAX as usize;

/// The one-byte discriminant written before every tag and list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TagId {
    End = 0x00,
    Byte = 0x01,
    Short = 0x02,
    Int = 0x03,
    Long = 0x04,
    Float = 0x05,
    Double = 0x06,
    ByteArray = 0x07,
    String = 0x08,
    List = 0x09,
    Compound = 0x0a,
    IntArray = 0x0b,
    LongArray = 0x0c,
}

impl TagId {
    /// The raw byte value of this id.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// A lowercase human-readable name, used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TagId::End => "end",
            TagId::Byte => "byte",
            TagId::Short => "short",
            TagId::Int => "int",
            TagId::Long => "long",
            TagId::Float => "float",
            TagId::Double => "double",
            TagId::ByteArray => "byte array",
            TagId::String => "string",
            TagId::List => "list",
            TagId::Compound => "compound",
            TagId::IntArray => "int array",
            TagId::LongArray => "long array",
        }
    }
}

impl TryFrom<u8> for TagId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0x00 => TagId::End,
            0x01 => TagId::Byte,
            0x02 => TagId::Short,
            0x03 => TagId::Int,
            0x04 => TagId::Long,
            0x05 => TagId::Float,
            0x06 => TagId::Double,
            0x07 => TagId::ByteArray,
            0x08 => TagId::String,
            0x09 => TagId::List,
            0x0a => TagId::Compound,
            0x0b => TagId::IntArray,
            0x0c => TagId::LongArray,
            other => return Err(Error::format(format!("Unknown tag id: {}", other))),
        })
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed value: scalar, numeric array, homogeneous list or compound.
///
/// Cloning is a full deep copy and equality is structural; compound members
/// compare in order, by name and payload.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{Payload, Tag};
///
/// let compound = Payload::compound(vec![
///     Tag::new("name", Payload::string("Steve").unwrap()).unwrap(),
///     Tag::new("level", Payload::Int(30)).unwrap(),
/// ]);
///
/// let copy = compound.clone();
/// assert_eq!(copy, compound);
/// assert_eq!(compound.get("level"), Some(&Payload::Int(30)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Payload>),
    Compound(Vec<Tag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Payload {
    /// Builds a Float, rejecting NaN and infinities.
    pub fn float(value: f32) -> Result<Self> {
        let payload = Payload::Float(value);
        payload.validate()?;
        Ok(payload)
    }

    /// Builds a Double, rejecting NaN and infinities.
    pub fn double(value: f64) -> Result<Self> {
        let payload = Payload::Double(value);
        payload.validate()?;
        Ok(payload)
    }

    /// Builds a String of at most [`MAX_STRING_LEN`] UTF-8 bytes.
    pub fn string(value: impl Into<String>) -> Result<Self> {
        let payload = Payload::String(value.into());
        payload.validate()?;
        Ok(payload)
    }

    pub fn byte_array(values: Vec<i8>) -> Result<Self> {
        let payload = Payload::ByteArray(values);
        payload.validate()?;
        Ok(payload)
    }

    pub fn int_array(values: Vec<i32>) -> Result<Self> {
        let payload = Payload::IntArray(values);
        payload.validate()?;
        Ok(payload)
    }

    pub fn long_array(values: Vec<i64>) -> Result<Self> {
        let payload = Payload::LongArray(values);
        payload.validate()?;
        Ok(payload)
    }

    /// Builds a List, requiring every element to share one tag id.
    ///
    /// An empty list is always valid.
    pub fn list(elements: Vec<Payload>) -> Result<Self> {
        let payload = Payload::List(elements);
        payload.validate()?;
        Ok(payload)
    }

    /// Builds a Compound. Member tags were validated when they were created.
    #[must_use]
    pub fn compound(tags: Vec<Tag>) -> Self {
        Payload::Compound(tags)
    }

    /// Builds an integral scalar of kind `id`, truncating `value` to the
    /// kind's width with two's-complement wraparound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::{Payload, TagId};
    ///
    /// assert_eq!(Payload::integer(TagId::Byte, 127).unwrap(), Payload::Byte(127));
    /// assert_eq!(Payload::integer(TagId::Short, 65_535).unwrap(), Payload::Short(-1));
    /// assert!(Payload::integer(TagId::String, 1).is_err());
    /// ```
    pub fn integer(id: TagId, value: i64) -> Result<Self> {
        match id {
            TagId::Byte => Ok(Payload::Byte(value as i8)),
            TagId::Short => Ok(Payload::Short(value as i16)),
            TagId::Int => Ok(Payload::Int(value as i32)),
            TagId::Long => Ok(Payload::Long(value)),
            other => Err(Error::validation(format!(
                "{} is not an integral payload kind",
                other
            ))),
        }
    }

    /// The tag id of this payload's variant.
    #[must_use]
    pub const fn tag_id(&self) -> TagId {
        match self {
            Payload::Byte(_) => TagId::Byte,
            Payload::Short(_) => TagId::Short,
            Payload::Int(_) => TagId::Int,
            Payload::Long(_) => TagId::Long,
            Payload::Float(_) => TagId::Float,
            Payload::Double(_) => TagId::Double,
            Payload::ByteArray(_) => TagId::ByteArray,
            Payload::String(_) => TagId::String,
            Payload::List(_) => TagId::List,
            Payload::Compound(_) => TagId::Compound,
            Payload::IntArray(_) => TagId::IntArray,
            Payload::LongArray(_) => TagId::LongArray,
        }
    }

    /// Checks this node's own invariant. Children of containers are not
    /// visited; they are checked when they are built or encoded.
    pub fn validate(&self) -> Result<()> {
        match self {
            Payload::Float(v) if !v.is_finite() => {
                Err(Error::validation(format!("Invalid number value: {}", v)))
            }
            Payload::Double(v) if !v.is_finite() => {
                Err(Error::validation(format!("Invalid number value: {}", v)))
            }
            Payload::String(s) => check_string_len("String", s),
            Payload::ByteArray(v) => check_array_len("Byte array", v.len()),
            Payload::IntArray(v) => check_array_len("Int array", v.len()),
            Payload::LongArray(v) => check_array_len("Long array", v.len()),
            Payload::List(elements) => {
                check_array_len("List", elements.len())?;
                check_homogeneous(elements)
            }
            _ => Ok(()),
        }
    }

    /// Replaces the value with `value`, which must be the same kind and pass
    /// the same validation as construction. Returns the previous value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::Payload;
    ///
    /// let mut payload = Payload::Double(1.0);
    /// assert_eq!(payload.replace(Payload::Double(2.5)).unwrap(), Payload::Double(1.0));
    /// assert!(payload.replace(Payload::Double(f64::INFINITY)).is_err());
    /// assert!(payload.replace(Payload::Int(3)).is_err());
    /// assert_eq!(payload, Payload::Double(2.5));
    /// ```
    pub fn replace(&mut self, value: Payload) -> Result<Payload> {
        if value.tag_id() != self.tag_id() {
            return Err(Error::validation(format!(
                "Cannot replace a {} payload with a {} payload",
                self.tag_id(),
                value.tag_id()
            )));
        }
        value.validate()?;
        Ok(std::mem::replace(self, value))
    }

    /// Returns `true` for the six numeric scalar kinds.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Payload::Byte(_)
                | Payload::Short(_)
                | Payload::Int(_)
                | Payload::Long(_)
                | Payload::Float(_)
                | Payload::Double(_)
        )
    }

    /// The value of an integral scalar, widened to `i64`.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Payload::Byte(v) => Some(*v as i64),
            Payload::Short(v) => Some(*v as i64),
            Payload::Int(v) => Some(*v as i64),
            Payload::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// The value of any numeric scalar as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Payload::Float(v) => Some(f64::from(*v)),
            Payload::Double(v) => Some(*v),
            other => other.as_i64().map(|v| v as f64),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }

    /// The member tags of a compound.
    #[must_use]
    pub fn as_compound(&self) -> Option<&[Tag]> {
        match self {
            Payload::Compound(tags) => Some(tags),
            _ => None,
        }
    }

    /// Looks up the first compound member called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Payload> {
        self.as_compound()?
            .iter()
            .find(|tag| tag.name() == name)
            .map(Tag::payload)
    }

    /// Packs a UUID into a four-element IntArray of big-endian 32-bit words,
    /// each reinterpreted as signed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::Payload;
    /// use uuid::Uuid;
    ///
    /// let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
    /// let payload = Payload::from_uuid(uuid);
    /// assert_eq!(
    ///     payload,
    ///     Payload::IntArray(vec![1_427_014_656, -493_141_548, -1_491_712_922, 1_430_519_808])
    /// );
    /// assert_eq!(payload.to_uuid(), Some(uuid));
    /// ```
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        let bits = uuid.as_u128();
        Payload::IntArray(vec![
            (bits >> 96) as u32 as i32,
            (bits >> 64) as u32 as i32,
            (bits >> 32) as u32 as i32,
            bits as u32 as i32,
        ])
    }

    /// Reassembles a UUID from a four-element IntArray.
    #[must_use]
    pub fn to_uuid(&self) -> Option<Uuid> {
        match self {
            Payload::IntArray(words) if words.len() == 4 => {
                let bits = words
                    .iter()
                    .fold(0u128, |acc, word| (acc << 32) | u128::from(*word as u32));
                Some(Uuid::from_u128(bits))
            }
            _ => None,
        }
    }

    /// Renders this payload in stringified notation.
    #[must_use]
    pub fn to_snbt(&self, options: &SnbtOptions) -> String {
        crate::snbt::ser::to_string(self, options)
    }
}

fn check_string_len(what: &str, s: &str) -> Result<()> {
    if s.len() > MAX_STRING_LEN {
        return Err(Error::validation(format!(
            "{} is longer than {} bytes ({} bytes)",
            what,
            MAX_STRING_LEN,
            s.len()
        )));
    }
    Ok(())
}

pub(crate) fn check_name_len(name: &str) -> Result<()> {
    check_string_len("Tag name", name)
}

fn check_array_len(what: &str, len: usize) -> Result<()> {
    if len > MAX_ARRAY_LEN {
        return Err(Error::validation(format!(
            "{} is longer than {} items ({} items)",
            what, MAX_ARRAY_LEN, len
        )));
    }
    Ok(())
}

fn check_homogeneous(elements: &[Payload]) -> Result<()> {
    let Some(first) = elements.first().map(Payload::tag_id) else {
        return Ok(());
    };
    if elements.iter().all(|p| p.tag_id() == first) {
        return Ok(());
    }

    let mut ids: Vec<u8> = elements.iter().map(|p| p.tag_id().as_u8()).collect();
    ids.sort_unstable();
    ids.dedup();
    let ids: Vec<String> = ids.iter().map(u8::to_string).collect();
    Err(Error::validation(format!(
        "List contains different types, tag ids: [{}]",
        ids.join(", ")
    )))
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_snbt(&SnbtOptions::default()))
    }
}

impl FromStr for Payload {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::snbt::de::from_str(s)
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Byte(i8::from(value))
    }
}

impl From<i8> for Payload {
    fn from(value: i8) -> Self {
        Payload::Byte(value)
    }
}

impl From<i16> for Payload {
    fn from(value: i16) -> Self {
        Payload::Short(value)
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Payload::Int(value)
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Long(value)
    }
}

impl From<Vec<Tag>> for Payload {
    fn from(tags: Vec<Tag>) -> Self {
        Payload::Compound(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_id_round_trips_through_u8() {
        for raw in 0u8..=12 {
            assert_eq!(TagId::try_from(raw).unwrap().as_u8(), raw);
        }
        assert!(TagId::try_from(13).unwrap_err().is_format());
    }

    #[test]
    fn test_integer_wraps_to_width() {
        assert_eq!(Payload::integer(TagId::Byte, 127).unwrap(), Payload::Byte(127));
        assert_eq!(Payload::integer(TagId::Byte, 128).unwrap(), Payload::Byte(-128));
        assert_eq!(Payload::integer(TagId::Byte, -129).unwrap(), Payload::Byte(127));
        assert_eq!(Payload::integer(TagId::Short, 32_768).unwrap(), Payload::Short(-32_768));
        assert_eq!(
            Payload::integer(TagId::Int, i64::from(u32::MAX)).unwrap(),
            Payload::Int(-1)
        );
        assert_eq!(Payload::integer(TagId::Long, i64::MIN).unwrap(), Payload::Long(i64::MIN));
    }

    #[test]
    fn test_non_finite_floats_rejected() {
        assert!(Payload::float(f32::INFINITY).unwrap_err().is_validation());
        assert!(Payload::float(f32::NEG_INFINITY).is_err());
        assert!(Payload::double(f64::NAN).is_err());
        assert_eq!(Payload::double(-0.5).unwrap(), Payload::Double(-0.5));
    }

    #[test]
    fn test_string_limit_counts_bytes() {
        assert!(Payload::string("a".repeat(MAX_STRING_LEN)).is_ok());
        assert!(Payload::string("a".repeat(MAX_STRING_LEN + 1)).is_err());
        // 'é' is two bytes, so 32768 of them overflow the limit
        assert!(Payload::string("é".repeat(32_768)).is_err());
        assert!(Payload::string("é".repeat(32_767)).is_ok());
    }

    #[test]
    fn test_array_length_limit() {
        assert!(check_array_len("List", MAX_ARRAY_LEN).is_ok());
        assert!(check_array_len("List", MAX_ARRAY_LEN + 1).is_err());
        assert_eq!(MAX_ARRAY_LEN, (1usize << 31) - 1);
    }

    #[test]
    fn test_list_homogeneity() {
        assert!(Payload::list(vec![]).is_ok());
        let err = Payload::list(vec![
            Payload::Int(1),
            Payload::Byte(1),
            Payload::Int(2),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::Validation("List contains different types, tag ids: [1, 3]".to_string())
        );
    }

    #[test]
    fn test_replace_revalidates() {
        let mut payload = Payload::string("short").unwrap();
        assert!(payload
            .replace(Payload::String("x".repeat(MAX_STRING_LEN + 1)))
            .is_err());
        assert_eq!(payload.as_str(), Some("short"));

        let mut list = Payload::list(vec![Payload::Byte(1)]).unwrap();
        assert!(list
            .replace(Payload::List(vec![Payload::Byte(1), Payload::Long(2)]))
            .is_err());
    }

    #[test]
    fn test_clone_is_deep() {
        let inner = Payload::compound(vec![Tag::new("x", Payload::Int(1)).unwrap()]);
        let original = Payload::list(vec![inner]).unwrap();
        let mut copy = original.clone();

        if let Payload::List(elements) = &mut copy {
            elements[0] = Payload::compound(vec![]);
        }
        assert_ne!(copy, original);
        assert_eq!(
            original,
            Payload::List(vec![Payload::Compound(vec![
                Tag::new("x", Payload::Int(1)).unwrap()
            ])])
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = Payload::compound(vec![
            Tag::new("a", Payload::Int(1)).unwrap(),
            Tag::new("b", Payload::Int(2)).unwrap(),
        ]);
        let reordered = Payload::compound(vec![
            Tag::new("b", Payload::Int(2)).unwrap(),
            Tag::new("a", Payload::Int(1)).unwrap(),
        ]);
        assert_eq!(a, a.clone());
        assert_ne!(a, reordered);
        assert_eq!(Payload::IntArray(vec![1, 2]), Payload::IntArray(vec![1, 2]));
        assert_ne!(Payload::Int(1), Payload::Long(1));
    }

    #[test]
    fn test_uuid_helpers() {
        let uuid = Uuid::parse_str("00000000-0000-0001-ffff-ffff00000002").unwrap();
        let payload = Payload::from_uuid(uuid);
        assert_eq!(payload, Payload::IntArray(vec![0, 1, -1, 2]));
        assert_eq!(payload.to_uuid(), Some(uuid));
        assert_eq!(Payload::IntArray(vec![1, 2, 3]).to_uuid(), None);
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(Payload::Short(-3).as_i64(), Some(-3));
        assert_eq!(Payload::Float(0.5).as_i64(), None);
        assert_eq!(Payload::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Payload::Long(7).as_f64(), Some(7.0));
        assert!(Payload::Double(1.0).is_numeric());
        assert!(!Payload::String(String::new()).is_numeric());
    }
}
