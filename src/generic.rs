//! Conversion between payloads and the generic [`Value`] tree.
//!
//! Going to the generic tree drops the width information: every integral
//! kind becomes [`Number::Integer`], both float kinds become
//! [`Number::Float`], arrays and lists become [`Value::Array`], compounds
//! become [`Value::Object`]. When a compound repeats a member name the later
//! member's value wins and the key keeps the position of its first
//! occurrence.
//!
//! Coming back, each node is classified as the narrowest payload that holds
//! it:
//!
//! | Generic value | Payload |
//! |---|---|
//! | string | String |
//! | boolean | Byte 0 / 1 |
//! | integer | first of Byte, Short, Int, Long whose range contains it |
//! | float | Float if it survives a round trip through `f32`, else Double |
//! | array | ByteArray / IntArray / LongArray if every element became that scalar, else List |
//! | object | Compound, members in key order |
//! | null | rejected |
//!
//! An empty array becomes an empty ByteArray. A list whose elements
//! classify differently, such as `[1, 300]` (Byte and Short), is rejected.
//!
//! Only the classifying direction enforces [`ParseOptions::max_depth`].
//! [`to_value`] trusts the depth of the payload it is given, like the text
//! serializer does.
//!
//! ```rust
//! use nbt_codec::{from_value, to_value, value, Payload};
//!
//! let payload = from_value(&value!({"hp": 300, "speed": 0.1, "tags": ["a", "b"]})).unwrap();
//! assert_eq!(payload.get("hp"), Some(&Payload::Short(300)));
//! assert_eq!(payload.get("speed"), Some(&Payload::Double(0.1)));
//!
//! let back = to_value(&payload);
//! assert_eq!(back, value!({"hp": 300, "speed": 0.1, "tags": ["a", "b"]}));
//! ```

use crate::options::ParseOptions;
use crate::payload::{Payload, TagId};
use crate::tag::Tag;
use crate::value::{Number, Value};
use crate::{Error, Result, ValueMap};

/// Converts a payload into the generic tree.
#[must_use]
pub fn to_value(payload: &Payload) -> Value {
    match payload {
        Payload::Byte(v) => Value::from(*v),
        Payload::Short(v) => Value::from(*v),
        Payload::Int(v) => Value::from(*v),
        Payload::Long(v) => Value::from(*v),
        Payload::Float(v) => Value::from(*v),
        Payload::Double(v) => Value::from(*v),
        Payload::String(s) => Value::String(s.clone()),
        Payload::ByteArray(values) => Value::Array(values.iter().map(|v| Value::from(*v)).collect()),
        Payload::IntArray(values) => Value::Array(values.iter().map(|v| Value::from(*v)).collect()),
        Payload::LongArray(values) => Value::Array(values.iter().map(|v| Value::from(*v)).collect()),
        Payload::List(elements) => Value::Array(elements.iter().map(to_value).collect()),
        Payload::Compound(tags) => {
            let mut map = ValueMap::with_capacity(tags.len());
            for tag in tags {
                map.insert(tag.name().to_string(), to_value(tag.payload()));
            }
            Value::Object(map)
        }
    }
}

/// Converts a tag: a root becomes its object, any other tag a one-key
/// object `{name: value}`.
#[must_use]
pub fn tag_to_value(tag: &Tag) -> Value {
    if tag.is_root() {
        return to_value(tag.payload());
    }
    let mut map = ValueMap::with_capacity(1);
    map.insert(tag.name().to_string(), to_value(tag.payload()));
    Value::Object(map)
}

/// Classifies a generic tree into payloads.
pub fn from_value(value: &Value) -> Result<Payload> {
    from_value_with_options(value, &ParseOptions::default())
}

/// Classifies a generic tree with an explicit nesting limit.
pub fn from_value_with_options(value: &Value, options: &ParseOptions) -> Result<Payload> {
    Classifier {
        depth: 0,
        max_depth: options.max_depth,
    }
    .classify(value)
}

/// Classifies a generic tree that must be an object, returned as a root tag.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{tag_from_value, value};
///
/// assert!(tag_from_value(&value!({"a": 1})).unwrap().is_root());
/// assert!(tag_from_value(&value!([1, 2])).unwrap_err().is_validation());
/// ```
pub fn tag_from_value(value: &Value) -> Result<Tag> {
    Tag::root(from_value(value)?)
}

/// The narrowest integral payload holding `value`.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::generic::classify_integer;
/// use nbt_codec::Payload;
///
/// assert_eq!(classify_integer(-128), Payload::Byte(-128));
/// assert_eq!(classify_integer(300), Payload::Short(300));
/// assert_eq!(classify_integer(40_000), Payload::Int(40_000));
/// assert_eq!(classify_integer(1 << 40), Payload::Long(1 << 40));
/// ```
#[must_use]
pub fn classify_integer(value: i64) -> Payload {
    if let Ok(v) = i8::try_from(value) {
        Payload::Byte(v)
    } else if let Ok(v) = i16::try_from(value) {
        Payload::Short(v)
    } else if let Ok(v) = i32::try_from(value) {
        Payload::Int(v)
    } else {
        Payload::Long(value)
    }
}

/// Float if `value` survives a round trip through `f32`, else Double.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::generic::classify_float;
/// use nbt_codec::Payload;
///
/// assert_eq!(classify_float(0.5).unwrap(), Payload::Float(0.5));
/// assert_eq!(classify_float(3.14).unwrap(), Payload::Double(3.14));
/// assert!(classify_float(f64::NAN).is_err());
/// ```
pub fn classify_float(value: f64) -> Result<Payload> {
    if !value.is_finite() {
        return Err(Error::validation(format!("Invalid number value: {}", value)));
    }
    let narrowed = value as f32;
    if narrowed.is_finite() && f64::from(narrowed) == value {
        Ok(Payload::Float(narrowed))
    } else {
        Ok(Payload::Double(value))
    }
}

struct Classifier {
    depth: usize,
    max_depth: usize,
}

impl Classifier {
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn classify(&mut self, value: &Value) -> Result<Payload> {
        match value {
            Value::Null => Err(Error::validation("Invalid value type: null")),
            Value::Bool(b) => Ok(Payload::from(*b)),
            Value::String(s) => Payload::string(s.as_str()),
            Value::Number(Number::Integer(i)) => Ok(classify_integer(*i)),
            Value::Number(Number::Float(f)) => classify_float(*f),
            Value::BigInt(big) => match i64::try_from(big) {
                Ok(i) => Ok(classify_integer(i)),
                Err(_) => {
                    let approx = big.to_string().parse::<f64>().map_err(Error::validation)?;
                    classify_float(approx)
                }
            },
            Value::Array(items) => {
                self.enter()?;
                let elements = items
                    .iter()
                    .map(|item| self.classify(item))
                    .collect::<Result<Vec<_>>>()?;
                self.leave();
                classify_array(elements)
            }
            Value::Object(map) => {
                self.enter()?;
                let mut tags = Vec::with_capacity(map.len());
                for (key, item) in map {
                    tags.push(Tag::new(key.as_str(), self.classify(item)?)?);
                }
                self.leave();
                Ok(Payload::Compound(tags))
            }
        }
    }
}

/// Packs uniformly Byte, Int or Long elements into the matching array.
fn classify_array(elements: Vec<Payload>) -> Result<Payload> {
    let all = |id: TagId| elements.iter().all(|e| e.tag_id() == id);

    if all(TagId::Byte) {
        let values = elements.iter().filter_map(Payload::as_i64).map(|v| v as i8).collect();
        Payload::byte_array(values)
    } else if all(TagId::Int) {
        let values = elements.iter().filter_map(Payload::as_i64).map(|v| v as i32).collect();
        Payload::int_array(values)
    } else if all(TagId::Long) {
        let values = elements.iter().filter_map(Payload::as_i64).collect();
        Payload::long_array(values)
    } else {
        Payload::list(elements)
    }
}
