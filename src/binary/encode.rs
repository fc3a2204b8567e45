//! Binary encoding: [`Tag`] / [`Payload`] → bytes.

use bytes::{BufMut, BytesMut};
use tracing::debug;

use super::compression;
use crate::options::BinaryOptions;
use crate::payload::{check_name_len, Payload, TagId};
use crate::tag::Tag;
use crate::{Error, Result};

/// Encodes a complete document and compresses it as configured
/// ([`Compression::Auto`](crate::Compression::Auto) writes gzip).
///
/// The tag record is written with the tag's own name, which is empty for a
/// root tag.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{to_bytes, BinaryOptions, Compression, Payload, Tag};
///
/// let root = Tag::root(Payload::compound(vec![])).unwrap();
/// let options = BinaryOptions::java().with_compression(Compression::None);
/// assert_eq!(to_bytes(&root, &options).unwrap(), vec![0x0a, 0x00, 0x00, 0x00]);
/// ```
pub fn to_bytes(tag: &Tag, options: &BinaryOptions) -> Result<Vec<u8>> {
    let raw = encode_tag(tag, options)?;
    let raw_len = raw.len();
    let out = compression::compress(raw, options.compression)?;
    debug!(
        raw_len,
        encoded_len = out.len(),
        compression = ?options.compression,
        "encoded binary document"
    );
    Ok(out)
}

/// Writes one uncompressed tag record `[id][name][payload]`.
pub fn encode_tag(tag: &Tag, options: &BinaryOptions) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(options);
    encoder.write_tag(tag.name(), tag.payload())?;
    Ok(encoder.finish())
}

/// Writes one uncompressed payload without a tag header.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::binary::encode_payload;
/// use nbt_codec::{BinaryOptions, Payload};
///
/// let bytes = encode_payload(&Payload::Short(0x0102), &BinaryOptions::bedrock()).unwrap();
/// assert_eq!(bytes, vec![0x02, 0x01]);
/// ```
pub fn encode_payload(payload: &Payload, options: &BinaryOptions) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(options);
    encoder.write_payload(payload)?;
    Ok(encoder.finish())
}

struct Encoder {
    buf: BytesMut,
    little_endian: bool,
    depth: usize,
    max_depth: usize,
}

impl Encoder {
    fn new(options: &BinaryOptions) -> Self {
        Encoder {
            buf: BytesMut::with_capacity(256),
            little_endian: options.edition.is_little_endian(),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn finish(self) -> Vec<u8> {
        self.buf.to_vec()
    }

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

    fn put_u16(&mut self, v: u16) {
        if self.little_endian {
            self.buf.put_u16_le(v);
        } else {
            self.buf.put_u16(v);
        }
    }

    fn put_i16(&mut self, v: i16) {
        if self.little_endian {
            self.buf.put_i16_le(v);
        } else {
            self.buf.put_i16(v);
        }
    }

    fn put_i32(&mut self, v: i32) {
        if self.little_endian {
            self.buf.put_i32_le(v);
        } else {
            self.buf.put_i32(v);
        }
    }

    fn put_i64(&mut self, v: i64) {
        if self.little_endian {
            self.buf.put_i64_le(v);
        } else {
            self.buf.put_i64(v);
        }
    }

    fn put_f32(&mut self, v: f32) {
        if self.little_endian {
            self.buf.put_f32_le(v);
        } else {
            self.buf.put_f32(v);
        }
    }

    fn put_f64(&mut self, v: f64) {
        if self.little_endian {
            self.buf.put_f64_le(v);
        } else {
            self.buf.put_f64(v);
        }
    }

    /// Writes a count that validation already bounded to `i32::MAX`.
    fn put_count(&mut self, len: usize) -> Result<()> {
        let count = i32::try_from(len)
            .map_err(|_| Error::validation(format!("Length {} does not fit in 32 bits", len)))?;
        self.put_i32(count);
        Ok(())
    }

    /// Writes a u16 byte length followed by the UTF-8 bytes.
    fn write_string(&mut self, s: &str) -> Result<()> {
        check_name_len(s)?;
        self.put_u16(s.len() as u16);
        self.buf.put_slice(s.as_bytes());
        Ok(())
    }

    fn write_tag(&mut self, name: &str, payload: &Payload) -> Result<()> {
        self.buf.put_u8(payload.tag_id().as_u8());
        self.write_string(name)?;
        self.write_payload(payload)
    }

    fn write_payload(&mut self, payload: &Payload) -> Result<()> {
        payload.validate()?;
        match payload {
            Payload::Byte(v) => self.buf.put_i8(*v),
            Payload::Short(v) => self.put_i16(*v),
            Payload::Int(v) => self.put_i32(*v),
            Payload::Long(v) => self.put_i64(*v),
            Payload::Float(v) => self.put_f32(*v),
            Payload::Double(v) => self.put_f64(*v),
            Payload::String(s) => self.write_string(s)?,
            Payload::ByteArray(values) => {
                self.enter()?;
                self.put_count(values.len())?;
                self.buf.reserve(values.len());
                for v in values {
                    self.buf.put_i8(*v);
                }
                self.leave();
            }
            Payload::IntArray(values) => {
                self.enter()?;
                self.put_count(values.len())?;
                for v in values {
                    self.put_i32(*v);
                }
                self.leave();
            }
            Payload::LongArray(values) => {
                self.enter()?;
                self.put_count(values.len())?;
                for v in values {
                    self.put_i64(*v);
                }
                self.leave();
            }
            Payload::List(elements) => {
                self.enter()?;
                let element = elements.first().map_or(TagId::End, Payload::tag_id);
                self.buf.put_u8(element.as_u8());
                self.put_count(elements.len())?;
                for e in elements {
                    self.write_payload(e)?;
                }
                self.leave();
            }
            Payload::Compound(tags) => {
                self.enter()?;
                for tag in tags {
                    self.write_tag(tag.name(), tag.payload())?;
                }
                self.buf.put_u8(TagId::End.as_u8());
                self.leave();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_java() -> BinaryOptions {
        BinaryOptions::java().with_compression(crate::Compression::None)
    }

    #[test]
    fn test_empty_list_writes_end_element_type() {
        let bytes = encode_payload(&Payload::List(vec![]), &raw_java()).unwrap();
        assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_list_layout() {
        let list = Payload::list(vec![Payload::Short(1), Payload::Short(-1)]).unwrap();
        let bytes = encode_payload(&list, &raw_java()).unwrap();
        assert_eq!(
            bytes,
            vec![0x02, 0x00, 0x00, 0x00, 0x02, 0x00, 0x01, 0xff, 0xff]
        );
    }

    #[test]
    fn test_named_tag_layout() {
        let tag = Tag::new("hi", Payload::Byte(-1)).unwrap();
        let bytes = encode_tag(&tag, &raw_java()).unwrap();
        assert_eq!(bytes, vec![0x01, 0x00, 0x02, b'h', b'i', 0xff]);
    }

    #[test]
    fn test_little_endian_arrays() {
        let bytes = encode_payload(
            &Payload::IntArray(vec![1]),
            &BinaryOptions::bedrock().with_compression(crate::Compression::None),
        )
        .unwrap();
        assert_eq!(bytes, vec![0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_hand_built_invalid_payload_is_rejected() {
        let bad = Payload::List(vec![Payload::Int(1), Payload::Long(1)]);
        assert!(encode_payload(&bad, &raw_java()).unwrap_err().is_validation());

        let nested = Payload::List(vec![Payload::List(vec![Payload::Double(f64::NAN)])]);
        assert!(encode_payload(&nested, &raw_java()).is_err());
    }

    #[test]
    fn test_depth_limit() {
        let mut payload = Payload::List(vec![]);
        for _ in 0..4 {
            payload = Payload::List(vec![payload]);
        }
        assert!(encode_payload(&payload, &raw_java().with_max_depth(5)).is_ok());
        assert_eq!(
            encode_payload(&payload, &raw_java().with_max_depth(4)).unwrap_err(),
            Error::DepthLimitExceeded { limit: 4 }
        );
    }
}
