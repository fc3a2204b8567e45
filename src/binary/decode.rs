//! Binary decoding: bytes → [`Tag`] / [`Payload`].
//!
//! Every read is bounds-checked against the remaining input before it
//! happens, and every declared element count is checked against the bytes
//! that could possibly hold it, so truncated or hostile input fails with a
//! format error instead of over-allocating.

use bytes::Buf;
use tracing::debug;

use super::compression;
use crate::options::BinaryOptions;
use crate::payload::{Payload, TagId};
use crate::tag::Tag;
use crate::{Error, Result};

/// Decodes a complete document: resolves and undoes compression, then reads
/// one tag record whose payload must be a compound. The result is always a
/// root tag; the name found on the wire is discarded.
///
/// Bytes after the document are ignored.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{from_bytes, BinaryOptions, Payload};
///
/// // {} with an empty root name, uncompressed, big-endian
/// let data = [0x0a, 0x00, 0x00, 0x00];
/// let root = from_bytes(&data, &BinaryOptions::java()).unwrap();
/// assert!(root.is_root());
/// assert_eq!(root.payload(), &Payload::Compound(vec![]));
/// ```
pub fn from_bytes(data: &[u8], options: &BinaryOptions) -> Result<Tag> {
    let mode = compression::detect(data, options.compression)?;
    debug!(?mode, compressed_len = data.len(), "decoding binary document");
    let raw = compression::decompress(data, mode)?;

    let (tag, consumed) = decode_tag(&raw, options)?;
    if consumed < raw.len() {
        debug!(
            consumed,
            trailing = raw.len() - consumed,
            "ignoring bytes after the document root"
        );
    }
    if tag.payload().tag_id() != TagId::Compound {
        return Err(Error::format(format!(
            "Root tag must be a compound tag, got {}",
            tag.payload().tag_id()
        )));
    }
    Tag::root(tag.into_payload())
}

/// Reads one uncompressed tag record from the start of `data`.
///
/// Returns the tag and the number of bytes it occupied. The tag is not
/// marked as a root.
pub fn decode_tag(data: &[u8], options: &BinaryOptions) -> Result<(Tag, usize)> {
    let mut decoder = Decoder::new(data, options);
    match decoder.read_tag()? {
        Some(tag) => Ok((tag, decoder.consumed())),
        None => Err(Error::format("Unexpected end tag at offset 0")),
    }
}

/// Reads one uncompressed payload of kind `id` from the start of `data`.
///
/// Returns the payload and the number of bytes it occupied.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::binary::decode_payload;
/// use nbt_codec::{BinaryOptions, Payload, TagId};
///
/// let data = [0x00, 0x00, 0x00, 0x2a, 0xff];
/// let (payload, consumed) = decode_payload(&data, TagId::Int, &BinaryOptions::java()).unwrap();
/// assert_eq!(payload, Payload::Int(42));
/// assert_eq!(consumed, 4);
///
/// let (payload, _) = decode_payload(&data[..4], TagId::Int, &BinaryOptions::bedrock()).unwrap();
/// assert_eq!(payload, Payload::Int(0x2a00_0000));
/// ```
pub fn decode_payload(data: &[u8], id: TagId, options: &BinaryOptions) -> Result<(Payload, usize)> {
    let mut decoder = Decoder::new(data, options);
    let payload = decoder.read_payload(id)?;
    Ok((payload, decoder.consumed()))
}

struct Decoder<'a> {
    buf: &'a [u8],
    total: usize,
    little_endian: bool,
    depth: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8], options: &BinaryOptions) -> Self {
        Decoder {
            buf: data,
            total: data.len(),
            little_endian: options.edition.is_little_endian(),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn consumed(&self) -> usize {
        self.total - self.buf.remaining()
    }

    fn ensure_remaining(&self, needed: usize) -> Result<()> {
        if self.buf.remaining() < needed {
            Err(Error::format(format!(
                "need {} bytes at offset {} but only {} remaining",
                needed,
                self.consumed(),
                self.buf.remaining()
            )))
        } else {
            Ok(())
        }
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

    fn read_u8(&mut self) -> Result<u8> {
        self.ensure_remaining(1)?;
        Ok(self.buf.get_u8())
    }

    fn read_i8(&mut self) -> Result<i8> {
        self.ensure_remaining(1)?;
        Ok(self.buf.get_i8())
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.ensure_remaining(2)?;
        Ok(if self.little_endian {
            self.buf.get_u16_le()
        } else {
            self.buf.get_u16()
        })
    }

    fn read_i16(&mut self) -> Result<i16> {
        self.ensure_remaining(2)?;
        Ok(if self.little_endian {
            self.buf.get_i16_le()
        } else {
            self.buf.get_i16()
        })
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.ensure_remaining(4)?;
        Ok(if self.little_endian {
            self.buf.get_i32_le()
        } else {
            self.buf.get_i32()
        })
    }

    fn read_i64(&mut self) -> Result<i64> {
        self.ensure_remaining(8)?;
        Ok(if self.little_endian {
            self.buf.get_i64_le()
        } else {
            self.buf.get_i64()
        })
    }

    fn read_f32(&mut self) -> Result<f32> {
        self.ensure_remaining(4)?;
        Ok(if self.little_endian {
            self.buf.get_f32_le()
        } else {
            self.buf.get_f32()
        })
    }

    fn read_f64(&mut self) -> Result<f64> {
        self.ensure_remaining(8)?;
        Ok(if self.little_endian {
            self.buf.get_f64_le()
        } else {
            self.buf.get_f64()
        })
    }

    /// Reads an i32 element count and checks that `count` elements of at
    /// least `min_width` bytes each can still fit.
    fn read_count(&mut self, min_width: usize) -> Result<usize> {
        let offset = self.consumed();
        let count = self.read_i32()?;
        let count = usize::try_from(count).map_err(|_| {
            Error::format(format!("Negative length {} at offset {}", count, offset))
        })?;
        self.ensure_remaining(count.saturating_mul(min_width))?;
        Ok(count)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = usize::from(self.read_u16()?);
        self.ensure_remaining(len)?;
        let offset = self.consumed();
        let mut data = vec![0u8; len];
        self.buf.copy_to_slice(&mut data);
        String::from_utf8(data).map_err(|e| {
            Error::format(format!("Invalid UTF-8 string at offset {}: {}", offset, e))
        })
    }

    fn read_tag_id(&mut self) -> Result<TagId> {
        let offset = self.consumed();
        let raw = self.read_u8()?;
        TagId::try_from(raw)
            .map_err(|_| Error::format(format!("Unknown tag id {} at offset {}", raw, offset)))
    }

    /// Reads `[id][name][payload]`, or `None` on the end sentinel.
    fn read_tag(&mut self) -> Result<Option<Tag>> {
        let id = self.read_tag_id()?;
        if id == TagId::End {
            return Ok(None);
        }
        let name = self.read_string()?;
        let payload = self.read_payload(id)?;
        Tag::new(name, payload).map(Some)
    }

    fn read_payload(&mut self, id: TagId) -> Result<Payload> {
        match id {
            TagId::End => Err(Error::format(format!(
                "Unexpected end tag at offset {}",
                self.consumed()
            ))),
            TagId::Byte => Ok(Payload::Byte(self.read_i8()?)),
            TagId::Short => Ok(Payload::Short(self.read_i16()?)),
            TagId::Int => Ok(Payload::Int(self.read_i32()?)),
            TagId::Long => Ok(Payload::Long(self.read_i64()?)),
            TagId::Float => Payload::float(self.read_f32()?),
            TagId::Double => Payload::double(self.read_f64()?),
            TagId::String => Ok(Payload::String(self.read_string()?)),
            TagId::ByteArray => {
                self.enter()?;
                let count = self.read_count(1)?;
                let values = (0..count).map(|_| self.buf.get_i8()).collect();
                self.leave();
                Ok(Payload::ByteArray(values))
            }
            TagId::IntArray => {
                self.enter()?;
                let count = self.read_count(4)?;
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.read_i32()?);
                }
                self.leave();
                Ok(Payload::IntArray(values))
            }
            TagId::LongArray => {
                self.enter()?;
                let count = self.read_count(8)?;
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.read_i64()?);
                }
                self.leave();
                Ok(Payload::LongArray(values))
            }
            TagId::List => {
                self.enter()?;
                let element = self.read_tag_id()?;
                let count = self.read_count(min_payload_width(element))?;
                if element == TagId::End && count > 0 {
                    return Err(Error::format(format!(
                        "List of {} elements declares the end tag as element type",
                        count
                    )));
                }
                let mut elements = Vec::with_capacity(count);
                for _ in 0..count {
                    elements.push(self.read_payload(element)?);
                }
                self.leave();
                Ok(Payload::List(elements))
            }
            TagId::Compound => {
                self.enter()?;
                let mut tags = Vec::new();
                while let Some(tag) = self.read_tag()? {
                    tags.push(tag);
                }
                self.leave();
                Ok(Payload::Compound(tags))
            }
        }
    }
}

/// Fewest bytes a payload of kind `id` can occupy.
fn min_payload_width(id: TagId) -> usize {
    match id {
        TagId::End => 0,
        TagId::Byte | TagId::Compound => 1,
        TagId::Short | TagId::String => 2,
        TagId::Int | TagId::Float | TagId::ByteArray | TagId::IntArray | TagId::LongArray => 4,
        TagId::Long | TagId::Double => 8,
        TagId::List => 5,
    }
}
