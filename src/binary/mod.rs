//! Binary wire format.
//!
//! A document is one tag record `[id: u8][name_len: u16][name][payload]`
//! whose payload is a compound. Multi-byte fields are big-endian for
//! [`Edition::Java`](crate::Edition::Java) and little-endian for
//! [`Edition::Bedrock`](crate::Edition::Bedrock). The whole buffer may be
//! gzip- or zlib-compressed.

pub mod compression;
pub mod decode;
pub mod encode;

pub use decode::{decode_payload, decode_tag, from_bytes};
pub use encode::{encode_payload, encode_tag, to_bytes};
