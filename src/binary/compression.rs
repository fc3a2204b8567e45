//! Whole-buffer compression around the binary format.
//!
//! The codec never compresses individual tags; a finished document buffer
//! is gzip- or zlib-wrapped as a unit, and a compressed input is inflated in
//! full before decoding starts.

use std::io::{Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};

use crate::options::Compression;
use crate::payload::TagId;
use crate::{Error, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Resolves [`Compression::Auto`] by looking at the first bytes of `data`.
///
/// Explicit modes are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::binary::compression::detect;
/// use nbt_codec::Compression;
///
/// assert_eq!(detect(&[0x1f, 0x8b, 0x08], Compression::Auto).unwrap(), Compression::Gzip);
/// assert_eq!(detect(&[0x0a, 0x00, 0x00], Compression::Auto).unwrap(), Compression::None);
/// assert!(detect(&[0x50, 0x4b], Compression::Auto).is_err());
/// ```
pub fn detect(data: &[u8], mode: Compression) -> Result<Compression> {
    if mode != Compression::Auto {
        return Ok(mode);
    }
    if data.starts_with(&GZIP_MAGIC) {
        return Ok(Compression::Gzip);
    }
    match data.first() {
        Some(&first) if first <= TagId::LongArray.as_u8() => Ok(Compression::None),
        Some(&first) => Err(Error::UnknownCompression(format!(
            "leading byte 0x{:02x} is neither a gzip header nor a tag id",
            first
        ))),
        None => Err(Error::UnknownCompression("empty input".to_string())),
    }
}

/// Inflates a gzip or zlib stream, picking the framing from the gzip magic.
///
/// A corrupt or truncated stream is a format error.
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len().saturating_mul(4));
    let read = if data.starts_with(&GZIP_MAGIC) {
        GzDecoder::new(data).read_to_end(&mut out)
    } else {
        ZlibDecoder::new(data).read_to_end(&mut out)
    };
    read.map_err(|e| Error::format(format!("Corrupt compressed stream: {}", e)))?;
    Ok(out)
}

/// Wraps `data` in a gzip stream.
pub fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Wraps `data` in a zlib stream.
pub fn deflate_zlib(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Compresses a finished document. `Auto` means gzip.
pub fn compress(data: Vec<u8>, mode: Compression) -> Result<Vec<u8>> {
    match mode {
        Compression::Auto | Compression::Gzip => gzip(&data),
        Compression::Zlib => deflate_zlib(&data),
        Compression::None => Ok(data),
    }
}

/// Undoes [`compress`] for an already resolved mode.
pub fn decompress(data: &[u8], mode: Compression) -> Result<Vec<u8>> {
    match mode {
        Compression::None => Ok(data.to_vec()),
        _ => inflate(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_passes_explicit_modes_through() {
        assert_eq!(detect(&[0x50], Compression::Zlib).unwrap(), Compression::Zlib);
        assert_eq!(detect(&[], Compression::None).unwrap(), Compression::None);
    }

    #[test]
    fn test_detect_rejects_unknown_leading_byte() {
        let err = detect(&[0x50, 0x4b, 0x03], Compression::Auto).unwrap_err();
        assert!(matches!(err, Error::UnknownCompression(_)));
        assert!(detect(&[0x0d], Compression::Auto).is_err());
        assert!(detect(&[], Compression::Auto).is_err());
    }

    #[test]
    fn test_gzip_and_zlib_inflate() {
        let data = b"\x0a\x00\x00\x00".repeat(16);

        let gz = gzip(&data).unwrap();
        assert_eq!(&gz[..2], &GZIP_MAGIC);
        assert_eq!(inflate(&gz).unwrap(), data);

        let z = deflate_zlib(&data).unwrap();
        assert_eq!(z[0], 0x78);
        assert_eq!(inflate(&z).unwrap(), data);
    }

    #[test]
    fn test_inflate_garbage_is_format_error() {
        let err = inflate(&[0x1f, 0x8b, 0xff, 0xff]).unwrap_err();
        assert!(err.is_format());
        assert!(matches!(err, Error::Format(_)));

        let err = inflate(&[0x78, 0x9c, 0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
