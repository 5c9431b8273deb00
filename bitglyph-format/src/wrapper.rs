//! Single-stream wrappers: gzip and base64.
//!
//! A wrapper always yields exactly one inner stream and never a
//! container listing — that's what distinguishes it from an
//! [`crate::container`] even when the archive holds one file.

use std::io::{self, Cursor, Read, Write};

use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use bitglyph_stream::{Stream, WrapperSignature};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub struct GzipWrapper;

impl WrapperSignature for GzipWrapper {
    fn matches(&self, stream: &mut Stream) -> io::Result<bool> {
        let sample = stream.peek(2)?;
        Ok(sample.as_slice() == GZIP_MAGIC)
    }

    fn unwrap(&self, mut stream: Stream) -> io::Result<Stream> {
        let mut compressed = Vec::new();
        stream.read_to_end(&mut compressed)?;
        let mut decoder = GzDecoder::new(Cursor::new(compressed));
        let mut plain = Vec::new();
        decoder.read_to_end(&mut plain)?;
        Stream::from_reader(stream.name().map(str::to_string), Cursor::new(plain))
    }
}

/// Compresses `plain` as a gzip member, for saving through this wrapper.
pub fn gzip_compress(plain: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(plain)?;
    encoder.finish()
}

/// Recognises a stream whose entire content is standard base64: no
/// character outside the alphabet/padding set, decodable cleanly.
///
/// Unlike a magic-byte wrapper, base64 has no fixed header, so the
/// signature is "decodes successfully and isn't trivially empty" rather
/// than a byte match at a fixed offset.
pub struct Base64Wrapper;

impl WrapperSignature for Base64Wrapper {
    fn matches(&self, stream: &mut Stream) -> io::Result<bool> {
        let sample = stream.peek(256)?;
        if sample.is_empty() {
            return Ok(false);
        }
        let trimmed: Vec<u8> = sample.iter().copied().filter(|b| !b.is_ascii_whitespace()).collect();
        if trimmed.is_empty() || !trimmed.iter().all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')) {
            return Ok(false);
        }
        Ok(base64::engine::general_purpose::STANDARD.decode(&trimmed).is_ok())
    }

    fn unwrap(&self, mut stream: Stream) -> io::Result<Stream> {
        let text = stream.read_to_string()?;
        let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(cleaned)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Stream::from_reader(stream.name().map(str::to_string), Cursor::new(decoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gzip_signature_matches_magic_bytes() {
        let compressed = gzip_compress(b"hello").unwrap();
        let mut stream = Stream::from_reader(None, Cursor::new(compressed)).unwrap();
        assert!(GzipWrapper.matches(&mut stream).unwrap());
    }

    #[test]
    fn gzip_unwrap_roundtrips() {
        let compressed = gzip_compress(b"some font bytes").unwrap();
        let stream = Stream::from_reader(None, Cursor::new(compressed)).unwrap();
        let mut inner = GzipWrapper.unwrap(stream).unwrap();
        assert_eq!(inner.read_to_string().unwrap(), "some font bytes");
    }

    #[test]
    fn base64_wrapper_rejects_plain_text_with_invalid_chars() {
        let mut stream = Stream::from_reader(None, Cursor::new(b"not base64 at all!! {}".to_vec())).unwrap();
        assert!(!Base64Wrapper.matches(&mut stream).unwrap());
    }

    #[test]
    fn base64_wrapper_roundtrips() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"raster payload");
        let stream = Stream::from_reader(None, Cursor::new(encoded.into_bytes())).unwrap();
        let mut inner = Base64Wrapper.unwrap(stream).unwrap();
        assert_eq!(inner.read_to_string().unwrap(), "raster payload");
    }
}
