//! Archive containers: currently zip, read and write.
//!
//! A container yields an entry listing even when it holds a single file,
//! which is how callers tell an archive apart from a [`crate::wrapper`]
//! (see spec.md §4.6's "Wrapper composition").

use std::io::{self, Cursor, Read, Write};

use bitglyph_stream::{Container, ContainerSignature, Stream};

const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// Recognises a zip local-file-header signature at the start of a stream.
pub struct ZipSignature;

impl ContainerSignature for ZipSignature {
    fn matches(&self, stream: &mut Stream) -> io::Result<bool> {
        let sample = stream.peek(4)?;
        Ok(sample.as_slice() == ZIP_MAGIC)
    }

    fn open(&self, stream: Stream) -> io::Result<Box<dyn Container>> {
        Ok(Box::new(ZipContainer::open(stream)?))
    }
}

/// A zip archive opened for reading, or accumulating entries for a
/// deferred write.
///
/// Writes are batched in memory and only flushed to the underlying stream
/// on [`ZipContainer::close`], since the zip central directory can only be
/// written once every entry's size and offset are known — the same
/// ordering constraint spec.md's "Archive write ordering" describes.
pub struct ZipContainer {
    mode: ZipMode,
}

enum ZipMode {
    Read(zip::ZipArchive<Stream>),
    Write {
        pending: Vec<(String, Vec<u8>)>,
        sink: Stream,
    },
}

impl ZipContainer {
    pub fn open(stream: Stream) -> io::Result<Self> {
        let archive = zip::ZipArchive::new(stream).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(ZipContainer { mode: ZipMode::Read(archive) })
    }

    pub fn create(sink: Stream) -> Self {
        ZipContainer {
            mode: ZipMode::Write { pending: Vec::new(), sink },
        }
    }

    /// Flush every pending entry into the underlying stream, in insertion
    /// order, writing the central directory last.
    pub fn close(self) -> io::Result<()> {
        match self.mode {
            ZipMode::Read(_) => Ok(()),
            ZipMode::Write { pending, mut sink } => {
                let mut buf = Cursor::new(Vec::new());
                {
                    let mut writer = zip::ZipWriter::new(&mut buf);
                    let options = zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
                    for (name, bytes) in pending {
                        writer
                            .start_file(name, options)
                            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                        writer.write_all(&bytes)?;
                    }
                    writer.finish().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                }
                sink.write_all(&buf.into_inner())?;
                Ok(())
            }
        }
    }
}

impl Container for ZipContainer {
    fn open(&mut self, subpath: &str) -> io::Result<Stream> {
        match &mut self.mode {
            ZipMode::Read(archive) => {
                let mut entry = archive
                    .by_name(subpath)
                    .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
                let mut buf = Vec::new();
                entry.read_to_end(&mut buf)?;
                Stream::from_reader(Some(subpath.to_string()), Cursor::new(buf))
            }
            ZipMode::Write { .. } => Err(io::Error::new(io::ErrorKind::Unsupported, "cannot read from a zip archive opened for writing")),
        }
    }

    fn list(&self) -> io::Result<Vec<String>> {
        match &self.mode {
            ZipMode::Read(archive) => Ok(archive.file_names().map(str::to_string).collect()),
            ZipMode::Write { pending, .. } => Ok(pending.iter().map(|(name, _)| name.clone()).collect()),
        }
    }

    fn is_dir(&self, subpath: &str) -> bool {
        match &self.mode {
            ZipMode::Read(archive) => archive.file_names().any(|n| n.starts_with(&format!("{subpath}/"))),
            ZipMode::Write { pending, .. } => pending.iter().any(|(n, _)| n.starts_with(&format!("{subpath}/"))),
        }
    }
}

/// Queue `bytes` under `name` in a writer-mode container; visible to
/// readers only after [`ZipContainer::close`].
pub fn zip_write_entry(container: &mut ZipContainer, name: impl Into<String>, bytes: Vec<u8>) -> io::Result<()> {
    match &mut container.mode {
        ZipMode::Write { pending, .. } => {
            pending.push((name.into(), bytes));
            Ok(())
        }
        ZipMode::Read(_) => Err(io::Error::new(io::ErrorKind::Unsupported, "cannot write into a zip archive opened for reading")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
            for (name, bytes) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(bytes).unwrap();
            }
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn signature_matches_zip_magic() {
        let bytes = make_zip_bytes(&[("a.txt", b"hi")]);
        let mut stream = Stream::from_reader(None, Cursor::new(bytes)).unwrap();
        assert!(ZipSignature.matches(&mut stream).unwrap());
    }

    #[test]
    fn roundtrips_a_single_entry() {
        let bytes = make_zip_bytes(&[("glyph.bin", b"raster-bytes")]);
        let stream = Stream::from_reader(None, Cursor::new(bytes)).unwrap();
        let mut container = ZipContainer::open(stream).unwrap();
        assert_eq!(container.list().unwrap(), vec!["glyph.bin".to_string()]);
        let mut entry = container.open("glyph.bin").unwrap();
        assert_eq!(entry.read_to_string().unwrap(), "raster-bytes");
    }

    #[test]
    fn missing_entry_is_not_found_error() {
        let bytes = make_zip_bytes(&[("a.txt", b"x")]);
        let stream = Stream::from_reader(None, Cursor::new(bytes)).unwrap();
        let mut container = ZipContainer::open(stream).unwrap();
        let err = container.open("nope.txt").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
