//! An anchored, peekable binary stream.

use std::io::{self, Read, Seek, SeekFrom, Write};

trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

trait WriteSeek: Write + Seek {}
impl<T: Write + Seek> WriteSeek for T {}

enum Inner {
    Read(Box<dyn ReadSeek>),
    Write(Box<dyn WriteSeek>),
}

/// Where a [`Stream::seek`] offset is measured from.
///
/// `Start` is measured from this stream's *anchor*, not necessarily byte
/// zero of the underlying reader/writer — see [`Stream::tell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    Start,
    Current,
    End,
}

/// A binary stream with a re-anchorable origin.
///
/// The anchor is the stream's position at construction time; `seek(0,
/// Start)` and `tell()` are both relative to it, not to the underlying
/// reader's byte zero. This lets a [`Stream`] be handed a slice of a larger
/// file (e.g. one entry of an archive already positioned at its start)
/// without the caller needing to track the base offset themselves.
pub struct Stream {
    inner: Inner,
    anchor: u64,
    name: Option<String>,
}

impl Stream {
    /// Wrap an already-seekable reader. The anchor is the reader's current
    /// position.
    pub fn from_reader(name: Option<String>, mut reader: impl Read + Seek + 'static) -> io::Result<Self> {
        let anchor = reader.stream_position()?;
        Ok(Stream {
            inner: Inner::Read(Box::new(reader)),
            anchor,
            name,
        })
    }

    /// Drain a non-seekable reader into an in-memory buffer and wrap that.
    pub fn from_unseekable_reader(name: Option<String>, mut reader: impl Read + 'static) -> io::Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_reader(name, io::Cursor::new(buf))
    }

    /// Wrap a seekable writer. The anchor is the writer's current position.
    pub fn from_writer(name: Option<String>, mut writer: impl Write + Seek + 'static) -> io::Result<Self> {
        let anchor = writer.stream_position()?;
        Ok(Stream {
            inner: Inner::Write(Box::new(writer)),
            anchor,
            name,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_readable(&self) -> bool {
        matches!(self.inner, Inner::Read(_))
    }

    pub fn is_writable(&self) -> bool {
        matches!(self.inner, Inner::Write(_))
    }

    fn raw_seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match &mut self.inner {
            Inner::Read(r) => r.seek(pos),
            Inner::Write(w) => w.seek(pos),
        }
    }

    /// Seek relative to `whence`; `Start` is relative to the anchor.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> io::Result<u64> {
        let target = match whence {
            Whence::Start => SeekFrom::Start((self.anchor as i64 + offset).max(0) as u64),
            Whence::Current => SeekFrom::Current(offset),
            Whence::End => SeekFrom::End(offset),
        };
        let absolute = self.raw_seek(target)?;
        Ok(absolute.saturating_sub(self.anchor))
    }

    /// Current position, relative to the anchor.
    pub fn tell(&mut self) -> io::Result<u64> {
        let absolute = self.raw_seek(SeekFrom::Current(0))?;
        Ok(absolute.saturating_sub(self.anchor))
    }

    /// Read without consuming: restores the original position afterward.
    /// May return fewer than `n` bytes near EOF.
    pub fn peek(&mut self, n: usize) -> io::Result<Vec<u8>> {
        let Inner::Read(reader) = &mut self.inner else {
            return Ok(Vec::new());
        };
        let start = reader.stream_position()?;
        let mut buf = vec![0u8; n];
        let mut filled = 0;
        loop {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(read) => filled += read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
            if filled == buf.len() {
                break;
            }
        }
        buf.truncate(filled);
        reader.seek(SeekFrom::Start(start))?;
        Ok(buf)
    }

    /// `true` unless this is a read stream whose leading bytes look binary.
    ///
    /// Samples up to 256 bytes via [`Stream::peek`]; disqualifying evidence
    /// is a C0 control byte other than TAB/LF/CR, a byte in `0xF8..=0xFF`,
    /// or a UTF-8 decode error that isn't just a truncated trailing
    /// sequence at the sample boundary.
    pub fn looks_like_text(&mut self) -> io::Result<bool> {
        if self.is_writable() {
            return Ok(true);
        }
        let sample = self.peek(256)?;
        for &b in &sample {
            if (b < 0x20 && !matches!(b, 0x09 | 0x0a | 0x0d)) || b >= 0xf8 {
                return Ok(false);
            }
        }
        match std::str::from_utf8(&sample) {
            Ok(_) => Ok(true),
            Err(e) => Ok(e.error_len().is_none()),
        }
    }

    /// Read the remainder of the stream and decode it as UTF-8.
    ///
    /// This stands in for a lazily-attached text view: nothing in this
    /// workspace needs simultaneous byte and text cursors over the same
    /// stream, so there is no separate stateful text wrapper.
    pub fn read_to_string(&mut self) -> io::Result<String> {
        let mut buf = Vec::new();
        match &mut self.inner {
            Inner::Read(r) => {
                r.read_to_end(&mut buf)?;
            }
            Inner::Write(_) => return Ok(String::new()),
        }
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Read(r) => r.read(buf),
            Inner::Write(_) => Err(io::Error::new(io::ErrorKind::Unsupported, "stream is write-only")),
        }
    }
}

impl Seek for Stream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(p) => SeekFrom::Start(self.anchor + p),
            other => other,
        };
        let absolute = self.raw_seek(target)?;
        Ok(absolute.saturating_sub(self.anchor))
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Write(w) => w.write(buf),
            Inner::Read(_) => Err(io::Error::new(io::ErrorKind::Unsupported, "stream is read-only")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            Inner::Write(w) => w.flush(),
            Inner::Read(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader_stream(bytes: &[u8]) -> Stream {
        Stream::from_reader(None, io::Cursor::new(bytes.to_vec())).unwrap()
    }

    #[test]
    fn peek_does_not_advance_position() {
        let mut s = reader_stream(b"hello world");
        let peeked = s.peek(5).unwrap();
        assert_eq!(peeked, b"hello");
        assert_eq!(s.tell().unwrap(), 0);
        let mut buf = [0u8; 5];
        s.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");
    }

    #[test]
    fn peek_near_eof_returns_fewer_bytes() {
        let mut s = reader_stream(b"ab");
        let peeked = s.peek(10).unwrap();
        assert_eq!(peeked, b"ab");
    }

    #[test]
    fn seek_start_is_anchor_relative() {
        let mut cursor = io::Cursor::new(b"0123456789".to_vec());
        cursor.seek(SeekFrom::Start(3)).unwrap();
        let mut s = Stream::from_reader(None, cursor).unwrap();
        assert_eq!(s.tell().unwrap(), 0);
        s.seek(2, Whence::Start).unwrap();
        let mut buf = [0u8; 1];
        s.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"5");
    }

    #[test]
    fn looks_like_text_flags_nul_bytes_as_binary() {
        let mut s = reader_stream(b"hello\x00world");
        assert!(!s.looks_like_text().unwrap());
    }

    #[test]
    fn looks_like_text_allows_tab_newline_cr() {
        let mut s = reader_stream(b"line one\tindented\r\nline two\n");
        assert!(s.looks_like_text().unwrap());
    }

    #[test]
    fn write_stream_always_looks_like_text() {
        let mut s = Stream::from_writer(None, io::Cursor::new(Vec::new())).unwrap();
        assert!(s.looks_like_text().unwrap());
    }
}
