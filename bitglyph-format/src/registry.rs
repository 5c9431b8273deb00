//! Magic/pattern-based format identification and load/save dispatch.

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use regex::Regex;

use bitglyph_stream::Stream;

use crate::codec::{Codec, CodecOptions, LoadOutcome};
use crate::error::Error;
use crate::font::Pack;

/// A `(offset, bytes)` pair that must match literally, or a sentinel that
/// matches if its bytes open any line within the first `window` bytes.
pub enum MagicSignature {
    AtOffset { offset: usize, bytes: Vec<u8> },
    Sentinel { bytes: Vec<u8>, window: usize },
}

impl MagicSignature {
    fn len(&self) -> usize {
        match self {
            MagicSignature::AtOffset { bytes, .. } => bytes.len(),
            MagicSignature::Sentinel { bytes, .. } => bytes.len(),
        }
    }

    fn matches(&self, sample: &[u8]) -> bool {
        match self {
            MagicSignature::AtOffset { offset, bytes } => {
                sample.len() >= offset + bytes.len() && &sample[*offset..*offset + bytes.len()] == bytes.as_slice()
            }
            MagicSignature::Sentinel { bytes, window } => {
                let probe = &sample[..sample.len().min(*window)];
                probe
                    .split(|&b| b == b'\n')
                    .any(|line| line.starts_with(bytes.as_slice()))
            }
        }
    }
}

struct Entry {
    codec: Arc<dyn Codec + Send + Sync>,
    magic: Vec<MagicSignature>,
    patterns: Vec<Regex>,
}

/// One direction (loaders, or savers) of the format registry.
///
/// Two of these exist process-wide — see [`loaders`]/[`savers`] — matching
/// spec.md's "Two instances (one for loaders, one for savers)".
pub struct FormatRegistry {
    entries: Vec<Entry>,
    default_text: Option<usize>,
    default_binary: Option<usize>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        FormatRegistry {
            entries: Vec::new(),
            default_text: None,
            default_binary: None,
        }
    }
}

fn glob_to_regex(pattern: &str) -> Regex {
    let mut out = String::from("(?i)^");
    for c in pattern.chars() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '.' | '+' | '(' | ')' | '[' | ']' | '^' | '$' | '|' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            other => out.push(other),
        }
    }
    out.push('$');
    Regex::new(&out).expect("glob pattern always compiles to a valid regex")
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a codec with its magic signatures and filename glob
    /// patterns. Magic signatures are kept sorted longest-first so more
    /// specific matches are tried before generic ones; ties keep
    /// registration order (see the open question this resolves in the
    /// design notes).
    pub fn register(
        &mut self,
        codec: Arc<dyn Codec + Send + Sync>,
        magic: Vec<MagicSignature>,
        patterns: Vec<&str>,
    ) {
        let entry = Entry {
            codec,
            magic,
            patterns: patterns.into_iter().map(glob_to_regex).collect(),
        };
        self.entries.push(entry);
        self.entries.sort_by(|a, b| {
            let max_a = a.magic.iter().map(MagicSignature::len).max().unwrap_or(0);
            let max_b = b.magic.iter().map(MagicSignature::len).max().unwrap_or(0);
            max_b.cmp(&max_a)
        });
    }

    pub fn set_default_text(&mut self, name: &str) {
        self.default_text = self.index_of(name);
    }

    pub fn set_default_binary(&mut self, name: &str) {
        self.default_binary = self.index_of(name);
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.codec.name() == name)
    }

    fn max_magic_len(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|e| e.magic.iter().map(MagicSignature::len))
            .max()
            .unwrap_or(0)
    }

    /// Identify candidate codecs for `stream`, per spec.md §4.6.
    pub fn identify(&self, stream: &mut Stream, explicit_format: Option<&str>) -> Result<Vec<Arc<dyn Codec + Send + Sync>>, Error> {
        if let Some(format) = explicit_format {
            return match self.index_of(format) {
                Some(i) => Ok(vec![self.entries[i].codec.clone()]),
                None => Err(Error::NotFound(format.to_string())),
            };
        }

        let sample = stream.peek(self.max_magic_len().max(1))?;
        let mut candidates: Vec<Arc<dyn Codec + Send + Sync>> = Vec::new();
        for entry in &self.entries {
            if entry.magic.iter().any(|m| m.matches(&sample)) {
                candidates.push(entry.codec.clone());
            }
        }

        let looks_text = stream.looks_like_text()?;
        if let Some(name) = stream.name() {
            for entry in &self.entries {
                if candidates.iter().any(|c| Arc::ptr_eq(c, &entry.codec)) {
                    continue;
                }
                if !looks_text && entry.codec.is_text() {
                    continue;
                }
                if entry.patterns.iter().any(|re| re.is_match(name)) {
                    candidates.push(entry.codec.clone());
                }
            }
        }

        if candidates.is_empty() {
            let fallback = if looks_text { self.default_text } else { self.default_binary };
            if let Some(i) = fallback {
                let has_suffix = stream.name().map(|n| n.contains('.')).unwrap_or(false);
                if has_suffix {
                    log::warn!("no format matched `{}`; falling back to default", stream.name().unwrap_or(""));
                } else {
                    log::debug!("no filename suffix on stream; falling back to default format");
                }
                candidates.push(self.entries[i].codec.clone());
            }
        }

        Ok(candidates)
    }

    /// Run candidate codecs in order until one matches; see spec.md's
    /// load dispatch rules.
    pub fn load(&self, stream: &mut Stream, explicit_format: Option<&str>, options: &CodecOptions) -> Result<Pack, Error> {
        let candidates = self.identify(stream, explicit_format)?;
        let mut tried = Vec::new();
        let mut last_err: Option<Error> = None;
        let anchor_pos = stream.tell()?;
        for codec in &candidates {
            stream.seek(anchor_pos as i64, bitglyph_stream::Whence::Start)?;
            tried.push(codec.name().to_string());
            match codec.load(stream, options) {
                Ok(LoadOutcome::Matched(pack)) if !pack.is_empty() => return Ok(pack),
                Ok(LoadOutcome::Matched(_)) | Ok(LoadOutcome::NotMatched) => continue,
                Err(e) => last_err = Some(e),
            }
        }
        match last_err {
            Some(e) => Err(e),
            None => Err(Error::NoMatchingCodec { tried }),
        }
    }

    /// Resolve exactly one saver for `format_hint`/`filename`, per
    /// spec.md's ambiguity rule.
    pub fn saver_for(&self, explicit_format: Option<&str>, filename: Option<&str>) -> Result<Arc<dyn Codec + Send + Sync>, Error> {
        if let Some(format) = explicit_format {
            return self
                .index_of(format)
                .map(|i| self.entries[i].codec.clone())
                .ok_or_else(|| Error::NotFound(format.to_string()));
        }
        let Some(name) = filename else {
            return Err(Error::Unsupported("no format or filename given to save".into()));
        };
        let matches: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.patterns.iter().any(|re| re.is_match(name)))
            .map(|e| e.codec.clone())
            .collect();
        match matches.len() {
            1 => Ok(matches.into_iter().next().unwrap()),
            0 => Err(Error::NotFound(name.to_string())),
            _ => Err(Error::AmbiguousFormat {
                candidates: matches.iter().map(|c| c.name().to_string()).collect(),
            }),
        }
    }

    pub fn save(&self, pack: &Pack, stream: &mut Stream, explicit_format: Option<&str>, filename: Option<&str>, options: &CodecOptions) -> Result<(), Error> {
        let codec = self.saver_for(explicit_format, filename)?;
        codec.save(pack, stream, options)
    }
}

static LOADERS: Lazy<Mutex<FormatRegistry>> = Lazy::new(|| Mutex::new(FormatRegistry::new()));
static SAVERS: Lazy<Mutex<FormatRegistry>> = Lazy::new(|| Mutex::new(FormatRegistry::new()));

/// The process-wide loader registry.
pub fn loaders() -> &'static Mutex<FormatRegistry> {
    &LOADERS
}

/// The process-wide saver registry.
pub fn savers() -> &'static Mutex<FormatRegistry> {
    &SAVERS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::LoadOutcome;
    use std::io::Cursor;

    struct StubCodec {
        name: &'static str,
        is_text: bool,
    }

    impl Codec for StubCodec {
        fn name(&self) -> &str {
            self.name
        }

        fn is_text(&self) -> bool {
            self.is_text
        }

        fn load(&self, _stream: &mut Stream, _options: &CodecOptions) -> Result<LoadOutcome, Error> {
            Ok(LoadOutcome::Matched(Pack::new(vec![crate::font::Font::new(vec![])])))
        }

        fn save(&self, _pack: &Pack, _stream: &mut Stream, _options: &CodecOptions) -> Result<(), Error> {
            Ok(())
        }
    }

    fn stream_named(bytes: &[u8], name: &str) -> Stream {
        Stream::from_reader(Some(name.to_string()), Cursor::new(bytes.to_vec())).unwrap()
    }

    #[test]
    fn magic_signature_wins_over_pattern() {
        let mut reg = FormatRegistry::new();
        reg.register(
            Arc::new(StubCodec { name: "bdf", is_text: true }),
            vec![MagicSignature::Sentinel { bytes: b"STARTFONT".to_vec(), window: 64 }],
            vec!["*.bdf"],
        );
        let mut stream = stream_named(b"STARTFONT 2.1\n", "weird.ext");
        let candidates = reg.identify(&mut stream, None).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name(), "bdf");
    }

    #[test]
    fn explicit_format_short_circuits_identification() {
        let mut reg = FormatRegistry::new();
        reg.register(Arc::new(StubCodec { name: "foo", is_text: false }), vec![], vec!["*.foo"]);
        let mut stream = stream_named(b"whatever", "thing.bar");
        let candidates = reg.identify(&mut stream, Some("foo")).unwrap();
        assert_eq!(candidates[0].name(), "foo");
    }

    #[test]
    fn unknown_explicit_format_is_not_found() {
        let reg = FormatRegistry::new();
        let mut stream = stream_named(b"x", "a.b");
        assert!(matches!(reg.identify(&mut stream, Some("nope")), Err(Error::NotFound(_))));
    }

    #[test]
    fn ambiguous_save_target_errors() {
        let mut reg = FormatRegistry::new();
        reg.register(Arc::new(StubCodec { name: "a", is_text: false }), vec![], vec!["*.bin"]);
        reg.register(Arc::new(StubCodec { name: "b", is_text: false }), vec![], vec!["*.bin"]);
        let err = reg.saver_for(None, Some("x.bin")).unwrap_err();
        assert!(matches!(err, Error::AmbiguousFormat { .. }));
    }
}
