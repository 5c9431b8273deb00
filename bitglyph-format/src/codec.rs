//! The loader/saver contract every registered format implements.

use std::collections::BTreeMap;

use bitglyph_stream::Stream;

use crate::error::Error;
use crate::font::Pack;

/// Plain key/value codec options, the way `write-fonts`' `TableWriter`
/// takes typed args rather than a stringly dict — here the dispatcher is
/// generic over unknown codecs, so the bag stays untyped, but each codec
/// is expected to parse its own known keys out of it up front.
#[derive(Debug, Clone, Default)]
pub struct CodecOptions(BTreeMap<String, String>);

impl CodecOptions {
    pub fn new() -> Self {
        CodecOptions(BTreeMap::new())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// Either the loader ran to completion, or it declined the stream.
///
/// This is kept distinct from [`Error`] so dispatch can tell "not this
/// format, try the next candidate" apart from a genuine I/O or parse
/// failure, matching spec.md's "format-not-matched sentinel" without
/// needing downcasting.
pub enum LoadOutcome {
    Matched(Pack),
    NotMatched,
}

/// A format's read and/or write behavior.
///
/// A codec must not close the stream it is given; the caller (the
/// registry, or ultimately a container) owns its lifetime.
pub trait Codec {
    /// Unique, stable format name used for registration and explicit
    /// format hints.
    fn name(&self) -> &str;

    /// `true` if this format's canonical form is text (affects default
    /// fallback selection and text-heuristic filtering during dispatch).
    fn is_text(&self) -> bool {
        false
    }

    /// Attempt to read `stream` as this format. Returning
    /// [`LoadOutcome::NotMatched`] (including "parsed zero fonts") tells
    /// dispatch to try the next candidate rather than treating this as a
    /// final answer.
    fn load(&self, stream: &mut Stream, options: &CodecOptions) -> Result<LoadOutcome, Error>;

    /// Write `pack` as this format to `stream`.
    fn save(&self, pack: &Pack, stream: &mut Stream, options: &CodecOptions) -> Result<(), Error>;
}
