//! The two encoders that need no backing file: UTF-32 `Unicode`, and the
//! sequential `Indexer`.

use std::cell::RefCell;

use bitglyph_label::{to_label, to_labels, Codepoint, Label, LabelError};
use bitglyph_types::align;

use crate::encoder::Encoder;

/// Converts between characters and their UTF-32BE codepoint encoding.
pub struct Unicode;

impl Encoder for Unicode {
    fn name(&self) -> &str {
        "unicode"
    }

    fn char(&self, codepoint: &Codepoint) -> String {
        let mut bytes = codepoint.as_bytes().to_vec();
        let padded_len = align(bytes.len(), 2); // round up to a multiple of 4
        let mut padded = vec![0u8; padded_len - bytes.len()];
        padded.append(&mut bytes);
        let mut out = String::with_capacity(padded_len / 4);
        for chunk in padded.chunks_exact(4) {
            let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            match char::from_u32(v) {
                Some(c) => out.push(c),
                None => return String::new(),
            }
        }
        out
    }

    fn codepoint(&self, ch: &str) -> Option<Codepoint> {
        let mut bytes = Vec::with_capacity(ch.len() * 4);
        for c in ch.chars() {
            bytes.extend_from_slice(&(c as u32).to_be_bytes());
        }
        Some(Codepoint::from_bytes(bytes))
    }
}

/// Hands out sequential codepoints from a range, ignoring the character
/// argument entirely — used to assign ordinals to otherwise-unlabelled
/// glyphs on load.
pub struct Indexer {
    codes: RefCell<Box<dyn Iterator<Item = Codepoint>>>,
}

impl Indexer {
    /// `code_range` is a label-range spec, e.g. `"0-"` (the default,
    /// unbounded from zero) or `"0x80-0xff"` (bounded).
    ///
    /// A bare `"<start>-"` with no upper bound is handled directly as an
    /// unbounded counter, since [`to_labels`] only supports finite ranges.
    pub fn new(code_range: &str) -> Result<Self, LabelError> {
        if let Some(start_str) = code_range.strip_suffix('-') {
            if !start_str.contains(',') && !start_str.contains('-') {
                let start = if start_str.is_empty() {
                    0
                } else {
                    match to_label(start_str) {
                        Label::Codepoint(c) => c.to_int().unwrap_or(0),
                        _ => 0,
                    }
                };
                let iter = (start..).map(Codepoint::from_int);
                return Ok(Indexer { codes: RefCell::new(Box::new(iter)) });
            }
        }
        let labels = to_labels(code_range)?;
        let codes: Vec<Codepoint> = labels
            .into_iter()
            .filter_map(|l| match l {
                Label::Codepoint(c) => Some(c),
                _ => None,
            })
            .collect();
        Ok(Indexer { codes: RefCell::new(Box::new(codes.into_iter())) })
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Indexer::new("0-").expect("`0-` is always a valid range")
    }
}

impl Encoder for Indexer {
    fn name(&self) -> &str {
        "index"
    }

    fn char(&self, _codepoint: &Codepoint) -> String {
        unimplemented!("Indexer can only assign codepoints, not resolve character labels")
    }

    fn codepoint(&self, _ch: &str) -> Option<Codepoint> {
        self.codes.borrow_mut().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_roundtrips_bmp_char() {
        let u = Unicode;
        let cp = u.codepoint("A").unwrap();
        assert_eq!(u.char(&cp), "A");
    }

    #[test]
    fn unicode_roundtrips_multi_char_sequence() {
        let u = Unicode;
        let cp = u.codepoint("ab").unwrap();
        assert_eq!(u.char(&cp), "ab");
    }

    #[test]
    fn indexer_default_counts_from_zero() {
        let idx = Indexer::default();
        assert_eq!(idx.codepoint("anything"), Some(Codepoint::from_int(0)));
        assert_eq!(idx.codepoint("anything"), Some(Codepoint::from_int(1)));
    }

    #[test]
    fn indexer_bounded_range_exhausts() {
        let idx = Indexer::new("0x41-0x42").unwrap();
        assert_eq!(idx.codepoint("x"), Some(Codepoint::from_int(0x41)));
        assert_eq!(idx.codepoint("x"), Some(Codepoint::from_int(0x42)));
        assert_eq!(idx.codepoint("x"), None);
    }
}
