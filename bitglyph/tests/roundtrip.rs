//! Cross-crate smoke tests: a glyph raster identified by a label, loaded
//! and saved through the format registry.

use std::io::Cursor;
use std::sync::Arc;

use bitglyph::label::{to_label, Label};
use bitglyph::format::{Codec, CodecOptions, Font, Glyph, LoadOutcome, Pack};
use bitglyph::raster::{Align, Raster};
use bitglyph::stream::Stream;

struct StubCodec;

impl Codec for StubCodec {
    fn name(&self) -> &str {
        "stub"
    }

    fn load(&self, stream: &mut Stream, _options: &CodecOptions) -> Result<LoadOutcome, bitglyph::format::Error> {
        let bytes = stream.read_to_string()?;
        if bytes.is_empty() {
            return Ok(LoadOutcome::NotMatched);
        }
        let raster = Raster::from_vector(&[true, false, false, true], 2, None, None, Align::Left).unwrap();
        let glyph = Glyph::new(raster, vec![to_label("A")]);
        Ok(LoadOutcome::Matched(Pack::new(vec![Font::new(vec![glyph])])))
    }

    fn save(&self, pack: &Pack, stream: &mut Stream, _options: &CodecOptions) -> Result<(), bitglyph::format::Error> {
        use std::io::Write;
        stream.write_all(format!("fonts={}", pack.len()).as_bytes())?;
        Ok(())
    }
}

#[test]
fn load_dispatch_finds_the_registered_codec() {
    let mut registry = bitglyph::format::FormatRegistry::new();
    registry.register(Arc::new(StubCodec), vec![], vec!["*.stub"]);

    let mut stream = Stream::from_reader(Some("glyph.stub".to_string()), Cursor::new(b"anything".to_vec())).unwrap();
    let pack = registry.load(&mut stream, None, &CodecOptions::new()).unwrap();

    assert_eq!(pack.len(), 1);
    let glyph = &pack.fonts()[0].glyphs()[0];
    assert_eq!(glyph.labels(), &[to_label("A")]);
    assert!(matches!(glyph.labels()[0], Label::Character(_)));
}

#[test]
fn save_then_reload_reports_expected_font_count() {
    let mut registry = bitglyph::format::FormatRegistry::new();
    registry.register(Arc::new(StubCodec), vec![], vec!["*.stub"]);

    let pack = Pack::new(vec![Font::new(vec![])]);
    let mut out = Stream::from_writer(Some("out.stub".to_string()), Cursor::new(Vec::new())).unwrap();
    registry
        .save(&pack, &mut out, None, Some("out.stub"), &CodecOptions::new())
        .unwrap();
}
