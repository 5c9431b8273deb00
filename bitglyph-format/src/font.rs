//! The glyph/font aggregate that codecs produce and consume.
//!
//! spec.md treats `Glyph`/`Font` as external to the core (built from the
//! lower components but not itself one of them); this module is the
//! concrete, minimal version of that aggregate that a codec actually needs
//! to return something from `load` or accept into `save`.

use std::collections::BTreeMap;

use bitglyph_label::Label;
use bitglyph_raster::Raster;

/// Integer metrics attached to a glyph; all default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub left_bearing: i32,
    pub right_bearing: i32,
    pub shift_up: i32,
    pub shift_left: i32,
    pub top_bearing: i32,
    pub bottom_bearing: i32,
    pub right_kerning: i32,
    pub left_kerning: i32,
}

/// A raster plus the labels that identify it and its metrics.
///
/// Immutable: every transform (see `bitglyph_raster`) is applied to
/// `raster` and returns a new `Glyph`, never mutates one in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    raster: Raster,
    labels: Vec<Label>,
    metrics: Metrics,
}

impl Glyph {
    pub fn new(raster: Raster, labels: Vec<Label>) -> Self {
        Glyph {
            raster,
            labels,
            metrics: Metrics::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }
}

/// An ordered collection of glyphs plus free-form properties.
///
/// Fonts are immutable values; every transformation in this workspace
/// produces a new `Font` rather than mutating one in place.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    glyphs: Vec<Glyph>,
    properties: BTreeMap<String, String>,
    encoding: Option<String>,
}

impl Font {
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Font {
            glyphs,
            properties: BTreeMap::new(),
            encoding: None,
        }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn with_encoding(mut self, name: impl Into<String>) -> Self {
        self.encoding = Some(name.into());
        self
    }
}

/// A collection of fonts, the unit a loader returns and a saver consumes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pack(Vec<Font>);

impl Pack {
    pub fn new(fonts: Vec<Font>) -> Self {
        Pack(fonts)
    }

    pub fn fonts(&self) -> &[Font] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_fonts(self) -> Vec<Font> {
        self.0
    }
}
