//! A bitmap-font toolbox: immutable rasters, a label algebra, a charmap
//! engine, and the stream/format plumbing that ties a codec to a file.
//!
//! Each sub-crate can be used standalone; this crate just re-exports them
//! behind features so a consumer that only needs, say, raster algebra
//! doesn't pull in the format registry's archive dependencies.

#![warn(clippy::doc_markdown)]

pub use bitglyph_raster as raster;
pub use bitglyph_types as types;

/// Label parsing and ordering: characters, codepoints, and tags.
#[cfg(feature = "charmap")]
pub mod label {
    pub use bitglyph_label::*;
}

/// Charmap loading, the alias/overlay registry, and the built-in encoders.
#[cfg(feature = "charmap")]
pub mod charmap {
    pub use bitglyph_charmap::*;
}

/// Anchored streams and container/wrapper path resolution.
#[cfg(feature = "format")]
pub mod stream {
    pub use bitglyph_stream::*;
}

/// Format registry, codec dispatch, and archive/wrapper containers.
#[cfg(feature = "format")]
pub mod format {
    pub use bitglyph_format::*;
}
