//! Format registry, codec dispatch, and the archive/wrapper containers
//! that sit on top of `bitglyph-stream`.
//!
//! This is the component that ties the rest of the workspace together:
//! a path resolves through [`bitglyph_stream::resolve`] to a [`Stream`],
//! [`registry::FormatRegistry`] identifies which [`codec::Codec`] should
//! read it, and the codec builds a [`font::Pack`] out of rasters, labels,
//! and charmaps.

#![warn(clippy::doc_markdown)]

mod codec;
mod container;
mod error;
mod font;
mod registry;
mod wrapper;

pub use bitglyph_stream::Stream;
pub use codec::{Codec, CodecOptions, LoadOutcome};
pub use container::{zip_write_entry, ZipContainer, ZipSignature};
pub use error::Error;
pub use font::{Font, Glyph, Metrics, Pack};
pub use registry::{loaders, savers, FormatRegistry, MagicSignature};
pub use wrapper::{gzip_compress, Base64Wrapper, GzipWrapper};
