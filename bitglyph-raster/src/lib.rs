//! Immutable bit-matrix rasters: the pixel-level algebra underneath glyphs.
//!
//! A [`Raster`] never shares storage with the value it was derived from —
//! every transform in this crate returns a fresh matrix. See the individual
//! modules for the three families of operation: decoding/encoding flat
//! bit/byte/hex data, geometric (shape-changing) transforms, logical
//! (pixel-combining) transforms, and text rendering.

#![warn(clippy::doc_markdown)]

mod decode;
mod encode;
mod error;
mod geometry;
mod logic;
mod options;
mod raster;
mod render;

pub use error::RasterError;
pub use options::{Align, BitOrder, ByteOrder, OverlayOp, ShearDirection};
pub use raster::{Padding, Raster};
