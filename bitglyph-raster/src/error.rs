//! Errors raised by raster construction and transforms.

use thiserror::Error;

/// Errors raised by [`crate::Raster`] construction and transforms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("all rows in a raster must be of the same width (expected {expected}, got {actual})")]
    RaggedRows { expected: usize, actual: usize },

    #[error("rasters must be of the same height to concatenate (expected {expected}, got {actual})")]
    HeightMismatch { expected: usize, actual: usize },

    #[error("rasters must be of the same size to overlay (expected {expected:?}, got {actual:?})")]
    SizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("can only shift or crop a raster by a non-negative amount (got {0})")]
    NegativeAmount(i64),

    #[error("bit string too short: needed {needed} rows, got {got}")]
    TooShort { needed: usize, got: usize },

    #[error("at least one of width, height or stride must be specified")]
    NoDimensions,

    #[error("shear direction must be `left` or `right`, not `{0}`")]
    BadShearDirection(String),

    #[error("unsupported block resolution {0:?}")]
    UnsupportedResolution((usize, usize)),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),
}
