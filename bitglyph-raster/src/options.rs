//! Shared option enums for raster encode/decode.

/// Row alignment used by [`crate::Raster::from_vector`] and the byte-aligned
/// paths of [`crate::Raster::from_bytes`]/[`crate::Raster::as_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Retained columns are `[0, width)` of each `stride`-wide row.
    Left,
    /// Retained columns are `[stride - width, stride)` of each row.
    Right,
    /// Bits flow contiguously across row boundaries, with no per-row padding.
    Bit,
}

/// Byte matrix order consumed by [`crate::Raster::from_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    RowMajor,
    ColumnMajor,
}

/// Per-byte bit endianness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Most-significant bit is the leftmost column (the default).
    Big,
    /// Least-significant bit is the leftmost column.
    Little,
}

/// Aggregation operator for [`crate::Raster::overlay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOp {
    /// Union: ink if any input is ink.
    Any,
    /// Intersection: ink only if every input is ink.
    All,
}

/// Direction of a [`crate::Raster::shear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShearDirection {
    Left,
    Right,
}
