//! The immutable bit-matrix value type.

use crate::error::RasterError;

/// Distances from the four sides of a raster to the bounding box of ink.
///
/// Order is left, bottom, right, top, matching spec.md's `(left, bottom,
/// right, top)` convention throughout the raster API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
    pub top: usize,
}

/// An immutable, rectangular bit matrix.
///
/// Rows are stored top-to-bottom; `true` is ink (foreground), `false` is
/// paper (background). All rows share the same width (an invariant enforced
/// at construction). A raster with `width == 0` or `height == 0` is legal and
/// acts as the identity for [`Raster::concatenate`] / vertical stacking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Raster {
    pub(crate) rows: Vec<Vec<bool>>,
    pub(crate) width: usize,
}

impl Raster {
    /// An empty raster (zero width, zero height).
    pub fn empty() -> Self {
        Raster {
            rows: Vec::new(),
            width: 0,
        }
    }

    /// An uninked (blank) raster of the given size.
    pub fn blank(width: usize, height: usize) -> Self {
        if height == 0 {
            return Raster {
                rows: Vec::new(),
                width,
            };
        }
        Raster {
            rows: vec![vec![false; width]; height],
            width,
        }
    }

    /// Construct a raster from explicit rows of bits.
    ///
    /// Fails if the rows are not all of equal length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, RasterError> {
        let width = rows.first().map_or(0, |r| r.len());
        for row in &rows {
            if row.len() != width {
                return Err(RasterError::RaggedRows {
                    expected: width,
                    actual: row.len(),
                });
            }
        }
        Ok(Raster { rows, width })
    }

    /// Construct a raster from rows of arbitrary markers, comparing each
    /// cell against the caller-supplied `ink` marker.
    ///
    /// This mirrors the original `Raster(pixels, _0=..., _1=...)` constructor:
    /// any marker type can be used for input rows, as long as equality with
    /// `ink` is well-defined.
    pub fn from_markers<T: PartialEq>(rows: &[Vec<T>], ink: &T) -> Result<Self, RasterError> {
        let bit_rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell == ink).collect())
            .collect();
        Self::from_rows(bit_rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// `true` if the raster has zero width or zero height.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height() == 0
    }

    /// `true` if no pixel in the raster is ink.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|&b| !b))
    }

    /// Read the bit at `(row, col)`, `row`/`col` both 0-based from the
    /// top-left.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows[row][col]
    }

    pub(crate) fn row(&self, i: usize) -> &[bool] {
        &self.rows[i]
    }

    pub(crate) fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Distances from the four sides to the bounding box of ink.
    ///
    /// An empty raster (width or height zero) reports `(0, 0, 0, 0)`; a
    /// nonzero-size raster with no ink reports `(width, height, 0, 0)` (see
    /// spec.md §9, open question (b)).
    pub fn padding(&self) -> Padding {
        if self.is_empty() {
            return Padding::default();
        }
        let row_inked: Vec<bool> = self.rows.iter().map(|r| r.iter().any(|&b| b)).collect();
        if !row_inked.iter().any(|&b| b) {
            return Padding {
                left: self.width,
                bottom: self.height(),
                right: 0,
                top: 0,
            };
        }
        let top = row_inked.iter().position(|&b| b).unwrap();
        let bottom = row_inked.iter().rev().position(|&b| b).unwrap();
        let col_inked: Vec<bool> = (0..self.width)
            .map(|c| self.rows.iter().any(|r| r[c]))
            .collect();
        let left = col_inked.iter().position(|&b| b).unwrap();
        let right = col_inked.iter().rev().position(|&b| b).unwrap();
        Padding {
            left,
            bottom,
            right,
            top,
        }
    }
}

impl Default for Raster {
    fn default() -> Self {
        Raster::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_rejected() {
        let err = Raster::from_rows(vec![vec![true, false], vec![true]]).unwrap_err();
        assert_eq!(
            err,
            RasterError::RaggedRows {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn blank_is_identity_for_is_blank() {
        let r = Raster::blank(3, 2);
        assert!(r.is_blank());
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 2);
    }

    #[test]
    fn empty_raster_is_legal() {
        let r = Raster::empty();
        assert!(r.is_empty());
        assert_eq!(r.padding(), Padding::default());
    }

    #[test]
    fn padding_nonzero_blank() {
        let r = Raster::blank(4, 3);
        assert_eq!(
            r.padding(),
            Padding {
                left: 4,
                bottom: 3,
                right: 0,
                top: 0
            }
        );
    }

    #[test]
    fn padding_with_ink() {
        // 3x3, single ink pixel at row 1, col 1 (center)
        let r = Raster::from_rows(vec![
            vec![false, false, false],
            vec![false, true, false],
            vec![false, false, false],
        ])
        .unwrap();
        assert_eq!(
            r.padding(),
            Padding {
                left: 1,
                bottom: 1,
                right: 1,
                top: 1
            }
        );
    }
}
