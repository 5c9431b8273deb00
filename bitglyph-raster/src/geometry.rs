//! Geometric (shape-changing) raster transforms.

use crate::error::RasterError;
use crate::raster::Raster;

impl Raster {
    /// Reverse each row horizontally.
    pub fn mirror(&self) -> Self {
        let rows = self.rows().iter().map(|r| r.iter().rev().copied().collect()).collect();
        Raster { rows, width: self.width() }
    }

    /// Reverse row order vertically.
    pub fn flip(&self) -> Self {
        let mut rows = self.rows().to_vec();
        rows.reverse();
        Raster { rows, width: self.width() }
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        if self.height() == 0 {
            return Raster { rows: Vec::new(), width: 0 };
        }
        let new_height = self.width();
        let rows: Vec<Vec<bool>> = (0..new_height)
            .map(|c| self.rows().iter().map(|row| row[c]).collect())
            .collect();
        Raster { rows, width: self.height() }
    }

    /// Rotate by 90-degree turns.
    ///
    /// `turns = (clockwise - anti) mod 4`, decomposed as in spec.md §4.2:
    /// 1 -> transpose then mirror; 2 -> mirror then flip; 3 -> transpose
    /// then flip; 0 -> identity.
    pub fn turn(&self, clockwise: i32, anti: i32) -> Self {
        let turns = (clockwise - anti).rem_euclid(4);
        match turns {
            1 => self.transpose().mirror(),
            2 => self.mirror().flip(),
            3 => self.transpose().flip(),
            _ => self.clone(),
        }
    }

    /// Cyclically shift rows and/or columns.
    ///
    /// `down` rolls rows toward the bottom if positive, upward if negative;
    /// `right` rolls columns rightward if positive, leftward if negative.
    pub fn roll(&self, down: i64, right: i64) -> Self {
        let mut rows = self.rows().to_vec();
        let h = rows.len() as i64;
        if h > 1 && down != 0 {
            let shift = down.rem_euclid(h) as usize;
            rows.rotate_right(shift);
        }
        let w = self.width() as i64;
        if w > 1 && right != 0 {
            let shift = right.rem_euclid(w) as usize;
            for row in &mut rows {
                row.rotate_right(shift);
            }
        }
        Raster { rows, width: self.width() }
    }

    /// Non-cyclic shift, filling the exposed area with paper.
    ///
    /// All four parameters must be non-negative.
    pub fn shift(&self, left: usize, down: usize, right: usize, up: usize) -> Result<Self, RasterError> {
        let rows_shift = down as i64 - up as i64;
        let cols_shift = right as i64 - left as i64;
        let width = self.width();
        let empty_row = vec![false; width];
        let pixels = self.rows();
        let shifted: Vec<Vec<bool>> = if rows_shift > 0 {
            let n = rows_shift as usize;
            let mut out = vec![empty_row.clone(); n.min(pixels.len())];
            if n < pixels.len() {
                out.extend_from_slice(&pixels[..pixels.len() - n]);
            }
            // if n >= len, everything is blank
            if n >= pixels.len() {
                out = vec![empty_row.clone(); pixels.len()];
            }
            out
        } else {
            let n = (-rows_shift) as usize;
            if n >= pixels.len() {
                vec![empty_row.clone(); pixels.len()]
            } else {
                let mut out = pixels[n..].to_vec();
                out.extend(vec![empty_row.clone(); n]);
                out
            }
        };
        let rows: Vec<Vec<bool>> = if cols_shift > 0 {
            let n = cols_shift as usize;
            shifted
                .iter()
                .map(|row| {
                    let mut out = vec![false; n.min(width)];
                    if n < width {
                        out.extend_from_slice(&row[..width - n]);
                    } else {
                        out = vec![false; width];
                    }
                    out
                })
                .collect()
        } else {
            let n = (-cols_shift) as usize;
            shifted
                .iter()
                .map(|row| {
                    if n >= width {
                        vec![false; width]
                    } else {
                        let mut out = row[n..].to_vec();
                        out.extend(vec![false; n]);
                        out
                    }
                })
                .collect()
        };
        Ok(Raster { rows, width })
    }

    /// Remove the stated number of edge pixels.
    ///
    /// Yields a blank raster of the adjusted width if the remaining height
    /// would be zero or negative.
    pub fn crop(&self, left: usize, bottom: usize, right: usize, top: usize) -> Self {
        let h = self.height();
        if h <= top + bottom {
            return Raster::blank(self.width().saturating_sub(left + right), 0);
        }
        let kept_rows = &self.rows()[top..h - bottom];
        let w = self.width();
        if w <= left + right {
            return Raster {
                rows: kept_rows.iter().map(|_| Vec::new()).collect(),
                width: 0,
            };
        }
        let rows: Vec<Vec<bool>> = kept_rows.iter().map(|r| r[left..w - right].to_vec()).collect();
        Raster { rows, width: w - left - right }
    }

    /// Pad with paper.
    pub fn expand(&self, left: usize, bottom: usize, right: usize, top: usize) -> Result<Self, RasterError> {
        let new_width = left + self.width() + right;
        if top + self.height() + bottom == 0 {
            return Ok(Raster::blank(new_width, 0));
        }
        let mut rows = Vec::with_capacity(top + self.height() + bottom);
        for _ in 0..top {
            rows.push(vec![false; new_width]);
        }
        for row in self.rows() {
            let mut padded = vec![false; left];
            padded.extend(row.iter().copied());
            padded.extend(vec![false; right]);
            rows.push(padded);
        }
        for _ in 0..bottom {
            rows.push(vec![false; new_width]);
        }
        Ok(Raster { rows, width: new_width })
    }

    /// Replicate each column `factor_x` times and each row `factor_y` times.
    pub fn stretch(&self, factor_x: usize, factor_y: usize) -> Self {
        let rows: Vec<Vec<bool>> = self
            .rows()
            .iter()
            .flat_map(|row| {
                let stretched: Vec<bool> = row
                    .iter()
                    .flat_map(|&b| std::iter::repeat(b).take(factor_x.max(1)))
                    .collect();
                std::iter::repeat(stretched).take(factor_y.max(1))
            })
            .collect();
        let width = self.width() * factor_x.max(1);
        Raster { rows, width }
    }

    /// Take every `factor_x`-th column and every `factor_y`-th row.
    pub fn shrink(&self, factor_x: usize, factor_y: usize) -> Self {
        let fx = factor_x.max(1);
        let fy = factor_y.max(1);
        let rows: Vec<Vec<bool>> = self
            .rows()
            .iter()
            .step_by(fy)
            .map(|row| row.iter().step_by(fx).copied().collect())
            .collect();
        let width = ceildiv_usize(self.width(), fx);
        Raster { rows, width }
    }

    /// Horizontally join equal-height rasters left-to-right.
    ///
    /// Empty (zero-width) rasters are dropped; an empty input list yields an
    /// empty raster. Raises if the non-empty rasters differ in height.
    pub fn concatenate(rasters: &[Raster]) -> Result<Raster, RasterError> {
        let nonempty: Vec<&Raster> = rasters.iter().filter(|r| r.width() > 0).collect();
        if nonempty.is_empty() {
            return Ok(Raster::empty());
        }
        let height = nonempty[0].height();
        for r in &nonempty {
            if r.height() != height {
                return Err(RasterError::HeightMismatch {
                    expected: height,
                    actual: r.height(),
                });
            }
        }
        let width: usize = nonempty.iter().map(|r| r.width()).sum();
        let rows: Vec<Vec<bool>> = (0..height)
            .map(|i| {
                let mut row = Vec::with_capacity(width);
                for r in &nonempty {
                    row.extend_from_slice(r.row(i));
                }
                row
            })
            .collect();
        Ok(Raster { rows, width })
    }
}

fn ceildiv_usize(num: usize, den: usize) -> usize {
    if den == 0 {
        0
    } else {
        (num + den - 1) / den
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(rows: &[&str]) -> Raster {
        Raster::from_rows(
            rows.iter()
                .map(|row| row.chars().map(|c| c == '1').collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn rotation_seed_scenario() {
        // spec.md §8 seed 1: 2x3 -> turn(clockwise=1) -> 3x2
        let input = r(&["10", "11", "01"]);
        let rotated = input.turn(1, 0);
        assert_eq!(rotated.width(), 3);
        assert_eq!(rotated.height(), 2);
        let expected = r(&["011", "110"]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn turn_identity_and_full_circle() {
        let input = r(&["10", "11", "01"]);
        assert_eq!(input.turn(0, 0), input);
        assert_eq!(input.turn(4, 0), input);
    }

    #[test]
    fn double_mirror_flip_transpose_are_identity() {
        let input = r(&["10", "11", "01"]);
        assert_eq!(input.mirror().mirror(), input);
        assert_eq!(input.flip().flip(), input);
        assert_eq!(input.transpose().transpose(), input);
    }

    #[test]
    fn expand_then_crop_is_identity() {
        let input = r(&["10", "11", "01"]);
        let round = input.expand(1, 2, 3, 4).unwrap().crop(1, 2, 3, 4);
        assert_eq!(round, input);
    }

    #[test]
    fn roll_inverse() {
        let input = r(&["10", "11", "01"]);
        assert_eq!(input.roll(1, 1).roll(-1, -1), input);
    }

    #[test]
    fn concatenate_width_and_height_mismatch() {
        let a = r(&["1", "0"]);
        let b = r(&["0", "1"]);
        let cat = Raster::concatenate(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(cat.width(), a.width() + b.width());

        let c = r(&["1"]);
        let err = Raster::concatenate(&[a, c]).unwrap_err();
        assert!(matches!(err, RasterError::HeightMismatch { .. }));
    }

    #[test]
    fn shrink_and_stretch_are_not_required_to_invert_but_sanity_check_sizes() {
        let input = r(&["1100", "1100", "0011", "0011"]);
        let shrunk = input.shrink(2, 2);
        assert_eq!((shrunk.width(), shrunk.height()), (2, 2));
        let stretched = shrunk.stretch(2, 2);
        assert_eq!((stretched.width(), stretched.height()), (4, 4));
    }
}
