//! Logical (pixel-combining) raster transforms.

use crate::error::RasterError;
use crate::options::{OverlayOp, ShearDirection};
use crate::raster::Raster;

impl Raster {
    /// Combine equal-sized rasters pointwise.
    ///
    /// `OverlayOp::Any` is union (logical OR); `OverlayOp::All` is
    /// intersection (logical AND). All inputs must share size.
    pub fn overlay(rasters: &[Raster], op: OverlayOp) -> Result<Raster, RasterError> {
        let first = rasters.first().ok_or(RasterError::SizeMismatch {
            expected: (0, 0),
            actual: (0, 0),
        })?;
        let (width, height) = (first.width(), first.height());
        for r in rasters {
            if r.width() != width || r.height() != height {
                return Err(RasterError::SizeMismatch {
                    expected: (width, height),
                    actual: (r.width(), r.height()),
                });
            }
        }
        let rows: Vec<Vec<bool>> = (0..height)
            .map(|i| {
                (0..width)
                    .map(|j| {
                        let mut bits = rasters.iter().map(|r| r.get(i, j));
                        match op {
                            OverlayOp::Any => bits.any(|b| b),
                            OverlayOp::All => bits.all(|b| b),
                        }
                    })
                    .collect()
            })
            .collect();
        Raster::from_rows(rows)
    }

    /// Swap ink and paper.
    pub fn invert(&self) -> Self {
        let rows = self
            .rows()
            .iter()
            .map(|row| row.iter().map(|&b| !b).collect())
            .collect();
        Raster { rows, width: self.width() }
    }

    /// Repeatedly union the raster with itself shifted by each unit up to
    /// the given counts in each direction.
    pub fn smear(&self, left: usize, right: usize, up: usize, down: usize) -> Result<Raster, RasterError> {
        let mut work = self.clone();
        for group in [
            (0..left).map(|i| (i + 1, 0, 0, 0)).collect::<Vec<_>>(),
            (0..right).map(|i| (0, 0, i + 1, 0)).collect(),
            (0..up).map(|i| (0, 0, 0, i + 1)).collect(),
            (0..down).map(|i| (0, i + 1, 0, 0)).collect(),
        ] {
            if group.is_empty() {
                continue;
            }
            let mut variants = vec![work.clone()];
            for (l, d, rr, u) in group {
                variants.push(work.shift(l, d, rr, u)?);
            }
            work = Raster::overlay(&variants, OverlayOp::Any)?;
        }
        Ok(work)
    }

    /// Diagonally translate each row by
    /// `floor((y*xpitch + modulo) / ypitch) - [modulo == ypitch]` pixels,
    /// filling the exposed area with paper.
    pub fn shear(
        &self,
        direction: ShearDirection,
        pitch: (i64, i64),
        modulo: i64,
    ) -> Result<Raster, RasterError> {
        let (xpitch, ypitch) = pitch;
        let height = self.height() as i64;
        let width = self.width();
        let empty_row = vec![false; width];
        let mut rows = Vec::with_capacity(self.height());
        for (row, y) in self.rows().iter().zip((0..height).rev()) {
            let shift = (y * xpitch + modulo).div_euclid(ypitch) - i64::from(modulo == ypitch);
            let shifted = match direction {
                ShearDirection::Left => shift_row_left(row, &empty_row, shift),
                ShearDirection::Right => shift_row_right(row, &empty_row, shift),
            };
            rows.push(shifted);
        }
        Raster::from_rows(rows)
    }

    /// Set every pixel in the inclusive row band
    /// `[height-1-top_height, height-1-bottom_height]` to ink.
    pub fn underline(&self, top_height: usize, bottom_height: usize) -> Raster {
        if bottom_height > top_height {
            return self.clone();
        }
        let h = self.height();
        let top = top_height.min(h);
        let bottom = bottom_height.min(h);
        let rows: Vec<Vec<bool>> = self
            .rows()
            .iter()
            .enumerate()
            .map(|(line, row)| {
                let from_bottom = h.saturating_sub(1).saturating_sub(line);
                if from_bottom <= top && from_bottom >= bottom {
                    vec![true; self.width()]
                } else {
                    row.clone()
                }
            })
            .collect();
        Raster { rows, width: self.width() }
    }
}

// `y` is derived from `floor((row * xpitch + modulo) / ypitch)`; for the
// conventional (non-negative pitch, `0 <= modulo < ypitch`) parameters this
// workspace expects, `y` is always non-negative, so only that case needs to
// preserve row width exactly. Out-of-range `y` clamps rather than panics.
fn shift_row_left(row: &[bool], _empty_row: &[bool], y: i64) -> Vec<bool> {
    let width = row.len();
    let y = y.clamp(0, width as i64) as usize;
    let mut out = row[y..].to_vec();
    out.extend(std::iter::repeat(false).take(y));
    out
}

fn shift_row_right(row: &[bool], _empty_row: &[bool], y: i64) -> Vec<bool> {
    let width = row.len();
    let y = y.clamp(0, width as i64) as usize;
    let mut out = vec![false; y];
    out.extend_from_slice(&row[..width - y]);
    out
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
    fn overlay_all_with_self_is_identity() {
        let a = r(&["10", "11"]);
        let result = Raster::overlay(&[a.clone(), a.clone()], OverlayOp::All).unwrap();
        assert_eq!(result, a);
    }

    #[test]
    fn overlay_any_with_blank_is_identity() {
        let a = r(&["10", "11"]);
        let blank = Raster::blank(a.width(), a.height());
        let result = Raster::overlay(&[a.clone(), blank], OverlayOp::Any).unwrap();
        assert_eq!(result, a);
    }

    #[test]
    fn invert_invert_is_identity() {
        let a = r(&["10", "11"]);
        assert_eq!(a.invert().invert(), a);
    }

    #[test]
    fn underline_adds_band() {
        let a = Raster::blank(4, 4);
        let underlined = a.underline(0, 0);
        // bottom row (line index height-1) should be fully inked
        assert!(underlined.row(3).iter().all(|&b| b));
        assert!(underlined.row(0).iter().all(|&b| !b));
    }

    #[test]
    fn underline_noop_when_bottom_above_top() {
        let a = r(&["10", "11"]);
        assert_eq!(a.underline(0, 1), a);
    }

    #[test]
    fn smear_right_extends_ink() {
        let a = r(&["100", "000", "000"]);
        let smeared = a.smear(0, 2, 0, 0).unwrap();
        assert_eq!(smeared.row(0), &[true, true, true]);
    }

    #[test]
    fn shear_right_shifts_bottom_row_least() {
        let a = Raster::from_rows(vec![vec![true; 4]; 2]).unwrap();
        let sheared = a.shear(ShearDirection::Right, (1, 1), 0).unwrap();
        assert_eq!(sheared.width(), 4);
        assert_eq!(sheared.height(), 2);
    }
}
