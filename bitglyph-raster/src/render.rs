//! Rendering rasters as human-readable text.

use crate::error::RasterError;
use crate::raster::Raster;

impl Raster {
    /// Render as a multi-line string, one character per pixel.
    ///
    /// `start`/`end` are prepended/appended to each line (and therefore to
    /// the whole string once, since they sit between consecutive lines too).
    /// Returns the empty string for a zero-height raster.
    pub fn as_text(&self, ink: char, paper: char, start: &str, end: &str) -> String {
        if self.height() == 0 {
            return String::new();
        }
        let lines: Vec<String> = self
            .rows()
            .iter()
            .map(|row| row.iter().map(|&b| if b { ink } else { paper }).collect())
            .collect();
        let joiner = format!("{end}{start}");
        format!("{start}{}{end}", lines.join(&joiner))
    }

    /// Render using Unicode block/sixel/Braille elements, each character
    /// standing in for a `resolution.0 x resolution.1` block of pixels.
    ///
    /// Supported resolutions: `(1,1)`, `(1,2)`, `(1,3)`, `(2,1)`, `(2,2)`,
    /// `(2,3)`, `(2,4)` (Braille).
    pub fn as_blocks(&self, resolution: (usize, usize)) -> Result<String, RasterError> {
        if self.height() == 0 {
            return Ok(String::new());
        }
        let (ncols, nrows) = resolution;
        let lookup = blocks_for(ncols, nrows)?;
        let out_rows = bitglyph_types::ceildiv(self.height(), nrows);
        let out_cols = bitglyph_types::ceildiv(self.width(), ncols);
        let mut lines = Vec::with_capacity(out_rows);
        for orow in 0..out_rows {
            let mut line = String::with_capacity(out_cols);
            for ocol in 0..out_cols {
                let mut key = Vec::with_capacity(ncols * nrows);
                for sub_row in 0..nrows {
                    for sub_col in 0..ncols {
                        let r = orow * nrows + sub_row;
                        let c = ocol * ncols + sub_col;
                        let bit = r < self.height() && c < self.width() && self.get(r, c);
                        key.push(bit);
                    }
                }
                line.push(lookup(&key));
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

/// Returns a closure mapping a `ncols*nrows`-long bit key (row-major within
/// the cell) to the block character for that resolution.
fn blocks_for(ncols: usize, nrows: usize) -> Result<fn(&[bool]) -> char, RasterError> {
    match (ncols, nrows) {
        (1, 1) => Ok(block_1x1),
        (2, 2) => Ok(block_2x2),
        (2, 1) => Ok(block_2x1),
        (1, 2) => Ok(block_1x2),
        (1, 3) => Ok(block_1x3),
        (2, 3) => Ok(block_2x3),
        (2, 4) => Ok(block_braille),
        _ => Err(RasterError::UnsupportedResolution((ncols, nrows))),
    }
}

fn block_1x1(key: &[bool]) -> char {
    if key[0] {
        '\u{2588}'
    } else {
        ' '
    }
}

// quadrant key order is (top-left, top-right, bottom-left, bottom-right)
fn block_2x2(key: &[bool]) -> char {
    match (key[0], key[1], key[2], key[3]) {
        (false, false, false, false) => ' ',
        (false, false, false, true) => '\u{2597}',
        (false, false, true, false) => '\u{2596}',
        (false, false, true, true) => '\u{2584}',
        (false, true, false, false) => '\u{259d}',
        (false, true, false, true) => '\u{2590}',
        (false, true, true, false) => '\u{259e}',
        (false, true, true, true) => '\u{259f}',
        (true, false, false, false) => '\u{2598}',
        (true, false, false, true) => '\u{259a}',
        (true, false, true, false) => '\u{258c}',
        (true, false, true, true) => '\u{2599}',
        (true, true, false, false) => '\u{2580}',
        (true, true, false, true) => '\u{259c}',
        (true, true, true, false) => '\u{259b}',
        (true, true, true, true) => '\u{2588}',
    }
}

fn block_2x1(key: &[bool]) -> char {
    block_2x2(&[key[0], key[1], key[0], key[1]])
}

fn block_1x2(key: &[bool]) -> char {
    block_2x2(&[key[0], key[0], key[1], key[1]])
}

fn block_1x3(key: &[bool]) -> char {
    block_2x3(&[key[0], key[0], key[1], key[1], key[2], key[2]])
}

// sixel-style 2x3 cell, bit order (top-left, top-right, mid-left, mid-right,
// bottom-left, bottom-right); code point is 0x1Fb00 + the sixel index formed
// from those bits read bottom-to-top, right-to-left, with the three
// legacy half/full-block overrides kept distinct from the sixel range.
fn block_2x3(key: &[bool]) -> char {
    match key {
        [false, false, false, false, false, false] => return ' ',
        [false, true, false, true, false, true] => return '\u{2590}',
        [true, false, true, false, true, false] => return '\u{258c}',
        [true, true, true, true, true, true] => return '\u{2588}',
        _ => {}
    }
    let (b0, b1, b2, b3, b4, b5) = (key[0], key[1], key[2], key[3], key[4], key[5]);
    let sixbits = (b5 as u8) << 5 | (b4 as u8) << 4 | (b3 as u8) << 3 | (b2 as u8) << 2 | (b1 as u8) << 1 | (b0 as u8);
    let index = sixel_index(sixbits);
    char::from_u32(0x1Fb00 + index as u32).unwrap_or(' ')
}

// sixel table skips the two codes that collide with the half-block overrides
fn sixel_index(code: u8) -> u32 {
    let mut idx = 0u32;
    for c in 1..(2u16.pow(6) - 1) {
        let c = c as u8;
        if c == 0b010101 || c == 0b101010 {
            continue;
        }
        if c == code {
            return idx;
        }
        idx += 1;
    }
    0
}

// Braille dot numbering: dots 1,2,3,7 form the left column top-to-bottom,
// dots 4,5,6,8 the right column; key order is (row-major, 2 cols x 4 rows).
fn block_braille(key: &[bool]) -> char {
    let (r0c0, r0c1, r1c0, r1c1, r2c0, r2c1, r3c0, r3c1) =
        (key[0], key[1], key[2], key[3], key[4], key[5], key[6], key[7]);
    let mut byte = 0u8;
    if r0c0 {
        byte |= 0b0000_0001;
    }
    if r1c0 {
        byte |= 0b0000_0010;
    }
    if r2c0 {
        byte |= 0b0000_0100;
    }
    if r0c1 {
        byte |= 0b0000_1000;
    }
    if r1c1 {
        byte |= 0b0001_0000;
    }
    if r2c1 {
        byte |= 0b0010_0000;
    }
    if r3c0 {
        byte |= 0b0100_0000;
    }
    if r3c1 {
        byte |= 0b1000_0000;
    }
    char::from_u32(0x2800 + byte as u32).unwrap_or(' ')
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
    fn as_text_basic() {
        let raster = r(&["10", "01"]);
        assert_eq!(raster.as_text('@', '.', "", "\n"), "@.\n.@\n");
    }

    #[test]
    fn as_text_empty_raster_is_empty_string() {
        let raster = Raster::blank(0, 0);
        assert_eq!(raster.as_text('@', '.', "", "\n"), "");
    }

    #[test]
    fn as_blocks_1x1_roundtrips_pixel_for_character() {
        let raster = r(&["10", "01"]);
        let blocks = raster.as_blocks((1, 1)).unwrap();
        assert_eq!(blocks, "\u{2588} \n \u{2588}");
    }

    #[test]
    fn as_blocks_2x2_full_block_for_all_ink() {
        let raster = Raster::from_rows(vec![vec![true; 2]; 2]).unwrap();
        let blocks = raster.as_blocks((2, 2)).unwrap();
        assert_eq!(blocks, "\u{2588}");
    }

    #[test]
    fn as_blocks_unsupported_resolution_errors() {
        let raster = r(&["1"]);
        let err = raster.as_blocks((3, 3)).unwrap_err();
        assert!(matches!(err, RasterError::UnsupportedResolution((3, 3))));
    }

    #[test]
    fn as_blocks_braille_empty_cell_is_blank_braille() {
        let raster = Raster::blank(2, 4);
        let blocks = raster.as_blocks((2, 4)).unwrap();
        assert_eq!(blocks, "\u{2800}");
    }
}
