//! Constructing rasters from flat bit/byte/hex data.

use bitglyph_types::{bytes_to_bits, ceildiv, reverse_by_group, Trim};

use crate::error::RasterError;
use crate::options::{Align, BitOrder, ByteOrder};
use crate::raster::Raster;

impl Raster {
    /// Reshape a flat bit sequence into a matrix.
    ///
    /// `stride` is the bit-pitch between rows; `width` (default: `stride`)
    /// is the number of columns retained per row. `align = Right` reads
    /// columns `[stride - width, stride)` of each row; `Left` (and `Bit`,
    /// which has no special meaning here) reads `[0, width)`. Excess bits at
    /// the tail that don't fill a full row are ignored.
    pub fn from_vector(
        bits: &[bool],
        stride: usize,
        width: Option<usize>,
        height: Option<usize>,
        align: Align,
    ) -> Result<Self, RasterError> {
        let width = width.unwrap_or(stride);
        if bits.is_empty() || width == 0 || stride == 0 {
            return Ok(Raster::empty());
        }
        let offset = if align == Align::Right {
            stride - width
        } else {
            0
        };
        let excess = bits.len() % stride;
        let usable_len = bits.len() - excess;
        let mut rows = Vec::new();
        let mut pos = offset;
        while pos < usable_len {
            rows.push(bits[pos..pos + width].to_vec());
            pos += stride;
        }
        if let Some(height) = height {
            if rows.len() < height {
                return Err(RasterError::TooShort {
                    needed: height,
                    got: rows.len(),
                });
            }
            rows.truncate(height);
        }
        Raster::from_rows(rows)
    }

    /// Decode a byte buffer into a raster.
    ///
    /// See spec.md §4.2 for the full semantics of each parameter. At least
    /// one of `width`, `height`, `stride` must be given.
    #[allow(clippy::too_many_arguments)]
    pub fn from_bytes(
        data: &[u8],
        width: Option<usize>,
        height: Option<usize>,
        stride: Option<usize>,
        align: Align,
        order: ByteOrder,
        byte_swap: usize,
        bit_order: BitOrder,
    ) -> Result<Self, RasterError> {
        if width.is_none() && height.is_none() && stride.is_none() {
            return Err(RasterError::NoDimensions);
        }
        if width == Some(0) || height == Some(0) {
            let height = height.unwrap_or(0);
            return Ok(Raster::blank(width.unwrap_or(0), height));
        }

        let stride = match stride {
            Some(s) => s,
            None if align != Align::Bit => match width {
                Some(w) => 8 * ceildiv(w, 8),
                None => 8 * (data.len() / height.ok_or(RasterError::NoDimensions)?),
            },
            None => match width {
                Some(w) => w,
                None => (8 * data.len()) / height.ok_or(RasterError::NoDimensions)?,
            },
        };
        let width = width.unwrap_or(stride);

        let mut data = data.to_vec();
        if byte_swap > 0 {
            let orig_len = data.len();
            let padded_len = ceildiv(data.len(), byte_swap) * byte_swap;
            data.resize(padded_len, 0);
            data = reverse_by_group(&data, byte_swap);
            data.truncate(orig_len);
        }

        if order == ByteOrder::ColumnMajor && align != Align::Bit {
            let height = height.ok_or(RasterError::NoDimensions)?;
            let mut reordered = Vec::with_capacity(data.len());
            for offset in 0..height {
                let mut idx = offset;
                while idx < data.len() {
                    reordered.push(data[idx]);
                    idx += height;
                }
            }
            data = reordered;
        }

        let mut bits = bytes_to_bits(&data, None, Trim::Left);
        if bit_order == BitOrder::Little {
            bits = reverse_by_group(&bits, 8);
        }
        Raster::from_vector(&bits, stride, Some(width), height, align)
    }

    /// Shortcut over [`Raster::from_bytes`] starting from a hex string.
    pub fn from_hex(
        hex: &str,
        width: usize,
        height: Option<usize>,
        align: Align,
    ) -> Result<Self, RasterError> {
        let bytes = decode_hex(hex)?;
        Raster::from_bytes(
            &bytes,
            Some(width),
            height,
            None,
            align,
            ByteOrder::RowMajor,
            0,
            BitOrder::Big,
        )
    }
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, RasterError> {
    if hex.len() % 2 != 0 {
        return Err(RasterError::InvalidHex(hex.to_string()));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| RasterError::InvalidHex(hex.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink_cols(r: &Raster, row: usize) -> Vec<usize> {
        (0..r.width()).filter(|&c| r.get(row, c)).collect()
    }

    #[test]
    fn bit_order_symmetric_byte() {
        // 0x81 = 0b10000001, bit-reversal-symmetric.
        let big = Raster::from_bytes(
            &[0x81],
            Some(8),
            None,
            None,
            Align::Left,
            ByteOrder::RowMajor,
            0,
            BitOrder::Big,
        )
        .unwrap();
        assert_eq!(ink_cols(&big, 0), vec![0, 7]);

        let little = Raster::from_bytes(
            &[0x81],
            Some(8),
            None,
            None,
            Align::Left,
            ByteOrder::RowMajor,
            0,
            BitOrder::Little,
        )
        .unwrap();
        assert_eq!(ink_cols(&little, 0), vec![0, 7]);
    }

    #[test]
    fn bit_order_asymmetric_byte() {
        let big = Raster::from_bytes(
            &[0x01],
            Some(8),
            None,
            None,
            Align::Left,
            ByteOrder::RowMajor,
            0,
            BitOrder::Big,
        )
        .unwrap();
        assert_eq!(ink_cols(&big, 0), vec![7]);

        let little = Raster::from_bytes(
            &[0x01],
            Some(8),
            None,
            None,
            Align::Left,
            ByteOrder::RowMajor,
            0,
            BitOrder::Little,
        )
        .unwrap();
        assert_eq!(ink_cols(&little, 0), vec![0]);
    }

    #[test]
    fn from_hex_roundtrips_with_as_hex() {
        for align in [Align::Left, Align::Right] {
            let r = Raster::from_bytes(
                &[0b1010_1010, 0b0101_0101],
                Some(8),
                Some(2),
                None,
                align,
                ByteOrder::RowMajor,
                0,
                BitOrder::Big,
            )
            .unwrap();
            let hex = r.as_hex(align);
            let back = Raster::from_hex(&hex, 8, Some(2), align).unwrap();
            assert_eq!(back, r);
        }
    }

    #[test]
    fn from_vector_ignores_tail_excess() {
        let bits = vec![true, false, true, false, true]; // 5 bits, stride 2 -> 2 rows, 1 excess bit
        let r = Raster::from_vector(&bits, 2, None, None, Align::Left).unwrap();
        assert_eq!(r.height(), 2);
        assert_eq!(r.width(), 2);
    }

    #[test]
    fn from_vector_too_short_for_requested_height() {
        let bits = vec![true, false, true, false];
        let err = Raster::from_vector(&bits, 2, None, Some(5), Align::Left).unwrap_err();
        assert_eq!(
            err,
            RasterError::TooShort {
                needed: 5,
                got: 2
            }
        );
    }
}
