//! Serialising rasters to flat bit/byte/hex data (duals of `decode.rs`).

use bitglyph_types::{ceildiv, reverse_by_group};

use crate::options::{Align, BitOrder, ByteOrder};
use crate::raster::Raster;

fn pack_msb_first(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            let mut byte = 0u8;
            for (i, &bit) in chunk.iter().enumerate() {
                if bit {
                    byte |= 1 << (7 - i);
                }
            }
            byte
        })
        .collect()
}

impl Raster {
    /// Flatten the raster row-major into a sequence of caller-chosen ink /
    /// paper markers.
    pub fn as_vector<T: Clone>(&self, ink: T, paper: T) -> Vec<T> {
        self.rows()
            .iter()
            .flat_map(|row| row.iter())
            .map(|&b| if b { ink.clone() } else { paper.clone() })
            .collect()
    }

    /// Flatten the raster row-major into a byte sequence of caller-chosen
    /// ink / paper byte values (one output byte per pixel, not bit-packed).
    pub fn as_bits(&self, ink: u8, paper: u8) -> Vec<u8> {
        self.as_vector(ink, paper)
    }

    /// Pack each row into its own byte-aligned run, `ceil(width / 8)` bytes
    /// per row, clipped/padded per `align`.
    pub fn as_byterows(&self, align: Align, bit_order: BitOrder) -> Vec<Vec<u8>> {
        if self.height() == 0 || self.width() == 0 {
            return Vec::new();
        }
        let bytewidth = ceildiv(self.width(), 8);
        let total_bits = 8 * bytewidth;
        self.rows()
            .iter()
            .map(|row| {
                let pad = total_bits - row.len();
                let mut bits = match align {
                    Align::Right => {
                        let mut v = vec![false; pad];
                        v.extend(row.iter().copied());
                        v
                    }
                    _ => {
                        let mut v = row.clone();
                        v.extend(std::iter::repeat(false).take(pad));
                        v
                    }
                };
                if bit_order == BitOrder::Little {
                    bits = reverse_by_group(&bits, 8);
                }
                pack_msb_first(&bits)
            })
            .collect()
    }

    /// Convert the raster to flat bytes.
    ///
    /// `stride`, when given, pads/crops each row to that many pixels before
    /// packing (padding on the left for `Align::Right`, on the right
    /// otherwise).
    pub fn as_bytes(
        &self,
        align: Align,
        stride: Option<usize>,
        byte_swap: usize,
        bit_order: BitOrder,
    ) -> Vec<u8> {
        if self.height() == 0 || self.width() == 0 {
            return Vec::new();
        }
        let expanded;
        let raster = if let Some(stride) = stride {
            expanded = if align == Align::Right {
                self.expand(stride.saturating_sub(self.width()), 0, 0, 0)
                    .expect("non-negative expand")
            } else {
                self.expand(0, 0, stride.saturating_sub(self.width()), 0)
                    .expect("non-negative expand")
            };
            &expanded
        } else {
            self
        };

        let mut bytes = if align == Align::Bit {
            let mut bits: Vec<bool> = raster
                .rows()
                .iter()
                .flat_map(|row| row.iter().copied())
                .collect();
            if bit_order == BitOrder::Little {
                bits = reverse_by_group(&bits, 8);
            }
            let bytesize = ceildiv(bits.len(), 8);
            let pad_front = bytesize * 8 - bits.len();
            let mut full = vec![false; pad_front];
            full.extend(bits);
            pack_msb_first(&full)
        } else {
            raster
                .as_byterows(align, bit_order)
                .into_iter()
                .flatten()
                .collect()
        };

        if byte_swap > 0 {
            // Unlike `from_bytes`, the swap-padding here is not trimmed back:
            // the caller asked for whole `byte_swap`-sized groups.
            let padded_len = ceildiv(bytes.len(), byte_swap) * byte_swap;
            bytes.resize(padded_len, 0);
            bytes = reverse_by_group(&bytes, byte_swap);
        }
        bytes
    }

    /// The exact byte length [`Raster::as_bytes`] would produce for the
    /// given `align`/`stride`.
    pub fn get_byte_size(&self, align: Align, stride: Option<usize>) -> usize {
        if self.height() == 0 || self.width() == 0 {
            return 0;
        }
        let stride = stride.unwrap_or(self.width());
        if align == Align::Bit {
            ceildiv(stride * self.height(), 8)
        } else {
            ceildiv(stride, 8) * self.height()
        }
    }

    /// Shortcut over [`Raster::as_bytes`] producing a lowercase hex string.
    pub fn as_hex(&self, align: Align) -> String {
        self.as_bytes(align, None, 0, BitOrder::Big)
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_size_matches_as_bytes_len() {
        let r = Raster::blank(12, 5);
        let size = r.get_byte_size(Align::Left, None);
        assert_eq!(size, r.as_bytes(Align::Left, None, 0, BitOrder::Big).len());
    }

    #[test]
    fn empty_raster_serialises_to_nothing() {
        let r = Raster::blank(0, 0);
        assert_eq!(r.as_bytes(Align::Left, None, 0, BitOrder::Big), Vec::<u8>::new());
        assert_eq!(r.get_byte_size(Align::Left, None), 0);
    }

    #[test]
    fn from_bytes_as_bytes_roundtrip_full_byte_width() {
        let bytes = vec![0b1010_0101, 0b1111_0000, 0b0000_1111];
        let r = crate::Raster::from_bytes(
            &bytes,
            Some(8),
            Some(3),
            None,
            Align::Left,
            ByteOrder::RowMajor,
            0,
            BitOrder::Big,
        )
        .unwrap();
        assert_eq!(r.as_bytes(Align::Left, None, 0, BitOrder::Big), bytes);
    }
}
