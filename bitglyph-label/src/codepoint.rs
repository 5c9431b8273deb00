//! Codepoint labels: a raw (often multi-byte, MBCS-style) encoded value.

use std::cmp::Ordering;
use std::fmt;

use bitglyph_types::{bytes_to_uint, uint_to_bytes, Endian};

use crate::error::LabelError;

/// A codepoint label: the raw byte-string encoding of a character in some
/// legacy or multi-byte character set.
///
/// Stored big-endian, minimal-length, with leading zero bytes stripped
/// except that a single `0x00` byte (the "empty"/unset codepoint) is kept as
/// `[0]` — never collapsed to a truly empty vector once non-empty input was
/// given. An empty vector means "no codepoint"; it compares as strictly
/// least under [`Codepoint::lt`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Codepoint(Vec<u8>);

impl Codepoint {
    /// Construct directly from raw bytes, stripping leading zero bytes
    /// (keeping at least one byte if the input was non-empty).
    pub fn from_bytes(mut value: Vec<u8>) -> Self {
        if value.len() > 1 {
            let first_nonzero = value.iter().position(|&b| b != 0);
            value = match first_nonzero {
                Some(0) => value,
                Some(i) => value.split_off(i),
                None => vec![0],
            };
        }
        Codepoint(value)
    }

    /// Construct from an integer value, big-endian minimal-length encoding.
    pub fn from_int(value: u64) -> Self {
        Codepoint::from_bytes(uint_to_bytes(value, Endian::Big))
    }

    /// Parse a comma-separated list of integer literals (decimal or
    /// `0x`/`0o`/`0b`-prefixed), one byte string per component, concatenated.
    ///
    /// This mirrors MBCS-style codepoint labels such as `"0xf5,0x02"`.
    pub fn parse(value: &str) -> Result<Self, LabelError> {
        let mut bytes = Vec::new();
        for component in value.split(',') {
            let n = parse_int_literal(component.trim())
                .ok_or_else(|| LabelError::Unparseable(value.to_string()))?;
            bytes.extend(uint_to_bytes(n, Endian::Big));
        }
        Ok(Codepoint::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Integer value, big-endian. Errors on an empty codepoint.
    pub fn to_int(&self) -> Result<u64, LabelError> {
        if self.0.is_empty() {
            return Err(LabelError::EmptyCodepoint);
        }
        bytes_to_uint(&self.0, Endian::Big).ok_or(LabelError::EmptyCodepoint)
    }

    /// Offset by `delta`, reconstructing through the integer value.
    pub fn shift(&self, delta: i64) -> Result<Codepoint, LabelError> {
        let base = self.to_int()? as i128;
        let shifted = base + delta as i128;
        if shifted < 0 || shifted > u64::MAX as i128 {
            return Err(LabelError::CodepointOverflow(shifted));
        }
        Ok(Codepoint::from_int(shifted as u64))
    }

    /// Ordering as defined on the original: an empty codepoint is less than
    /// any non-empty one; a non-empty one is never less than empty.
    pub fn lt(&self, other: &Codepoint) -> bool {
        if other.is_empty() {
            return false;
        }
        self.is_empty() || self.to_int().unwrap_or(0) < other.to_int().unwrap_or(0)
    }

    pub fn gt(&self, other: &Codepoint) -> bool {
        other.lt(self)
    }
}

impl PartialOrd for Codepoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.lt(other) {
            Some(Ordering::Less)
        } else if self.gt(other) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

fn parse_int_literal(s: &str) -> Option<u64> {
    let (s, radix) = if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (rest, 16)
    } else if let Some(rest) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        (rest, 8)
    } else if let Some(rest) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        (rest, 2)
    } else {
        (s, 10)
    };
    u64::from_str_radix(s, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zero_stripped() {
        let cp = Codepoint::from_bytes(vec![0x00, 0x00, 0x41]);
        assert_eq!(cp.as_bytes(), &[0x41]);
    }

    #[test]
    fn all_zero_collapses_to_single_zero_byte() {
        let cp = Codepoint::from_bytes(vec![0x00, 0x00]);
        assert_eq!(cp.as_bytes(), &[0x00]);
    }

    #[test]
    fn empty_is_strictly_least() {
        let empty = Codepoint::from_bytes(Vec::new());
        let nonempty = Codepoint::from_int(1);
        assert!(empty < nonempty);
        assert!(!(nonempty < empty));
    }

    #[test]
    fn ordering_matches_integer_value() {
        assert!(Codepoint::from_int(1) < Codepoint::from_int(2));
        assert!(Codepoint::from_int(256) > Codepoint::from_int(255));
    }

    #[test]
    fn parse_comma_separated_hex() {
        let cp = Codepoint::parse("0xf5,0x02").unwrap();
        assert_eq!(cp.as_bytes(), &[0xf5, 0x02]);
    }

    #[test]
    fn shift_adds_integer_value() {
        let cp = Codepoint::from_int(0x41).shift(1).unwrap();
        assert_eq!(cp.to_int().unwrap(), 0x42);
    }

    #[test]
    fn display_is_0x_prefixed_hex() {
        assert_eq!(Codepoint::from_int(0x41).to_string(), "0x41");
    }
}
