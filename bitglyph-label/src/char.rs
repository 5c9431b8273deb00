//! Character labels: a Unicode character or grapheme sequence.

use std::fmt;

/// A character (or grapheme-cluster sequence) label.
///
/// Mirrors a Python `str`-derived label: any non-empty sequence of Unicode
/// scalar values is legal, including multi-character sequences used for
/// ligature or combining-mark glyphs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Char(String);

impl Char {
    pub fn new(value: impl Into<String>) -> Self {
        Char(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Char {
    /// `u+XXXX` per codepoint, comma-separated, lowercase, zero-padded to at
    /// least 4 hex digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.chars().map(|c| format!("u+{:04x}", c as u32)).collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl From<char> for Char {
    fn from(c: char) -> Self {
        Char(c.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_single_char() {
        assert_eq!(Char::new("A").to_string(), "u+0041");
    }

    #[test]
    fn display_sequence() {
        assert_eq!(Char::new("ab").to_string(), "u+0061, u+0062");
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Char::new("a") < Char::new("b"));
    }
}
