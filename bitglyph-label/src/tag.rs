//! Tag labels: free-form names that aren't characters or codepoints.

use std::fmt;

/// A free-form tag label, e.g. a glyph name like `"a.sc"` or `"uni0041"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag(String);

impl Tag {
    pub fn new(value: impl Into<String>) -> Self {
        Tag(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Tag {
    /// Quotes the tag unless it is unambiguous and legal unquoted: at least
    /// two characters, starting with an ASCII letter, containing only
    /// ASCII alphanumerics, `_`, `-`, or `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs_quoting = self.0.chars().count() < 2
            || !self.0.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            || self
                .0
                .chars()
                .any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')));
        if needs_quoting {
            write!(f, "\"{}\"", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifier_is_unquoted() {
        assert_eq!(Tag::new("uni0041").to_string(), "uni0041");
    }

    #[test]
    fn single_char_is_quoted() {
        assert_eq!(Tag::new("a").to_string(), "\"a\"");
    }

    #[test]
    fn leading_digit_is_quoted() {
        assert_eq!(Tag::new("0x41").to_string(), "\"0x41\"");
    }

    #[test]
    fn dotted_suffix_is_unquoted() {
        assert_eq!(Tag::new("a.sc").to_string(), "a.sc");
    }

    #[test]
    fn space_forces_quoting() {
        assert_eq!(Tag::new("my tag").to_string(), "\"my tag\"");
    }
}
