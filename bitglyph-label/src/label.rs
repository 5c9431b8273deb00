//! The `Label` tagged union and its string parsing/printing rules.

use std::fmt;

use crate::char::Char;
use crate::codepoint::Codepoint;
use crate::error::LabelError;
use crate::tag::Tag;

/// A label identifying a glyph: a character (or grapheme sequence), a
/// legacy/multi-byte codepoint, or a free-form tag.
///
/// Variants never compare equal to each other, regardless of contents; the
/// derived [`PartialEq`]/[`Eq`] already gives this since different enum
/// variants are never equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    Character(Char),
    Codepoint(Codepoint),
    Tag(Tag),
}

impl Label {
    pub fn is_empty(&self) -> bool {
        match self {
            Label::Character(c) => c.is_empty(),
            Label::Codepoint(c) => c.is_empty(),
            Label::Tag(t) => t.is_empty(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Character(c) => c.fmt(f),
            Label::Codepoint(c) => c.fmt(f),
            Label::Tag(t) => t.fmt(f),
        }
    }
}

fn is_enclosed(s: &str, delim: char) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => first == delim && last == delim && s.chars().count() >= 2,
        _ => false,
    }
}

fn strip_enclosed(s: &str, delim: char) -> &str {
    debug_assert!(is_enclosed(s, delim));
    let first_len = s.chars().next().unwrap().len_utf8();
    let last_len = s.chars().next_back().unwrap().len_utf8();
    &s[first_len..s.len() - last_len]
}

/// Parse a `u+XXXX`/quoted-char comma list into a character sequence, as
/// used for composite labels like `u+0041,u+0301`.
fn parse_char_sequence(value: &str) -> Option<Char> {
    let mut out = String::new();
    for elem in value.split(',') {
        let elem = elem.trim();
        if elem.is_empty() {
            continue;
        }
        if is_enclosed(elem, '\'') {
            out.push_str(strip_enclosed(elem, '\''));
            continue;
        }
        let lower = elem.to_lowercase();
        let hex = lower.strip_prefix("u+")?;
        let cp = u32::from_str_radix(hex, 16).ok()?;
        out.push(char::from_u32(cp)?);
    }
    Some(Char::new(out))
}

/// Convert a yaff-style label string to its character/codepoint/tag label.
///
/// This never fails: anything that isn't recognisably a character or
/// codepoint falls back to a [`Label::Tag`].
pub fn to_label(value: &str) -> Label {
    if value.is_empty() {
        return Label::Character(Char::default());
    }
    if is_enclosed(value, '"') {
        return Label::Tag(Tag::new(strip_enclosed(value, '"')));
    }
    if is_enclosed(value, '\'') {
        return Label::Character(Char::new(strip_enclosed(value, '\'')));
    }
    if let Ok(cp) = Codepoint::parse(value) {
        return Label::Codepoint(cp);
    }
    let char_count = value.chars().count();
    if char_count == 1 {
        return Label::Character(Char::new(value));
    }
    if value.chars().any(|c| (c as u32) > 0x7f) {
        return Label::Character(Char::new(value));
    }
    if let Some(seq) = parse_char_sequence(value) {
        return Label::Character(seq);
    }
    Label::Tag(Tag::new(value.trim()))
}

/// Inclusive range of labels between two same-variant bounds.
pub fn label_range(lower: &Label, upper: &Label) -> Result<Vec<Label>, LabelError> {
    match (lower, upper) {
        (Label::Codepoint(a), Label::Codepoint(b)) => {
            let lo = a.to_int()?;
            let hi = b.to_int()?;
            Ok((lo..=hi).map(Codepoint::from_int).map(Label::Codepoint).collect())
        }
        (Label::Character(a), Label::Character(b)) => {
            let lo = a
                .value()
                .chars()
                .next()
                .ok_or_else(|| LabelError::Unparseable(a.value().to_string()))?;
            let hi = b
                .value()
                .chars()
                .next()
                .ok_or_else(|| LabelError::Unparseable(b.value().to_string()))?;
            Ok((lo as u32..=hi as u32)
                .filter_map(char::from_u32)
                .map(|c| Label::Character(Char::from(c)))
                .collect())
        }
        _ => Err(LabelError::MixedRangeBounds),
    }
}

/// Parse a comma-separated set/range specification, e.g. `"a-z,0x41-0x5a"`.
///
/// Each comma-separated element is either a single label or an inclusive
/// `lower-upper` range. Open-ended ranges (`"1-"`) are not supported: this
/// workspace has no consumer that needs an unbounded label stream, unlike
/// the lazy generator the original tool offered.
pub fn to_labels(set_str: &str) -> Result<Vec<Label>, LabelError> {
    let mut out = Vec::new();
    for element in set_str.split(',') {
        let element = element.trim();
        if element.is_empty() {
            continue;
        }
        if let Some((lo, hi)) = element.split_once('-') {
            if hi.is_empty() {
                return Err(LabelError::Unparseable(format!(
                    "open-ended ranges are not supported: `{element}`"
                )));
            }
            let lower = to_label(lo);
            let upper = to_label(hi);
            out.extend(label_range(&lower, &upper)?);
        } else {
            out.push(to_label(element));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_empty_character() {
        assert_eq!(to_label(""), Label::Character(Char::default()));
    }

    #[test]
    fn quoted_tag_is_preserved_verbatim() {
        assert_eq!(to_label("\"0x41\""), Label::Tag(Tag::new("0x41")));
    }

    #[test]
    fn single_quoted_char() {
        assert_eq!(to_label("'a'"), Label::Character(Char::new("a")));
    }

    #[test]
    fn bare_hex_is_codepoint() {
        assert_eq!(to_label("0x41"), Label::Codepoint(Codepoint::from_int(0x41)));
    }

    #[test]
    fn single_char_unquoted_is_character() {
        assert_eq!(to_label("a"), Label::Character(Char::new("a")));
    }

    #[test]
    fn non_ascii_unquoted_is_character() {
        assert_eq!(to_label("\u{00e9}"), Label::Character(Char::new("\u{00e9}")));
    }

    #[test]
    fn u_plus_sequence_is_character() {
        assert_eq!(to_label("u+0041"), Label::Character(Char::new("A")));
    }

    #[test]
    fn bare_word_falls_back_to_tag() {
        assert_eq!(to_label("space"), Label::Tag(Tag::new("space")));
    }

    #[test]
    fn cross_variant_never_equal() {
        let a = Label::Character(Char::new("A"));
        let b = Label::Tag(Tag::new("A"));
        assert_ne!(a, b);
    }

    #[test]
    fn to_labels_expands_codepoint_range() {
        let labels = to_labels("0x41-0x43").unwrap();
        assert_eq!(
            labels,
            vec![
                Label::Codepoint(Codepoint::from_int(0x41)),
                Label::Codepoint(Codepoint::from_int(0x42)),
                Label::Codepoint(Codepoint::from_int(0x43)),
            ]
        );
    }

    #[test]
    fn to_labels_rejects_open_ended_range() {
        assert!(to_labels("0x41-").is_err());
    }
}
