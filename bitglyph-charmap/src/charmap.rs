//! The stored-mapping charmap value type and its set/overlay operations.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use bitglyph_label::{Codepoint, LabelError};

use crate::error::CharmapError;
use crate::text_columns::{load_text_columns, TextColumnsOptions};
use crate::ucm::load_ucm;

/// A loaded (or hand-built) codepoint-to-character mapping.
///
/// Equality compares only the mapping contents, not the display `name` —
/// two charmaps loaded from differently-named files with identical contents
/// are equal.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Charmap {
    name: String,
    ord2chr: BTreeMap<Vec<u8>, String>,
    chr2ord: HashMap<String, Vec<u8>>,
}

impl PartialEq for Charmap {
    fn eq(&self, other: &Self) -> bool {
        self.ord2chr == other.ord2chr
    }
}
impl Eq for Charmap {}

impl Charmap {
    pub fn new() -> Self {
        Charmap::default()
    }

    /// Build from an explicit codepoint -> character mapping.
    pub fn from_mapping(mapping: BTreeMap<Vec<u8>, String>, name: impl Into<String>) -> Self {
        if mapping.is_empty() {
            return Charmap::default();
        }
        let chr2ord = mapping.iter().map(|(k, v)| (v.clone(), k.clone())).collect();
        Charmap {
            name: name.into(),
            ord2chr: mapping,
            chr2ord,
        }
    }

    /// Load a charmap file, dispatching on `format` (falling back to the
    /// file's extension) to the matching text-columns/ucm/html reader.
    pub fn load(path: &Path, format: Option<&str>, name: Option<&str>) -> Result<Self, CharmapError> {
        let data = std::fs::read(path).map_err(|e| CharmapError::IoError(path.display().to_string(), e))?;
        if data.is_empty() {
            return Err(CharmapError::EmptyFile(path.display().to_string()));
        }
        let format = format
            .map(str::to_string)
            .or_else(|| path.extension().map(|e| e.to_string_lossy().to_lowercase()))
            .ok_or_else(|| CharmapError::UnsupportedFormat("<none>".to_string()))?;
        let text = String::from_utf8_lossy(strip_bom(&data));
        let mapping = match format.as_str() {
            "txt" | "enc" | "map" | "ucp" | "adobe" => {
                load_text_columns(&text, &TextColumnsOptions::for_format(&format))
            }
            "ucm" => load_ucm(&text),
            "html" => crate::wikipedia::load_wikipedia(&text, 0, 0, None),
            other => return Err(CharmapError::UnsupportedFormat(other.to_string())),
        };
        let name = name
            .map(str::to_string)
            .or_else(|| path.file_stem().map(|s| s.to_string_lossy().to_string()))
            .unwrap_or_default();
        Ok(Charmap::from_mapping(mapping, name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.ord2chr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ord2chr.is_empty()
    }

    pub fn mapping(&self) -> &BTreeMap<Vec<u8>, String> {
        &self.ord2chr
    }

    /// Character for a codepoint, empty string if undefined.
    pub fn char(&self, codepoint: &Codepoint) -> String {
        self.ord2chr.get(codepoint.as_bytes()).cloned().unwrap_or_default()
    }

    /// Codepoint for a character, if defined.
    pub fn codepoint(&self, ch: &str) -> Option<Codepoint> {
        self.chr2ord.get(ch).map(|bytes| Codepoint::from_bytes(bytes.clone()))
    }

    /// Entries present in `self` that are absent, or differ, in `other`.
    pub fn difference(&self, other: &Charmap) -> Charmap {
        let mapping: BTreeMap<Vec<u8>, String> = self
            .ord2chr
            .iter()
            .filter(|(k, v)| &other.char(&Codepoint::from_bytes((*k).clone())) != *v)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Charmap::from_mapping(mapping, format!("[{}]-[{}]", self.name, other.name))
    }

    /// Union, with `other`'s entries taking precedence on conflict.
    pub fn union(&self, other: &Charmap) -> Charmap {
        let mut mapping = self.ord2chr.clone();
        for (k, v) in &other.ord2chr {
            mapping.insert(k.clone(), v.clone());
        }
        Charmap::from_mapping(mapping, self.name.clone())
    }

    /// Number of codepoints that differ (or are missing on either side).
    pub fn distance(&self, other: &Charmap) -> usize {
        let self_keys: HashSet<&Vec<u8>> = self.ord2chr.keys().collect();
        let other_keys: HashSet<&Vec<u8>> = other.ord2chr.keys().collect();
        let other_only = other_keys.difference(&self_keys).count();
        let self_only = self_keys.difference(&other_keys).count();
        let different = self
            .ord2chr
            .iter()
            .filter(|(k, v)| other.ord2chr.get(*k).is_some_and(|ov| ov != *v))
            .count();
        different + other_only + self_only
    }

    /// Subset containing only codepoints matched by `allowed` (whole
    /// multi-byte keys, or single-byte keys whose lone byte is allowed).
    pub fn take(&self, allowed: &HashSet<Vec<u8>>) -> Charmap {
        let single_byte_allowed: HashSet<u8> = allowed.iter().filter(|k| k.len() == 1).map(|k| k[0]).collect();
        let mapping: BTreeMap<Vec<u8>, String> = self
            .ord2chr
            .iter()
            .filter(|(k, _)| allowed.contains(*k) || (k.len() == 1 && single_byte_allowed.contains(&k[0])))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Charmap::from_mapping(mapping, format!("subset[{}]", self.name))
    }

    /// Overlay `other`'s entries within `range` onto `self`.
    pub fn overlay(&self, other: &Charmap, range: &HashSet<Vec<u8>>) -> Charmap {
        self.union(&other.take(range))
    }

    /// Increment every codepoint by `by`.
    pub fn shift(&self, by: i64) -> Result<Charmap, LabelError> {
        let mut mapping = BTreeMap::new();
        for (k, v) in &self.ord2chr {
            let shifted = Codepoint::from_bytes(k.clone()).shift(by)?;
            mapping.insert(shifted.as_bytes().to_vec(), v.clone());
        }
        Ok(Charmap::from_mapping(mapping, format!("shift-{:x}[{}]", by, self.name)))
    }

    /// One `0x.. : u+XXXX` line per entry.
    pub fn table(&self) -> String {
        self.ord2chr
            .iter()
            .map(|(k, v)| {
                let hex: String = k.iter().map(|b| format!("{b:02x}")).collect();
                let cp = v.chars().next().map(|c| c as u32).unwrap_or(0);
                format!("0x{hex}: u+{cp:04X}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(u8, char)]) -> Charmap {
        let mapping: BTreeMap<Vec<u8>, String> =
            pairs.iter().map(|(b, c)| (vec![*b], c.to_string())).collect();
        Charmap::from_mapping(mapping, "test")
    }

    #[test]
    fn eq_ignores_name() {
        let a = Charmap::from_mapping(BTreeMap::from([(vec![0x41], "A".to_string())]), "one");
        let b = Charmap::from_mapping(BTreeMap::from([(vec![0x41], "A".to_string())]), "two");
        assert_eq!(a, b);
    }

    #[test]
    fn char_and_codepoint_roundtrip() {
        let m = map(&[(0x41, 'A'), (0x42, 'B')]);
        assert_eq!(m.char(&Codepoint::from_int(0x41)), "A");
        assert_eq!(m.codepoint("B"), Some(Codepoint::from_int(0x42)));
        assert_eq!(m.char(&Codepoint::from_int(0xff)), "");
    }

    #[test]
    fn distance_counts_differences_and_missing() {
        let a = map(&[(0x41, 'A'), (0x42, 'B')]);
        let b = map(&[(0x41, 'A'), (0x43, 'C')]);
        // 0x42 missing from b, 0x43 missing from a: distance 2
        assert_eq!(a.distance(&b), 2);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn union_prefers_rhs_on_conflict() {
        let a = map(&[(0x41, 'A')]);
        let b = map(&[(0x41, 'X')]);
        let u = a.union(&b);
        assert_eq!(u.char(&Codepoint::from_int(0x41)), "X");
    }

    #[test]
    fn take_filters_by_allowed_set() {
        let a = map(&[(0x41, 'A'), (0x42, 'B')]);
        let allowed: HashSet<Vec<u8>> = [vec![0x41]].into_iter().collect();
        let subset = a.take(&allowed);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset.char(&Codepoint::from_int(0x41)), "A");
    }

    #[test]
    fn shift_moves_every_codepoint() {
        let a = map(&[(0x41, 'A')]);
        let shifted = a.shift(1).unwrap();
        assert_eq!(shifted.char(&Codepoint::from_int(0x42)), "A");
    }
}
