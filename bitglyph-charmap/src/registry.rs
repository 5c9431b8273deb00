//! Process-wide registry of named, file-backed charmaps, with aliasing,
//! overlays, and best-fit lookup.
//!
//! State lives in `once_cell`-backed statics rather than instance fields:
//! the set of known charmaps is global, the same way the font-handling
//! crates elsewhere in this workspace keep a single process-wide table
//! rather than threading a registry handle through every call site.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::charmap::Charmap;
use crate::error::CharmapError;

#[derive(Debug, Clone)]
struct RegisteredEntry {
    name: String,
    filename: PathBuf,
    format: Option<String>,
}

#[derive(Debug, Clone)]
struct OverlayEntry {
    name: String,
    filename: PathBuf,
    format: Option<String>,
    codepoint_range: RangeInclusive<u8>,
}

static REGISTERED: Lazy<Mutex<HashMap<String, RegisteredEntry>>> = Lazy::new(|| Mutex::new(HashMap::new()));
static OVERLAYS: Lazy<Mutex<HashMap<String, Vec<OverlayEntry>>>> = Lazy::new(|| Mutex::new(HashMap::new()));
static ALIASES: Lazy<Mutex<HashMap<String, String>>> = Lazy::new(|| Mutex::new(HashMap::new()));

// Longest-prefix-first replacement table for name normalisation; order
// matters, so this stays a plain ordered slice rather than a map.
const PATTERNS: &[(&str, &str)] = &[
    ("microsoftcp", "windows"),
    ("microsoft", "windows"),
    ("msdoscp", "oem"),
    ("oemcp", "oem"),
    ("msdos", "oem"),
    ("ibmcp", "ibm"),
    ("apple", "mac"),
    ("macos", "mac"),
    ("doscp", "oem"),
    ("mscp", "windows"),
    ("dos", "oem"),
    ("pc", "oem"),
    ("ms", "windows"),
    ("x", ""),
];

/// Namespace for the charmap registry's associated functions; all state is
/// process-global (see module docs), so this is a zero-sized marker type.
pub struct CharmapRegistry;

impl CharmapRegistry {
    /// Register a file to be lazily loaded under `name`.
    pub fn register(name: &str, filename: impl Into<PathBuf>, format: Option<&str>) {
        let normname = Self::normalise_for_match(name);
        let mut registered = REGISTERED.lock().unwrap();
        if let Some(existing) = registered.get(&normname) {
            log::warn!("redefining character map '{name}'=='{}'", existing.name);
        }
        OVERLAYS.lock().unwrap().remove(&normname);
        registered.insert(
            normname,
            RegisteredEntry {
                name: name.to_string(),
                filename: filename.into(),
                format: format.map(str::to_string),
            },
        );
    }

    /// Overlay an additional file on top of an already-registered charmap,
    /// applied only within `codepoint_range` (a single-byte inclusive range).
    pub fn overlay(name: &str, filename: impl Into<PathBuf>, codepoint_range: RangeInclusive<u8>, format: Option<&str>) {
        let normname = Self::normalise_for_match(name);
        OVERLAYS.lock().unwrap().entry(normname).or_default().push(OverlayEntry {
            name: name.to_string(),
            filename: filename.into(),
            format: format.map(str::to_string),
            codepoint_range,
        });
    }

    /// Define `alias` as another name for the already-normalised `name`.
    pub fn alias(alias: &str, name: &str) {
        let name = Self::normalise_for_match(name);
        let alias = Self::normalise_for_match(alias);
        if name == alias {
            return;
        }
        if REGISTERED.lock().unwrap().contains_key(&alias) {
            log::warn!("character set alias '{alias}' for '{name}' collides with a registered name");
            return;
        }
        let mut aliases = ALIASES.lock().unwrap();
        if let Some(old) = aliases.get(&alias) {
            log::warn!("redefining character set alias: now {alias}=={name} (was {old})");
        }
        aliases.insert(alias, name);
    }

    /// `true` if `name` normalises the same as `"unicode"`.
    pub fn is_unicode(name: &str) -> bool {
        Self::match_names(name, "unicode")
    }

    /// Display-normalise a name: lowercase, `_`/` ` collapsed to `-`.
    pub fn normalise(name: &str) -> String {
        name.to_lowercase().replace('_', "-").replace(' ', "-")
    }

    pub fn match_names(name1: &str, name2: &str) -> bool {
        Self::normalise_for_match(name1) == Self::normalise_for_match(name2)
    }

    fn normalise_for_match(name: &str) -> String {
        let mut normalised: String = name
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '.' | '_' | '-' | ' '))
            .collect();
        if let Some(aliased) = ALIASES.lock().unwrap().get(&normalised) {
            return aliased.clone();
        }
        for (prefix, replacement) in PATTERNS {
            if let Some(rest) = normalised.strip_prefix(prefix) {
                normalised = format!("{replacement}{rest}");
                break;
            }
        }
        ALIASES.lock().unwrap().get(&normalised).cloned().unwrap_or(normalised)
    }

    /// Look up a registered charmap by name, applying any registered
    /// overlays on top of the base file.
    pub fn get(name: &str) -> Result<Charmap, CharmapError> {
        let normname = Self::normalise_for_match(name);
        let entry = REGISTERED
            .lock()
            .unwrap()
            .get(&normname)
            .cloned()
            .ok_or_else(|| CharmapError::NotFound(name.to_string()))?;
        let mut charmap = Charmap::load(&entry.filename, entry.format.as_deref(), Some(&entry.name))?;
        let overlays = OVERLAYS.lock().unwrap().get(&normname).cloned().unwrap_or_default();
        for ovr in overlays {
            let overlay_map = Charmap::load(&ovr.filename, ovr.format.as_deref(), Some(&ovr.name))?;
            let range: std::collections::HashSet<Vec<u8>> =
                ovr.codepoint_range.clone().map(|b| vec![b]).collect();
            charmap = charmap.overlay(&overlay_map, &range);
        }
        Ok(charmap)
    }

    /// Display names of all registered charmaps (unspecified order).
    pub fn names() -> Vec<String> {
        REGISTERED.lock().unwrap().values().map(|e| e.name.clone()).collect()
    }

    /// The registered charmap with the smallest [`Charmap::distance`] to
    /// `charmap`, or an empty charmap if the registry is empty.
    pub fn fit(charmap: &Charmap) -> Charmap {
        let mut best = Charmap::new();
        let mut min_dist = charmap.len();
        for name in Self::names() {
            let Ok(candidate) = Self::get(&name) else { continue };
            let dist = charmap.distance(&candidate);
            if dist == 0 {
                return candidate;
            }
            if dist < min_dist {
                min_dist = dist;
                best = candidate;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalise_strips_separators_and_case() {
        assert_eq!(CharmapRegistry::normalise_for_match("CP-437"), "cp437");
        assert_eq!(CharmapRegistry::normalise_for_match("windows_1252"), "windows1252");
    }

    #[test]
    fn normalise_applies_longest_pattern_first() {
        // "microsoftcp1252" should become "windows1252", not match on "microsoft" -> "windowscp1252"
        assert_eq!(CharmapRegistry::normalise_for_match("microsoftcp1252"), "windows1252");
    }

    #[test]
    fn match_names_is_normalisation_insensitive() {
        assert!(CharmapRegistry::match_names("CP-437", "cp437"));
    }

    #[test]
    fn is_unicode_matches_unicode_variants() {
        assert!(CharmapRegistry::is_unicode("UNICODE"));
        assert!(!CharmapRegistry::is_unicode("cp437"));
    }
}
