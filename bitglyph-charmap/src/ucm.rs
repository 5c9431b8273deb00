//! ICU/Linux UCM charmap dialect (single-byte charsets only).

use std::collections::BTreeMap;

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

/// Extract a character mapping from `ucm`/Linux `charmap` file data.
///
/// Only "normal" (`|0`) roundtrip entries are accepted; fallback and
/// subchar mappings (`|1`..`|4`) are skipped, as are custom
/// `<escape_char>` overrides (the `\x` escape is assumed throughout).
pub fn load_ucm(data: &str) -> BTreeMap<Vec<u8>, String> {
    let mut mapping = BTreeMap::new();
    let mut comment = '#';
    let mut parsing = false;
    for line in data.lines() {
        if line.is_empty() || line.starts_with(comment) {
            continue;
        }
        if let Some(rest) = line.strip_prefix("<comment_char>") {
            if let Some(tok) = rest.split_whitespace().last() {
                if let Some(c) = tok.chars().next() {
                    comment = c;
                }
            }
            continue;
        }
        if line.starts_with("<escape_char>") {
            continue;
        }
        if line.starts_with("CHARMAP") {
            parsing = true;
            continue;
        }
        if line.starts_with("END CHARMAP") {
            parsing = false;
            continue;
        }
        if !parsing {
            continue;
        }
        let mut uni_str = String::new();
        let mut cp_bytes: Option<Vec<u8>> = None;
        let mut skip = false;
        for item in line.split_whitespace() {
            if let Some(rest) = item.strip_prefix("<U").and_then(|r| r.strip_suffix('>')) {
                uni_str = rest.to_string();
            } else if let Some(hexpart) = item.strip_prefix("\\x") {
                cp_bytes = hex_decode(hexpart);
            } else if let Some(rest) = item.strip_prefix('|') {
                if rest.trim() != "0" {
                    skip = true;
                    break;
                }
            }
        }
        if skip || uni_str.is_empty() {
            continue;
        }
        let Some(bytes) = cp_bytes else {
            log::warn!("could not parse line in ucm charmap file: {line:?}");
            continue;
        };
        let Ok(cp) = u32::from_str_radix(&uni_str, 16) else {
            continue;
        };
        let Some(ch) = char::from_u32(cp) else {
            continue;
        };
        if let std::collections::btree_map::Entry::Vacant(e) = mapping.entry(bytes.clone()) {
            e.insert(ch.to_string());
        } else {
            log::debug!("ignoring redefinition of code point {bytes:02x?}");
        }
    }
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_normal_mapping() {
        let data = "CHARMAP\n<U0041> \\x41 |0\nEND CHARMAP\n";
        let mapping = load_ucm(data);
        assert_eq!(mapping.get(&vec![0x41]).map(String::as_str), Some("A"));
    }

    #[test]
    fn ignores_fallback_mapping() {
        let data = "CHARMAP\n<U0041> \\x41 |1\nEND CHARMAP\n";
        let mapping = load_ucm(data);
        assert!(mapping.is_empty());
    }

    #[test]
    fn ignores_lines_outside_charmap_block() {
        let data = "<U0041> \\x41 |0\n";
        let mapping = load_ucm(data);
        assert!(mapping.is_empty());
    }
}
