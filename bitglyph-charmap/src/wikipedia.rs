//! HTML-scrape charmap dialect: Wikipedia-style `class="chset"` tables.
//!
//! A hand-rolled tag tokenizer stands in for a full HTML parser (the
//! workspace's only HTML need), tracking the same state machine as the
//! original table scraper: which `<table>` we're inside, whether we're in a
//! `<td>`, and whether that cell's unicode point is wrapped in `<small>`.

use std::collections::{BTreeMap, HashSet};

use regex::Regex;

fn tag_tokenizer() -> Regex {
    Regex::new(r"(?s)<[^>]+>|[^<]+").expect("static pattern")
}

/// Scrape a character mapping from the `table`-th `class="chset"` table in
/// `html`. `column` selects which whitespace-separated token to use when a
/// cell's `<small>` text holds more than one codepoint. `allowed`, if given,
/// restricts output to codepoints in that set.
pub fn load_wikipedia(
    html: &str,
    table: usize,
    column: usize,
    allowed: Option<&HashSet<u8>>,
) -> BTreeMap<Vec<u8>, String> {
    let tokenizer = tag_tokenizer();
    let mut mapping = BTreeMap::new();

    let mut table_count = 0usize;
    let mut in_table = false;
    let mut in_td = false;
    let mut in_small = false;
    let mut in_th = false;
    let mut current: u32 = 0;

    for tok in tokenizer.find_iter(html) {
        let t = tok.as_str();
        if t.starts_with('<') {
            let lower = t.to_ascii_lowercase();
            if lower.starts_with("<table") && lower.contains("chset") {
                if table_count == table {
                    in_table = true;
                    in_th = false;
                    in_td = false;
                    in_small = false;
                }
                table_count += 1;
            } else if in_table {
                if lower.starts_with("</table") {
                    in_table = false;
                    in_th = false;
                    in_td = false;
                    in_small = false;
                } else if lower.starts_with("<td") {
                    in_td = true;
                    in_small = false;
                } else if lower.starts_with("</td") {
                    in_td = false;
                    current += 1;
                } else if lower.starts_with("<small") {
                    in_small = true;
                } else if lower.starts_with("</style") {
                    in_small = false;
                } else if lower.starts_with("<th") {
                    in_th = true;
                } else if lower.starts_with("</th") {
                    in_th = false;
                }
            }
            continue;
        }

        let data = t;
        if in_th && data.len() == 2 && data.ends_with('_') {
            if let Ok(v) = u32::from_str_radix(&data[..1], 16) {
                current = v * 16;
            }
        }
        if in_td && in_small {
            let cols: Vec<&str> = data.split_whitespace().collect();
            let piece = if cols.len() > column { cols[column] } else { data.trim() };
            if piece.chars().count() >= 4 {
                let piece = if piece.len() >= 2 && piece[..2].eq_ignore_ascii_case("u+") {
                    &piece[2..]
                } else {
                    piece
                };
                let in_range = allowed.map_or(true, |set| current <= 0xff && set.contains(&(current as u8)));
                if in_range {
                    if let Ok(cp) = u32::from_str_radix(piece, 16) {
                        if let Some(ch) = char::from_u32(cp) {
                            mapping.insert(vec![current as u8], ch.to_string());
                        }
                    }
                }
            }
        }
    }
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrapes_single_row_table() {
        let html = r#"<table class="chset"><tr><th>4_</th><td><small>U+0041</small></td></tr></table>"#;
        let mapping = load_wikipedia(html, 0, 0, None);
        assert_eq!(mapping.get(&vec![0x40]).map(String::as_str), Some("A"));
    }

    #[test]
    fn ignores_non_chset_tables() {
        let html = r#"<table><tr><td><small>U+0041</small></td></tr></table>"#;
        let mapping = load_wikipedia(html, 0, 0, None);
        assert!(mapping.is_empty());
    }
}
