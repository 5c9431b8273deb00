//! Column-text charmap dialect: `.txt`/`.enc`/`.map`/`.ucp`/`.adobe` files.

use std::collections::BTreeMap;

use bitglyph_types::{uint_to_bytes, Endian};

/// How the unicode column of a text-columns charmap file is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnicodeBase {
    /// Parse as an integer in the given radix (16 for most dialects).
    Radix(u32),
    /// The column already holds the literal UTF-8 character.
    Char,
}

/// Parse options for [`load_text_columns`], one instance per registered
/// file-extension dialect (`txt`, `enc`, `map`, `ucp`, `adobe`, ...).
#[derive(Debug, Clone)]
pub struct TextColumnsOptions {
    pub comment: char,
    pub separator: Option<char>,
    pub joiner: Option<char>,
    pub codepoint_column: usize,
    pub unicode_column: usize,
    pub codepoint_base: u32,
    pub unicode_base: UnicodeBase,
    pub inline_comments: bool,
    pub ignore_errors: bool,
}

impl Default for TextColumnsOptions {
    fn default() -> Self {
        TextColumnsOptions {
            comment: '#',
            separator: None,
            joiner: Some('+'),
            codepoint_column: 0,
            unicode_column: 1,
            codepoint_base: 16,
            unicode_base: UnicodeBase::Radix(16),
            inline_comments: true,
            ignore_errors: false,
        }
    }
}

impl TextColumnsOptions {
    /// The defaults the original registered per well-known file extension.
    pub fn for_format(format: &str) -> Self {
        match format {
            "ucp" => TextColumnsOptions {
                separator: Some(':'),
                joiner: Some(','),
                ..Default::default()
            },
            "adobe" => TextColumnsOptions {
                separator: Some('\t'),
                joiner: None,
                codepoint_column: 1,
                unicode_column: 0,
                ..Default::default()
            },
            // txt, enc, map and anything else use the plain defaults
            _ => TextColumnsOptions::default(),
        }
    }
}

fn split_line(line: &str, separator: Option<char>) -> Vec<&str> {
    match separator {
        Some(c) => line.split(c).collect(),
        None => line.split_whitespace().collect(),
    }
}

fn split_sub(s: &str, joiner: Option<char>) -> Vec<&str> {
    match joiner {
        Some(c) => s.split(c).collect(),
        None => s.split_whitespace().collect(),
    }
}

/// Extract a character mapping from text-column charmap file data.
///
/// Lines starting with `comment`, blank lines, and xfonts `START`/`END`
/// markers are skipped. Malformed lines are logged and dropped rather than
/// aborting the whole load.
pub fn load_text_columns(data: &str, opts: &TextColumnsOptions) -> BTreeMap<Vec<u8>, String> {
    let mut mapping = BTreeMap::new();
    for raw_line in data.lines() {
        if raw_line.is_empty() || raw_line.starts_with(opts.comment) {
            continue;
        }
        if raw_line.starts_with("START") || raw_line.starts_with("END") {
            continue;
        }
        let line = if opts.inline_comments {
            raw_line.split(opts.comment).next().unwrap_or("")
        } else {
            raw_line
        };
        let cols = split_line(line, opts.separator);
        let needed = opts.codepoint_column.max(opts.unicode_column);
        if cols.len() <= needed {
            continue;
        }
        let mut cp_str = cols[opts.codepoint_column].trim().to_string();
        let mut uni_str = cols[opts.unicode_column].trim().to_string();
        for marker in ["<RL>+", "<LR>+", "<RV>+"] {
            uni_str = uni_str.replace(marker, "");
        }
        if uni_str.len() >= 2 && uni_str[..2].eq_ignore_ascii_case("u+") {
            uni_str = uni_str[2..].to_string();
        } else if uni_str.len() >= 1 && uni_str[..1].eq_ignore_ascii_case("u") {
            uni_str = uni_str[1..].to_string();
        }
        if let Some(stripped) = cp_str.strip_prefix('=') {
            cp_str = stripped.to_string();
        }

        let parsed = (|| -> Option<(Vec<u8>, String)> {
            let mut cp_bytes = Vec::new();
            for sub in split_sub(&cp_str, opts.joiner) {
                let v = u32::from_str_radix(sub, opts.codepoint_base).ok()?;
                cp_bytes.extend(uint_to_bytes(v as u64, Endian::Big));
            }
            let ch = match opts.unicode_base {
                UnicodeBase::Char => uni_str.clone(),
                UnicodeBase::Radix(base) => {
                    let mut s = String::new();
                    for sub in split_sub(&uni_str, opts.joiner) {
                        let v = u32::from_str_radix(sub, base).ok()?;
                        s.push(char::from_u32(v)?);
                    }
                    s
                }
            };
            Some((cp_bytes, ch))
        })();

        match parsed {
            Some((cp, ch)) if ch != "\u{fffd}" => {
                mapping.insert(cp, ch);
            }
            Some(_) => {}
            None => {
                if !opts.ignore_errors {
                    log::warn!("could not parse line in text charmap file: {raw_line:?}");
                }
            }
        }
    }
    mapping
}
