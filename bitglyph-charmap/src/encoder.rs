//! The `Encoder` contract shared by charmaps and the built-in Unicode/Indexer
//! converters, plus the shared `chart` rendering.

use bitglyph_label::Codepoint;

/// Converts between codepoints and single-glyph characters (which may
/// themselves be multi-codepoint grapheme sequences).
pub trait Encoder {
    fn name(&self) -> &str;

    /// Character for a codepoint; empty string if undefined.
    fn char(&self, codepoint: &Codepoint) -> String;

    /// Codepoint for a character; `None` if undefined.
    fn codepoint(&self, ch: &str) -> Option<Codepoint>;

    /// Render a 16x16 grid of the given page (0 = single-byte page).
    ///
    /// This is a simplified rendering of the original: it does not special
    /// case full-width or nonspacing-mark display characters, since that
    /// needs a Unicode East-Asian-width table this workspace does not carry.
    fn chart(&self, page: u8) -> String {
        let background = '\u{2591}';
        let mut cells = Vec::with_capacity(256);
        for low in 0u32..256 {
            let bytes = if page != 0 {
                vec![page, low as u8]
            } else {
                vec![low as u8]
            };
            let ch = self.char(&Codepoint::from_bytes(bytes));
            let printable = ch.chars().next().is_some_and(|c| !c.is_control());
            cells.push(if ch.is_empty() {
                format!("{background}{background}")
            } else if printable {
                format!("{ch} ")
            } else {
                "\u{fffd} ".to_string()
            });
        }
        let header = (0..16).map(|i| format!("_{i:x}")).collect::<Vec<_>>().join(" ");
        let mut out = format!("    {header}\n  +{}-\n", "-".repeat(48));
        for row in 0..16 {
            out.push_str(&format!("{row:x}_|{background}"));
            out.push_str(&cells[16 * row..16 * (row + 1)].join(&background.to_string()));
            out.push(background);
            if row != 15 {
                out.push('\n');
            }
        }
        out
    }
}
