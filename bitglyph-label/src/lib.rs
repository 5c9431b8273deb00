//! Tagged-union glyph labels: character, codepoint, and tag.
//!
//! A [`Label`] never compares equal across variants, even when the
//! underlying value happens to coincide (a `Tag` named `"A"` is not the
//! character `A`). See `label.rs` for the yaff-style string parsing rules
//! that decide which variant a bare string becomes.

#![warn(clippy::doc_markdown)]

mod char;
mod codepoint;
mod error;
mod label;
mod tag;

pub use crate::char::Char;
pub use codepoint::Codepoint;
pub use error::LabelError;
pub use label::{label_range, to_label, to_labels, Label};
pub use tag::Tag;
