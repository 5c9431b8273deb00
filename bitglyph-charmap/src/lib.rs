//! Unicode charmap engine: file-backed charmaps, an alias/overlay registry,
//! and the built-in Unicode/Indexer encoders.
//!
//! Every [`Charmap`] is a plain, comparable value; [`registry`] is the only
//! piece of process-wide mutable state, holding the table of
//! name -> file-to-load mappings that [`CharmapRegistry::get`] resolves
//! lazily on first lookup.

#![warn(clippy::doc_markdown)]

mod builtin;
mod charmap;
mod encoder;
mod error;
mod registry;
mod text_columns;
mod ucm;
mod wikipedia;

pub use builtin::{Indexer, Unicode};
pub use charmap::Charmap;
pub use encoder::Encoder;
pub use error::CharmapError;
pub use registry::CharmapRegistry;
pub use text_columns::{load_text_columns, TextColumnsOptions, UnicodeBase};
pub use ucm::load_ucm;
pub use wikipedia::load_wikipedia;
