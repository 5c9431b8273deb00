//! Anchored binary streams and container/wrapper location resolution.
//!
//! [`Stream`] is the unit every loader and saver in this workspace reads
//! from or writes to; [`resolve`] is how a path like `archive.zip/glyphs/a.bin`
//! turns into one, by walking directories, unwrapping compression, and
//! opening nested archives as it goes.

#![warn(clippy::doc_markdown)]

mod error;
mod location;
mod stream;

pub use error::LocationError;
pub use location::{resolve, Container, ContainerSignature, FsContainer, WrapperSignature};
pub use stream::{Stream, Whence};
