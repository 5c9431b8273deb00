//! Structured error kinds, so embedding CLIs can localise messages instead
//! of pattern-matching formatted strings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Every candidate codec declined the stream (each returned
    /// [`crate::codec::LoadOutcome::NotMatched`]); fatal, carries the
    /// formats that were tried.
    #[error("no registered codec matched this stream (tried: {})", .tried.join(", "))]
    NoMatchingCodec { tried: Vec<String> },

    /// The stream matched a codec's signature but violates that format.
    #[error("malformed `{format}` data{}: {reason}", offset.map(|o| format!(" at byte {o}")).unwrap_or_default())]
    FormatMalformed {
        format: String,
        reason: String,
        offset: Option<u64>,
    },

    /// More than one saver matches a filename/format hint with no
    /// explicit format given to disambiguate.
    #[error("ambiguous format for save: candidates are {}", .candidates.join(", "))]
    AmbiguousFormat { candidates: Vec<String> },

    /// A named encoding, alias, or container entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation is not supported by this format or container
    /// (e.g. writing to a read-only archive kind).
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A font was malformed in a way that callers should see as a
    /// structural raster/charmap problem rather than a format problem.
    #[error(transparent)]
    Raster(#[from] bitglyph_raster::RasterError),

    #[error(transparent)]
    Charmap(#[from] bitglyph_charmap::CharmapError),

    #[error(transparent)]
    Location(#[from] bitglyph_stream::LocationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn malformed(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::FormatMalformed {
            format: format.into(),
            reason: reason.into(),
            offset: None,
        }
    }

    pub fn malformed_at(format: impl Into<String>, reason: impl Into<String>, offset: u64) -> Self {
        Error::FormatMalformed {
            format: format.into(),
            reason: reason.into(),
            offset: Some(offset),
        }
    }
}
