//! Errors raised while loading or looking up charmaps.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CharmapError {
    #[error("no registered character map matches '{0}'")]
    NotFound(String),

    #[error("charmap file format '{0}' is not registered")]
    UnsupportedFormat(String),

    #[error("no data in charmap file `{0}`")]
    EmptyFile(String),

    #[error("could not read charmap file `{0}`: {1}")]
    IoError(String, #[source] std::io::Error),
}
