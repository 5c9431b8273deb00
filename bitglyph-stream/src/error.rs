//! Errors raised while resolving or reading a location.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("`{0}` does not exist in this container")]
    NotFound(String),

    #[error("`{0}` has entries remaining after the deepest container stopped matching")]
    UnresolvedSubpath(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
