//! Errors raised while constructing or ranging over labels.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("empty codepoint cannot be converted to an integer")]
    EmptyCodepoint,

    #[error("codepoint value {0} does not fit in a label")]
    CodepointOverflow(i128),

    #[error("range bounds must be of the same label variant")]
    MixedRangeBounds,

    #[error("`{0}` is not a valid character, codepoint, or tag label")]
    Unparseable(String),
}
