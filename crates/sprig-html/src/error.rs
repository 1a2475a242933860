use core::str::Utf8Error;

use sprig_common::Diagnostic;
use sprig_dom::DomError;
use thiserror::Error;

/// Errors that stop a parse.
///
/// Malformed markup is not one of them: mismatched and orphan end tags and
/// attribute collisions are recovered from and reported as diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Byte input was not UTF-8.
    #[error("html input must be valid UTF-8: {0}")]
    InvalidArgument(#[from] Utf8Error),

    /// A strict parser met something it would otherwise have recovered from.
    #[error("strict parse failed: {0}")]
    Strict(Diagnostic),

    /// An element could not be built, usually because its tag name is not
    /// a valid element name.
    #[error(transparent)]
    Dom(#[from] DomError),
}
