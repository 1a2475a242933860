use sprig_dom::DomError;
use thiserror::Error;

/// Errors raised while encoding or decoding element trees.
///
/// Decoding never returns a partial tree: the first error aborts the whole
/// call.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The encoded value does not have the node shape.
    #[error("invalid encoded node: '{field}' {reason}")]
    SchemaViolation {
        /// Field that failed validation (`tag`, `attributes.id`, ...).
        field: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The input is not JSON text.
    #[error("invalid JSON string: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A node could not be constructed, or the tree is too deep.
    #[error(transparent)]
    Dom(#[from] DomError),
}

impl SerializeError {
    pub(crate) fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while filling a [`TagRegistry`](crate::TagRegistry).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A factory is already registered for the tag.
    #[error("tag <{0}> is already registered")]
    Duplicate(String),

    /// The tag is reserved for fragments.
    #[error("tag <{0}> is reserved for fragments")]
    Reserved(String),

    /// The tag is not a valid element name.
    #[error("cannot register invalid tag name {0:?}")]
    InvalidTag(String),
}
