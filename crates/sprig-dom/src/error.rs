use sprig_css::StyleError;
use thiserror::Error;

/// Errors raised by tree construction, mutation and rendering.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomError {
    /// The tag does not match `^[A-Za-z][A-Za-z0-9-]*$`, or is the reserved
    /// `fragment` tag.
    #[error(
        "invalid HTML tag name {0:?}: tag names must start with a letter and contain only letters, digits, and hyphens, and \"fragment\" is reserved"
    )]
    InvalidTag(String),

    /// A dynamically typed child was neither a node, a string nor empty.
    #[error("invalid child type: {0}; children must be nodes or strings")]
    InvalidChildType(String),

    /// An inline style value matched the injection denylist.
    #[error(transparent)]
    UnsafeStyleValue(#[from] StyleError),

    /// A recursive operation went deeper than its ceiling.
    #[error(
        "maximum depth ({limit}) exceeded in {operation}; the tree is pathologically deep, consider raising max_depth"
    )]
    DepthExceeded {
        /// The operation that gave up ("render", "filter", ...).
        operation: &'static str,
        /// The ceiling that was exceeded.
        limit: usize,
    },

    /// Strict rendering met an attribute key that would be unsafe to emit.
    #[error("invalid attribute name {0:?}")]
    InvalidAttributeKey(String),

    /// A tag constructor refused to build a node.
    #[error("cannot construct <{tag}>: {reason}")]
    Construction {
        /// Tag that was being built.
        tag: String,
        /// Why construction failed.
        reason: String,
    },
}
