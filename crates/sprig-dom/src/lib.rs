//! Element tree implementation for sprig.
//!
//! This crate provides the owned element tree that every other sprig
//! component builds on: construction with attribute-key normalization,
//! in-place mutation, inline style editing and rendering to HTML text.
//!
//! # Design
//!
//! A [`Node`] owns its children directly (`Vec<Node>`), so a node has exactly
//! one parent and cycles cannot be expressed. Text is a single buffer kept
//! apart from the child list: when strings and nodes are mixed in one call,
//! the strings are concatenated into the text buffer and the renderer always
//! writes that text before the children.
//!
//! Recursive operations (filtering, searching, rendering) take a depth
//! ceiling and fail with [`DomError::DepthExceeded`] instead of exhausting
//! the stack.

/// Attribute values, key normalization and validation.
pub mod attributes;
/// Child arguments accepted by constructors and `append`/`prepend`.
pub mod child;
/// Error type for tree operations.
pub mod error;
/// Optional per-node lifecycle hooks.
pub mod hooks;
/// The node type and its mutation API.
pub mod node;
/// HTML rendering.
pub mod render;
/// SVG attribute casing tables.
pub mod svg;
/// Built-in node types: fragments, documents, void elements.
pub mod tags;
/// Depth-bounded filtering and searching.
pub mod traverse;

pub use attributes::{AttributeValue, AttributesMap, NO_ATTRIBUTES};
pub use child::Child;
pub use error::DomError;
pub use hooks::LifecycleHooks;
pub use node::{Node, NodeBuilder, NodeKind};
pub use render::{RenderOptions, escape_html};
pub use sprig_common::{Config, DEFAULT_MAX_DEPTH};
pub use traverse::Filter;

/// Build a [`Child::List`] from a mix of nodes, strings and options.
///
/// ```ignore
/// div.append(children!["Hello, ", strong, "!"]);
/// ```
#[macro_export]
macro_rules! children {
    ($($child:expr),* $(,)?) => {
        $crate::Child::List(vec![$($crate::Child::from($child)),*])
    };
}
