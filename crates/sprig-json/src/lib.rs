//! Structural encoding of sprig element trees.
//!
//! A tree is encoded as nested objects of the shape
//!
//! ```text
//! {"tag": "div", "self_closing": false, "attributes": {...}, "text": "...", "children": [...]}
//! ```
//!
//! This shape is an interchange format: trees are stored, sent between
//! processes and replayed from it, so it stays stable. Attribute keys keep
//! their insertion order through both directions, which is what makes the
//! round trip exact: a decoded tree renders byte for byte like the original,
//! in compact and in pretty mode.
//!
//! Decoding rebuilds concrete tag types through a [`TagRegistry`] filled at
//! start-up, and falls back to plain elements for tags nobody registered.

/// Error types for encoding, decoding and registration.
pub mod error;
/// Tag name to constructor lookup.
pub mod registry;
/// The encoder and decoder.
pub mod serializer;

pub use error::{RegistryError, SerializeError};
pub use registry::{TagFactory, TagRegistry};
pub use serializer::Serializer;
