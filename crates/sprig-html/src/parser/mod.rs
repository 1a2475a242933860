//! Tree construction from tokens.

/// Token stream to element tree.
pub mod core;
/// The string/bytes front end.
pub mod html_parser;

pub use self::core::{COMPONENT, TreeBuilder, normalize_attribute_name};
pub use html_parser::HtmlParser;
