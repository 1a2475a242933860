//! HTML tokenizer and tree builder for sprig.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RCDATA (`textarea`, `title`) and RAWTEXT (`script`, `style`) states
//!   - Tag, attribute, comment and DOCTYPE states
//!   - Named and numeric character references
//!
//! - **Tree Builder**
//!   - One element per start tag, with no implied elements
//!   - Attribute-name normalization matching the node constructor
//!   - Recovery from mismatched and orphan end tags
//!
//! # Not Yet Implemented
//!
//! - Script data escape states
//! - Insertion modes, foster parenting, the adoption agency algorithm
//! - Comment and DOCTYPE nodes (both are read and dropped)

/// Parse errors.
pub mod error;
/// Tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::ParseError;
pub use parser::{HtmlParser, TreeBuilder};
pub use tokenizer::{Attribute, HtmlTokenizer, Token};

use sprig_dom::Node;

/// Construction from markup text.
pub trait FromHtml: Sized {
    /// Parse `html` and return its first top-level node, if any.
    ///
    /// # Errors
    ///
    /// See [`HtmlParser::parse_fragment`].
    fn from_html(html: &str) -> Result<Option<Self>, ParseError>;

    /// Parse `html` and return every top-level node.
    ///
    /// # Errors
    ///
    /// See [`HtmlParser::parse_fragment`].
    fn from_html_fragment(html: &str) -> Result<Vec<Self>, ParseError>;
}

impl FromHtml for Node {
    fn from_html(html: &str) -> Result<Option<Self>, ParseError> {
        HtmlParser::new().parse_root(html)
    }

    fn from_html_fragment(html: &str) -> Result<Vec<Self>, ParseError> {
        HtmlParser::new().parse_fragment(html)
    }
}
