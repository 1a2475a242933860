use sprig_common::{Config, Diagnostic};
use sprig_dom::Node;

use super::core::TreeBuilder;
use crate::error::ParseError;
use crate::tokenizer::{HtmlTokenizer, TokenizerError};

/// Parses markup text into element trees.
///
/// Parsing is fault tolerant: unclosed elements are closed at end of input,
/// stray end tags are ignored and attribute collisions keep the later value.
/// Each recovery is reported as a [`Diagnostic`], readable afterwards through
/// [`HtmlParser::issues`]. A strict parser fails on the first one instead.
///
/// ```
/// use sprig_html::HtmlParser;
///
/// let mut parser = HtmlParser::new();
/// let root = parser.parse_root("<div class=box>hi</div>").unwrap().unwrap();
/// assert_eq!(root.render().unwrap(), r#"<div class="box">hi</div>"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    config: Config,
    strict_mode: bool,
    issues: Vec<Diagnostic>,
    tokenizer_errors: Vec<TokenizerError>,
}

impl HtmlParser {
    /// A lenient parser with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build nodes with `config` (automatic ids).
    #[must_use]
    pub const fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Fail with [`ParseError::Strict`] instead of recovering.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Parse `html` and return its first top-level node, if any.
    ///
    /// # Errors
    ///
    /// See [`HtmlParser::parse_fragment`].
    pub fn parse_root(&mut self, html: impl AsRef<[u8]>) -> Result<Option<Node>, ParseError> {
        Ok(self.parse_fragment(html)?.into_iter().next())
    }

    /// Parse `html` and return every top-level node in document order.
    ///
    /// Accepts text or raw bytes; bytes are checked for UTF-8 before any
    /// parsing happens.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidArgument`] if the input is not UTF-8
    /// - [`ParseError::Dom`] if a tag name is not a valid element name
    /// - [`ParseError::Strict`] in strict mode, on the first diagnostic
    pub fn parse_fragment(&mut self, html: impl AsRef<[u8]>) -> Result<Vec<Node>, ParseError> {
        self.issues.clear();
        self.tokenizer_errors.clear();

        let html = std::str::from_utf8(html.as_ref())?;
        let mut tokenizer = HtmlTokenizer::new(html.to_owned());
        tokenizer.run();
        self.tokenizer_errors = tokenizer.errors().to_vec();

        let mut builder = TreeBuilder::new(tokenizer.into_tokens()).with_config(self.config);
        if self.strict_mode {
            builder = builder.with_strict_mode();
        }
        let (roots, issues) = builder.run_with_issues()?;
        self.issues = issues;
        Ok(roots)
    }

    /// Diagnostics reported by the last parse.
    #[must_use]
    pub fn issues(&self) -> &[Diagnostic] {
        &self.issues
    }

    /// Lexical errors the tokenizer recovered from during the last parse.
    #[must_use]
    pub fn tokenizer_errors(&self) -> &[TokenizerError] {
        &self.tokenizer_errors
    }
}
