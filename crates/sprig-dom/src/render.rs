//! Rendering a tree to HTML text.
//!
//! Two layouts are supported. Compact output concatenates everything with no
//! added whitespace. Pretty output puts every element on its own line,
//! indented two spaces per level; an element's text stays on the same line
//! as its open tag.

use core::fmt;
use std::borrow::Cow;

use sprig_common::DEFAULT_MAX_DEPTH;
use sprig_common::diagnostic::{self, Diagnostic, DiagnosticKind};

use crate::attributes::{AttributeValue, is_boolean_attribute, is_valid_attribute_key, render_key};
use crate::error::DomError;
use crate::node::{Node, NodeKind};

/// Component name used in diagnostics raised by the renderer.
const COMPONENT: &str = "Renderer";

/// Indentation unit for pretty output.
const INDENT: &str = "  ";

/// How to render a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Newlines and indentation.
    pub pretty: bool,
    /// Deepest nesting level rendered before failing.
    pub max_depth: usize,
    /// Fail on attribute keys that would otherwise be skipped.
    pub strict: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

impl RenderOptions {
    /// Compact output with the default depth ceiling.
    #[must_use]
    pub fn compact() -> Self {
        Self::default()
    }

    /// Indented output with the default depth ceiling.
    #[must_use]
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Builder-style override of [`RenderOptions::max_depth`].
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder-style override of [`RenderOptions::strict`].
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for use in text or a quoted attribute
/// value.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

impl Node {
    /// Compact HTML.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::DepthExceeded`] if the tree is deeper than
    /// [`DEFAULT_MAX_DEPTH`].
    pub fn render(&self) -> Result<String, DomError> {
        self.render_with(&RenderOptions::compact())
    }

    /// Indented HTML.
    ///
    /// # Errors
    ///
    /// Same as [`Node::render`].
    pub fn render_pretty(&self) -> Result<String, DomError> {
        self.render_with(&RenderOptions::pretty())
    }

    /// HTML rendered with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::DepthExceeded`] past `options.max_depth`, and in
    /// strict mode [`DomError::InvalidAttributeKey`] for an attribute key
    /// that cannot be written safely.
    pub fn render_with(&self, options: &RenderOptions) -> Result<String, DomError> {
        let mut out = String::new();
        Renderer { options, out: &mut out }.node(self, 0, 0)?;
        Ok(out)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let html = self.render().map_err(|_| fmt::Error)?;
        f.write_str(&html)
    }
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    out: &'a mut String,
}

impl Renderer<'_> {
    /// `indent` is the visual level; `depth` counts every nesting step,
    /// fragments included.
    fn node(&mut self, node: &Node, indent: usize, depth: usize) -> Result<(), DomError> {
        if depth > self.options.max_depth {
            return Err(DomError::DepthExceeded {
                operation: "render",
                limit: self.options.max_depth,
            });
        }

        let hooks = node.hooks();
        if let Some(before_render) = hooks.and_then(|hooks| hooks.before_render) {
            before_render(node);
        }

        if let Some(prefix) = node.prefix() {
            self.out.push_str(prefix);
        }
        match node.kind() {
            NodeKind::Element => self.element(node, indent, depth)?,
            NodeKind::Fragment => self.fragment(node, indent, depth)?,
        }

        if let Some(after_render) = hooks.and_then(|hooks| hooks.after_render) {
            after_render(node);
        }
        Ok(())
    }

    fn element(&mut self, node: &Node, indent: usize, depth: usize) -> Result<(), DomError> {
        let pretty = self.options.pretty;
        let padding = if pretty { INDENT.repeat(indent) } else { String::new() };

        self.out.push_str(&padding);
        self.out.push('<');
        self.out.push_str(node.tag());
        self.attributes(node)?;

        if node.is_self_closing() {
            self.out.push_str(" />");
            if pretty {
                self.out.push('\n');
            }
            return Ok(());
        }

        self.out.push('>');
        self.out.push_str(&escape_html(node.text()));
        if pretty && !node.children().is_empty() {
            self.out.push('\n');
            for child in node.children() {
                self.node(child, indent + 1, depth + 1)?;
            }
            self.out.push_str(&padding);
        } else {
            for child in node.children() {
                self.node(child, indent + 1, depth + 1)?;
            }
        }
        self.out.push_str("</");
        self.out.push_str(node.tag());
        self.out.push('>');
        if pretty {
            self.out.push('\n');
        }
        Ok(())
    }

    /// Text, then children at the fragment's own indentation.
    fn fragment(&mut self, node: &Node, indent: usize, depth: usize) -> Result<(), DomError> {
        if !node.text().is_empty() {
            if self.options.pretty {
                self.out.push_str(&INDENT.repeat(indent));
                self.out.push_str(&escape_html(node.text()));
                self.out.push('\n');
            } else {
                self.out.push_str(&escape_html(node.text()));
            }
        }
        for child in node.children() {
            self.node(child, indent, depth + 1)?;
        }
        Ok(())
    }

    fn attributes(&mut self, node: &Node) -> Result<(), DomError> {
        for (key, value) in node.attributes() {
            let name = render_key(key);
            if !is_valid_attribute_key(name) {
                if self.options.strict {
                    return Err(DomError::InvalidAttributeKey(name.to_string()));
                }
                diagnostic::emit(
                    Diagnostic::new(
                        DiagnosticKind::InvalidAttributeKey,
                        COMPONENT,
                        format!("Skipping invalid attribute name: {name:?}"),
                    )
                    .with_tag(node.tag())
                    .with_attribute(name),
                );
                continue;
            }

            match value {
                AttributeValue::Null => {}
                AttributeValue::Bool(false) if is_boolean_attribute(name) => {}
                AttributeValue::Bool(true) if is_boolean_attribute(name) => self.bare(name),
                AttributeValue::Text(text)
                    if is_boolean_attribute(name) && (text.is_empty() || text == name) =>
                {
                    self.bare(name);
                }
                AttributeValue::Bool(flag) => self.quoted(name, if *flag { "true" } else { "false" }),
                AttributeValue::Text(text) => self.quoted(name, text),
            }
        }
        Ok(())
    }

    fn bare(&mut self, name: &str) {
        self.out.push(' ');
        self.out.push_str(name);
    }

    fn quoted(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&escape_html(value));
        self.out.push('"');
    }
}
