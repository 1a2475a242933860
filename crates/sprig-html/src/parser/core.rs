use std::collections::HashMap;

use sprig_common::Config;
use sprig_common::diagnostic::{Diagnostic, DiagnosticKind, emit};
use sprig_dom::attributes::CLASS_KEY;
use sprig_dom::svg::adjust_svg_attribute;
use sprig_dom::tags::is_void_element;
use sprig_dom::{AttributeValue, AttributesMap, Node};

use crate::error::ParseError;
use crate::tokenizer::{Attribute, Token};

/// Component name carried by parser diagnostics.
pub const COMPONENT: &str = "HTML Parser";

/// Elements inside which character data is kept verbatim.
const PREFORMATTED_ELEMENTS: [&str; 5] = ["pre", "code", "textarea", "script", "style"];

/// Tag given to the element that wraps text found outside any element.
const STRAY_TEXT_TAG: &str = "span";

/// Builds element trees from a token stream.
///
/// This is a tag-soup builder, not the WHATWG tree construction algorithm:
/// there are no insertion modes and no implied elements. Every start tag
/// opens exactly the element it names, and recovery is limited to
/// - closing intermediate elements when an end tag matches an ancestor,
/// - ignoring end tags that match nothing,
/// - closing everything still open at end of input.
///
/// Open elements are owned by the stack and attached to their parent (or
/// to the list of roots) when they close.
#[derive(Debug)]
pub struct TreeBuilder {
    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Completed top-level nodes, in document order.
    roots: Vec<Node>,

    /// Elements opened and not yet closed, innermost last.
    stack_of_open_elements: Vec<Node>,

    /// The run of character tokens seen since the last other token.
    pending_characters: String,

    /// Text waiting for the next tag boundary to be attached.
    text_buffer: String,

    config: Config,

    /// Diagnostics reported so far.
    issues: Vec<Diagnostic>,

    /// If true, the first diagnostic aborts the build.
    strict_mode: bool,
}

impl TreeBuilder {
    /// Create a builder over a token stream.
    #[must_use]
    pub const fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            roots: Vec::new(),
            stack_of_open_elements: Vec::new(),
            pending_characters: String::new(),
            text_buffer: String::new(),
            config: Config {
                generate_ids: false,
                max_depth: sprig_common::DEFAULT_MAX_DEPTH,
            },
            issues: Vec::new(),
            strict_mode: false,
        }
    }

    /// Build nodes with `config` (automatic ids).
    #[must_use]
    pub const fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Turn the first diagnostic into [`ParseError::Strict`].
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Run the builder and return the top-level nodes.
    ///
    /// # Errors
    ///
    /// See [`TreeBuilder::run_with_issues`].
    pub fn run(self) -> Result<Vec<Node>, ParseError> {
        self.run_with_issues().map(|(roots, _)| roots)
    }

    /// Run the builder and return the top-level nodes together with every
    /// diagnostic reported on the way.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Dom`] if a tag name is not a valid element name,
    /// or [`ParseError::Strict`] in strict mode once anything is reported.
    pub fn run_with_issues(mut self) -> Result<(Vec<Node>, Vec<Diagnostic>), ParseError> {
        let tokens = std::mem::take(&mut self.tokens);
        for token in tokens {
            self.process_token(token)?;
        }
        // A stream always ends with EOF, but a hand-built one may not.
        self.handle_end_of_file()?;
        Ok((self.roots, self.issues))
    }

    fn process_token(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::Character { data } => {
                self.pending_characters.push(data);
                Ok(())
            }
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                self.handle_data();
                self.flush_text_buffer()?;
                self.handle_start_tag(name, self_closing, attributes)
            }
            Token::EndTag { name } => {
                self.handle_data();
                self.flush_text_buffer()?;
                self.handle_end_tag(&name)
            }
            // Comments and doctypes are dropped, but they still end a run
            // of text.
            Token::Comment { .. } | Token::Doctype { .. } => {
                self.handle_data();
                Ok(())
            }
            Token::EndOfFile => self.handle_end_of_file(),
        }
    }

    /// Move the pending run of characters into the text buffer.
    ///
    /// Inside a preformatted element the run is kept as it is; elsewhere it
    /// is trimmed, and dropped if nothing is left.
    fn handle_data(&mut self) {
        if self.pending_characters.is_empty() {
            return;
        }
        let data = std::mem::take(&mut self.pending_characters);
        if self.in_preformatted_element() {
            self.text_buffer.push_str(&data);
        } else {
            self.text_buffer.push_str(data.trim());
        }
    }

    fn in_preformatted_element(&self) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|node| PREFORMATTED_ELEMENTS.contains(&node.tag()))
    }

    /// Attach buffered text to the current element. With no element open,
    /// non-blank text is kept in a standalone `span` root.
    fn flush_text_buffer(&mut self) -> Result<(), ParseError> {
        if self.text_buffer.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.text_buffer);

        if let Some(current) = self.stack_of_open_elements.last_mut() {
            let _ = current.append(text);
        } else if !text.trim().is_empty() {
            let wrapper = Node::builder(STRAY_TEXT_TAG)
                .child(text)
                .config(self.config)
                .build()?;
            self.roots.push(wrapper);
        }
        Ok(())
    }

    fn handle_start_tag(
        &mut self,
        name: String,
        self_closing: bool,
        attributes: Vec<Attribute>,
    ) -> Result<(), ParseError> {
        let attributes = self.normalize_attributes(&name, attributes)?;
        let is_void = is_void_element(&name);

        let node = Node::builder(name)
            .attrs(attributes)
            .self_closing(is_void)
            .config(self.config)
            .build()?;

        // Void elements are leaves. `<div/>` is read as `<div></div>`.
        if is_void || self_closing {
            self.insert(node);
        } else {
            self.stack_of_open_elements.push(node);
        }
        Ok(())
    }

    fn handle_end_tag(&mut self, name: &str) -> Result<(), ParseError> {
        // `<br></br>` and `<br/>` style markup: the leaf is already complete.
        if is_void_element(name) {
            return Ok(());
        }

        let Some(current) = self.stack_of_open_elements.last() else {
            return self.report(
                Diagnostic::new(
                    DiagnosticKind::UnexpectedEndTag,
                    COMPONENT,
                    format!("Unexpected closing tag </{name}> with no matching opening tag."),
                )
                .with_tag(name),
            );
        };

        if current.tag() == name {
            self.close_current_element();
            return Ok(());
        }

        let expected = current.tag().to_string();
        let Some(index) = self
            .stack_of_open_elements
            .iter()
            .rposition(|node| node.tag() == name)
        else {
            return self.report(
                Diagnostic::new(
                    DiagnosticKind::UnexpectedEndTag,
                    COMPONENT,
                    format!(
                        "Unexpected closing tag </{name}> inside <{expected}>: no open element matches it."
                    ),
                )
                .with_tag(name),
            );
        };

        self.report(
            Diagnostic::new(
                DiagnosticKind::MismatchedEndTag,
                COMPONENT,
                format!(
                    "Mismatched HTML tags: expected </{expected}> but found </{name}>. \
                     This may result in an incorrect element tree."
                ),
            )
            .with_tag(name),
        )?;

        while self.stack_of_open_elements.len() > index {
            self.close_current_element();
        }
        Ok(())
    }

    fn handle_end_of_file(&mut self) -> Result<(), ParseError> {
        self.handle_data();
        self.flush_text_buffer()?;
        while !self.stack_of_open_elements.is_empty() {
            self.close_current_element();
        }
        Ok(())
    }

    /// Pop the current element and attach it to its parent.
    fn close_current_element(&mut self) {
        if let Some(node) = self.stack_of_open_elements.pop() {
            self.insert(node);
        }
    }

    /// Attach a finished node to the current element, or make it a root.
    fn insert(&mut self, node: Node) {
        match self.stack_of_open_elements.last_mut() {
            Some(parent) => parent.children_mut().push(node),
            None => self.roots.push(node),
        }
    }

    /// Map source attribute names to the keys the constructor expects:
    /// `class` becomes `class_name`, lowercased SVG names take back their
    /// camelCase spelling and other hyphens become underscores.
    ///
    /// Two source attributes landing on the same key is reported; the later
    /// value wins and the key keeps its first position.
    fn normalize_attributes(
        &mut self,
        tag: &str,
        attributes: Vec<Attribute>,
    ) -> Result<AttributesMap, ParseError> {
        let mut normalized = AttributesMap::with_capacity(attributes.len());
        let mut seen: HashMap<String, String> = HashMap::with_capacity(attributes.len());

        for Attribute { name, value } in attributes {
            let key = normalize_attribute_name(&name);

            if let Some(original) = seen.get(&key) {
                let message = format!(
                    "Attribute collision in <{tag}>: '{name}' normalizes to '{key}' which \
                     collides with '{original}'. The later value will overwrite the earlier one."
                );
                let mut diagnostic =
                    Diagnostic::new(DiagnosticKind::AttributeCollision, COMPONENT, message)
                        .with_tag(tag)
                        .with_attribute(name.as_str());
                if let Some(value) = &value {
                    diagnostic = diagnostic.with_value(value.as_str());
                }
                self.report(diagnostic)?;
            } else {
                let _ = seen.insert(key.clone(), name);
            }

            // A bare attribute is "on", not the empty string.
            let value = value.map_or(AttributeValue::Bool(true), AttributeValue::Text);
            let _ = normalized.insert(key, value);
        }
        Ok(normalized)
    }

    fn report(&mut self, diagnostic: Diagnostic) -> Result<(), ParseError> {
        if self.strict_mode {
            return Err(ParseError::Strict(diagnostic));
        }
        self.issues.push(diagnostic.clone());
        emit(diagnostic);
        Ok(())
    }
}

/// The constructor key for a source attribute name.
#[must_use]
pub fn normalize_attribute_name(name: &str) -> String {
    if let Some(camel) = adjust_svg_attribute(name) {
        return camel.to_string();
    }
    if name == "class" {
        return CLASS_KEY.to_string();
    }
    name.replace('-', "_")
}
