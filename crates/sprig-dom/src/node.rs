use std::cell::OnceCell;

use sprig_common::Config;
use sprig_common::diagnostic::{self, Diagnostic, DiagnosticKind};
use sprig_css::{StyleMap, check_value, format_style, parse_style};
use uuid::Uuid;

use crate::attributes::{AttributeValue, AttributesMap, CLASS_KEY, is_valid_tag, normalize_key};
use crate::child::{Child, flatten};
use crate::error::DomError;
use crate::hooks::LifecycleHooks;
use crate::tags::FRAGMENT_TAG;

/// Component name used in diagnostics raised by this module.
const COMPONENT: &str = "DOM";

/// Whether a node writes its own tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// An ordinary element: `<tag attrs>text children</tag>`.
    #[default]
    Element,
    /// A wrapper-less group: renders only its text and children.
    Fragment,
}

/// One element of a markup tree.
///
/// A node owns its children. Text lives in a single buffer beside the child
/// list and is always rendered before the children, whatever order the
/// strings and nodes were supplied in.
#[derive(Debug, Clone)]
pub struct Node {
    tag: String,
    kind: NodeKind,
    attributes: AttributesMap,
    text: String,
    children: Vec<Node>,
    self_closing: bool,
    prefix: Option<String>,
    hooks: Option<&'static LifecycleHooks>,
    /// Parsed form of the `style` attribute; empty until first use.
    styles: OnceCell<StyleMap>,
}

impl PartialEq for Node {
    /// Structural equality. Hook tables and the style cache are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.kind == other.kind
            && self.attributes == other.attributes
            && self.text == other.text
            && self.self_closing == other.self_closing
            && self.prefix == other.prefix
            && self.children == other.children
    }
}

/// Chained construction of a [`Node`].
///
/// ```ignore
/// let link = Node::builder("a")
///     .attr("href", "/home")
///     .attr("cls", "nav")
///     .child("Home")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct NodeBuilder {
    tag: String,
    children: Vec<Child>,
    attributes: Vec<(String, AttributeValue)>,
    self_closing: bool,
    prefix: Option<String>,
    hooks: Option<&'static LifecycleHooks>,
    config: Config,
}

impl NodeBuilder {
    fn new(tag: String) -> Self {
        Self {
            tag,
            children: Vec::new(),
            attributes: Vec::new(),
            self_closing: false,
            prefix: None,
            hooks: None,
            config: Config::default(),
        }
    }

    /// Add a child (node, text, list or nothing).
    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add several children.
    pub fn children<C: Into<Child>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Add an attribute. The key is normalized when the node is built.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add several attributes.
    pub fn attrs<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Mark the node as a void element (`<br />`).
    pub const fn self_closing(mut self, self_closing: bool) -> Self {
        self.self_closing = self_closing;
        self
    }

    /// Literal text written immediately before the node, such as a doctype.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Attach a lifecycle hook table.
    pub const fn hooks(mut self, hooks: &'static LifecycleHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Use `config` (automatic ids) for this node.
    pub const fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Validate the tag, normalize attribute keys, flatten children and run
    /// the `on_load` hook.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidTag`] if the tag is not a valid name or is
    /// the reserved fragment tag.
    pub fn build(self) -> Result<Node, DomError> {
        if !is_element_tag(&self.tag) {
            return Err(DomError::InvalidTag(self.tag));
        }

        let attributes = self
            .attributes
            .into_iter()
            .map(|(key, value)| (normalize_key(&key), value))
            .collect();

        let mut node = Node {
            tag: self.tag,
            kind: NodeKind::Element,
            attributes,
            text: String::new(),
            children: Vec::new(),
            self_closing: self.self_closing,
            prefix: self.prefix,
            hooks: self.hooks,
            styles: OnceCell::new(),
        };

        if self.config.generate_ids {
            let _ = node.generate_id();
        }

        let content = flatten(Child::List(self.children));
        if node.self_closing && !content.is_empty() {
            node.report_self_closing_content();
        }
        node.text = content.text;
        node.children = content.nodes;

        if let Some(on_load) = node.hooks.and_then(|hooks| hooks.on_load) {
            on_load(&mut node);
        }

        Ok(node)
    }
}

impl Node {
    /// An empty element.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidTag`] if `tag` is not a valid name.
    pub fn new(tag: &str) -> Result<Self, DomError> {
        Self::builder(tag).build()
    }

    /// An element with children and keyword-style attributes.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidTag`] if `tag` is not a valid name.
    pub fn create<K, V>(
        tag: &str,
        children: impl Into<Child>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, DomError>
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        Self::builder(tag).child(children).attrs(attributes).build()
    }

    /// Start building an element.
    pub fn builder(tag: impl Into<String>) -> NodeBuilder {
        NodeBuilder::new(tag.into())
    }

    /// A fragment holding `children`.
    #[must_use]
    pub fn fragment(children: impl Into<Child>) -> Self {
        let content = flatten(children.into());
        Self {
            tag: FRAGMENT_TAG.to_string(),
            kind: NodeKind::Fragment,
            attributes: AttributesMap::new(),
            text: content.text,
            children: content.nodes,
            self_closing: false,
            prefix: None,
            hooks: None,
            styles: OnceCell::new(),
        }
    }

    /// Run `build` against this node and hand it back, for nested
    /// construction without temporaries.
    ///
    /// ```ignore
    /// let list = Node::new("ul")?.scope(|ul| {
    ///     for item in ["one", "two"] {
    ///         if let Ok(li) = Node::create("li", item, NO_ATTRIBUTES) {
    ///             ul.append(li);
    ///         }
    ///     }
    /// });
    /// ```
    #[must_use]
    pub fn scope(mut self, build: impl FnOnce(&mut Self)) -> Self {
        build(&mut self);
        self
    }

    /// Run every `on_dispose` hook in the subtree, parents before children,
    /// and drop the nodes.
    pub fn dispose(self) {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if let Some(on_dispose) = node.hooks.and_then(|hooks| hooks.on_dispose) {
                on_dispose(&node);
            }
            pending.extend(node.children.into_iter().rev());
        }
    }

    // ===== accessors =====

    /// The tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Rename the node.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidTag`] if `tag` is not a valid name or is
    /// the reserved fragment tag; the node is unchanged.
    pub fn set_tag(&mut self, tag: impl Into<String>) -> Result<&mut Self, DomError> {
        let tag = tag.into();
        if !is_element_tag(&tag) {
            return Err(DomError::InvalidTag(tag));
        }
        self.tag = tag;
        Ok(self)
    }

    /// Element or fragment.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns true for fragments.
    #[must_use]
    pub fn is_fragment(&self) -> bool {
        self.kind == NodeKind::Fragment
    }

    /// The text buffer.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text buffer.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    /// Direct children, in order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Mutable access to the child list.
    pub const fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    /// Replace the child list.
    pub fn set_children(&mut self, children: Vec<Self>) -> &mut Self {
        self.children = children;
        self
    }

    /// Number of direct children.
    #[must_use]
    pub fn count_children(&self) -> usize {
        self.children.len()
    }

    /// Whether the node renders as `<tag />`.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Change the self-closing flag.
    pub const fn set_self_closing(&mut self, self_closing: bool) -> &mut Self {
        self.self_closing = self_closing;
        self
    }

    /// Literal text written before the node.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Replace the prefix.
    pub fn set_prefix(&mut self, prefix: Option<String>) -> &mut Self {
        self.prefix = prefix;
        self
    }

    /// The attached hook table.
    #[must_use]
    pub const fn hooks(&self) -> Option<&'static LifecycleHooks> {
        self.hooks
    }

    /// Attach or detach a hook table.
    pub const fn set_hooks(&mut self, hooks: Option<&'static LifecycleHooks>) -> &mut Self {
        self.hooks = hooks;
        self
    }

    /// The `id` attribute, if it is a string.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id").and_then(AttributeValue::as_str)
    }

    /// Whitespace-separated tokens of the class attribute.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        self.get_attribute(CLASS_KEY)
            .or_else(|| self.get_attribute("class"))
            .and_then(AttributeValue::as_str)
            .map(|classes| classes.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    // ===== children =====

    /// Add children after the existing ones; strings are appended to the
    /// text buffer.
    pub fn append(&mut self, children: impl Into<Child>) -> &mut Self {
        let content = flatten(children.into());
        if self.self_closing && !content.is_empty() {
            self.report_self_closing_content();
        }
        self.text.push_str(&content.text);
        self.children.extend(content.nodes);
        self
    }

    /// Add children before the existing ones; strings go in front of the
    /// existing text.
    pub fn prepend(&mut self, children: impl Into<Child>) -> &mut Self {
        let mut content = flatten(children.into());
        if self.self_closing && !content.is_empty() {
            self.report_self_closing_content();
        }
        content.text.push_str(&self.text);
        self.text = content.text;
        let _ = self.children.splice(0..0, content.nodes);
        self
    }

    /// Remove every child. The text buffer is kept.
    pub fn clear(&mut self) -> &mut Self {
        self.children.clear();
        self
    }

    /// Remove and return the child at `index`.
    pub fn pop(&mut self, index: usize) -> Option<Self> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// The first child.
    #[must_use]
    pub fn first(&self) -> Option<&Self> {
        self.children.first()
    }

    /// The last child.
    #[must_use]
    pub fn last(&self) -> Option<&Self> {
        self.children.last()
    }

    /// Remove every direct child matching `predicate`.
    pub fn remove_all(&mut self, mut predicate: impl FnMut(&Self) -> bool) -> &mut Self {
        self.children.retain(|child| !predicate(child));
        self
    }

    /// Put `node` at `index`, returning the child it replaced.
    pub fn replace_child(&mut self, index: usize, node: Self) -> Option<Self> {
        self.children
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, node))
    }

    fn report_self_closing_content(&self) {
        diagnostic::emit(
            Diagnostic::new(
                DiagnosticKind::SelfClosingContent,
                COMPONENT,
                format!(
                    "Self-closing element <{} /> cannot have children or text; the content will not be rendered",
                    self.tag
                ),
            )
            .with_tag(&self.tag),
        );
    }

    // ===== attributes =====

    /// All attributes, keyed by internal name.
    #[must_use]
    pub const fn attributes(&self) -> &AttributesMap {
        &self.attributes
    }

    /// Set one attribute. The key is stored as given.
    ///
    /// `class` and `class_name` are kept as a single entry under
    /// `class_name`, whichever spelling is written.
    pub fn add_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if key == "style" {
            self.invalidate_styles();
        }
        if key == "class" && self.attributes.contains_key(CLASS_KEY) {
            let _ = self.attributes.insert(CLASS_KEY.to_string(), value);
        } else if key == CLASS_KEY && self.attributes.contains_key("class") {
            let _ = self.attributes.shift_remove("class");
            let _ = self.attributes.insert(key, value);
        } else {
            let _ = self.attributes.insert(key, value);
        }
        self
    }

    /// Set several attributes in order.
    pub fn add_attributes<K, V>(&mut self, attributes: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        for (key, value) in attributes {
            let _ = self.add_attribute(key, value);
        }
        self
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, key: &str) -> &mut Self {
        if key == "style" {
            self.invalidate_styles();
        }
        let _ = self.attributes.shift_remove(key);
        self
    }

    /// One attribute value.
    #[must_use]
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Whether an attribute is set.
    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// The values of `keys` (absent ones as `Null`), or a copy of every
    /// attribute when `keys` is empty.
    #[must_use]
    pub fn get_attributes(&self, keys: &[&str]) -> AttributesMap {
        if keys.is_empty() {
            return self.attributes.clone();
        }
        keys.iter()
            .map(|&key| {
                let value = self.attributes.get(key).cloned().unwrap_or(AttributeValue::Null);
                (key.to_string(), value)
            })
            .collect()
    }

    /// Replace every attribute verbatim, without key normalization.
    pub fn set_attributes(&mut self, attributes: AttributesMap) -> &mut Self {
        self.attributes = attributes;
        self.invalidate_styles();
        self
    }

    /// Give the node an `id` of the form `el-xxxxxx` unless it has one.
    pub fn generate_id(&mut self) -> &mut Self {
        if !self.attributes.contains_key("id") {
            let uuid = Uuid::new_v4().simple().to_string();
            let id = format!("el-{}", &uuid[..6]);
            let _ = self.attributes.insert("id".to_string(), AttributeValue::Text(id));
        }
        self
    }

    // ===== inline styles =====

    /// The parsed `style` attribute.
    #[must_use]
    pub fn styles(&self) -> &StyleMap {
        self.styles
            .get_or_init(|| parse_style(style_text(&self.attributes)))
    }

    /// One inline style value.
    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.styles().get(property).map(String::as_str)
    }

    /// Set one inline style.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnsafeStyleValue`] if the value matches the
    /// injection denylist; the style is left unchanged.
    pub fn add_style(
        &mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, DomError> {
        let property = property.into();
        let value = value.into();
        check_value(&property, &value)?;
        self.update_styles(|styles| {
            let _ = styles.insert(property, value);
        });
        Ok(self)
    }

    /// Set several inline styles. Every value is checked before any is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::UnsafeStyleValue`] for the first unsafe value;
    /// the style is left unchanged.
    pub fn add_styles<K, V>(
        &mut self,
        styles: impl IntoIterator<Item = (K, V)>,
    ) -> Result<&mut Self, DomError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let styles: Vec<(String, String)> = styles
            .into_iter()
            .map(|(property, value)| (property.into(), value.into()))
            .collect();
        for (property, value) in &styles {
            check_value(property, value)?;
        }
        self.update_styles(|current| current.extend(styles));
        Ok(self)
    }

    /// Remove one inline style; the `style` attribute disappears with the
    /// last one.
    pub fn remove_style(&mut self, property: &str) -> &mut Self {
        self.update_styles(|styles| {
            let _ = styles.shift_remove(property);
        });
        self
    }

    /// Apply `update` to the style map and write it back to the attribute.
    fn update_styles(&mut self, update: impl FnOnce(&mut StyleMap)) {
        let mut styles = self
            .styles
            .take()
            .unwrap_or_else(|| parse_style(style_text(&self.attributes)));
        update(&mut styles);
        if styles.is_empty() {
            let _ = self.attributes.shift_remove("style");
        } else {
            let _ = self
                .attributes
                .insert("style".to_string(), AttributeValue::Text(format_style(&styles)));
        }
        self.styles = OnceCell::from(styles);
    }

    fn invalidate_styles(&mut self) {
        let _ = self.styles.take();
    }
}

/// Fragments are only built through [`Node::fragment`].
fn is_element_tag(tag: &str) -> bool {
    tag != FRAGMENT_TAG && is_valid_tag(tag)
}

/// The `style` attribute as text; non-string values read as empty.
fn style_text(attributes: &AttributesMap) -> &str {
    attributes
        .get("style")
        .and_then(AttributeValue::as_str)
        .unwrap_or_default()
}
