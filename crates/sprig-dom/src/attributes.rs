use core::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::svg::svg_attribute_for_keyword;

/// Attribute key to value, in insertion order.
pub type AttributesMap = IndexMap<String, AttributeValue>;

/// The value stored for an attribute.
///
/// Bare boolean attributes (`<input disabled>`) are stored as
/// `Bool(true)` rather than an empty string so the renderer can reproduce
/// them verbatim. `Null` is accepted from dynamic sources and never
/// rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean sentinel.
    Bool(bool),
    /// Ordinary string value.
    Text(String),
    /// Absent value; the attribute is omitted when rendering.
    Null,
}

impl AttributeValue {
    /// The string payload, if this is a [`AttributeValue::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bool(_) | Self::Null => None,
        }
    }

    /// The boolean payload, if this is a [`AttributeValue::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Text(_) | Self::Null => None,
        }
    }

    /// Returns true for [`AttributeValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttributeValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// An empty attribute list, for [`Node::create`](crate::Node::create) calls
/// that set none.
pub const NO_ATTRIBUTES: [(&str, &str); 0] = [];

/// Internal key that renders as `class`.
pub const CLASS_KEY: &str = "class_name";
/// Internal key that renders as `for`.
pub const FOR_KEY: &str = "for_element";

/// Keyword spellings accepted in place of reserved words.
const KEYWORD_ALIASES: &[(&str, &str)] = &[
    ("class_", CLASS_KEY),
    ("cls", CLASS_KEY),
    ("for_", FOR_KEY),
];

/// Keys that keep their underscores.
const PRESERVED_KEYS: &[&str] = &[CLASS_KEY, FOR_KEY];

/// Attributes whose presence alone means "on".
pub const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "inert",
    "ismap",
    "itemscope",
    "loop",
    "multiple",
    "muted",
    "nomodule",
    "novalidate",
    "open",
    "playsinline",
    "readonly",
    "required",
    "reversed",
    "selected",
];

/// Returns true if `name` is an HTML boolean attribute.
#[must_use]
pub fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_ATTRIBUTES.binary_search(&name).is_ok()
}

/// Normalize a keyword-style attribute key.
///
/// Rules are tried in order:
/// 1. `class_` and `cls` become `class_name`, `for_` becomes `for_element`
/// 2. `class_name` and `for_element` are kept as they are
/// 3. snake_case SVG names take their camelCase form (`view_box` to `viewBox`)
/// 4. any other `_` becomes `-` (`data_value` to `data-value`)
#[must_use]
pub fn normalize_key(key: &str) -> String {
    if let Some(&(_, alias)) = KEYWORD_ALIASES.iter().find(|&&(from, _)| from == key) {
        return alias.to_string();
    }
    if PRESERVED_KEYS.contains(&key) {
        return key.to_string();
    }
    if let Some(camel) = svg_attribute_for_keyword(key) {
        return camel.to_string();
    }
    key.replace('_', "-")
}

/// The name an internal key is written as in markup.
#[must_use]
pub fn render_key(key: &str) -> &str {
    match key {
        CLASS_KEY => "class",
        FOR_KEY => "for",
        other => other,
    }
}

/// Tag names: `^[A-Za-z][A-Za-z0-9-]*$`.
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Rendered attribute names: `^[A-Za-z_][A-Za-z0-9_:.@-]*$`.
#[must_use]
pub fn is_valid_attribute_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '@' | '-'))
}
