use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use sprig_common::DEFAULT_MAX_DEPTH;
use sprig_dom::tags::FRAGMENT_TAG;
use sprig_dom::{AttributeValue, AttributesMap, DomError, Node};

use crate::error::SerializeError;
use crate::registry::TagRegistry;

const TAG: &str = "tag";
const SELF_CLOSING: &str = "self_closing";
const ATTRIBUTES: &str = "attributes";
const TEXT: &str = "text";
const CHILDREN: &str = "children";

/// Encodes trees as `{tag, self_closing, attributes, text, children}`
/// objects and decodes them back.
///
/// Key order is kept on both sides, so a decoded tree renders exactly like
/// the tree that was encoded. Without a registry every decoded node is a
/// plain element (or a fragment for the reserved `fragment` tag); with one,
/// registered tags are rebuilt through their factory first.
///
/// ```
/// use sprig_dom::Node;
/// use sprig_json::Serializer;
///
/// let link = Node::create("a", "Home", [("href", "/")]).unwrap();
/// let json = Serializer::new().to_json(&link, None).unwrap();
/// assert_eq!(
///     json,
///     r#"{"tag":"a","self_closing":false,"attributes":{"href":"/"},"text":"Home","children":[]}"#
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'r> {
    registry: Option<&'r TagRegistry>,
    max_depth: usize,
}

impl Default for Serializer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Serializer<'r> {
    /// A serializer without a registry and with the default depth ceiling.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Rebuild registered tags through `registry` when decoding.
    #[must_use]
    pub const fn with_registry(mut self, registry: &'r TagRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Override the depth ceiling for both directions.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    // ===== encoding =====

    /// Encode `node` and its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::DepthExceeded`] if the tree is deeper than the
    /// ceiling.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_dict(&self, node: &Node) -> Result<Value, SerializeError> {
        self.encode(node, 0)
    }

    /// Encode `node` as JSON text, indented by `indent` spaces per level
    /// when given. Otherwise the text is compact, with no space after `:` or `,`.
    ///
    /// # Errors
    ///
    /// See [`Serializer::to_dict`].
    #[allow(clippy::wrong_self_convention)]
    pub fn to_json(&self, node: &Node, indent: Option<usize>) -> Result<String, SerializeError> {
        let value = self.to_dict(node)?;
        let Some(width) = indent else {
            return Ok(serde_json::to_string(&value)?);
        };

        let indent = " ".repeat(width);
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        value.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn encode(&self, node: &Node, depth: usize) -> Result<Value, SerializeError> {
        self.check_depth(depth, "to_dict")?;

        let attributes = node
            .attributes()
            .iter()
            .map(|(key, value)| -> Result<_, SerializeError> {
                Ok((key.clone(), serde_json::to_value(value)?))
            })
            .collect::<Result<Map<String, Value>, _>>()?;
        let children = node
            .children()
            .iter()
            .map(|child| self.encode(child, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let mut object = Map::with_capacity(5);
        let _ = object.insert(TAG.to_string(), Value::from(node.tag()));
        let _ = object.insert(SELF_CLOSING.to_string(), Value::Bool(node.is_self_closing()));
        let _ = object.insert(ATTRIBUTES.to_string(), Value::Object(attributes));
        let _ = object.insert(TEXT.to_string(), Value::from(node.text()));
        let _ = object.insert(CHILDREN.to_string(), Value::Array(children));
        Ok(Value::Object(object))
    }

    // ===== decoding =====

    /// Rebuild a tree from its encoded form.
    ///
    /// Every object is validated before its node is constructed:
    /// - `tag` is required and must be a string
    /// - `self_closing` must be a boolean (default `false`)
    /// - `attributes` must be an object of string, boolean, number or null
    ///   values (default empty; numbers are kept as their decimal text)
    /// - `text` must be a string or null (default empty)
    /// - `children` must be a list of objects (default empty)
    ///
    /// Stored attributes replace whatever the constructor set, key for key.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::SchemaViolation`] naming the offending
    /// field, [`DomError::InvalidTag`] for a tag that is not a valid name and
    /// [`DomError::DepthExceeded`] past the ceiling.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_dict(&self, value: &Value) -> Result<Node, SerializeError> {
        self.decode(value, 0)
    }

    /// Parse JSON text and rebuild the tree it holds.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::InvalidJson`] for malformed text, otherwise
    /// see [`Serializer::from_dict`].
    #[allow(clippy::wrong_self_convention)]
    pub fn from_json(&self, json: &str) -> Result<Node, SerializeError> {
        let value: Value = serde_json::from_str(json)?;
        self.from_dict(&value)
    }

    fn decode(&self, value: &Value, depth: usize) -> Result<Node, SerializeError> {
        let Value::Object(object) = value else {
            return Err(SerializeError::schema(
                "node",
                format!("must be an object, got {}", type_name(value)),
            ));
        };
        self.check_depth(depth, "from_dict")?;

        let tag = match object.get(TAG) {
            Some(Value::String(tag)) => tag.as_str(),
            Some(other) => {
                return Err(SerializeError::schema(
                    TAG,
                    format!("must be a string, got {}", type_name(other)),
                ));
            }
            None => return Err(SerializeError::schema(TAG, "is required")),
        };

        let self_closing = match object.get(SELF_CLOSING) {
            None => false,
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                return Err(SerializeError::schema(
                    SELF_CLOSING,
                    format!("must be a bool, got {}", type_name(other)),
                ));
            }
        };

        let attributes = match object.get(ATTRIBUTES) {
            None => AttributesMap::new(),
            Some(Value::Object(attributes)) => decode_attributes(attributes)?,
            Some(other) => {
                return Err(SerializeError::schema(
                    ATTRIBUTES,
                    format!("must be a dict, got {}", type_name(other)),
                ));
            }
        };

        let text = match object.get(TEXT) {
            None | Some(Value::Null) => "",
            Some(Value::String(text)) => text.as_str(),
            Some(other) => {
                return Err(SerializeError::schema(
                    TEXT,
                    format!("must be a string, got {}", type_name(other)),
                ));
            }
        };

        let encoded_children: &[Value] = match object.get(CHILDREN) {
            None => &[],
            Some(Value::Array(children)) => children,
            Some(other) => {
                return Err(SerializeError::schema(
                    CHILDREN,
                    format!("must be a list, got {}", type_name(other)),
                ));
            }
        };

        let mut node = self.construct(tag, self_closing)?;
        let _ = node.set_attributes(attributes);
        if !text.is_empty() {
            let _ = node.set_text(text);
        }

        let children = encoded_children
            .iter()
            .map(|child| self.decode(child, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        let _ = node.set_children(children);
        Ok(node)
    }

    /// Build the node for `tag`, through the registry when it knows the tag.
    fn construct(&self, tag: &str, self_closing: bool) -> Result<Node, SerializeError> {
        if tag == FRAGMENT_TAG {
            return Ok(Node::fragment(()));
        }

        let mut node = match self.registry.and_then(|registry| registry.get(tag)) {
            Some(factory) => factory
                .construct()
                .or_else(|_| factory.construct_tagged(tag, self_closing))?,
            None => Node::builder(tag).self_closing(self_closing).build()?,
        };
        let _ = node.set_self_closing(self_closing);
        Ok(node)
    }

    fn check_depth(&self, depth: usize, operation: &'static str) -> Result<(), SerializeError> {
        if depth > self.max_depth {
            return Err(SerializeError::Dom(DomError::DepthExceeded {
                operation,
                limit: self.max_depth,
            }));
        }
        Ok(())
    }
}

/// Numbers are kept as their decimal text; strings, booleans and null map
/// onto [`AttributeValue`] through its serde representation.
fn decode_attributes(encoded: &Map<String, Value>) -> Result<AttributesMap, SerializeError> {
    encoded
        .iter()
        .map(|(key, value)| -> Result<_, SerializeError> {
            let value = match value {
                Value::Number(number) => AttributeValue::Text(number.to_string()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(SerializeError::schema(
                        format!("{ATTRIBUTES}.{key}"),
                        format!("must be a string, bool or null, got {}", type_name(value)),
                    ));
                }
                Value::Null | Value::Bool(_) | Value::String(_) => {
                    AttributeValue::deserialize(value)?
                }
            };
            Ok((key.clone(), value))
        })
        .collect()
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
