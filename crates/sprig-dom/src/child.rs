use serde_json::Value;

use crate::error::DomError;
use crate::node::Node;

/// Anything that can be passed where children are expected.
///
/// Lists nest to any depth and are flattened in order. Nodes become
/// children, strings are concatenated into the parent's text and
/// [`Child::Empty`] is dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// An element or fragment.
    Node(Node),
    /// A run of text.
    Text(String),
    /// A nested list of children.
    List(Vec<Child>),
    /// Nothing; skipped.
    Empty,
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Child {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<()> for Child {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl<T: Into<Self>> From<Option<T>> for Child {
    fn from(child: Option<T>) -> Self {
        child.map_or(Self::Empty, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Child {
    fn from(children: Vec<T>) -> Self {
        Self::List(children.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Child {
    fn from(children: [T; N]) -> Self {
        Self::List(children.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<Value> for Child {
    type Error = DomError;

    /// Strings, `null` and arrays of those are accepted; numbers, booleans
    /// and objects are not children.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Null => Ok(Self::Empty),
            Value::Array(items) => items
                .into_iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Bool(_) => Err(DomError::InvalidChildType("bool".to_string())),
            Value::Number(_) => Err(DomError::InvalidChildType("number".to_string())),
            Value::Object(_) => Err(DomError::InvalidChildType("object".to_string())),
        }
    }
}

/// Children split into concatenated text and nodes, in argument order.
#[derive(Debug, Default)]
pub(crate) struct Flattened {
    pub text: String,
    pub nodes: Vec<Node>,
}

impl Flattened {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.nodes.is_empty()
    }
}

/// Flatten arbitrarily nested lists without recursing on the call stack.
pub(crate) fn flatten(child: Child) -> Flattened {
    let mut flattened = Flattened::default();
    let mut pending = vec![child];
    while let Some(child) = pending.pop() {
        match child {
            Child::Node(node) => flattened.nodes.push(node),
            Child::Text(text) => flattened.text.push_str(&text),
            Child::List(items) => pending.extend(items.into_iter().rev()),
            Child::Empty => {}
        }
    }
    flattened
}
