use crate::attributes::AttributeValue;
use crate::child::Child;
use crate::error::DomError;
use crate::node::Node;

/// Tag recorded for fragments; reserved in encoded trees.
pub const FRAGMENT_TAG: &str = "fragment";

/// Tag of the document root.
pub const DOCUMENT_TAG: &str = "html";

/// Prefix written before a document root.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Elements that never have content or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Returns true if `tag` is a void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// A document root: `<!DOCTYPE html><html lang="en" dir="ltr">...</html>`.
///
/// `lang` and `dir` may be overridden through `attributes`; they keep their
/// leading position either way.
///
/// # Errors
///
/// Never fails for the built-in tag; the `Result` matches the other
/// constructors so document types can be registered like any other.
pub fn document<K, V>(
    children: impl Into<Child>,
    attributes: impl IntoIterator<Item = (K, V)>,
) -> Result<Node, DomError>
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    Node::builder(DOCUMENT_TAG)
        .attr("lang", "en")
        .attr("dir", "ltr")
        .attrs(attributes)
        .child(children)
        .prefix(DOCTYPE)
        .build()
}
