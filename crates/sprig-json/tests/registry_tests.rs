//! Tests for tag registration and type-preserving decoding.

use std::sync::atomic::{AtomicUsize, Ordering};

use sprig_dom::tags::{DOCUMENT_TAG, FRAGMENT_TAG};
use sprig_dom::{DomError, LifecycleHooks, NO_ATTRIBUTES, Node};
use sprig_json::{RegistryError, Serializer, TagFactory, TagRegistry};

static SIDEBAR_HOOKS: LifecycleHooks = LifecycleHooks::NONE;

fn sidebar() -> Result<Node, DomError> {
    Node::builder("aside")
        .prefix("<!-- sidebar -->")
        .hooks(&SIDEBAR_HOOKS)
        .attr("role", "complementary")
        .build()
}

/// A tag type that cannot be built without knowing its tag.
struct CustomElement;

static TAGGED_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

impl TagFactory for CustomElement {
    fn construct(&self) -> Result<Node, DomError> {
        Err(DomError::Construction {
            tag: "custom element".to_string(),
            reason: "a tag is required".to_string(),
        })
    }

    fn construct_tagged(&self, tag: &str, self_closing: bool) -> Result<Node, DomError> {
        let _ = TAGGED_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        Node::builder(tag)
            .self_closing(self_closing)
            .prefix(format!("<!-- {tag} -->"))
            .build()
    }
}

fn assert_shareable<T: Send + Sync>() {}

// ========== registration ==========

#[test]
fn test_register_and_lookup() {
    let mut registry = TagRegistry::new();
    assert!(registry.is_empty());

    let _ = registry
        .register("aside", sidebar)
        .unwrap()
        .register("x-card", CustomElement)
        .unwrap();

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("aside"));
    assert!(!registry.contains("div"));
    assert_eq!(registry.tags().collect::<Vec<_>>(), ["aside", "x-card"]);
    assert!(registry.get("x-card").is_some());
    assert!(format!("{registry:?}").contains("x-card"));
}

#[test]
fn test_registry_is_append_only() {
    let mut registry = TagRegistry::new();
    let _ = registry.register("aside", sidebar).unwrap();
    assert_eq!(
        registry.register("aside", || Node::new("aside")).unwrap_err(),
        RegistryError::Duplicate("aside".to_string())
    );
}

#[test]
fn test_reserved_and_invalid_tags_are_rejected() {
    let mut registry = TagRegistry::new();
    assert_eq!(
        registry
            .register(FRAGMENT_TAG, || Ok::<_, DomError>(Node::fragment(())))
            .unwrap_err(),
        RegistryError::Reserved("fragment".to_string())
    );
    assert_eq!(
        registry.register("2col", || Node::new("div")).unwrap_err(),
        RegistryError::InvalidTag("2col".to_string())
    );
    assert!(registry.is_empty());
}

#[test]
fn test_builtin_tags() {
    let registry = TagRegistry::with_builtin_tags();
    assert_eq!(registry.tags().collect::<Vec<_>>(), [DOCUMENT_TAG]);
    let document = registry.get(DOCUMENT_TAG).unwrap().construct().unwrap();
    assert_eq!(document.prefix(), Some("<!DOCTYPE html>"));
}

#[test]
fn test_registry_can_be_shared_between_threads() {
    assert_shareable::<TagRegistry>();
    assert_shareable::<Serializer<'static>>();
}

// ========== decoding through the registry ==========

#[test]
fn test_registered_tag_is_rebuilt_by_its_factory() {
    let mut registry = TagRegistry::new();
    let _ = registry.register("aside", sidebar).unwrap();

    let original = sidebar().unwrap();
    let serializer = registry.serializer();
    let decoded = serializer
        .from_json(&serializer.to_json(&original, None).unwrap())
        .unwrap();

    assert_eq!(decoded.prefix(), Some("<!-- sidebar -->"));
    assert!(decoded.hooks().is_some());
    assert_eq!(decoded.render().unwrap(), original.render().unwrap());

    let generic = Serializer::new()
        .from_dict(&serializer.to_dict(&original).unwrap())
        .unwrap();
    assert_eq!(generic.prefix(), None);
    assert!(generic.hooks().is_none());
}

#[test]
fn test_stored_attributes_replace_constructed_ones() {
    let mut registry = TagRegistry::new();
    let _ = registry.register("aside", sidebar).unwrap();

    let encoded = serde_json::json!({
        "tag": "aside",
        "attributes": {"id": "nav"},
        "text": "links"
    });
    let decoded = registry.serializer().from_dict(&encoded).unwrap();
    assert_eq!(
        decoded.render().unwrap(),
        r#"<!-- sidebar --><aside id="nav">links</aside>"#
    );
}

#[test]
fn test_failed_construction_retries_with_tag() {
    let mut registry = TagRegistry::new();
    let _ = registry.register("x-card", CustomElement).unwrap();

    let encoded = serde_json::json!({"tag": "x-card", "self_closing": true});
    let before = TAGGED_CONSTRUCTIONS.load(Ordering::SeqCst);
    let decoded = registry.serializer().from_dict(&encoded).unwrap();

    assert!(TAGGED_CONSTRUCTIONS.load(Ordering::SeqCst) > before);
    assert_eq!(decoded.tag(), "x-card");
    assert_eq!(decoded.render().unwrap(), "<!-- x-card --><x-card />");
}

#[test]
fn test_unregistered_tags_fall_back_to_plain_elements() {
    let registry = TagRegistry::with_builtin_tags();
    let section = Node::create(
        "section",
        Node::create("p", "body", NO_ATTRIBUTES).unwrap(),
        [("data_role", "main")],
    )
    .unwrap();

    let serializer = registry.serializer();
    let decoded = serializer
        .from_dict(&serializer.to_dict(&section).unwrap())
        .unwrap();
    assert_eq!(decoded, section);
}

#[test]
fn test_fragment_tag_always_decodes_to_fragment() {
    let decoded = Serializer::new()
        .from_dict(&serde_json::json!({"tag": "fragment", "text": "a", "children": [{"tag": "b"}]}))
        .unwrap();
    assert!(decoded.is_fragment());
    assert_eq!(decoded.render().unwrap(), "a<b></b>");
}
