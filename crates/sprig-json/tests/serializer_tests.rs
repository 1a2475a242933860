//! Tests for the dict/JSON encoding: shape, round trips, validation, depth.

use serde_json::{Value, json};
use sprig_dom::tags::document;
use sprig_dom::{AttributeValue, DomError, NO_ATTRIBUTES, Node, children};
use sprig_json::{SerializeError, Serializer, TagRegistry};

fn nested(depth: usize) -> Node {
    let mut node = Node::new("div").unwrap();
    for _ in 0..depth {
        let mut parent = Node::new("div").unwrap();
        let _ = parent.append(node);
        node = parent;
    }
    node
}

fn sample_tree() -> Node {
    let mut card = Node::builder("article")
        .attr("cls", "card")
        .attr("data_id", "42")
        .child("Intro ")
        .child(Node::create("h2", "Title & more", [("id", "title")]).unwrap())
        .child("text")
        .child(
            Node::builder("input")
                .self_closing(true)
                .attr("type", "checkbox")
                .attr("checked", true)
                .attr("disabled", false)
                .attr("required", "false")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let _ = card.add_style("color", "red").unwrap();
    let _ = card.add_style("margin", "0 auto").unwrap();
    card
}

/// Helper to decode `value` and return the field named by the schema error
fn violated_field(value: &Value) -> String {
    match Serializer::new().from_dict(value) {
        Err(SerializeError::SchemaViolation { field, .. }) => field,
        other => panic!("expected a schema violation, got {other:?}"),
    }
}

fn round_trip(node: &Node, serializer: Serializer<'_>) -> Node {
    let json = serializer.to_json(node, None).unwrap();
    serializer.from_json(&json).unwrap()
}

// ========== encoding ==========

#[test]
fn test_dict_shape() {
    let link = Node::create("a", "Home", [("href", "/"), ("target", "_blank")]).unwrap();
    assert_eq!(
        Serializer::new().to_dict(&link).unwrap(),
        json!({
            "tag": "a",
            "self_closing": false,
            "attributes": {"href": "/", "target": "_blank"},
            "text": "Home",
            "children": []
        })
    );
}

#[test]
fn test_key_order_is_preserved() {
    let json = Serializer::new().to_json(&sample_tree(), None).unwrap();
    assert!(json.starts_with(
        r#"{"tag":"article","self_closing":false,"attributes":{"class_name":"card","data-id":"42","style":"color: red; margin: 0 auto"},"text":"Intro text","children":["#
    ));
}

#[test]
fn test_attribute_value_encoding() {
    let input = Node::builder("input")
        .self_closing(true)
        .attr("checked", true)
        .attr("disabled", false)
        .attr("value", "false")
        .attr("placeholder", AttributeValue::Null)
        .build()
        .unwrap();
    let dict = Serializer::new().to_dict(&input).unwrap();
    assert_eq!(
        dict["attributes"],
        json!({"checked": true, "disabled": false, "value": "false", "placeholder": null})
    );
    assert_eq!(dict["self_closing"], json!(true));
}

#[test]
fn test_attribute_values_share_their_serde_form() {
    let values = [
        AttributeValue::Bool(true),
        AttributeValue::Text("false".to_string()),
        AttributeValue::Null,
    ];
    let input = Node::builder("input")
        .attrs(["a", "b", "c"].into_iter().zip(values.clone()))
        .build()
        .unwrap();
    let dict = Serializer::new().to_dict(&input).unwrap();

    for (key, value) in ["a", "b", "c"].into_iter().zip(&values) {
        assert_eq!(dict["attributes"][key], serde_json::to_value(value).unwrap());
        assert_eq!(
            &serde_json::from_value::<AttributeValue>(dict["attributes"][key].clone()).unwrap(),
            value
        );
    }
}

#[test]
fn test_pretty_json_indentation() {
    let br = Node::builder("br").self_closing(true).build().unwrap();
    assert_eq!(
        Serializer::new().to_json(&br, Some(2)).unwrap(),
        "{\n  \"tag\": \"br\",\n  \"self_closing\": true,\n  \"attributes\": {},\n  \"text\": \"\",\n  \"children\": []\n}"
    );
    assert!(
        Serializer::new()
            .to_json(&br, Some(4))
            .unwrap()
            .contains("\n    \"tag\": \"br\"")
    );
}

// ========== round trips ==========

#[test]
fn test_round_trip_renders_identically() {
    let tree = sample_tree();
    let decoded = round_trip(&tree, Serializer::new());
    assert_eq!(decoded.render().unwrap(), tree.render().unwrap());
    assert_eq!(decoded.render_pretty().unwrap(), tree.render_pretty().unwrap());
    assert_eq!(decoded, tree);
}

#[test]
fn test_round_trip_keeps_boolean_attribute_semantics() {
    let decoded = round_trip(&sample_tree(), Serializer::new());
    let input = &decoded.children()[1];
    assert_eq!(
        input.render().unwrap(),
        r#"<input type="checkbox" checked required="false" />"#
    );
    assert_eq!(input.get_attribute("disabled"), Some(&AttributeValue::Bool(false)));
}

#[test]
fn test_round_trip_fragment() {
    let fragment = Node::fragment(children![
        "lead ",
        Node::create("p", "one", NO_ATTRIBUTES).unwrap(),
        Node::create("p", "two", NO_ATTRIBUTES).unwrap(),
    ]);
    let decoded = round_trip(&fragment, Serializer::new());
    assert!(decoded.is_fragment());
    assert_eq!(decoded.render().unwrap(), "lead <p>one</p><p>two</p>");
    assert_eq!(decoded.render_pretty().unwrap(), fragment.render_pretty().unwrap());
}

#[test]
fn test_round_trip_keeps_styles_editable() {
    let mut decoded = round_trip(&sample_tree(), Serializer::new());
    assert_eq!(decoded.get_style("margin"), Some("0 auto"));
    let _ = decoded.add_style("color", "blue").unwrap();
    assert_eq!(
        decoded.get_attribute("style").and_then(AttributeValue::as_str),
        Some("color: blue; margin: 0 auto")
    );
}

#[test]
fn test_self_closing_content_survives_but_is_not_rendered() {
    let mut img = Node::builder("img").self_closing(true).build().unwrap();
    let _ = img.set_text("hidden");
    let decoded = round_trip(&img, Serializer::new());
    assert_eq!(decoded.text(), "hidden");
    assert_eq!(decoded.render().unwrap(), "<img />");
}

#[test]
fn test_document_needs_registry_for_its_prefix() {
    let page = document(Node::create("body", "hi", NO_ATTRIBUTES).unwrap(), NO_ATTRIBUTES).unwrap();
    let expected = page.render().unwrap();
    assert!(expected.starts_with("<!DOCTYPE html><html"));

    let registry = TagRegistry::with_builtin_tags();
    let decoded = round_trip(&page, registry.serializer());
    assert_eq!(decoded.render().unwrap(), expected);

    let plain = round_trip(&page, Serializer::new());
    assert_eq!(plain.prefix(), None);
    assert_eq!(
        plain.render().unwrap(),
        r#"<html lang="en" dir="ltr"><body>hi</body></html>"#
    );
}

// ========== validation ==========

#[test]
fn test_defaults_for_missing_fields() {
    let node = Serializer::new().from_dict(&json!({"tag": "hr"})).unwrap();
    assert_eq!(node.tag(), "hr");
    assert!(!node.is_self_closing());
    assert!(node.attributes().is_empty());
    assert_eq!(node.text(), "");
    assert_eq!(node.count_children(), 0);

    let node = Serializer::new()
        .from_dict(&json!({"tag": "p", "text": null}))
        .unwrap();
    assert_eq!(node.text(), "");
}

#[test]
fn test_numbers_are_stored_as_text() {
    let cell = Serializer::new()
        .from_dict(&json!({"tag": "td", "attributes": {"colspan": 2, "width": 1.5}}))
        .unwrap();
    assert_eq!(cell.render().unwrap(), r#"<td colspan="2" width="1.5"></td>"#);
}

#[test]
fn test_schema_violations_name_the_field() {
    assert_eq!(violated_field(&json!({"text": "x"})), "tag");
    assert_eq!(violated_field(&json!({"tag": 5})), "tag");
    assert_eq!(violated_field(&json!({"tag": "p", "self_closing": "yes"})), "self_closing");
    assert_eq!(violated_field(&json!({"tag": "p", "attributes": []})), "attributes");
    assert_eq!(
        violated_field(&json!({"tag": "p", "attributes": {"data_x": [1]}})),
        "attributes.data_x"
    );
    assert_eq!(violated_field(&json!({"tag": "p", "text": 3})), "text");
    assert_eq!(violated_field(&json!({"tag": "p", "children": {}})), "children");
    assert_eq!(violated_field(&json!({"tag": "p", "children": ["x"]})), "node");
    assert_eq!(violated_field(&json!("div")), "node");
}

#[test]
fn test_error_deep_in_the_tree_fails_the_whole_decode() {
    let value = json!({
        "tag": "ul",
        "children": [
            {"tag": "li", "text": "ok"},
            {"tag": "li", "children": [{"tag": "b", "self_closing": 1}]}
        ]
    });
    let error = Serializer::new().from_dict(&value).unwrap_err();
    assert!(error.to_string().contains("'self_closing' must be a bool, got number"));
}

#[test]
fn test_invalid_tag_name() {
    assert!(matches!(
        Serializer::new().from_dict(&json!({"tag": "my tag"})),
        Err(SerializeError::Dom(DomError::InvalidTag(tag))) if tag == "my tag"
    ));
}

#[test]
fn test_malformed_json() {
    let result = Serializer::new().from_json(r#"{"tag": "div""#);
    assert!(matches!(result, Err(SerializeError::InvalidJson(_))));
    assert!(
        result
            .unwrap_err()
            .to_string()
            .starts_with("invalid JSON string: ")
    );
}

// ========== depth ceiling ==========

#[test]
fn test_encode_depth_ceiling() {
    let tree = nested(50);
    assert!(Serializer::new().to_dict(&tree).is_ok());
    assert!(matches!(
        Serializer::new().with_max_depth(10).to_dict(&tree),
        Err(SerializeError::Dom(DomError::DepthExceeded {
            operation: "to_dict",
            limit: 10
        }))
    ));
}

#[test]
fn test_decode_depth_ceiling() {
    let encoded = Serializer::new().to_dict(&nested(50)).unwrap();
    assert_eq!(
        Serializer::new().from_dict(&encoded).unwrap(),
        nested(50)
    );
    assert!(matches!(
        Serializer::new().with_max_depth(10).from_dict(&encoded),
        Err(SerializeError::Dom(DomError::DepthExceeded {
            operation: "from_dict",
            limit: 10
        }))
    ));
}
