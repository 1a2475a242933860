//! Tests for tree construction and mutation: children, attributes, search.

use sprig_common::Config;
use sprig_common::diagnostic::{DiagnosticKind, capture};
use sprig_dom::{AttributeValue, Child, DomError, NO_ATTRIBUTES, Node, children};

/// Helper to create an element with a text child.
fn element(tag: &str, text: &str) -> Node {
    Node::create(tag, text, NO_ATTRIBUTES).unwrap()
}

/// Helper to build `depth` levels of nested divs below a root div.
fn nested(depth: usize) -> Node {
    let mut node = Node::new("div").unwrap();
    for _ in 0..depth {
        let mut parent = Node::new("div").unwrap();
        let _ = parent.append(node);
        node = parent;
    }
    node
}

// ========== construction ==========

#[test]
fn test_tag_validation() {
    assert!(Node::new("div").is_ok());
    assert!(Node::new("my-widget").is_ok());
    assert!(Node::new("h1").is_ok());
    assert_eq!(Node::new("1div"), Err(DomError::InvalidTag("1div".to_string())));
    assert!(Node::new("").is_err());
    assert!(Node::new("div onclick").is_err());
    assert!(Node::new("di_v").is_err());
}

#[test]
fn test_fragment_tag_is_reserved() {
    assert_eq!(
        Node::new("fragment"),
        Err(DomError::InvalidTag("fragment".to_string()))
    );
    assert!(Node::builder("fragment").child("x").build().is_err());

    let mut node = element("div", "kept");
    assert_eq!(
        node.set_tag("fragment").err(),
        Some(DomError::InvalidTag("fragment".to_string()))
    );
    assert_eq!(node.render().unwrap(), "<div>kept</div>");

    assert!(Node::fragment(()).is_fragment());
}

#[test]
fn test_mixed_children_split_into_text_and_nodes() {
    let bold = element("b", "!");
    let div = Node::create("div", children!["Hello ", bold.clone(), "world"], NO_ATTRIBUTES)
        .unwrap();

    assert_eq!(div.text(), "Hello world");
    assert_eq!(div.children(), &[bold]);
}

#[test]
fn test_nested_lists_are_flattened_in_order() {
    let a = element("a", "1");
    let b = element("b", "2");
    let div = Node::builder("div")
        .child(vec![Child::from(vec![Child::from(a.clone()), Child::from("x")]), Child::Empty])
        .child(vec![Child::from(b.clone()), Child::from(None::<Node>), Child::from("y")])
        .build()
        .unwrap();

    assert_eq!(div.text(), "xy");
    assert_eq!(div.children(), &[a, b]);
}

#[test]
fn test_dynamic_children_reject_numbers_and_booleans() {
    let ok = Child::try_from(serde_json::json!(["a", null, ["b"]])).unwrap();
    let mut div = Node::new("div").unwrap();
    let _ = div.append(ok);
    assert_eq!(div.text(), "ab");

    assert!(matches!(
        Child::try_from(serde_json::json!(5)),
        Err(DomError::InvalidChildType(_))
    ));
    assert!(matches!(
        Child::try_from(serde_json::json!(["a", true])),
        Err(DomError::InvalidChildType(_))
    ));
}

#[test]
fn test_keyword_keys_are_normalized() {
    let node = Node::builder("label")
        .attr("cls", "field")
        .attr("for_", "email")
        .attr("data_value", "7")
        .attr("aria-label", "Email")
        .build()
        .unwrap();

    let keys: Vec<&str> = node.attributes().keys().map(String::as_str).collect();
    assert_eq!(keys, ["class_name", "for_element", "data-value", "aria-label"]);
    assert_eq!(node.classes(), ["field"]);
}

#[test]
fn test_svg_keywords_take_camel_case() {
    let svg = Node::builder("svg")
        .attr("view_box", "0 0 10 10")
        .attr("preserve_aspect_ratio", "none")
        .build()
        .unwrap();

    assert!(svg.has_attribute("viewBox"));
    assert!(svg.has_attribute("preserveAspectRatio"));
}

#[test]
fn test_generated_ids() {
    let config = Config::default().with_generate_ids(true);
    let node = Node::builder("div").config(config).build().unwrap();
    let id = node.id().unwrap();
    assert!(id.starts_with("el-"));
    assert_eq!(id.len(), 9);

    let kept = Node::builder("div").attr("id", "main").config(config).build().unwrap();
    assert_eq!(kept.id(), Some("main"));

    assert_eq!(Node::new("div").unwrap().id(), None);
}

#[test]
fn test_self_closing_content_is_reported() {
    let (img, diagnostics) = capture(|| {
        Node::builder("img").self_closing(true).child("caption").build().unwrap()
    });
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::SelfClosingContent);
    assert_eq!(diagnostics[0].tag.as_deref(), Some("img"));
    assert_eq!(img.text(), "caption");

    let mut br = Node::builder("br").self_closing(true).build().unwrap();
    let ((), diagnostics) = capture(|| {
        let _ = br.append(element("span", "x"));
    });
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(br.count_children(), 1);

    let ((), diagnostics) = capture(|| {
        let _ = br.append(Child::Empty);
    });
    assert!(diagnostics.is_empty());
}

// ========== children ==========

#[test]
fn test_append_and_prepend() {
    let mut div = Node::create("div", children!["world", element("p", "2")], NO_ATTRIBUTES)
        .unwrap();
    let _ = div.prepend(children!["Hello ", element("p", "1")]);
    let _ = div.append(children!["!", element("p", "3")]);

    assert_eq!(div.text(), "Hello world!");
    let texts: Vec<&str> = div.children().iter().map(Node::text).collect();
    assert_eq!(texts, ["1", "2", "3"]);
}

#[test]
fn test_clear_pop_first_last() {
    let mut ul = Node::create(
        "ul",
        vec![element("li", "a"), element("li", "b"), element("li", "c")],
        NO_ATTRIBUTES,
    )
    .unwrap();

    assert_eq!(ul.first().map(Node::text), Some("a"));
    assert_eq!(ul.last().map(Node::text), Some("c"));
    assert_eq!(ul.pop(1).map(|li| li.text().to_string()), Some("b".to_string()));
    assert_eq!(ul.pop(7), None);
    assert_eq!(ul.count_children(), 2);

    let _ = ul.set_text("items");
    let _ = ul.clear();
    assert_eq!(ul.count_children(), 0);
    assert_eq!(ul.first(), None);
    assert_eq!(ul.text(), "items");
}

#[test]
fn test_remove_all_only_touches_direct_children() {
    let inner = Node::create("div", element("p", "deep"), NO_ATTRIBUTES).unwrap();
    let mut outer = Node::create(
        "div",
        vec![element("p", "one"), inner, element("p", "two")],
        NO_ATTRIBUTES,
    )
    .unwrap();

    let _ = outer.remove_all(|child| child.tag() == "p");

    assert_eq!(outer.count_children(), 1);
    assert_eq!(outer.children()[0].children()[0].text(), "deep");
}

#[test]
fn test_replace_child() {
    let mut div = Node::create("div", vec![element("p", "old")], NO_ATTRIBUTES).unwrap();
    let old = div.replace_child(0, element("span", "new"));
    assert_eq!(old.map(|node| node.tag().to_string()), Some("p".to_string()));
    assert_eq!(div.children()[0].tag(), "span");
    assert_eq!(div.replace_child(3, element("span", "x")), None);
}

#[test]
fn test_clone_is_deep() {
    let original = Node::create("div", element("p", "a"), [("id", "x")]).unwrap();
    let mut copy = original.clone();
    let _ = copy.children_mut()[0].set_text("b");
    let _ = copy.add_attribute("id", "y");

    assert_eq!(original.children()[0].text(), "a");
    assert_eq!(original.id(), Some("x"));
    assert_ne!(original, copy);
}

#[test]
fn test_scope_returns_the_built_node() {
    let list = Node::new("ul").unwrap().scope(|ul| {
        for item in ["one", "two"] {
            let _ = ul.append(element("li", item));
        }
    });
    assert_eq!(list.count_children(), 2);
}

#[test]
fn test_set_tag_validates() {
    let mut node = Node::new("div").unwrap();
    assert!(node.set_tag("section").is_ok());
    assert!(node.set_tag("9").is_err());
    assert_eq!(node.tag(), "section");
}

// ========== attributes ==========

#[test]
fn test_class_spellings_coalesce() {
    let mut node = Node::builder("div").attr("class_name", "a").build().unwrap();
    let _ = node.add_attribute("class", "b");
    assert_eq!(node.attributes().len(), 1);
    assert_eq!(node.get_attribute("class_name"), Some(&AttributeValue::from("b")));

    let mut raw = Node::new("div").unwrap();
    let mut attributes = sprig_dom::AttributesMap::new();
    let _ = attributes.insert("class".to_string(), "x".into());
    let _ = attributes.insert("id".to_string(), "main".into());
    let _ = raw.set_attributes(attributes);
    let _ = raw.add_attribute("class_name", "y");

    assert!(!raw.has_attribute("class"));
    let keys: Vec<&str> = raw.attributes().keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "class_name"]);
}

#[test]
fn test_get_attributes() {
    let node = Node::create("a", "", [("href", "/"), ("id", "home")]).unwrap();

    let picked = node.get_attributes(&["id", "title"]);
    assert_eq!(picked.get("id"), Some(&AttributeValue::from("home")));
    assert_eq!(picked.get("title"), Some(&AttributeValue::Null));

    assert_eq!(node.get_attributes(&[]), *node.attributes());
}

#[test]
fn test_remove_attribute_keeps_order() {
    let mut node = Node::create("a", "", [("a", "1"), ("b", "2"), ("c", "3")]).unwrap();
    let _ = node.remove_attribute("b").remove_attribute("missing");
    let keys: Vec<&str> = node.attributes().keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "c"]);
}

// ========== filter / find ==========

#[test]
fn test_filter_is_pre_order() {
    let tree = Node::create(
        "div",
        vec![
            Node::create("section", vec![element("p", "1"), element("p", "2")], NO_ATTRIBUTES)
                .unwrap(),
            element("p", "3"),
        ],
        NO_ATTRIBUTES,
    )
    .unwrap();

    let direct: Vec<&str> = tree
        .filter(|node| node.tag() == "p", false, 1000)
        .map(|found| found.unwrap().text())
        .collect();
    assert_eq!(direct, ["3"]);

    let all: Vec<&str> = tree
        .filter(|_| true, true, 1000)
        .map(|found| found.unwrap().tag())
        .collect();
    assert_eq!(all, ["section", "p", "p", "p"]);
}

#[test]
fn test_filter_depth_ceiling() {
    let tree = nested(3);

    let results: Vec<_> = tree.filter(|_| true, true, 1).collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert_eq!(
        results[2],
        Err(DomError::DepthExceeded {
            operation: "filter",
            limit: 1
        })
    );

    assert_eq!(tree.filter(|_| true, true, 1000).count(), 3);
}

#[test]
fn test_find_by_attribute() {
    let tree = Node::create(
        "div",
        vec![
            Node::create("p", "", [("data_role", "intro")]).unwrap(),
            Node::create("p", "", [("data_role", "body")]).unwrap(),
        ],
        [("data_role", "page")],
    )
    .unwrap();

    let found = tree
        .find_by_attribute("data-role", &AttributeValue::from("body"), 1000)
        .unwrap();
    assert_eq!(found.map(Node::tag), Some("p"));

    let itself = tree
        .find_by_attribute("data-role", &AttributeValue::from("page"), 1000)
        .unwrap();
    assert_eq!(itself.map(Node::tag), Some("div"));

    assert_eq!(
        tree.find_by_attribute("data-role", &AttributeValue::from("none"), 1000),
        Ok(None)
    );
}

#[test]
fn test_find_by_attribute_depth_ceiling() {
    let tree = nested(50);
    let missing = AttributeValue::from("x");
    assert_eq!(tree.find_by_attribute("id", &missing, 1000), Ok(None));
    assert!(matches!(
        tree.find_by_attribute("id", &missing, 10),
        Err(DomError::DepthExceeded { .. })
    ));
}
