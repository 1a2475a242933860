//! Integration tests for the HTML parser.

use sprig_common::Config;
use sprig_common::diagnostic::{Diagnostic, DiagnosticKind, capture};
use sprig_dom::{AttributeValue, DomError, Node};
use sprig_html::{FromHtml, HtmlParser, HtmlTokenizer, ParseError, Token, TreeBuilder};

/// Helper to parse markup and return its first root
fn parse(html: &str) -> Node {
    Node::from_html(html).unwrap().expect("no root")
}

/// Helper to parse a fragment and return the roots with the reported diagnostics
fn parse_with_issues(html: &str) -> (Vec<Node>, Vec<Diagnostic>) {
    let mut parser = HtmlParser::new();
    let (roots, _) = capture(|| parser.parse_fragment(html));
    (roots.unwrap(), parser.issues().to_vec())
}

fn render(node: &Node) -> String {
    node.render().unwrap()
}

// ========== structure ==========

#[test]
fn test_single_element() {
    let div = parse(r#"<div id="main">Hello</div>"#);
    assert_eq!(div.tag(), "div");
    assert_eq!(div.id(), Some("main"));
    assert_eq!(div.text(), "Hello");
    assert_eq!(render(&div), r#"<div id="main">Hello</div>"#);
}

#[test]
fn test_nested_elements_keep_document_order() {
    let list = parse("<ul><li>a</li><li>b</li><li>c</li></ul>");
    let items: Vec<&str> = list.children().iter().map(Node::text).collect();
    assert_eq!(items, ["a", "b", "c"]);
}

#[test]
fn test_text_around_children_is_concatenated() {
    let p = parse("<p>one <b>two</b> three</p>");
    assert_eq!(p.text(), "onethree");
    assert_eq!(p.children()[0].text(), "two");
    assert_eq!(render(&p), "<p>onethree<b>two</b></p>");
}

#[test]
fn test_parse_root_returns_first_root() {
    let first = parse("<h1>Title</h1><p>Body</p>");
    assert_eq!(first.tag(), "h1");

    let all = Node::from_html_fragment("<h1>Title</h1><p>Body</p>").unwrap();
    let tags: Vec<&str> = all.iter().map(Node::tag).collect();
    assert_eq!(tags, ["h1", "p"]);

    assert_eq!(Node::from_html("   ").unwrap(), None);
    assert!(Node::from_html_fragment("").unwrap().is_empty());
}

#[test]
fn test_uppercase_markup() {
    assert_eq!(render(&parse("<DIV CLASS=x>y</div>")), r#"<div class="x">y</div>"#);
}

// ========== fault tolerance ==========

#[test]
fn test_unclosed_element_is_closed_at_end_of_input() {
    let (roots, issues) = parse_with_issues("<div>hello");
    assert_eq!(render(&roots[0]), "<div>hello</div>");
    assert!(issues.is_empty());
}

#[test]
fn test_orphan_end_tag_is_ignored() {
    let (roots, issues) = parse_with_issues("</span>");
    assert!(roots.is_empty());
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, DiagnosticKind::UnexpectedEndTag);
    assert_eq!(issues[0].tag.as_deref(), Some("span"));
}

#[test]
fn test_mismatched_end_tag_closes_intermediate_elements() {
    let (roots, issues) = parse_with_issues("<div><p>x</div>");
    assert_eq!(render(&roots[0]), "<div><p>x</p></div>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, DiagnosticKind::MismatchedEndTag);
    assert_eq!(issues[0].component, "HTML Parser");
}

#[test]
fn test_end_tag_matching_nothing_inside_open_element() {
    let (roots, issues) = parse_with_issues("<div><p>a</span>b</p></div>");
    assert_eq!(render(&roots[0]), "<div><p>ab</p></div>");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, DiagnosticKind::UnexpectedEndTag);
}

#[test]
fn test_no_implied_end_tags() {
    let (roots, issues) = parse_with_issues("<ul><li>a<li>b");
    assert_eq!(render(&roots[0]), "<ul><li>a<li>b</li></li></ul>");
    assert!(issues.is_empty());
}

#[test]
fn test_siblings_after_recovery() {
    let (roots, _) = parse_with_issues("<section><div><p>x</section><footer>f</footer>");
    let tags: Vec<&str> = roots.iter().map(Node::tag).collect();
    assert_eq!(tags, ["section", "footer"]);
    assert_eq!(render(&roots[0]), "<section><div><p>x</p></div></section>");
}

#[test]
fn test_diagnostics_reach_capture_scopes() {
    let mut parser = HtmlParser::new();
    let (result, captured) = capture(|| parser.parse_fragment("<a><b></a></c>"));
    assert!(result.is_ok());
    assert_eq!(captured, parser.issues());
    assert_eq!(captured.len(), 2);
}

#[test]
fn test_issues_reset_between_parses() {
    let mut parser = HtmlParser::new();
    let ((), _) = capture(|| {
        let _ = parser.parse_fragment("</x>").unwrap();
    });
    assert_eq!(parser.issues().len(), 1);
    let _ = parser.parse_fragment("<p>ok</p>").unwrap();
    assert!(parser.issues().is_empty());
}

#[test]
fn test_strict_mode_fails_on_first_diagnostic() {
    let mut parser = HtmlParser::new().with_strict_mode();
    match parser.parse_fragment("<div><p>x</div>") {
        Err(ParseError::Strict(diagnostic)) => {
            assert_eq!(diagnostic.kind, DiagnosticKind::MismatchedEndTag);
        }
        other => panic!("expected strict failure, got {other:?}"),
    }

    assert!(parser.parse_fragment("<div><p>x</p></div>").is_ok());
}

// ========== attributes ==========

#[test]
fn test_class_attribute() {
    let p = parse(r#"<p class="lead intro">x</p>"#);
    assert!(p.has_attribute("class_name"));
    assert_eq!(p.classes(), ["lead", "intro"]);
    assert_eq!(render(&p), r#"<p class="lead intro">x</p>"#);
}

#[test]
fn test_attribute_order_and_hyphens() {
    let a = parse(r#"<a href="/" class="nav" data-id="1" aria-label="Home">h</a>"#);
    let keys: Vec<&str> = a.attributes().keys().map(String::as_str).collect();
    assert_eq!(keys, ["href", "class_name", "data-id", "aria-label"]);
    assert_eq!(
        render(&a),
        r#"<a href="/" class="nav" data-id="1" aria-label="Home">h</a>"#
    );
}

#[test]
fn test_svg_camel_case_attributes_survive() {
    let svg = parse(
        r#"<svg viewBox="0 0 10 10" preserveAspectRatio="none"><path stroke-width="2"/></svg>"#,
    );
    assert!(svg.has_attribute("viewBox"));
    assert!(svg.has_attribute("preserveAspectRatio"));
    assert_eq!(
        render(&svg),
        r#"<svg viewBox="0 0 10 10" preserveAspectRatio="none"><path stroke-width="2"></path></svg>"#
    );
}

#[test]
fn test_bare_attributes_are_boolean() {
    let input = parse(r#"<input type="checkbox" checked disabled="">"#);
    assert_eq!(input.get_attribute("checked"), Some(&AttributeValue::Bool(true)));
    assert_eq!(input.get_attribute("disabled"), Some(&AttributeValue::from("")));
    assert_eq!(render(&input), r#"<input type="checkbox" checked disabled />"#);
}

#[test]
fn test_attribute_collision_keeps_later_value() {
    let (roots, issues) = parse_with_issues(r#"<div data-x="1" data_x="2"></div>"#);
    let div = &roots[0];
    assert_eq!(div.attributes().len(), 1);
    assert_eq!(div.get_attribute("data-x"), Some(&AttributeValue::from("2")));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, DiagnosticKind::AttributeCollision);
    assert_eq!(issues[0].attribute.as_deref(), Some("data_x"));
    assert_eq!(issues[0].value.as_deref(), Some("2"));
    assert!(issues[0].message.contains("collides with 'data-x'"));
}

#[test]
fn test_repeated_attribute_is_a_collision() {
    let (roots, issues) = parse_with_issues(r#"<a id="1" href="/" id="2"></a>"#);
    assert_eq!(roots[0].id(), Some("2"));
    let keys: Vec<&str> = roots[0].attributes().keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "href"]);
    assert_eq!(issues[0].kind, DiagnosticKind::AttributeCollision);
}

#[test]
fn test_references_are_decoded_and_reescaped() {
    let p = parse(r#"<p title="&quot;hi&quot;">&lt;b&gt; &amp; more</p>"#);
    assert_eq!(p.text(), "<b> & more");
    assert_eq!(
        p.get_attribute("title").and_then(AttributeValue::as_str),
        Some("\"hi\"")
    );
    assert_eq!(
        render(&p),
        r#"<p title="&quot;hi&quot;">&lt;b&gt; &amp; more</p>"#
    );
}

// ========== whitespace ==========

#[test]
fn test_whitespace_is_trimmed_outside_preformatted_elements() {
    let p = parse("<p>\n   hello   world \n</p>");
    assert_eq!(p.text(), "hello   world");

    let div = parse("<div>\n  <span>x</span>\n</div>");
    assert_eq!(div.text(), "");
}

#[test]
fn test_preformatted_content_is_verbatim() {
    let div = parse("<div>  <pre>  a\n  b </pre>  </div>");
    assert_eq!(div.text(), "");
    assert_eq!(div.children()[0].text(), "  a\n  b ");

    let pre = parse("<pre><b> x </b></pre>");
    assert_eq!(pre.children()[0].text(), " x ");

    let script = parse("<script>\n  if (a < b) { go(); }\n</script>");
    assert_eq!(script.text(), "\n  if (a < b) { go(); }\n");

    let area = parse("<textarea>  &lt;typed&gt;  </textarea>");
    assert_eq!(area.text(), "  <typed>  ");
}

#[test]
fn test_stray_text_becomes_span_roots() {
    let roots = Node::from_html_fragment("hello <b>x</b> world").unwrap();
    let rendered: Vec<String> = roots.iter().map(render).collect();
    assert_eq!(rendered, ["<span>hello</span>", "<b>x</b>", "<span>world</span>"]);

    assert_eq!(render(&parse("  text only  ")), "<span>text only</span>");
    assert_eq!(Node::from_html_fragment("  <p>a</p>\n  ").unwrap().len(), 1);
}

#[test]
fn test_comments_and_doctype_are_dropped() {
    let p = parse("<!DOCTYPE html><!-- c --><p>a<!-- x -->b</p>");
    assert_eq!(p.tag(), "p");
    assert_eq!(p.text(), "ab");

    let roots = Node::from_html_fragment("a<!--x-->b").unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(render(&roots[0]), "<span>ab</span>");
}

// ========== void and self-closing tags ==========

#[test]
fn test_void_elements_are_leaves() {
    let (roots, issues) = parse_with_issues(r#"<p>a<br>b<img src="x.png"></img></p>"#);
    let p = &roots[0];
    assert_eq!(p.text(), "ab");
    assert_eq!(p.count_children(), 2);
    assert!(p.children().iter().all(Node::is_self_closing));
    assert_eq!(render(p), r#"<p>ab<br /><img src="x.png" /></p>"#);
    assert!(issues.is_empty());
}

#[test]
fn test_self_closing_syntax_on_normal_element() {
    let roots = Node::from_html_fragment("<div/><p>x</p>").unwrap();
    assert_eq!(roots.len(), 2);
    assert!(!roots[0].is_self_closing());
    assert_eq!(render(&roots[0]), "<div></div>");
}

// ========== errors ==========

#[test]
fn test_invalid_tag_name_is_an_error() {
    assert_eq!(
        Node::from_html("<my:tag>x</my:tag>"),
        Err(ParseError::Dom(DomError::InvalidTag("my:tag".to_string())))
    );
}

#[test]
fn test_bytes_must_be_utf8() {
    let mut parser = HtmlParser::new();
    assert!(matches!(
        parser.parse_fragment([0x3c, 0x70, 0x3e, 0xff, 0xfe].as_slice()),
        Err(ParseError::InvalidArgument(_))
    ));

    let p = parser.parse_root(b"<p>ok</p>".as_slice()).unwrap().unwrap();
    assert_eq!(p.text(), "ok");
}

// ========== configuration ==========

#[test]
fn test_generated_ids_for_parsed_nodes() {
    let mut parser = HtmlParser::new().with_config(Config::default().with_generate_ids(true));
    let div = parser.parse_root(r#"<div><p id="keep">x</p></div>"#).unwrap().unwrap();
    assert!(div.id().is_some_and(|id| id.starts_with("el-")));
    assert_eq!(div.children()[0].id(), Some("keep"));
}

#[test]
fn test_tree_builder_closes_without_eof_token() {
    let mut tokenizer = HtmlTokenizer::new("<div><p>x".to_string());
    tokenizer.run();
    let mut tokens = tokenizer.into_tokens();
    assert_eq!(tokens.pop(), Some(Token::EndOfFile));

    let roots = TreeBuilder::new(tokens).run().unwrap();
    assert_eq!(render(&roots[0]), "<div><p>x</p></div>");
}

#[test]
fn test_rendered_tree_parses_back_to_same_markup() {
    let original = Node::builder("article")
        .attr("cls", "post")
        .attr("data_id", "7")
        .child(Node::create("h2", "Title", [("id", "t")]).unwrap())
        .child(
            Node::builder("input")
                .self_closing(true)
                .attr("disabled", true)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let html = render(&original);
    assert_eq!(render(&parse(&html)), html);
}
