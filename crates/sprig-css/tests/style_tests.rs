//! Integration tests for inline style parsing, formatting and sanitizing.

use quickcheck_macros::quickcheck;
use sprig_css::{StyleError, StyleMap, check_value, format_style, is_safe_value, parse_style};

/// Helper to build a map from literal pairs.
fn styles(pairs: &[(&str, &str)]) -> StyleMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

// ========== parse_style ==========

#[test]
fn test_parse_simple_declarations() {
    let parsed = parse_style("color: red; font-size: 14px");
    assert_eq!(parsed, styles(&[("color", "red"), ("font-size", "14px")]));
}

#[test]
fn test_parse_keeps_semicolon_inside_url() {
    let parsed = parse_style("background: url(data:image/png;base64,abc)");
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed["background"], "url(data:image/png;base64,abc)");
}

#[test]
fn test_parse_url_followed_by_more_declarations() {
    let parsed = parse_style("background: url(data:image/png;base64,abc); color: red");
    assert_eq!(parsed["background"], "url(data:image/png;base64,abc)");
    assert_eq!(parsed["color"], "red");
}

#[test]
fn test_parse_splits_on_first_colon_only() {
    let parsed = parse_style("background-image: url(http://example.com/a.png)");
    assert_eq!(parsed["background-image"], "url(http://example.com/a.png)");
}

#[test]
fn test_parse_drops_pieces_without_colon_and_empty_input() {
    assert!(parse_style("").is_empty());
    assert!(parse_style(";;  ;").is_empty());
    assert_eq!(parse_style("bogus; color: blue;"), styles(&[("color", "blue")]));
}

#[test]
fn test_parse_repeated_property_keeps_first_position() {
    let parsed = parse_style("color: red; margin: 0; color: blue");
    let keys: Vec<_> = parsed.keys().map(String::as_str).collect();
    assert_eq!(keys, ["color", "margin"]);
    assert_eq!(parsed["color"], "blue");
}

// ========== format_style ==========

#[test]
fn test_format_preserves_insertion_order() {
    let map = styles(&[("z-index", "2"), ("color", "red"), ("margin", "0 auto")]);
    assert_eq!(format_style(&map), "z-index: 2; color: red; margin: 0 auto");
}

#[test]
fn test_format_empty_map() {
    assert_eq!(format_style(&StyleMap::new()), "");
}

#[quickcheck]
fn prop_format_then_parse_is_identity(pairs: Vec<(String, String)>) -> bool {
    let map: StyleMap = pairs
        .into_iter()
        .filter(|(k, v)| {
            !k.is_empty()
                && k.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                && v.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .collect();
    parse_style(&format_style(&map)) == map
}

// ========== sanitizing ==========

#[test]
fn test_rejects_javascript_url() {
    assert!(!is_safe_value("url(javascript:alert(1))"));
}

#[test]
fn test_rejects_expression() {
    assert!(!is_safe_value("expression(alert(1))"));
    assert!(!is_safe_value("EXPRESSION (alert(1))"));
}

#[test]
fn test_rejects_data_url() {
    assert!(!is_safe_value("url(data:text/html,<script>)"));
    assert!(!is_safe_value("url( 'data:image/png;base64,abc')"));
}

#[test]
fn test_rejects_braces_comments_and_escapes() {
    assert!(!is_safe_value("red; } .evil { color: blue"));
    assert!(!is_safe_value("red /* injection */"));
    assert!(!is_safe_value("\\6a avascript:"));
    assert!(!is_safe_value("</style>"));
}

#[test]
fn test_allows_normal_values() {
    for value in ["red", "14px", "#007bff", "1px solid #ccc", "var(--color-primary)", "url(/img/bg.png)"] {
        assert!(is_safe_value(value), "{value} should be allowed");
    }
}

#[test]
fn test_check_value_reports_property_and_value() {
    let err = check_value("x", "url(javascript:alert(1))").unwrap_err();
    assert_eq!(
        err,
        StyleError::UnsafeValue {
            property: "x".to_string(),
            value: "url(javascript:alert(1))".to_string(),
        }
    );
    assert!(check_value("color", "red").is_ok());
}
