use dynajson_core::{serialize, serialize_into, Element, Value};
use serde_json::json;

fn ser(json: serde_json::Value) -> String {
    serialize(&Value::from(json))
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn scalars_use_default_text() {
    assert_eq!(serialize(&Value::Null), "null");
    assert_eq!(serialize(&Value::Bool(true)), "true");
    assert_eq!(serialize(&Value::Bool(false)), "false");
    assert_eq!(serialize(&Value::from(42)), "42");
    assert_eq!(serialize(&Value::from(-7)), "-7");
    assert_eq!(serialize(&Value::from(3.14)), "3.14");
    assert_eq!(serialize(&Value::from(0.5)), "0.5");
}

#[test]
fn strings_escape_quote_and_backslash() {
    assert_eq!(serialize(&Value::from("plain")), r#""plain""#);
    assert_eq!(serialize(&Value::from("say \"hi\"")), r#""say \"hi\"""#);
    assert_eq!(serialize(&Value::from("C:\\dir")), r#""C:\\dir""#);
    assert_eq!(serialize(&Value::from("")), r#""""#);
}

#[test]
fn strings_keep_control_characters_raw() {
    assert_eq!(serialize(&Value::from("a\nb\tc")), "\"a\nb\tc\"");
    assert_eq!(serialize(&Value::from("caf\u{00e9}")), "\"caf\u{00e9}\"");
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn empty_containers() {
    assert_eq!(ser(json!({})), "{}");
    assert_eq!(ser(json!([])), "[]");
}

#[test]
fn array_separator_has_no_trailing_comma() {
    assert_eq!(ser(json!([1, "a", null, true])), r#"[1, "a", null, true]"#);
    assert_eq!(ser(json!([[]])), "[[]]");
}

#[test]
fn object_keys_are_sorted_and_escaped() {
    assert_eq!(
        ser(json!({"z": 1, "a\"q": 2, "m": {"n": []}})),
        r#"{"a\"q": 2, "m": {"n": []}, "z": 1}"#
    );
}

#[test]
fn nested_document() {
    let v = json!({"glossary": {"title": "example", "list": [{"id": "SGML"}, {"id": "XML"}]}});
    assert_eq!(
        ser(v),
        r#"{"glossary": {"list": [{"id": "SGML"}, {"id": "XML"}], "title": "example"}}"#
    );
}

#[test]
fn serialize_into_appends() {
    let mut out = String::from("value=");
    serialize_into(&Value::from(vec![1, 2]), &mut out);
    assert_eq!(out, "value=[1, 2]");
}

// ============================================================================
// Element display
// ============================================================================

#[test]
fn element_display_matches_free_function() {
    let root = Element::parse_str(r#"{"k": ["v", 1.25]}"#).unwrap();
    assert_eq!(root.to_string(), serialize(root.value()));
    assert_eq!(root.select_by_key("k").to_string(), r#"["v", 1.25]"#);
}

#[test]
fn value_display_matches_free_function() {
    let v = Value::from(json!({"a": [true]}));
    assert_eq!(format!("{v}"), serialize(&v));
}

#[test]
fn output_parses_back_for_plain_strings() {
    let root = Element::parse_str(r#"{"s": "q\"b\\", "n": [1, 2.5, -3], "o": {"x": null}}"#).unwrap();
    let again = Element::parse_str(&root.to_string()).unwrap();
    assert_eq!(again.value(), root.value());
}
