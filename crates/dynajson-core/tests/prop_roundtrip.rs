/// Property-based tests for the serializer and the document model.
///
/// Strategies generate JSON trees whose strings avoid control characters,
/// since the serializer writes those raw and the result would not re-parse.
/// Numbers are integers or short decimals so the `f64` text form re-parses
/// to the identical value.
use dynajson_core::{serialize, Element, Value};
use proptest::prelude::*;
use std::convert::Infallible;
use std::ops::ControlFlow;

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,10}",
        Just("".to_string()),
        Just("with space".to_string()),
        Just("q\"uote".to_string()),
        Just("back\\slash".to_string()),
    ]
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        "[a-z\"\\\\/:,\\[\\]{}]{0,12}",
        Just("caf\u{00e9}".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
        Just("".to_string()),
    ]
}

fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000i64).prop_map(|n| n as f64),
        (-100_000i64..100_000i64, 1u32..4u32)
            .prop_map(|(m, d)| m as f64 / 10f64.powi(d as i32)),
    ]
}

fn arb_scalar() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        arb_number().prop_map(|n| serde_json::json!(n)),
        arb_string().prop_map(serde_json::Value::String),
    ]
}

fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::Array),
            prop::collection::btree_map(arb_key(), inner, 0..6)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn serialize_then_parse_reconstructs_tree(json in arb_json()) {
        let value = Value::from(json);
        let text = serialize(&value);
        let back = Element::parse_str(&text).unwrap();
        prop_assert_eq!(back.value(), &value);
    }

    #[test]
    fn deep_clone_is_equal_and_detached(json in arb_json()) {
        let value = Value::from(json);
        let copy = value.deep_clone();
        prop_assert_eq!(&copy, &value);
        if let Value::Array(arr) = &value {
            arr.push(Value::from("extra"));
            prop_assert_eq!(copy.to_json().as_array().map(|a| a.len()), Some(arr.len() - 1));
        }
    }

    #[test]
    fn each_object_is_always_sorted(keys in prop::collection::vec(arb_key(), 0..12)) {
        let root = Element::new_object();
        for key in &keys {
            root.put(key, 1).unwrap();
        }
        let mut seen = Vec::new();
        root.each_object(|k, _| {
            seen.push(k.to_owned());
            Ok::<_, Infallible>(ControlFlow::Continue(()))
        }).unwrap();
        let mut expected = keys.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn delete_twice_equals_delete_once(json in arb_json(), key in arb_key()) {
        let once = Element::new(Value::from(json.clone()));
        let twice = Element::new(Value::from(json));
        if once.is_object() {
            once.delete_by_key(&key).unwrap();
            twice.delete_by_key(&key).unwrap();
            twice.delete_by_key(&key).unwrap();
            prop_assert_eq!(once.value(), twice.value());
        }
    }

    #[test]
    fn append_all_adds_in_order(json in arb_json(), extra in prop::collection::vec(arb_scalar(), 0..5)) {
        let root = Element::new(Value::from(json));
        if root.is_array() {
            let n = root.count();
            root.append_all(extra.iter().map(Value::from)).unwrap();
            prop_assert_eq!(root.count(), n + extra.len());
            let items = root.as_element_array();
            for (i, expected) in extra.iter().enumerate() {
                prop_assert_eq!(items[n + i].value(), &Value::from(expected));
            }
        }
    }
}
