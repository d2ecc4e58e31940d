//! Normalization behavior across the public API.

use garavel_support::{
    arr, array, text, Array, NormalizeConfig, Normalizer, PipeDetection, Value,
};
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|i| Value::Int(i.into())),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
        Just(Value::from("true")),
        Just(Value::from("false")),
        "[a-c0-9,|. eE+-]{0,8}".prop_map(Value::from),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 32, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(Value::from)
    })
}

fn assert_fully_typed(arr: &Array, pipes: PipeDetection) {
    for value in arr.values() {
        match value {
            Value::Array(inner) => assert_fully_typed(inner, pipes),
            Value::Str(s) => {
                assert!(!text::is_numeric(s), "numeric string survived: {s:?}");
                assert!(!text::is_boolable(value), "boolean string survived: {s:?}");
                assert!(
                    !text::is_arrayable_with(s, pipes),
                    "list string survived: {s:?}"
                );
            }
            Value::Int(i) => panic!("integer survived: {i}"),
            _ => {}
        }
    }
}

proptest! {
    /// Normalizing twice gives the same result as normalizing once.
    #[test]
    fn normalize_is_idempotent(values in prop::collection::vec(tree(), 0..8)) {
        let once = arr::normalize(Array::from(values));
        let twice = arr::normalize(once.clone());
        prop_assert_eq!(twice, once);
    }

    /// Same property under the strict pipe rule.
    #[test]
    fn strict_normalize_is_idempotent(values in prop::collection::vec(tree(), 0..8)) {
        let normalizer = Normalizer::new(
            NormalizeConfig::new().with_pipe_detection(PipeDetection::Strict),
        );
        let once = normalizer.normalize(Array::from(values));
        prop_assert_eq!(normalizer.normalize(once.clone()), once);
    }

    /// No numeric, boolean or list-shaped string is left behind.
    #[test]
    fn normalize_leaves_no_loose_strings(values in prop::collection::vec(tree(), 0..8)) {
        let normalized = arr::normalize(Array::from(values));
        assert_fully_typed(&normalized, PipeDetection::Legacy);
    }

    /// Keys and entry count of the top level are untouched.
    #[test]
    fn normalize_keeps_keys(values in prop::collection::vec(tree(), 0..8)) {
        let input = Array::from(values);
        let keys: Vec<_> = input.keys().cloned().collect();
        let normalized = arr::normalize(input);
        prop_assert_eq!(normalized.keys().cloned().collect::<Vec<_>>(), keys);
    }
}

#[test]
fn test_query_style_input() {
    let input = array! {
        "page" => "3",
        "per_page" => "25",
        "sort" => "name|created_at",
        "ids" => "1,2,3",
        "archived" => "false",
        "q" => "hello world",
    };

    let normalized = arr::normalize(input);

    assert_eq!(normalized.get(&"page".into()), Some(&Value::Float(3.0)));
    assert_eq!(normalized.get(&"per_page".into()), Some(&Value::Float(25.0)));
    assert_eq!(
        normalized.get(&"sort".into()),
        Some(&Value::from(array!["name", "created_at"]))
    );
    assert_eq!(
        normalized.get(&"ids".into()),
        Some(&Value::from(array![1.0, 2.0, 3.0]))
    );
    assert_eq!(normalized.get(&"archived".into()), Some(&Value::Bool(false)));
    assert_eq!(normalized.get(&"q".into()), Some(&Value::from("hello world")));
}

#[test]
fn test_flatten_after_normalize() {
    let normalized = arr::normalize(array!["a,b", "c|d", "e"]);
    assert_eq!(arr::flat(&normalized), array!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_clean_then_join() {
    let values = array!["api", "", "0", "v1", Value::Null, "users"];
    assert_eq!(arr::join(&arr::clean(&values), "/"), "api/v1/users");
}

#[test]
fn test_normalize_from_json_input() {
    let json = serde_json::json!({
        "limit": "10",
        "flags": { "verbose": "true", "levels": "1|2" },
        "name": "x"
    });

    let Value::Array(input) = Value::from(json) else {
        panic!("objects convert to arrays");
    };

    let normalized = Value::from(arr::normalize(input));
    assert_eq!(
        normalized.to_json(),
        serde_json::json!({
            "limit": 10.0,
            "flags": { "verbose": true, "levels": [1.0, 2.0] },
            "name": "x"
        })
    );
}
