#![allow(dead_code)]

use serde_json::{json, Map, Value};

/// A base document, an override document, and the expected results of
/// merging them in both directions.
pub struct MergeCase {
    pub first: Map<String, Value>,
    pub second: Map<String, Value>,
    pub first_then_second: Map<String, Value>,
    pub second_then_first: Map<String, Value>,
}

pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be a JSON object, got {other}"),
    }
}

/// Flat documents: deep merge behaves like a plain merge.
pub fn flat_case() -> MergeCase {
    MergeCase {
        first: object(json!({"3": 2, "test": 1, "toto": "titi", "foo": "bar"})),
        second: object(json!({"3": "42", "test": 2, "toto": "titi", "fooz": "barz"})),
        first_then_second: object(json!({
            "3": "42", "test": 2, "toto": "titi", "foo": "bar", "fooz": "barz"
        })),
        second_then_first: object(json!({
            "3": 2, "test": 1, "toto": "titi", "fooz": "barz", "foo": "bar"
        })),
    }
}

/// Documents holding one level of nested tables.
pub fn nested_case() -> MergeCase {
    MergeCase {
        first: object(json!({
            "3": 2, "test": 1, "toto": "titi", "foo": "bar",
            "sub 1": {"3": 2, "test": 1, "toto": "titi", "foo": "bar"},
            "sub 2": {"hello": "world"},
        })),
        second: object(json!({
            "3": "42", "test": 2, "toto": "titi", "fooz": "barz",
            "sub 1": {"3": "42", "test": 2, "toto": "titi", "fooz": "barz"},
            "sub 3": {"hello": "world"},
        })),
        first_then_second: object(json!({
            "3": "42", "test": 2, "toto": "titi", "foo": "bar", "fooz": "barz",
            "sub 1": {"3": "42", "test": 2, "toto": "titi", "foo": "bar", "fooz": "barz"},
            "sub 2": {"hello": "world"},
            "sub 3": {"hello": "world"},
        })),
        second_then_first: object(json!({
            "3": 2, "test": 1, "toto": "titi", "fooz": "barz", "foo": "bar",
            "sub 1": {"3": 2, "test": 1, "toto": "titi", "fooz": "barz", "foo": "bar"},
            "sub 3": {"hello": "world"},
            "sub 2": {"hello": "world"},
        })),
    }
}

/// Documents holding tables inside tables.
pub fn doubly_nested_case() -> MergeCase {
    MergeCase {
        first: object(json!({
            "3": 2, "test": 1, "toto": "titi", "foo": "bar",
            "sub 1": {
                "3": 2, "test": 1, "toto": "titi", "foo": "bar",
                "sub sub 1": {"3": "42", "test": 2, "toto": "titi", "fooz": "barz"},
            },
            "sub 2": {"hello": "world"},
        })),
        second: object(json!({
            "3": "42", "test": 2, "toto": "titi", "fooz": "barz",
            "sub 1": {
                "3": "42", "test": 2, "toto": "titi", "fooz": "barz",
                "sub sub 1": {"3": 2, "test": 1, "toto": "titi", "foo": "bar"},
            },
            "sub 2": {"hello": "worldy"},
        })),
        first_then_second: object(json!({
            "3": "42", "test": 2, "toto": "titi", "foo": "bar", "fooz": "barz",
            "sub 1": {
                "3": "42", "test": 2, "toto": "titi", "foo": "bar", "fooz": "barz",
                "sub sub 1": {"3": 2, "test": 1, "toto": "titi", "fooz": "barz", "foo": "bar"},
            },
            "sub 2": {"hello": "worldy"},
        })),
        second_then_first: object(json!({
            "3": 2, "test": 1, "toto": "titi", "fooz": "barz", "foo": "bar",
            "sub 1": {
                "3": 2, "test": 1, "toto": "titi", "fooz": "barz", "foo": "bar",
                "sub sub 1": {"3": "42", "test": 2, "toto": "titi", "foo": "bar", "fooz": "barz"},
            },
            "sub 2": {"hello": "world"},
        })),
    }
}

pub fn all_cases() -> Vec<(&'static str, MergeCase)> {
    vec![("flat", flat_case()), ("nested", nested_case()), ("doubly nested", doubly_nested_case())]
}
