use deep_merge::{deep_merge, deep_merge_in_place};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Straightforward recursive statement of the merge rules, used as an oracle.
fn reference_merge(source: &mut Map<String, Value>, specialized: &Map<String, Value>) {
    for (key, value) in specialized {
        if let (Some(Value::Object(existing)), Value::Object(nested)) = (source.get_mut(key), value) {
            reference_merge(existing, nested);
            continue;
        }
        if source.get(key) != Some(value) {
            source.insert(key.clone(), value.clone());
        }
    }
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::btree_map("[a-e]", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn arb_document(keys: &'static str) -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(keys, arb_value(), 0..6).prop_map(|entries| entries.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_identity(a in arb_document("[a-e]")) {
            prop_assert_eq!(deep_merge(&a, &a), a);
        }

        #[test]
        fn prop_matches_recursive_definition(a in arb_document("[a-e]"), b in arb_document("[a-e]")) {
            let mut expected = a.clone();
            reference_merge(&mut expected, &b);

            prop_assert_eq!(deep_merge(&a, &b), expected);
        }

        #[test]
        fn prop_in_place_matches_copy(a in arb_document("[a-e]"), b in arb_document("[a-e]")) {
            let b_before = b.clone();
            let mut in_place = a.clone();
            deep_merge_in_place(&mut in_place, &b);

            prop_assert_eq!(&in_place, &deep_merge(&a, &b));
            prop_assert_eq!(b, b_before);
        }

        #[test]
        fn prop_every_key_survives(a in arb_document("[a-e]"), b in arb_document("[a-e]")) {
            let merged = deep_merge(&a, &b);

            for key in a.keys().chain(b.keys()) {
                prop_assert!(merged.contains_key(key), "missing key {}", key);
            }
            prop_assert!(merged.len() <= a.len() + b.len());
        }

        #[test]
        fn prop_specialized_wins_unless_both_tables(a in arb_document("[a-e]"), b in arb_document("[a-e]")) {
            let merged = deep_merge(&a, &b);

            for (key, value) in &b {
                let both_tables = value.is_object() && a.get(key).is_some_and(Value::is_object);
                if both_tables {
                    prop_assert!(merged.get(key).is_some_and(Value::is_object));
                } else {
                    prop_assert_eq!(merged.get(key), Some(value));
                }
            }
        }

        #[test]
        fn prop_untouched_keys_keep_source_value(a in arb_document("[a-e]"), b in arb_document("[a-e]")) {
            let merged = deep_merge(&a, &b);

            for (key, value) in a.iter().filter(|(key, _)| !b.contains_key(*key)) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }

        #[test]
        fn prop_disjoint_keys_give_union(a in arb_document("[a-e]"), b in arb_document("[f-j]")) {
            let merged = deep_merge(&a, &b);

            prop_assert_eq!(merged.len(), a.len() + b.len());
            for (key, value) in a.iter().chain(b.iter()) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }

        #[test]
        fn prop_merging_twice_is_idempotent(a in arb_document("[a-e]"), b in arb_document("[a-e]")) {
            let once = deep_merge(&a, &b);
            let twice = deep_merge(&once, &b);

            prop_assert_eq!(twice, once);
        }
    }
}
