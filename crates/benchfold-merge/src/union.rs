// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recursive union-without-overwrite.

use serde_json::Value;

use benchfold_core::doc::GENERATION_LOG_KEY;
use benchfold_core::error::Result;
use benchfold_core::version::GenerationLog;

use crate::gate::check_versions;

/// What to do when a leaf exists on both sides of a merge.
///
/// `KeepExisting` is the production default: the first successful run
/// wins and later re-merges can never regress recorded data. The policy
/// is explicit so the alternative stays testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Keep the accumulator's value, discard the incoming one.
    #[default]
    KeepExisting,
    /// Replace the accumulator's value with the incoming one.
    PreferIncoming,
}

/// Recursively fold `incoming` into `acc`.
///
/// Keys absent from `acc` are copied wholesale; keys mapping to objects
/// on both sides recurse; on any other collision the policy decides.
/// Non-object roots follow the same leaf rule.
pub fn union_into(acc: &mut Value, incoming: Value, policy: ConflictPolicy) {
    match (acc, incoming) {
        (Value::Object(acc_map), Value::Object(incoming_map)) => {
            for (key, incoming_value) in incoming_map {
                match acc_map.get_mut(&key) {
                    None => {
                        acc_map.insert(key, incoming_value);
                    }
                    Some(existing) => union_into(existing, incoming_value, policy),
                }
            }
        }
        (acc, incoming) => {
            if policy == ConflictPolicy::PreferIncoming {
                *acc = incoming;
            }
        }
    }
}

/// Merge canonical documents after gating on their schema versions.
///
/// The result's generation log is regenerated fresh; input logs are
/// treated as ordinary leaves only for the purpose of the gate and are
/// never propagated.
///
/// # Errors
/// Propagates [`check_versions`] failures. No partial result is ever
/// produced.
pub fn merge_documents(
    docs: Vec<Value>,
    contexts: &[String],
    policy: ConflictPolicy,
) -> Result<Value> {
    check_versions(&docs, contexts)?;
    let mut merged = Value::Object(serde_json::Map::new());
    for mut doc in docs {
        if let Value::Object(map) = &mut doc {
            map.remove(GENERATION_LOG_KEY);
        }
        union_into(&mut merged, doc, policy);
    }
    if let Value::Object(map) = &mut merged {
        let log = serde_json::to_value(GenerationLog::now())?;
        map.shift_insert(0, GENERATION_LOG_KEY.to_string(), log);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tagged(machines: Value) -> Value {
        let mut doc = json!({
            GENERATION_LOG_KEY: {"version info": "v0.3.0-gtest", "date": "20260830-120000"}
        });
        union_into(&mut doc, machines, ConflictPolicy::KeepExisting);
        doc
    }

    fn contexts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("input {i}")).collect()
    }

    #[test]
    fn test_disjoint_machines_union() {
        let a = tagged(json!({"aws-m7g": {"CSP": "AWS"}}));
        let b = tagged(json!({"gcp-c4a": {"CSP": "GCP"}}));
        let merged = merge_documents(vec![a, b], &contexts(2), ConflictPolicy::default()).unwrap();
        let keys: Vec<&String> = merged.as_object().unwrap().keys().collect();
        assert_eq!(keys, [GENERATION_LOG_KEY, "aws-m7g", "gcp-c4a"]);
    }

    #[test]
    fn test_no_overwrite_on_conflicting_leaf() {
        let a = tagged(json!({"m": {"os": {"u": {"x": 1}}}}));
        let b = tagged(json!({"m": {"os": {"u": {"x": 2, "y": 3}}}}));
        let merged =
            merge_documents(vec![a, b], &contexts(2), ConflictPolicy::KeepExisting).unwrap();
        assert_eq!(merged["m"]["os"]["u"]["x"], 1);
        assert_eq!(merged["m"]["os"]["u"]["y"], 3);
    }

    #[test]
    fn test_prefer_incoming_policy() {
        let mut acc = json!({"x": 1});
        union_into(&mut acc, json!({"x": 2}), ConflictPolicy::PreferIncoming);
        assert_eq!(acc["x"], 2);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let a = tagged(json!({"m1": {"t": 1}}));
        let b = tagged(json!({"m2": {"t": 2}}));
        let once = merge_documents(
            vec![a.clone(), b.clone()],
            &contexts(2),
            ConflictPolicy::KeepExisting,
        )
        .unwrap();
        let twice = merge_documents(vec![a.clone(), b, a], &contexts(3), ConflictPolicy::KeepExisting)
            .unwrap();
        // equal apart from the regenerated log
        let strip = |mut v: Value| {
            v.as_object_mut().unwrap().remove(GENERATION_LOG_KEY);
            v
        };
        assert_eq!(strip(once), strip(twice));
    }

    #[test]
    fn test_generation_log_is_fresh_and_first() {
        let a = tagged(json!({"m1": {}}));
        let merged = merge_documents(vec![a], &contexts(1), ConflictPolicy::default()).unwrap();
        let log = &merged[GENERATION_LOG_KEY];
        assert_ne!(log["version info"], "v0.3.0-gtest");
        assert_eq!(
            merged.as_object().unwrap().keys().next().unwrap(),
            GENERATION_LOG_KEY
        );
    }

    #[test]
    fn test_version_mismatch_aborts() {
        let a = tagged(json!({"m1": {}}));
        let mut b = tagged(json!({"m2": {}}));
        b[GENERATION_LOG_KEY]["version info"] = json!("v9.9.9");
        assert!(merge_documents(vec![a, b], &contexts(2), ConflictPolicy::default()).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        // Small machine-keyed object trees with string leaves.
        fn arb_tree() -> impl Strategy<Value = Value> {
            let leaf = proptest::sample::select(vec![json!(1), json!("x"), json!(2.5)]);
            leaf.prop_recursive(3, 16, 4, |inner| {
                proptest::collection::btree_map("[a-d]{1,2}", inner, 0..4)
                    .prop_map(|m| serde_json::to_value(m).unwrap())
            })
        }

        proptest! {
            #[test]
            fn union_with_self_is_identity(tree in arb_tree()) {
                let mut acc = tree.clone();
                union_into(&mut acc, tree.clone(), ConflictPolicy::KeepExisting);
                prop_assert_eq!(acc, tree);
            }

            #[test]
            fn union_is_associative_for_disjoint_roots(a in arb_tree(), b in arb_tree(), c in arb_tree()) {
                let wrap = |k: &str, v: &Value| json!({k: v});
                let (a, b, c) = (wrap("ka", &a), wrap("kb", &b), wrap("kc", &c));

                let mut left = a.clone();
                union_into(&mut left, b.clone(), ConflictPolicy::KeepExisting);
                union_into(&mut left, c.clone(), ConflictPolicy::KeepExisting);

                let mut bc = b;
                union_into(&mut bc, c, ConflictPolicy::KeepExisting);
                let mut right = a;
                union_into(&mut right, bc, ConflictPolicy::KeepExisting);

                prop_assert_eq!(left, right);
            }

            #[test]
            fn keep_existing_never_loses_accumulator_leaves(a in arb_tree(), b in arb_tree()) {
                let mut acc = json!({"k": a.clone()});
                union_into(&mut acc, json!({"k": b}), ConflictPolicy::KeepExisting);
                // every pre-existing leaf path still resolves to its old value
                fn check(old: &Value, new: &Value) -> bool {
                    match old {
                        Value::Object(map) => map
                            .iter()
                            .all(|(k, v)| new.get(k).is_some_and(|nv| check(v, nv))),
                        leaf => new == leaf,
                    }
                }
                let old = json!({"k": a});
                prop_assert!(check(&old, &acc));
            }
        }
    }
}
