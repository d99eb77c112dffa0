//! JSON merge strategies
//!
//! Combines the content of two JSON uploads into one value.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// How two JSON values are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Top-level members of the second value overwrite the first
    Shallow,
    /// Objects merge recursively, arrays concatenate
    Deep,
    /// The second value replaces the first
    Override,
    /// Both values side by side under `file1` and `file2`
    Combine,
}

impl std::str::FromStr for MergeStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "shallow" => Ok(MergeStrategy::Shallow),
            "deep" => Ok(MergeStrategy::Deep),
            "override" => Ok(MergeStrategy::Override),
            "combine" => Ok(MergeStrategy::Combine),
            other => Err(Error::InvalidMergeStrategy {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeStrategy::Shallow => write!(f, "shallow"),
            MergeStrategy::Deep => write!(f, "deep"),
            MergeStrategy::Override => write!(f, "override"),
            MergeStrategy::Combine => write!(f, "combine"),
        }
    }
}

/// Merge `second` into `first` using `strategy`
pub fn merge(first: &Value, second: &Value, strategy: MergeStrategy) -> Value {
    match strategy {
        MergeStrategy::Shallow => {
            let mut merged = members(first);
            merged.extend(members(second));
            Value::Object(merged)
        }
        MergeStrategy::Deep => deep_merge(first, second),
        MergeStrategy::Override => second.clone(),
        MergeStrategy::Combine => json!({ "file1": first, "file2": second }),
    }
}

/// Members contributed by a value to an object spread
///
/// Arrays spread as index-keyed members; scalars contribute nothing.
fn members(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map.clone(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item.clone()))
            .collect(),
        _ => Map::new(),
    }
}

fn deep_merge(first: &Value, second: &Value) -> Value {
    match (first, second) {
        (Value::Array(a), Value::Array(b)) => Value::Array(a.iter().chain(b).cloned().collect()),
        (Value::Object(a), Value::Object(b)) => {
            let mut merged = a.clone();
            for (key, value) in b {
                let combined = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), combined);
            }
            Value::Object(merged)
        }
        _ => second.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("shallow", MergeStrategy::Shallow)]
    #[test_case("deep", MergeStrategy::Deep)]
    #[test_case("override", MergeStrategy::Override)]
    #[test_case("combine", MergeStrategy::Combine)]
    fn test_parse_strategy(name: &str, expected: MergeStrategy) {
        assert_eq!(name.parse::<MergeStrategy>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn test_parse_unknown_strategy() {
        let err = "zip".parse::<MergeStrategy>().unwrap_err();
        assert!(matches!(err, Error::InvalidMergeStrategy { name } if name == "zip"));
    }

    #[test]
    fn test_shallow_merge_overwrites_top_level() {
        let a = json!({"a": 1, "nested": {"x": 1}});
        let b = json!({"b": 2, "nested": {"y": 2}});

        assert_eq!(
            merge(&a, &b, MergeStrategy::Shallow),
            json!({"a": 1, "b": 2, "nested": {"y": 2}})
        );
    }

    #[test]
    fn test_shallow_merge_spreads_arrays_by_index() {
        assert_eq!(
            merge(&json!(["a", "b"]), &json!({"1": "z"}), MergeStrategy::Shallow),
            json!({"0": "a", "1": "z"})
        );
        assert_eq!(
            merge(&json!(5), &json!(null), MergeStrategy::Shallow),
            json!({})
        );
    }

    #[test]
    fn test_deep_merge_recurses_and_concatenates() {
        let a = json!({"tags": ["a"], "meta": {"x": 1, "keep": true}, "n": 1});
        let b = json!({"tags": ["b"], "meta": {"x": 2, "y": 3}, "n": [1]});

        assert_eq!(
            merge(&a, &b, MergeStrategy::Deep),
            json!({"tags": ["a", "b"], "meta": {"x": 2, "keep": true, "y": 3}, "n": [1]})
        );
    }

    #[test]
    fn test_override_and_combine() {
        let a = json!({"a": 1});
        let b = json!([1, 2]);

        assert_eq!(merge(&a, &b, MergeStrategy::Override), b);
        assert_eq!(
            merge(&a, &b, MergeStrategy::Combine),
            json!({"file1": {"a": 1}, "file2": [1, 2]})
        );
    }
}
