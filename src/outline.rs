//! Flattened field outline of a JSON value
//!
//! Used to preview the shape of an upload before it is stored. Arrays are
//! sampled through their first element.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a field outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOutline {
    /// Member name (or `root` for a top-level array)
    pub key: String,
    /// `string`, `number`, `boolean`, `null`, `object` or `Array[n]`
    #[serde(rename = "type")]
    pub type_label: String,
    /// Dotted path with `[0]` for sampled array elements
    pub path: String,
}

/// Outline every field reachable from `value`
pub fn outline(value: &Value) -> Vec<FieldOutline> {
    let mut fields = Vec::new();
    collect(value, "", &mut fields);
    fields
}

/// Entries that sit directly on the root
pub fn root_fields(fields: &[FieldOutline]) -> Vec<&FieldOutline> {
    fields
        .iter()
        .filter(|field| !field.path.contains('.') && !field.path.contains('['))
        .collect()
}

fn type_label(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("Array[{}]", items.len()),
        Value::Object(_) => "object".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Null => "null".to_string(),
    }
}

fn collect(value: &Value, path: &str, fields: &mut Vec<FieldOutline>) {
    match value {
        Value::Array(items) => {
            // Arrays held by an object were already listed as its member
            if path.is_empty() || path.ends_with(']') {
                let name = if path.is_empty() { "root" } else { path };
                fields.push(FieldOutline {
                    key: name.to_string(),
                    type_label: type_label(value),
                    path: name.to_string(),
                });
            }
            if let Some(first) = items.first() {
                collect(first, &format!("{path}[0]"), fields);
            }
        }
        Value::Object(map) => {
            for (key, member) in map {
                let member_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                fields.push(FieldOutline {
                    key: key.clone(),
                    type_label: type_label(member),
                    path: member_path.clone(),
                });
                if member.is_object() || member.is_array() {
                    collect(member, &member_path, fields);
                }
            }
        }
        _ => {}
    }
}
