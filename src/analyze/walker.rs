//! Depth calculation and structural walk over JSON values

use super::types::{RawTally, TabularTally, ValueKind};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Maximum nesting depth of a JSON value
///
/// Scalars and empty containers have depth 0; a non-empty container is one
/// level deeper than its deepest child.
pub fn nesting_depth(value: &Value) -> usize {
    let children: Box<dyn Iterator<Item = &Value>> = match value {
        Value::Array(items) => Box::new(items.iter()),
        Value::Object(map) => Box::new(map.values()),
        _ => return 0,
    };

    children
        .map(|child| 1 + nesting_depth(child))
        .max()
        .unwrap_or(0)
}

/// Walk a JSON value, counting containers and gathering tabular statistics
///
/// Object and array counts cover the whole tree. Tabular statistics come
/// from first-level arrays of objects only: the root itself, or the
/// array-valued members of a root object (pooled together).
pub fn walk(value: &Value) -> RawTally {
    let mut tally = RawTally::default();

    match value {
        Value::Array(items) => absorb_rows(items, &mut tally),
        Value::Object(map) => {
            for member in map.values() {
                if let Value::Array(items) = member {
                    absorb_rows(items, &mut tally);
                }
            }
        }
        _ => {}
    }

    count_containers(value, false, &mut tally);
    tally
}

fn count_containers(value: &Value, inside_array: bool, tally: &mut RawTally) {
    match value {
        Value::Array(items) => {
            tally.array_count += 1;
            if inside_array {
                tally.has_nested_arrays = true;
            }
            for item in items {
                count_containers(item, true, tally);
            }
        }
        Value::Object(map) => {
            tally.object_count += 1;
            for member in map.values() {
                count_containers(member, inside_array, tally);
            }
        }
        _ => {}
    }
}

/// Add the rows of `items` to the tabular tally if every item is an object
fn absorb_rows(items: &[Value], tally: &mut RawTally) {
    let rows: Option<Vec<&Map<String, Value>>> = items.iter().map(Value::as_object).collect();
    let rows = match rows {
        Some(rows) if !rows.is_empty() => rows,
        _ => return,
    };

    let table = tally.tabular.get_or_insert_with(TabularTally::default);

    // Fields of this array only; slots are counted against them
    let fields: BTreeSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();

    for row in &rows {
        let mut keys: Vec<&str> = row.keys().map(String::as_str).collect();
        keys.sort_unstable();
        table.schema_signatures.push(keys.join(","));

        for (field, member) in *row {
            *table.field_presence.entry(field.clone()).or_insert(0) += 1;
            table
                .field_kinds
                .entry(field.clone())
                .or_default()
                .insert(ValueKind::of(member));
        }

        for field in &fields {
            table.total_slots += 1;
            match row.get(*field) {
                None | Some(Value::Null) => table.null_slots += 1,
                Some(_) => {}
            }
        }
    }

    table.rows += rows.len();
}
