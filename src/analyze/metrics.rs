//! Metric synthesis from raw walk tallies

use super::types::{RawTally, StructureMetrics};

/// Schema consistency above which an array counts as tabular
pub const TABULAR_THRESHOLD: f64 = 80.0;
/// Depth at or below which a value is considered flat
pub const FLAT_MAX_DEPTH: usize = 2;
/// Depth above which a value is considered deeply nested
pub const DEEP_MIN_DEPTH: usize = 3;

/// Turn a walk tally into normalized 0-100 metrics
pub fn synthesize(tally: &RawTally, nesting_depth: usize) -> StructureMetrics {
    let mut metrics = StructureMetrics {
        nesting_depth,
        is_flat: nesting_depth <= FLAT_MAX_DEPTH,
        is_deeply_nested: nesting_depth > DEEP_MIN_DEPTH,
        has_arrays: tally.array_count > 0,
        has_nested_arrays: tally.has_nested_arrays,
        array_count: tally.array_count,
        object_count: tally.object_count,
        ..StructureMetrics::default()
    };

    let Some(table) = &tally.tabular else {
        return metrics;
    };

    let rows = table.rows;
    let unique_fields = table.field_presence.len();

    // The +1 keeps an all-distinct array just above zero
    metrics.schema_consistency = percentage(rows - table.unique_schema_count() + 1, rows);
    metrics.field_variance = percentage(table.partial_field_count(), unique_fields);
    metrics.data_sparseity = percentage(table.null_slots, table.total_slots);
    metrics.mixed_types = table.field_kinds.values().any(|kinds| kinds.len() > 1);
    metrics.is_tabular = metrics.schema_consistency > TABULAR_THRESHOLD;
    metrics.total_fields = table.field_presence.values().sum();
    metrics.unique_field_names = unique_fields;
    metrics.tabular_rows = rows;

    metrics
}

/// `part / whole * 100`, or 0 for an empty whole
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
