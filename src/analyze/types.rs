//! Analysis types

use crate::types::StorageTarget;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Kind of a JSON value as observed in a tabular field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Array,
    Object,
    String,
    Number,
    Boolean,
    Null,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Null => ValueKind::Null,
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Array => write!(f, "array"),
            ValueKind::Object => write!(f, "object"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Null => write!(f, "null"),
        }
    }
}

/// Row-level statistics gathered from arrays of objects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularTally {
    /// Number of rows (array elements) absorbed
    pub rows: usize,
    /// One sorted, comma-joined key list per row
    pub schema_signatures: Vec<String>,
    /// How many rows contain each field
    pub field_presence: BTreeMap<String, usize>,
    /// Distinct value kinds observed per field
    pub field_kinds: BTreeMap<String, BTreeSet<ValueKind>>,
    /// Number of `(row, field)` slots inspected
    pub total_slots: usize,
    /// Slots holding `null` or missing entirely
    pub null_slots: usize,
}

impl TabularTally {
    /// Number of distinct row signatures
    pub fn unique_schema_count(&self) -> usize {
        self.schema_signatures.iter().collect::<BTreeSet<_>>().len()
    }

    /// Number of fields not present in every row
    pub fn partial_field_count(&self) -> usize {
        self.field_presence
            .values()
            .filter(|count| **count < self.rows)
            .count()
    }
}

/// Raw counts produced by a single walk over a JSON value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTally {
    pub object_count: usize,
    pub array_count: usize,
    pub has_nested_arrays: bool,
    /// Present only when a first-level array of objects was found
    pub tabular: Option<TabularTally>,
}

/// Normalized structural metrics of a JSON value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureMetrics {
    pub nesting_depth: usize,
    /// 0-100, higher = more rows share one key set
    pub schema_consistency: f64,
    /// 0-100, higher = more fields are optional
    pub field_variance: f64,
    /// 0-100, higher = more null or missing slots
    pub data_sparseity: f64,
    pub mixed_types: bool,

    pub is_tabular: bool,
    pub is_flat: bool,
    pub is_deeply_nested: bool,
    pub has_arrays: bool,
    pub has_nested_arrays: bool,

    pub total_fields: usize,
    pub unique_field_names: usize,
    pub array_count: usize,
    pub object_count: usize,
    /// Rows that fed the tabular metrics (0 when none were measured)
    pub tabular_rows: usize,
}

/// Store choice with its justification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub storage: StorageTarget,
    /// 0-100
    pub confidence: f64,
    /// Human-readable reasons in evaluation order
    pub reasoning: Vec<String>,
}

/// Complete result of analyzing a JSON value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureAnalysis {
    #[serde(flatten)]
    pub metrics: StructureMetrics,
    pub recommended_storage: StorageTarget,
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

impl StructureAnalysis {
    /// Assemble an analysis from its metrics and recommendation
    pub fn new(metrics: StructureMetrics, recommendation: Recommendation) -> Self {
        Self {
            metrics,
            recommended_storage: recommendation.storage,
            confidence: recommendation.confidence,
            reasoning: recommendation.reasoning,
        }
    }
}
