//! Classification policy: metrics in, store recommendation out
//!
//! Branches are evaluated in order and the first match wins:
//!
//! 1. schema consistency ≥ 90 → relational
//! 2. measured rows with sparseity ≤ 15 and field variance < 50 → relational
//! 3. otherwise → document

use super::types::{Recommendation, StructureMetrics};
use crate::types::StorageTarget;

/// Consistency at which the relational store wins outright
pub const HIGH_CONSISTENCY: f64 = 90.0;
/// Highest sparseity still accepted as clean tabular data
pub const CLEAN_MAX_SPARSEITY: f64 = 15.0;
/// Field variance below which optional fields are tolerated
pub const CLEAN_MAX_VARIANCE: f64 = 50.0;

const LOW_VARIANCE: f64 = 20.0;
const EXTREME_VARIANCE: f64 = 70.0;
const HIGH_VARIANCE: f64 = 40.0;
const VERY_LOW_CONSISTENCY: f64 = 30.0;
const SPARSE_DATA: f64 = 30.0;

/// Pick a store for the given metrics and explain the choice
pub fn classify(m: &StructureMetrics) -> Recommendation {
    if m.schema_consistency >= HIGH_CONSISTENCY {
        consistent(m)
    } else if m.tabular_rows > 0
        && m.data_sparseity <= CLEAN_MAX_SPARSEITY
        && m.field_variance < CLEAN_MAX_VARIANCE
    {
        clean_with_optional_fields(m)
    } else {
        inconsistent(m)
    }
}

fn consistent(m: &StructureMetrics) -> Recommendation {
    let mut reasons = vec![
        format!(
            "High schema consistency ({:.1}%) - relational store selected",
            m.schema_consistency
        ),
        format!(
            "Consistent structure with {} fields is ideal for a relational store",
            m.total_fields
        ),
    ];

    if m.is_flat {
        reasons.push(format!(
            "Flat structure ({} levels) keeps relational queries efficient",
            m.nesting_depth
        ));
    }
    if m.is_tabular {
        reasons.push("Tabular data format maps directly onto SQL tables".to_string());
    }
    if m.field_variance < LOW_VARIANCE {
        reasons.push(format!(
            "Low field variance ({:.1}%) supports a strong schema",
            m.field_variance
        ));
    }

    Recommendation {
        storage: StorageTarget::Relational,
        confidence: m.schema_consistency,
        reasoning: reasons,
    }
}

fn clean_with_optional_fields(m: &StructureMetrics) -> Recommendation {
    let mut reasons = vec![
        format!(
            "Very few missing values ({:.1}% sparseity) and moderate field variance ({:.1}%) - relational store selected",
            m.data_sparseity, m.field_variance
        ),
        format!(
            "Clean tabular data with optional fields is manageable in a relational store (schema consistency: {:.1}%)",
            m.schema_consistency
        ),
    ];

    if m.is_tabular {
        reasons.push("Tabular data format maps directly onto SQL tables".to_string());
    }
    if m.is_flat {
        reasons.push(format!(
            "Flat structure ({} levels) suits a relational store",
            m.nesting_depth
        ));
    }
    reasons.push("Optional fields map to nullable columns".to_string());

    Recommendation {
        storage: StorageTarget::Relational,
        confidence: (100.0 - m.data_sparseity).min(100.0 - m.field_variance / 2.0),
        reasoning: reasons,
    }
}

fn inconsistent(m: &StructureMetrics) -> Recommendation {
    let mut reasons = vec![
        format!(
            "High inconsistency detected (schema: {:.1}%, field variance: {:.1}%) - document store selected",
            m.schema_consistency, m.field_variance
        ),
        "Flexible or inconsistent schema calls for the document model".to_string(),
    ];

    if m.field_variance > EXTREME_VARIANCE {
        reasons.push(format!(
            "Extremely high field variance ({:.1}%) - objects have very different structures",
            m.field_variance
        ));
    } else if m.field_variance > HIGH_VARIANCE {
        reasons.push(format!(
            "High field variance ({:.1}%) benefits from a flexible schema",
            m.field_variance
        ));
    }

    if m.schema_consistency < VERY_LOW_CONSISTENCY {
        reasons.push(format!(
            "Very low schema consistency ({:.1}%) - objects share few common fields",
            m.schema_consistency
        ));
    }
    if m.is_deeply_nested {
        reasons.push(format!(
            "Deep nesting ({} levels) suits a document store",
            m.nesting_depth
        ));
    }
    if m.has_nested_arrays {
        reasons.push("Nested arrays are stored natively as documents".to_string());
    }
    if m.data_sparseity > SPARSE_DATA {
        reasons.push(format!(
            "Sparse data ({:.1}% null values) saves space in a document store",
            m.data_sparseity
        ));
    }
    if m.mixed_types {
        reasons.push("Mixed field types benefit from a schema-less store".to_string());
    }

    Recommendation {
        storage: StorageTarget::Document,
        confidence: 100.0 - m.schema_consistency,
        reasoning: reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(consistency: f64, variance: f64, sparseity: f64) -> StructureMetrics {
        StructureMetrics {
            schema_consistency: consistency,
            field_variance: variance,
            data_sparseity: sparseity,
            tabular_rows: 10,
            ..StructureMetrics::default()
        }
    }

    #[test]
    fn test_boundary_consistency_is_relational() {
        let rec = classify(&measured(90.0, 80.0, 80.0));
        assert_eq!(rec.storage, StorageTarget::Relational);
        assert_eq!(rec.confidence, 90.0);
    }

    #[test]
    fn test_boundary_sparseity_is_relational() {
        let rec = classify(&measured(50.0, 10.0, 15.0));
        assert_eq!(rec.storage, StorageTarget::Relational);
        assert_eq!(rec.confidence, 85.0);
    }

    #[test]
    fn test_boundary_variance_is_document() {
        let rec = classify(&measured(50.0, 50.0, 0.0));
        assert_eq!(rec.storage, StorageTarget::Document);
        assert_eq!(rec.confidence, 50.0);
    }

    #[test]
    fn test_clean_branch_confidence_takes_minimum() {
        let rec = classify(&measured(80.0, 40.0, 5.0));
        assert_eq!(rec.storage, StorageTarget::Relational);
        // min(95, 80)
        assert_eq!(rec.confidence, 80.0);
        assert_eq!(
            rec.reasoning.last().map(String::as_str),
            Some("Optional fields map to nullable columns")
        );
    }

    #[test]
    fn test_unmeasured_input_skips_clean_branch() {
        let rec = classify(&StructureMetrics::default());
        assert_eq!(rec.storage, StorageTarget::Document);
        assert_eq!(rec.confidence, 100.0);
    }

    #[test]
    fn test_variance_reasons_are_exclusive() {
        let extreme = classify(&measured(50.0, 75.0, 0.0));
        assert!(extreme.reasoning.iter().any(|r| r.starts_with("Extremely high")));
        assert!(!extreme.reasoning.iter().any(|r| r.starts_with("High field variance")));

        let high = classify(&measured(50.0, 45.0, 20.0));
        assert!(high.reasoning.iter().any(|r| r.starts_with("High field variance")));
        assert!(!high.reasoning.iter().any(|r| r.starts_with("Extremely high")));
    }

    #[test]
    fn test_document_extras_accumulate() {
        let metrics = StructureMetrics {
            nesting_depth: 5,
            is_deeply_nested: true,
            has_nested_arrays: true,
            mixed_types: true,
            ..measured(20.0, 100.0, 60.0)
        };
        let rec = classify(&metrics);

        assert_eq!(rec.storage, StorageTarget::Document);
        // primary, model, extreme variance, low consistency, depth, arrays, sparse, mixed
        assert_eq!(rec.reasoning.len(), 8);
        assert!(rec.reasoning[0].contains("schema: 20.0%, field variance: 100.0%"));
    }
}
