//! Structure analysis module
//!
//! Decides whether a JSON value belongs in a relational or a document store.
//!
//! # Pipeline
//!
//! - **Depth**: maximum nesting depth of the value
//! - **Walk**: container counts plus row statistics for arrays of objects
//! - **Metrics**: schema consistency, field variance, data sparseity
//! - **Policy**: ordered thresholds producing a store, confidence and reasons
//!
//! Every step is pure; any JSON value yields a complete analysis.

mod metrics;
mod policy;
mod summary;
mod types;
mod walker;

pub use metrics::synthesize;
pub use policy::classify;
pub use summary::render_summary;
pub use types::{
    RawTally, Recommendation, StructureAnalysis, StructureMetrics, TabularTally, ValueKind,
};
pub use walker::{nesting_depth, walk};

use serde_json::Value;

/// Analyze a JSON value and recommend a store for it
pub fn analyze_structure(value: &Value) -> StructureAnalysis {
    let depth = nesting_depth(value);
    let tally = walk(value);
    let metrics = synthesize(&tally, depth);
    let recommendation = classify(&metrics);

    StructureAnalysis::new(metrics, recommendation)
}
