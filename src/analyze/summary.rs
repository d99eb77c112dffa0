//! Human-readable rendering of an analysis

use super::types::StructureAnalysis;
use std::fmt::{self, Write as _};

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Render a multi-line report of an analysis
pub fn render_summary(analysis: &StructureAnalysis) -> String {
    analysis.to_string()
}

impl fmt::Display for StructureAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        let mut out = String::new();

        writeln!(out, "JSON Structure Analysis")?;
        writeln!(out)?;
        writeln!(out, "Structure Metrics:")?;
        writeln!(out, "  - Nesting depth: {} level(s)", m.nesting_depth)?;
        writeln!(out, "  - Schema consistency: {:.1}%", m.schema_consistency)?;
        writeln!(out, "  - Field variance: {:.1}%", m.field_variance)?;
        writeln!(out, "  - Data sparseity: {:.1}%", m.data_sparseity)?;
        writeln!(
            out,
            "  - Complexity: {} objects, {} arrays",
            m.object_count, m.array_count
        )?;
        writeln!(out)?;
        writeln!(out, "Characteristics:")?;
        writeln!(out, "  - Tabular: {}", yes_no(m.is_tabular))?;
        writeln!(out, "  - Flat structure: {}", yes_no(m.is_flat))?;
        writeln!(out, "  - Deeply nested: {}", yes_no(m.is_deeply_nested))?;
        writeln!(out, "  - Mixed types: {}", yes_no(m.mixed_types))?;
        writeln!(out, "  - Nested arrays: {}", yes_no(m.has_nested_arrays))?;
        writeln!(out)?;
        writeln!(
            out,
            "Recommendation: {}",
            self.recommended_storage.as_str().to_uppercase()
        )?;
        writeln!(out, "   Confidence: {:.1}%", self.confidence)?;
        writeln!(out)?;
        write!(out, "Reasoning:")?;
        for reason in &self.reasoning {
            write!(out, "\n  - {reason}")?;
        }

        f.write_str(&out)
    }
}
