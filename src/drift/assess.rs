//! Result assembly
//!
//! Folds schema changes and golden output differences into one severity and
//! a human-readable summary. Knows nothing about rendering formats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fingerprinting::SchemaChange;
use crate::golden::{format_tally, output_severity, tally, ComparisonMode, DifferenceType, GoldenDifference};

use super::severity::DriftSeverity;

/// Severity contributed by a schema change list
///
/// Any breaking change is breaking; non-breaking changes are info.
pub fn schema_severity(changes: &[SchemaChange]) -> DriftSeverity {
    changes
        .iter()
        .map(|c| {
            if c.breaking {
                DriftSeverity::Breaking
            } else {
                DriftSeverity::Info
            }
        })
        .fold(DriftSeverity::None, DriftSeverity::max)
}

/// Aggregate drift verdict for one tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriftAssessment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    pub severity: DriftSeverity,

    pub breaking_changes: usize,

    pub non_breaking_changes: usize,

    /// Output difference counts by type
    pub output_differences: BTreeMap<DifferenceType, usize>,

    pub summary: String,
}

impl DriftAssessment {
    /// Assemble from schema changes and output differences
    pub fn assess(
        schema_changes: &[SchemaChange],
        output_differences: &[GoldenDifference],
        mode: ComparisonMode,
    ) -> Self {
        let severity = schema_severity(schema_changes)
            .max(output_severity(output_differences, mode));
        Self::build(schema_changes, output_differences, severity)
    }

    /// Assemble with an already derived output severity
    pub fn from_parts(
        schema_changes: &[SchemaChange],
        output_differences: &[GoldenDifference],
        output: DriftSeverity,
    ) -> Self {
        let severity = schema_severity(schema_changes).max(output);
        Self::build(schema_changes, output_differences, severity)
    }

    /// Attach the tool name
    pub fn for_tool(mut self, tool_name: impl Into<String>) -> Self {
        let name = tool_name.into();
        self.summary = format!("{}: {}", name, self.summary);
        self.tool_name = Some(name);
        self
    }

    /// Check if this assessment reaches a fail threshold
    pub fn fails(&self, threshold: DriftSeverity) -> bool {
        self.severity.meets(threshold)
    }

    fn build(
        schema_changes: &[SchemaChange],
        output_differences: &[GoldenDifference],
        severity: DriftSeverity,
    ) -> Self {
        let breaking_changes = schema_changes.iter().filter(|c| c.breaking).count();
        let non_breaking_changes = schema_changes.len() - breaking_changes;
        let counts = tally(output_differences);

        let mut parts = Vec::new();
        if !schema_changes.is_empty() {
            parts.push(format!(
                "{} breaking, {} non-breaking schema change(s)",
                breaking_changes, non_breaking_changes
            ));
        }
        if !counts.is_empty() {
            parts.push(format!("output differences: {}", format_tally(&counts)));
        }
        let summary = if parts.is_empty() {
            format!("No drift detected (severity {})", severity)
        } else {
            format!("{} (severity {})", parts.join("; "), severity)
        };

        Self {
            tool_name: None,
            severity,
            breaking_changes,
            non_breaking_changes,
            output_differences: counts,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprinting::SchemaChangeType;

    fn change(breaking: bool) -> SchemaChange {
        SchemaChange::new("a", SchemaChangeType::PropertyAdded, None, None, breaking, "x")
    }

    fn difference(kind: DifferenceType) -> GoldenDifference {
        GoldenDifference::new(kind, "$.a", None, None, "x")
    }

    #[test]
    fn test_no_drift() {
        let assessment = DriftAssessment::assess(&[], &[], ComparisonMode::Structural);
        assert_eq!(assessment.severity, DriftSeverity::None);
        assert_eq!(assessment.summary, "No drift detected (severity none)");
    }

    #[test]
    fn test_breaking_schema_change_dominates() {
        let assessment = DriftAssessment::assess(
            &[change(true)],
            &[difference(DifferenceType::Added)],
            ComparisonMode::Structural,
        );
        assert_eq!(assessment.severity, DriftSeverity::Breaking);
        assert_eq!(assessment.breaking_changes, 1);
    }

    #[test]
    fn test_non_breaking_schema_change_is_info() {
        let assessment = DriftAssessment::assess(&[change(false)], &[], ComparisonMode::Structural);
        assert_eq!(assessment.severity, DriftSeverity::Info);
    }

    #[test]
    fn test_output_severity_dominates_info() {
        let assessment = DriftAssessment::assess(
            &[change(false)],
            &[difference(DifferenceType::Added)],
            ComparisonMode::Structural,
        );
        assert_eq!(assessment.severity, DriftSeverity::Warning);
        assert!(assessment.summary.contains("1 added"));
        assert!(assessment.summary.contains("0 breaking, 1 non-breaking"));
    }

    #[test]
    fn test_allowed_differences_do_not_raise_severity() {
        let mut allowed = difference(DifferenceType::Removed);
        allowed.allowed = true;
        let assessment = DriftAssessment::assess(&[], &[allowed], ComparisonMode::Semantic);
        assert_eq!(assessment.severity, DriftSeverity::None);
        assert_eq!(assessment.output_differences[&DifferenceType::Removed], 1);
    }

    #[test]
    fn test_assembly_is_order_independent() {
        let changes = [change(false), change(true), change(false)];
        let mut reversed = changes.clone();
        reversed.reverse();
        let diffs = [difference(DifferenceType::ValueChanged), difference(DifferenceType::Added)];
        let mut diffs_rev = diffs.clone();
        diffs_rev.reverse();

        assert_eq!(
            DriftAssessment::assess(&changes, &diffs, ComparisonMode::Semantic).severity,
            DriftAssessment::assess(&reversed, &diffs_rev, ComparisonMode::Semantic).severity
        );
    }

    #[test]
    fn test_for_tool_and_threshold() {
        let assessment = DriftAssessment::assess(&[change(true)], &[], ComparisonMode::Exact)
            .for_tool("search");
        assert_eq!(assessment.tool_name.as_deref(), Some("search"));
        assert!(assessment.summary.starts_with("search: "));
        assert!(assessment.fails(DriftSeverity::Warning));
        assert!(!assessment.fails(DriftSeverity::None));
    }
}
