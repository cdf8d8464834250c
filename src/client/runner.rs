//! Golden check runner
//!
//! Replays every stored snapshot through a [`ToolInvoker`] and compares the
//! fresh output. A failed call degrades only its own check to breaking; the
//! rest of the batch still runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::drift::{DriftAssessment, DriftSeverity};
use crate::golden::{
    ComparisonResult, DifferenceType, GoldenComparator, GoldenDifference, GoldenSnapshot,
    GoldenStore,
};

use super::ToolInvoker;

/// Outcome of checking one snapshot against a live call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoldenCheck {
    pub tool_name: String,

    pub input_args: Value,

    pub result: ComparisonResult,

    pub assessment: DriftAssessment,

    /// Set when the tool call itself failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GoldenCheck {
    pub fn severity(&self) -> DriftSeverity {
        self.assessment.severity
    }

    fn failed(snapshot: &GoldenSnapshot, message: String) -> Self {
        let difference = GoldenDifference::new(
            DifferenceType::Changed,
            "$",
            Some(Value::String(snapshot.output.raw.clone())),
            None,
            format!("Tool call failed: {}", message),
        );
        let differences = vec![difference];
        let assessment = DriftAssessment::from_parts(&[], &differences, DriftSeverity::Breaking)
            .for_tool(&snapshot.tool_name);

        Self {
            tool_name: snapshot.tool_name.clone(),
            input_args: snapshot.input_args.clone(),
            result: ComparisonResult {
                passed: false,
                severity: DriftSeverity::Breaking,
                differences,
                summary: format!("Tool call failed: {}", message),
            },
            assessment,
            error: Some(message),
        }
    }
}

/// Runs golden checks through an invoker
pub struct GoldenRunner;

impl GoldenRunner {
    /// Check a single snapshot
    pub async fn check_one(invoker: &dyn ToolInvoker, snapshot: &GoldenSnapshot) -> GoldenCheck {
        debug!(
            tool = %snapshot.tool_name,
            invoker = invoker.invoker_type(),
            "checking golden snapshot"
        );

        let outcome = invoker
            .call_tool(&snapshot.tool_name, &snapshot.input_args)
            .await;

        let raw = match outcome {
            Err(e) => {
                warn!(tool = %snapshot.tool_name, error = %e, "tool call failed");
                return GoldenCheck::failed(snapshot, e.to_string());
            }
            Ok(result) if result.is_error() => {
                let text = result.first_text().unwrap_or("no error text").to_string();
                warn!(tool = %snapshot.tool_name, "tool returned an error result");
                return GoldenCheck::failed(snapshot, format!("tool returned error: {}", text));
            }
            Ok(result) => match result.first_text() {
                Some(text) => text.to_string(),
                None => {
                    return GoldenCheck::failed(snapshot, "result has no text content".to_string())
                }
            },
        };

        let result = GoldenComparator::compare(snapshot, &raw);
        let assessment = DriftAssessment::from_parts(&[], &result.differences, result.severity)
            .for_tool(&snapshot.tool_name);

        GoldenCheck {
            tool_name: snapshot.tool_name.clone(),
            input_args: snapshot.input_args.clone(),
            result,
            assessment,
            error: None,
        }
    }

    /// Check every snapshot in the store, in store order
    pub async fn check_all(invoker: &dyn ToolInvoker, store: &GoldenStore) -> Vec<GoldenCheck> {
        let mut checks = Vec::with_capacity(store.len());
        for snapshot in &store.outputs {
            checks.push(Self::check_one(invoker, snapshot).await);
        }

        info!(
            checks = checks.len(),
            worst = %Self::worst(&checks),
            "golden checks complete"
        );
        checks
    }

    /// Most severe outcome across checks
    pub fn worst(checks: &[GoldenCheck]) -> DriftSeverity {
        DriftSeverity::combine(checks.iter().map(GoldenCheck::severity))
    }
}
