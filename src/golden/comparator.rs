//! Golden Output Comparator
//!
//! Compares a golden output with a fresh one under the snapshot's
//! tolerance. Exact and semantic comparisons redact UUIDs, then
//! timestamps, first. When neither side is a JSON document, `structural`
//! and `semantic` fall back to a line diff; when only one side is, the
//! comparison is a single breaking root `type_changed`.

use std::collections::BTreeMap;

use serde_json::Value;
use similar::{DiffOp, TextDiff};
use tracing::debug;

use crate::drift::DriftSeverity;
use crate::normalize::redact;

use super::content::json_type;
use super::flatten::{flatten, value_string};
use super::matcher::DriftMatcher;
use super::types::{
    tally, ComparisonMode, ComparisonResult, DifferenceType, GoldenDifference, GoldenSnapshot,
    Tolerance,
};

/// Compares tool outputs against golden snapshots
pub struct GoldenComparator;

impl GoldenComparator {
    /// Compare a fresh output against a stored snapshot
    pub fn compare(snapshot: &GoldenSnapshot, actual: &str) -> ComparisonResult {
        Self::compare_raw(&snapshot.output.raw, actual, &snapshot.tolerance)
    }

    /// Compare two raw outputs under a tolerance
    pub fn compare_raw(expected: &str, actual: &str, tolerance: &Tolerance) -> ComparisonResult {
        let redact_text =
            |s: &str| redact(s, tolerance.normalize_uuids, tolerance.normalize_timestamps);

        let mut differences = match tolerance.mode {
            ComparisonMode::Exact => exact_diff(&redact_text(expected), &redact_text(actual)),
            mode => match (parse_document(expected), parse_document(actual)) {
                // Structural compares shapes only; no redaction
                (Some(e), Some(a)) if mode == ComparisonMode::Structural => {
                    let mut out = Vec::new();
                    structural_diff(&e, &a, "$", &mut out);
                    out
                }
                (Some(e), Some(a)) => {
                    semantic_diff(&redact_value(&e, tolerance), &redact_value(&a, tolerance))
                }
                (Some(e), None) => {
                    debug!(mode = %mode, "current output is not JSON");
                    return not_json(json_type(&e), "text", "Current output is not valid JSON", mode);
                }
                (None, Some(a)) => {
                    debug!(mode = %mode, "golden output is not JSON");
                    return not_json("text", json_type(&a), "Golden output is not valid JSON", mode);
                }
                (None, None) => {
                    debug!(mode = %mode, "output is not JSON, falling back to line diff");
                    line_diff(&redact_text(expected), &redact_text(actual))
                }
            },
        };

        let matcher = DriftMatcher::new(&tolerance.allowed_drift);
        for difference in &mut differences {
            difference.allowed = matcher.is_allowed(&difference.path);
        }

        Self::finish(differences, tolerance.mode)
    }

    fn finish(differences: Vec<GoldenDifference>, mode: ComparisonMode) -> ComparisonResult {
        let severity = output_severity(&differences, mode);
        let summary = summarize(&differences, severity);
        debug!(
            mode = %mode,
            differences = differences.len(),
            severity = %severity,
            "golden comparison complete"
        );

        ComparisonResult {
            passed: severity == DriftSeverity::None,
            severity,
            differences,
            summary,
        }
    }
}

/// Severity of an output comparison, from its disallowed differences only
pub fn output_severity(differences: &[GoldenDifference], mode: ComparisonMode) -> DriftSeverity {
    let disallowed: Vec<&GoldenDifference> = differences.iter().filter(|d| !d.allowed).collect();

    if disallowed.is_empty() {
        return DriftSeverity::None;
    }
    if mode == ComparisonMode::Exact {
        return DriftSeverity::Breaking;
    }
    if disallowed
        .iter()
        .any(|d| matches!(d.kind, DifferenceType::Removed | DifferenceType::TypeChanged))
    {
        return DriftSeverity::Breaking;
    }
    if disallowed.iter().any(|d| d.kind == DifferenceType::Added) {
        return DriftSeverity::Warning;
    }
    DriftSeverity::Info
}

fn summarize(differences: &[GoldenDifference], severity: DriftSeverity) -> String {
    if differences.is_empty() {
        return "Output matches golden snapshot".to_string();
    }
    let allowed = differences.iter().filter(|d| d.allowed).count();
    format!(
        "{} difference(s), {} allowed ({}); severity {}",
        differences.len(),
        allowed,
        format_tally(&tally(differences)),
        severity
    )
}

/// Render a type tally as `1 added, 2 removed`
pub fn format_tally(counts: &BTreeMap<DifferenceType, usize>) -> String {
    counts
        .iter()
        .map(|(kind, n)| format!("{} {}", n, kind))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse raw output as a JSON object or array; bare scalars count as text
fn parse_document(raw: &str) -> Option<Value> {
    serde_json::from_str::<Value>(raw)
        .ok()
        .filter(|value| value.is_object() || value.is_array())
}

/// One side is a JSON document and the other is not
///
/// Folded into a single root `type_changed` that allowed drift never covers.
fn not_json(
    expected: &str,
    actual: &str,
    description: &str,
    mode: ComparisonMode,
) -> ComparisonResult {
    let difference = GoldenDifference::new(
        DifferenceType::TypeChanged,
        "$",
        Some(Value::String(expected.to_string())),
        Some(Value::String(actual.to_string())),
        description,
    );
    GoldenComparator::finish(vec![difference], mode)
}

/// Redact string leaves and timestamp-like numbers inside a JSON tree
///
/// Only used by semantic mode, which compares values by string form, so a
/// number turning into a placeholder string still compares equal.
fn redact_value(value: &Value, tolerance: &Tolerance) -> Value {
    let redact_text =
        |s: &str| redact(s, tolerance.normalize_uuids, tolerance.normalize_timestamps);
    match value {
        Value::String(s) => Value::String(redact_text(s)),
        Value::Number(n) => {
            let text = n.to_string();
            let redacted = redact_text(&text);
            if redacted == text {
                value.clone()
            } else {
                Value::String(redacted)
            }
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_value(v, tolerance)).collect()),
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), redact_value(v, tolerance)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn exact_diff(expected: &str, actual: &str) -> Vec<GoldenDifference> {
    if expected == actual {
        return Vec::new();
    }
    vec![GoldenDifference::new(
        DifferenceType::Changed,
        "$",
        Some(Value::String(expected.to_string())),
        Some(Value::String(actual.to_string())),
        "Output differs from golden snapshot",
    )]
}

/// Shape-only comparison; stops descending once types diverge
fn structural_diff(expected: &Value, actual: &Value, path: &str, out: &mut Vec<GoldenDifference>) {
    let (et, at) = (json_type(expected), json_type(actual));
    if et != at {
        out.push(GoldenDifference::new(
            DifferenceType::TypeChanged,
            path,
            Some(Value::String(et.to_string())),
            Some(Value::String(at.to_string())),
            format!("Type changed from {} to {}", et, at),
        ));
        return;
    }

    match (expected, actual) {
        (Value::Object(e), Value::Object(a)) => {
            for (key, ev) in e {
                let child = format!("{}.{}", path, key);
                match a.get(key) {
                    Some(av) => structural_diff(ev, av, &child, out),
                    None => out.push(GoldenDifference::new(
                        DifferenceType::Removed,
                        child,
                        Some(ev.clone()),
                        None,
                        format!("Key '{}' removed", key),
                    )),
                }
            }
            for (key, av) in a {
                if !e.contains_key(key) {
                    out.push(GoldenDifference::new(
                        DifferenceType::Added,
                        format!("{}.{}", path, key),
                        None,
                        Some(av.clone()),
                        format!("Key '{}' added", key),
                    ));
                }
            }
        }
        (Value::Array(e), Value::Array(a)) => {
            if e.len() != a.len() {
                out.push(GoldenDifference::new(
                    DifferenceType::Changed,
                    path,
                    Some(Value::from(e.len())),
                    Some(Value::from(a.len())),
                    format!("Array length changed from {} to {}", e.len(), a.len()),
                ));
            }
            for (i, (ev, av)) in e.iter().zip(a.iter()).enumerate() {
                structural_diff(ev, av, &format!("{}[{}]", path, i), out);
            }
        }
        _ => {}
    }
}

fn semantic_diff(expected: &Value, actual: &Value) -> Vec<GoldenDifference> {
    let e = flatten(expected);
    let a = flatten(actual);
    let mut out = Vec::new();

    for (path, ev) in &e {
        match a.get(path) {
            Some(av) => {
                if value_string(ev) != value_string(av) {
                    out.push(GoldenDifference::new(
                        DifferenceType::ValueChanged,
                        path.clone(),
                        Some(ev.clone()),
                        Some(av.clone()),
                        format!("Value changed from {} to {}", ev, av),
                    ));
                }
            }
            None => out.push(GoldenDifference::new(
                DifferenceType::Removed,
                path.clone(),
                Some(ev.clone()),
                None,
                format!("Path {} removed", path),
            )),
        }
    }
    for (path, av) in &a {
        if !e.contains_key(path) {
            out.push(GoldenDifference::new(
                DifferenceType::Added,
                path.clone(),
                None,
                Some(av.clone()),
                format!("Path {} added", path),
            ));
        }
    }

    out
}

/// Line-by-line diff; paths are `$.lines[N]` with 1-based line numbers
pub fn line_diff(expected: &str, actual: &str) -> Vec<GoldenDifference> {
    let diff = TextDiff::from_lines(expected, actual);
    let old = diff.old_slices();
    let new = diff.new_slices();
    let line = |s: &str| Value::String(s.trim_end_matches(&['\n', '\r'][..]).to_string());
    let path = |index: usize| format!("$.lines[{}]", index + 1);

    let removed = |i: usize| {
        GoldenDifference::new(
            DifferenceType::Removed,
            path(i),
            Some(line(old[i])),
            None,
            format!("Line {} removed", i + 1),
        )
    };
    let added = |i: usize| {
        GoldenDifference::new(
            DifferenceType::Added,
            path(i),
            None,
            Some(line(new[i])),
            format!("Line {} added", i + 1),
        )
    };

    let mut out = Vec::new();
    for op in diff.ops() {
        match *op {
            DiffOp::Equal { .. } => {}
            DiffOp::Delete {
                old_index, old_len, ..
            } => out.extend((old_index..old_index + old_len).map(&removed)),
            DiffOp::Insert {
                new_index, new_len, ..
            } => out.extend((new_index..new_index + new_len).map(&added)),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                let paired = old_len.min(new_len);
                for k in 0..paired {
                    out.push(GoldenDifference::new(
                        DifferenceType::Changed,
                        path(new_index + k),
                        Some(line(old[old_index + k])),
                        Some(line(new[new_index + k])),
                        format!("Line {} changed", new_index + k + 1),
                    ));
                }
                out.extend((old_index + paired..old_index + old_len).map(&removed));
                out.extend((new_index + paired..new_index + new_len).map(&added));
            }
        }
    }
    out
}
