//! Golden Output Data Types

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::drift::DriftSeverity;

/// Strategy used to compare a golden output with a fresh one
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    /// Post-normalization string equality
    Exact,
    /// JSON shape only: types, keys and array lengths
    #[default]
    Structural,
    /// Flattened path-to-value comparison
    Semantic,
}

impl ComparisonMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMode::Exact => "exact",
            ComparisonMode::Structural => "structural",
            ComparisonMode::Semantic => "semantic",
        }
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(ComparisonMode::Exact),
            "structural" => Ok(ComparisonMode::Structural),
            "semantic" => Ok(ComparisonMode::Semantic),
            other => Err(format!(
                "unknown comparison mode '{}' (expected exact, structural or semantic)",
                other
            )),
        }
    }
}

/// Kind of raw output, inferred once at capture time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Json,
    Markdown,
    Text,
}

/// How strictly a golden output is compared
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tolerance {
    pub mode: ComparisonMode,

    /// Path patterns whose differences are expected; `*` matches one segment
    #[serde(default)]
    pub allowed_drift: Vec<String>,

    #[serde(default = "default_true")]
    pub normalize_timestamps: bool,

    #[serde(default = "default_true")]
    pub normalize_uuids: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            mode: ComparisonMode::Structural,
            allowed_drift: Vec::new(),
            normalize_timestamps: true,
            normalize_uuids: true,
        }
    }
}

impl Tolerance {
    /// Create a tolerance for the given mode with default normalization
    pub fn with_mode(mode: ComparisonMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Add an allowed-drift pattern
    pub fn allow(mut self, pattern: impl Into<String>) -> Self {
        self.allowed_drift.push(pattern.into());
        self
    }

    /// Disable both redaction passes
    pub fn without_normalization(mut self) -> Self {
        self.normalize_timestamps = false;
        self.normalize_uuids = false;
        self
    }
}

/// Captured raw output plus derived views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoldenOutput {
    pub raw: String,

    pub content_type: ContentType,

    /// SHA-256 hex digest of `raw`
    pub content_hash: String,

    /// Type skeleton of JSON content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<Value>,

    /// Flattened path-to-value view of JSON content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_values: Option<BTreeMap<String, Value>>,
}

/// A trusted tool response used as a comparison baseline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoldenSnapshot {
    pub tool_name: String,

    pub captured_at: DateTime<Utc>,

    pub input_args: Value,

    pub output: GoldenOutput,

    pub tolerance: Tolerance,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub version: u32,
}

impl GoldenSnapshot {
    /// Current snapshot format version
    pub const VERSION: u32 = 1;
}

/// Kind of golden output difference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceType {
    Added,
    Removed,
    Changed,
    TypeChanged,
    ValueChanged,
}

impl DifferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceType::Added => "added",
            DifferenceType::Removed => "removed",
            DifferenceType::Changed => "changed",
            DifferenceType::TypeChanged => "type_changed",
            DifferenceType::ValueChanged => "value_changed",
        }
    }
}

impl fmt::Display for DifferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One difference between a golden output and a fresh output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoldenDifference {
    #[serde(rename = "type")]
    pub kind: DifferenceType,

    /// `$`-rooted path (`$.a.b`, `$.items[0]`, `$.lines[3]`)
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,

    /// Whether the path is covered by an allowed-drift pattern
    pub allowed: bool,

    pub description: String,
}

impl GoldenDifference {
    pub fn new(
        kind: DifferenceType,
        path: impl Into<String>,
        expected: Option<Value>,
        actual: Option<Value>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            expected,
            actual,
            allowed: false,
            description: description.into(),
        }
    }
}

/// Count differences by type
pub fn tally(differences: &[GoldenDifference]) -> BTreeMap<DifferenceType, usize> {
    let mut counts = BTreeMap::new();
    for difference in differences {
        *counts.entry(difference.kind).or_insert(0) += 1;
    }
    counts
}

/// Outcome of one golden comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    /// True iff severity is `none`
    pub passed: bool,

    pub severity: DriftSeverity,

    pub differences: Vec<GoldenDifference>,

    pub summary: String,
}

impl ComparisonResult {
    /// Differences not covered by allowed drift
    pub fn disallowed(&self) -> impl Iterator<Item = &GoldenDifference> {
        self.differences.iter().filter(|d| !d.allowed)
    }
}
