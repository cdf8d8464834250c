//! Schema Comparator
//!
//! Pairs the fingerprint fast path with the differ: schemas whose hashes
//! match are reported identical without a diff walk, otherwise the full
//! change list is computed and a line diff of the canonical forms is
//! rendered for humans.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use similar::{ChangeTag, TextDiff};
use tracing::{debug, warn};

use crate::schema::SchemaGraph;

use super::differ::SchemaDiffer;
use super::hasher::FingerprintHasher;
use super::types::{FingerprintOptions, SchemaChange, SchemaChangeType};

/// Result of comparing two schemas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaComparison {
    /// True iff both fingerprints hash equal
    pub identical: bool,

    pub changes: Vec<SchemaChange>,

    pub previous_hash: String,

    pub current_hash: String,

    /// Unified line diff of the pretty canonical forms; empty when identical
    pub visual_diff: String,
}

impl SchemaComparison {
    /// Check if any change is breaking
    pub fn has_breaking(&self) -> bool {
        self.changes.iter().any(|c| c.breaking)
    }

    /// Number of breaking changes
    pub fn breaking_count(&self) -> usize {
        self.changes.iter().filter(|c| c.breaking).count()
    }

    /// Number of non-breaking changes
    pub fn non_breaking_count(&self) -> usize {
        self.changes.len() - self.breaking_count()
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        if self.identical {
            return "Schemas are identical".to_string();
        }
        if self.changes.is_empty() {
            return format!(
                "Fingerprint changed ({} -> {}) with no classified changes",
                self.previous_hash, self.current_hash
            );
        }
        format!(
            "{} change(s): {} breaking, {} non-breaking",
            self.changes.len(),
            self.breaking_count(),
            self.non_breaking_count()
        )
    }
}

/// Compares schemas by fingerprint and, when they differ, by full diff
pub struct SchemaComparator;

impl SchemaComparator {
    /// Compare two schema graphs
    pub fn compare(
        before: &SchemaGraph,
        after: &SchemaGraph,
        options: FingerprintOptions,
    ) -> SchemaComparison {
        let previous = FingerprintHasher::fingerprint_with(before, options);
        let current = FingerprintHasher::fingerprint_with(after, options);

        if previous.matches(&current) {
            debug!(hash = %current.hash, "schema fingerprints match");
            return SchemaComparison {
                identical: true,
                changes: Vec::new(),
                previous_hash: previous.hash,
                current_hash: current.hash,
                visual_diff: String::new(),
            };
        }

        let changes = SchemaDiffer::diff_with(before, after, options);
        debug!(
            previous = %previous.hash,
            current = %current.hash,
            changes = changes.len(),
            "schema fingerprints differ"
        );

        SchemaComparison {
            identical: false,
            changes,
            visual_diff: render_visual_diff(&previous.canonical_pretty(), &current.canonical_pretty()),
            previous_hash: previous.hash,
            current_hash: current.hash,
        }
    }

    /// Compare two JSON schema values
    pub fn compare_values(
        before: &Value,
        after: &Value,
        options: FingerprintOptions,
    ) -> SchemaComparison {
        Self::compare(
            &SchemaGraph::from_value(before),
            &SchemaGraph::from_value(after),
            options,
        )
    }

    /// Compare two schema documents given as JSON text
    ///
    /// Unparseable input never fails: it is reported as a single breaking
    /// `type_changed` entry at the root so batch comparisons keep going.
    pub fn compare_json(before: &str, after: &str, options: FingerprintOptions) -> SchemaComparison {
        let parsed_before = serde_json::from_str::<Value>(before);
        let parsed_after = serde_json::from_str::<Value>(after);

        let (side, error) = match (&parsed_before, &parsed_after) {
            (Ok(b), Ok(a)) => return Self::compare_values(b, a, options),
            (Err(e), _) => ("previous", e.to_string()),
            (Ok(_), Err(e)) => ("current", e.to_string()),
        };
        warn!(side, %error, "schema is not valid JSON");

        let hash_of = |parsed: &Result<Value, serde_json::Error>, raw: &str| match parsed {
            Ok(value) => FingerprintHasher::fingerprint_value(value).hash,
            Err(_) => FingerprintHasher::short_hash(raw),
        };

        SchemaComparison {
            identical: false,
            changes: vec![SchemaChange::new(
                "",
                SchemaChangeType::TypeChanged,
                None,
                None,
                true,
                format!("The {} schema is not valid JSON: {}", side, error),
            )],
            previous_hash: hash_of(&parsed_before, before),
            current_hash: hash_of(&parsed_after, after),
            visual_diff: render_visual_diff(before, after),
        }
    }
}

/// Render a `+`/`-`/` ` prefixed line diff
pub fn render_visual_diff(before: &str, after: &str) -> String {
    let diff = TextDiff::from_lines(before, after);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => ' ',
        };
        output.push(sign);
        output.push(' ');
        output.push_str(change.value());
        if !change.value().ends_with('\n') {
            output.push('\n');
        }
    }

    output
}
