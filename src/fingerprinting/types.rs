//! Fingerprinting Data Types
//!
//! Core data structures for schema fingerprinting and diffing.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::DEFAULT_MAX_DEPTH;

/// Canonical form of a schema plus a short digest of its serialization
///
/// A pure function of the input schema; recomputed on demand and never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaFingerprint {
    /// Canonical tree with all orderings and numeric forms normalized
    pub canonical: Value,

    /// Truncated SHA-256 hex digest of the serialized canonical tree
    pub hash: String,
}

impl SchemaFingerprint {
    /// Check if two fingerprints have the same hash
    pub fn matches(&self, other: &Self) -> bool {
        self.hash == other.hash
    }

    /// Pretty-printed canonical JSON, used for visual diffs
    pub fn canonical_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.canonical).unwrap_or_default()
    }
}

/// Options shared by the canonicalizer and the differ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerprintOptions {
    /// Nodes deeper than this are replaced with a truncation sentinel
    pub max_depth: usize,
}

impl Default for FingerprintOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl FingerprintOptions {
    /// Set the maximum depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Kind of a schema change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SchemaChangeType {
    PropertyAdded,
    PropertyRemoved,
    TypeChanged,
    ConstraintChanged,
    RequiredChanged,
    EnumChanged,
    DescriptionChanged,
    FormatChanged,
}

impl SchemaChangeType {
    /// Wire name of the change type
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaChangeType::PropertyAdded => "property_added",
            SchemaChangeType::PropertyRemoved => "property_removed",
            SchemaChangeType::TypeChanged => "type_changed",
            SchemaChangeType::ConstraintChanged => "constraint_changed",
            SchemaChangeType::RequiredChanged => "required_changed",
            SchemaChangeType::EnumChanged => "enum_changed",
            SchemaChangeType::DescriptionChanged => "description_changed",
            SchemaChangeType::FormatChanged => "format_changed",
        }
    }
}

impl fmt::Display for SchemaChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified difference between two schemas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaChange {
    /// Dot-separated property path; `[]` marks array items; empty at the root
    pub path: String,

    pub change_type: SchemaChangeType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Whether existing consumers are likely to break
    pub breaking: bool,

    pub description: String,
}

impl SchemaChange {
    pub fn new(
        path: impl Into<String>,
        change_type: SchemaChangeType,
        before: Option<Value>,
        after: Option<Value>,
        breaking: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            change_type,
            before,
            after,
            breaking,
            description: description.into(),
        }
    }

    /// Path shown to users (`<root>` for the empty path)
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        }
    }
}
