//! Snapshot capture and identity

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::fingerprinting::FingerprintHasher;
use crate::normalize::canonicalize_value;

use super::content::{infer_content_type, structure_of};
use super::flatten::flatten;
use super::types::{ContentType, GoldenOutput, GoldenSnapshot, Tolerance};

/// Serialized input args used as part of a snapshot's identity
///
/// Keys are sorted and NFC-normalized, so argument order never creates a
/// second snapshot for the same call.
pub fn args_key(args: &Value) -> String {
    serde_json::to_string(&canonicalize_value(args)).unwrap_or_default()
}

impl GoldenOutput {
    /// Derive every view of a raw output
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let content_type = infer_content_type(&raw);
        let content_hash = FingerprintHasher::hash_string(&raw);

        let (structure, key_values) = match content_type {
            ContentType::Json => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => (Some(structure_of(&value)), Some(flatten(&value))),
                Err(_) => (None, None),
            },
            _ => (None, None),
        };

        Self {
            raw,
            content_type,
            content_hash,
            structure,
            key_values,
        }
    }
}

impl GoldenSnapshot {
    /// Capture a new snapshot of a tool response
    pub fn capture(
        tool_name: impl Into<String>,
        input_args: Value,
        raw: impl Into<String>,
        tolerance: Tolerance,
    ) -> Self {
        let output = GoldenOutput::from_raw(raw);
        let tool_name = tool_name.into();
        debug!(
            tool = %tool_name,
            content_type = ?output.content_type,
            mode = %tolerance.mode,
            "captured golden output"
        );

        Self {
            tool_name,
            captured_at: Utc::now(),
            input_args,
            output,
            tolerance,
            description: None,
            version: Self::VERSION,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check if this snapshot is keyed by `(tool_name, args)`
    pub fn matches(&self, tool_name: &str, args: &Value) -> bool {
        self.tool_name == tool_name && args_key(&self.input_args) == args_key(args)
    }
}
