//! Golden Output Module
//!
//! Captures trusted tool responses and compares fresh responses against
//! them:
//! - **exact**: string equality after redaction
//! - **structural**: JSON shape (types, keys, array lengths)
//! - **semantic**: flattened path → value maps
//!
//! Each difference is checked against the snapshot's allowed-drift patterns
//! individually; severity is derived from the disallowed ones only.
//!
//! # Example
//!
//! ```rust
//! use mcpdrift::drift::DriftSeverity;
//! use mcpdrift::golden::{GoldenComparator, GoldenSnapshot, Tolerance};
//! use serde_json::json;
//!
//! let snapshot = GoldenSnapshot::capture("weather", json!({}), r#"{"a":1}"#, Tolerance::default());
//! let result = GoldenComparator::compare(&snapshot, r#"{"a":2,"b":3}"#);
//! assert_eq!(result.differences.len(), 1);
//! assert_eq!(result.severity, DriftSeverity::Warning);
//! ```

mod comparator;
mod content;
mod flatten;
mod matcher;
mod snapshot;
mod store;
mod types;

pub use comparator::{format_tally, line_diff, output_severity, GoldenComparator};
pub use content::{infer_content_type, json_type, structure_of};
pub use flatten::{flatten, FLATTEN_ARRAY_SAMPLE};
pub use matcher::DriftMatcher;
pub use snapshot::args_key;
pub use store::GoldenStore;
pub use types::{
    tally, ComparisonMode, ComparisonResult, ContentType, DifferenceType, GoldenDifference,
    GoldenOutput, GoldenSnapshot, Tolerance,
};
