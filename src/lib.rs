//! mcpdrift - Contract drift detection for MCP tool servers
//!
//! Decides whether an MCP tool's contract has changed between two points in
//! time, and how badly:
//!
//! - `fingerprinting` - canonical schema fingerprints and a compatibility
//!   differ that tags each change breaking or not
//! - `golden` - captured tool outputs compared in exact, structural or
//!   semantic mode, with allowed-drift patterns and a versioned store
//! - `drift` - severity levels and the per-tool drift assessment
//! - `client` - the `ToolInvoker` seam and the golden check runner
//!
//! Everything in the comparison path is synchronous and pure; only the store
//! and the invokers touch the outside world.
//!
//! # Example
//!
//! ```rust
//! use mcpdrift::drift::{DriftAssessment, DriftSeverity};
//! use mcpdrift::golden::{GoldenComparator, GoldenSnapshot, Tolerance};
//! use serde_json::json;
//!
//! let snapshot = GoldenSnapshot::capture("status", json!({}), r#"{"a": 1}"#, Tolerance::default());
//! let result = GoldenComparator::compare(&snapshot, r#"{"a": 2, "b": 3}"#);
//! let assessment = DriftAssessment::assess(&[], &result.differences, snapshot.tolerance.mode);
//!
//! assert_eq!(assessment.severity, DriftSeverity::Warning);
//! ```

pub mod client;
pub mod config;
pub mod drift;
pub mod errors;
pub mod fingerprinting;
pub mod golden;
pub mod normalize;
pub mod protocol;
pub mod schema;

// Re-export commonly used types
pub use config::Config;
pub use drift::{DriftAssessment, DriftSeverity};
pub use fingerprinting::{SchemaComparator, SchemaComparison};
pub use golden::{GoldenComparator, GoldenSnapshot, GoldenStore};
