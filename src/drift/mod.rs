//! Severity classification and result assembly
//!
//! [`DriftSeverity`] is a closed, totally ordered enum combined with an
//! explicit `max`, so aggregation is associative and order independent.

mod assess;
mod severity;

pub use assess::{schema_severity, DriftAssessment};
pub use severity::DriftSeverity;
