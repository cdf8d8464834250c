//! Schema Fingerprinting Module
//!
//! Detects contract drift in MCP tool input schemas:
//! - **Fingerprint**: a short hash of the canonical schema form, stable under
//!   property order, enum order, `1` vs `1.0` and NFC/NFD key spellings
//! - **Diff**: path-addressed changes, each tagged breaking or not
//!
//! # Architecture
//!
//! - `SchemaCanonicalizer`: builds the canonical tree with depth/cycle guards
//! - `FingerprintHasher`: hashes canonical trees
//! - `SchemaDiffer`: applies the compatibility policy to two schema graphs
//! - `SchemaComparator`: fingerprint fast path plus diff and visual diff
//!
//! # Example
//!
//! ```rust
//! use mcpdrift::fingerprinting::{SchemaComparator, SchemaChangeType};
//! use serde_json::json;
//!
//! let result = SchemaComparator::compare_values(
//!     &json!({ "required": ["a"] }),
//!     &json!({ "required": ["a", "b"] }),
//!     Default::default(),
//! );
//! assert_eq!(result.changes.len(), 1);
//! assert_eq!(result.changes[0].change_type, SchemaChangeType::RequiredChanged);
//! assert!(result.changes[0].breaking);
//! ```

mod comparator;
mod differ;
mod hasher;
mod normalizer;
mod types;

pub use comparator::{render_visual_diff, SchemaComparator, SchemaComparison};
pub use differ::SchemaDiffer;
pub use hasher::{FingerprintHasher, FINGERPRINT_HEX_LEN};
pub use normalizer::SchemaCanonicalizer;
pub use types::{FingerprintOptions, SchemaChange, SchemaChangeType, SchemaFingerprint};
