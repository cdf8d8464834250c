//! Fingerprint Hasher
//!
//! Generates truncated SHA-256 digests from canonical schema trees.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::schema::SchemaGraph;

use super::normalizer::SchemaCanonicalizer;
use super::types::{FingerprintOptions, SchemaFingerprint};

/// Number of hex characters kept from the digest
///
/// Fingerprints are compared pairwise between two known schemas, never used
/// as a global index, so a 64-bit prefix is plenty.
pub const FINGERPRINT_HEX_LEN: usize = 16;

/// Generates fingerprints from schema graphs
pub struct FingerprintHasher;

impl FingerprintHasher {
    /// Fingerprint a schema graph with default options
    pub fn fingerprint(graph: &SchemaGraph) -> SchemaFingerprint {
        Self::fingerprint_with(graph, FingerprintOptions::default())
    }

    /// Fingerprint a schema graph with explicit options
    pub fn fingerprint_with(graph: &SchemaGraph, options: FingerprintOptions) -> SchemaFingerprint {
        let canonical = SchemaCanonicalizer::canonicalize(graph, options);
        let serialized = serde_json::to_string(&canonical).unwrap_or_default();

        SchemaFingerprint {
            hash: Self::short_hash(&serialized),
            canonical,
        }
    }

    /// Fingerprint a JSON schema value
    pub fn fingerprint_value(schema: &Value) -> SchemaFingerprint {
        Self::fingerprint(&SchemaGraph::from_value(schema))
    }

    /// Generate a SHA-256 hash of a string
    ///
    /// Returns a 64-character hex string.
    pub fn hash_string(input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Generate a short hash (first [`FINGERPRINT_HEX_LEN`] chars) of a string
    pub fn short_hash(input: &str) -> String {
        let mut full = Self::hash_string(input);
        full.truncate(FINGERPRINT_HEX_LEN);
        full
    }
}
