//! Recursion guards
//!
//! Both guards return a sentinel value that becomes part of the canonical
//! output. Two schemas that only differ below the depth limit therefore may
//! fingerprint equal.

use std::collections::HashSet;
use std::hash::Hash;

use serde_json::{json, Value};

/// Default maximum nesting depth for canonicalization and diffing
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Return a truncation sentinel when `depth` exceeds `limit`
pub fn depth_guard(depth: usize, limit: usize) -> Option<Value> {
    (depth > limit).then(|| {
        json!({
            "_truncated": true,
            "_reason": format!("maximum depth {} exceeded", limit),
            "_depth": depth,
        })
    })
}

/// Return a circular-reference sentinel when `node` is already on the current path
///
/// `visited` holds the identities seen on the path from the root to the
/// current node only; siblings that share a subtree are not cycles.
pub fn cycle_guard<T: Eq + Hash>(node: &T, visited: &HashSet<T>) -> Option<Value> {
    visited
        .contains(node)
        .then(|| json!({ "_circular": true }))
}
