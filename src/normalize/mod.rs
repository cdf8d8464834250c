//! Normalization Layer
//!
//! Canonical transforms shared by every comparator:
//! - **Keys**: Unicode NFC so differently-encoded spellings compare equal
//! - **Numbers**: integral floats collapse to integers (`1.0` == `1`)
//! - **Guards**: depth and cycle sentinels that stop recursion
//! - **Text**: UUID and timestamp redaction, always UUIDs first
//!
//! Every function here is pure. Per-call state such as the visited set used
//! by [`cycle_guard`] is owned by the caller.

mod guard;
mod keys;
mod text;

pub use guard::{cycle_guard, depth_guard, DEFAULT_MAX_DEPTH};
pub use keys::{canonicalize_value, normalize_key, normalize_numeric};
pub use text::{redact, redact_timestamps, redact_uuids, TIMESTAMP_PLACEHOLDER, UUID_PLACEHOLDER};
