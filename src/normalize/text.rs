//! Text redaction for golden output comparison
//!
//! UUID redaction must run before timestamp redaction: the last UUID segment
//! is twelve hex digits and is frequently all decimal, which the bare epoch
//! pattern (10-13 digits) would otherwise eat, leaving a half-redacted UUID.

use std::sync::LazyLock;

use regex::Regex;

/// Placeholder substituted for every UUID
pub const UUID_PLACEHOLDER: &str = "[UUID]";

/// Placeholder substituted for every timestamp
pub const TIMESTAMP_PLACEHOLDER: &str = "[TIMESTAMP]";

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\b").unwrap()
});

static ISO_TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?",
    )
    .unwrap()
});

static EPOCH_TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{10,13}\b").unwrap());

/// Replace every UUID with [`UUID_PLACEHOLDER`]
pub fn redact_uuids(text: &str) -> String {
    UUID_RE.replace_all(text, UUID_PLACEHOLDER).into_owned()
}

/// Replace ISO-8601 datetimes and 10-13 digit epoch values with [`TIMESTAMP_PLACEHOLDER`]
pub fn redact_timestamps(text: &str) -> String {
    let iso = ISO_TIMESTAMP_RE.replace_all(text, TIMESTAMP_PLACEHOLDER);
    EPOCH_TIMESTAMP_RE
        .replace_all(&iso, TIMESTAMP_PLACEHOLDER)
        .into_owned()
}

/// Apply the enabled redactions in the fixed UUID-then-timestamp order
pub fn redact(text: &str, uuids: bool, timestamps: bool) -> String {
    let mut out = if uuids {
        redact_uuids(text)
    } else {
        text.to_string()
    };
    if timestamps {
        out = redact_timestamps(&out);
    }
    out
}
