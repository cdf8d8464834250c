//! Key and numeric normalization

use serde_json::{Map, Number, Value};
use unicode_normalization::UnicodeNormalization;

/// Largest integer an f64 represents exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Normalize an object key to Unicode canonical composition (NFC)
pub fn normalize_key(key: &str) -> String {
    key.nfc().collect()
}

/// Collapse integral-valued floats to their integer form
///
/// `1.0` becomes `1`; `1.5` and non-numeric values pass through unchanged.
pub fn normalize_numeric(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER => {
                Value::Number(Number::from(f as i64))
            }
            _ => value.clone(),
        },
        other => other.clone(),
    }
}

/// Recursively apply key and numeric normalization to an arbitrary value
///
/// Used for `default` and `enum` payloads, which may themselves be objects.
pub fn canonicalize_value(value: &Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut out = Map::new();
            for (key, val) in obj {
                out.entry(normalize_key(key))
                    .or_insert_with(|| canonicalize_value(val));
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(canonicalize_value).collect()),
        other => normalize_numeric(other),
    }
}
