//! Path flattening for semantic comparison

use std::collections::BTreeMap;

use serde_json::Value;

/// Array elements beyond this index are summarized by `.length` only
pub const FLATTEN_ARRAY_SAMPLE: usize = 3;

/// Flatten a JSON value into `$`-rooted path → primitive pairs
///
/// Objects flatten dot-path-wise (an empty object stays as a `{}` leaf).
/// Arrays contribute a synthetic `.length` key plus their first
/// [`FLATTEN_ARRAY_SAMPLE`] elements.
pub fn flatten(value: &Value) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    flatten_into(value, "$", &mut out);
    out
}

fn flatten_into(value: &Value, path: &str, out: &mut BTreeMap<String, Value>) {
    match value {
        Value::Object(obj) if obj.is_empty() => {
            out.insert(path.to_string(), Value::Object(Default::default()));
        }
        Value::Object(obj) => {
            for (key, child) in obj {
                flatten_into(child, &format!("{}.{}", path, key), out);
            }
        }
        Value::Array(arr) => {
            out.insert(format!("{}.length", path), Value::from(arr.len()));
            for (i, child) in arr.iter().take(FLATTEN_ARRAY_SAMPLE).enumerate() {
                flatten_into(child, &format!("{}[{}]", path, i), out);
            }
        }
        leaf => {
            out.insert(path.to_string(), leaf.clone());
        }
    }
}

/// String form used for semantic value comparison
pub fn value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
