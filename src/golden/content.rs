//! Content-type inference and derived views for captured output

use std::sync::LazyLock;

use regex::RegexSet;
use serde_json::{Map, Value};

use super::types::ContentType;

static MARKDOWN_HINTS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?m)^#{1,6}\s+\S",        // heading
        r"(?m)^```",                // fence
        r"(?m)^\s*[-*+]\s+\S",      // bullet
        r"(?m)^\s*\d+\.\s+\S",      // ordered list
        r"(?m)^\|.*\|\s*$",         // table row
        r"\[[^\]]+\]\([^)\s]+\)",   // link
        r"\*\*[^*\n]+\*\*",         // bold
    ])
    .expect("markdown hint patterns are valid")
});

/// Infer the content type of raw tool output
///
/// JSON objects and arrays win; then Markdown if any hint matches;
/// everything else is text. Bare JSON scalars count as text.
pub fn infer_content_type(raw: &str) -> ContentType {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        if value.is_object() || value.is_array() {
            return ContentType::Json;
        }
    }
    if MARKDOWN_HINTS.is_match(raw) {
        return ContentType::Markdown;
    }
    ContentType::Text
}

/// JSON type name used in structural comparison
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Type skeleton of a JSON value
///
/// Objects keep their keys, arrays are summarized by their first element,
/// and primitives become their type name.
pub fn structure_of(value: &Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), structure_of(v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(arr) => Value::Array(arr.first().map(structure_of).into_iter().collect()),
        other => Value::String(json_type(other).to_string()),
    }
}
