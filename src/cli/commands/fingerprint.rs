//! Fingerprint command - Schema fingerprinting
//!
//! Prints the hash and canonical form of each schema in a file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use mcpdrift::fingerprinting::{FingerprintHasher, SchemaFingerprint};
use mcpdrift::protocol::{ListToolsResult, Tool};
use mcpdrift::schema::SchemaGraph;
use mcpdrift::Config;

use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
struct NamedFingerprint {
    name: String,
    #[serde(flatten)]
    fingerprint: SchemaFingerprint,
}

/// Pull `(name, schema)` pairs out of a document
///
/// Accepts a `tools/list` result, a single tool definition, or a bare schema.
pub fn extract_schemas(document: Value) -> Vec<(String, Value)> {
    if document.get("tools").is_some_and(Value::is_array) {
        if let Ok(list) = serde_json::from_value::<ListToolsResult>(document.clone()) {
            return list
                .tools
                .into_iter()
                .map(|t| (t.name, t.input_schema))
                .collect();
        }
    }

    if document.get("inputSchema").is_some() {
        if let Ok(tool) = serde_json::from_value::<Tool>(document.clone()) {
            return vec![(tool.name, tool.input_schema)];
        }
    }

    vec![("schema".to_string(), document)]
}

pub fn run(path: &Path, config: &Config, format: OutputFormat) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file '{}'", path.display()))?;
    let document: Value = serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not valid JSON", path.display()))?;

    let options = config.fingerprint_options();
    let fingerprints: Vec<NamedFingerprint> = extract_schemas(document)
        .into_iter()
        .map(|(name, schema)| NamedFingerprint {
            name,
            fingerprint: FingerprintHasher::fingerprint_with(&SchemaGraph::from_value(&schema), options),
        })
        .collect();

    info!(path = %path.display(), count = fingerprints.len(), "fingerprinted schemas");

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&fingerprints)?);
        }
        OutputFormat::Text => print_fingerprints_text(&fingerprints),
    }

    Ok(())
}

fn print_fingerprints_text(fingerprints: &[NamedFingerprint]) {
    for fp in fingerprints {
        println!("{} {}", "Schema:".cyan(), fp.name.yellow().bold());
        println!("  Hash: {}", fp.fingerprint.hash.green());
        for line in fp.fingerprint.canonical_pretty().lines() {
            println!("    {}", line.dimmed());
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_bare_schema() {
        let schemas = extract_schemas(json!({ "type": "object" }));
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].0, "schema");
    }

    #[test]
    fn extract_tool_definition() {
        let schemas = extract_schemas(json!({
            "name": "search",
            "inputSchema": { "type": "object" }
        }));
        assert_eq!(schemas, vec![("search".to_string(), json!({ "type": "object" }))]);
    }

    #[test]
    fn extract_tools_list() {
        let schemas = extract_schemas(json!({
            "tools": [
                { "name": "a", "inputSchema": {} },
                { "name": "b", "inputSchema": { "type": "object" } }
            ]
        }));
        let names: Vec<_> = schemas.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
