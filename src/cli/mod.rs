//! CLI module - Command implementations and shared helpers

pub mod commands;

use std::path::Path;

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use serde_json::Value;

use mcpdrift::drift::DriftSeverity;
use mcpdrift::errors::DriftError;
use mcpdrift::golden::{DifferenceType, GoldenDifference};
use mcpdrift::protocol::CallToolResult;

/// Output format for CLI commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse `--args` JSON, defaulting to `{}`
pub fn parse_args(args: Option<&str>) -> Result<Value> {
    match args {
        None => Ok(Value::Object(Default::default())),
        Some(raw) => serde_json::from_str(raw).map_err(|e| {
            DriftError::InvalidInput {
                message: format!("--args is not valid JSON: {}", e),
            }
            .into()
        }),
    }
}

/// Read a tool output file
///
/// With `tool_result`, the file is a `tools/call` result and the first text
/// block is the output.
pub fn read_output(path: &Path, tool_result: bool) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read output file '{}'", path.display()))?;

    if !tool_result {
        return Ok(content);
    }

    let result: CallToolResult = serde_json::from_str(&content)
        .with_context(|| format!("'{}' is not a tools/call result", path.display()))?;
    let text = result.first_text().ok_or_else(|| DriftError::InvalidInput {
        message: format!("'{}' has no text content block", path.display()),
    })?;
    Ok(text.to_string())
}

/// Colored severity label
pub fn severity_label(severity: DriftSeverity) -> ColoredString {
    let label = format!("{} {}", severity.indicator(), severity.as_str().to_uppercase());
    match severity {
        DriftSeverity::Breaking => label.red().bold(),
        DriftSeverity::Warning => label.yellow(),
        DriftSeverity::Info => label.cyan(),
        DriftSeverity::None => label.green(),
    }
}

/// Print golden differences, one per line
pub fn print_differences(differences: &[GoldenDifference]) {
    for diff in differences {
        let marker = match diff.kind {
            DifferenceType::Added => "+".green(),
            DifferenceType::Removed => "-".red(),
            DifferenceType::TypeChanged => "!".red(),
            DifferenceType::Changed | DifferenceType::ValueChanged => "~".yellow(),
        };
        let line = format!("  {} {} {}", marker, diff.path.cyan(), diff.description);
        if diff.allowed {
            println!("{} {}", line, "(allowed)".dimmed());
        } else {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn parse_args_defaults_to_empty_object() {
        assert_eq!(parse_args(None).unwrap(), json!({}));
        assert_eq!(parse_args(Some(r#"{"q": 1}"#)).unwrap(), json!({ "q": 1 }));
    }

    #[test]
    fn parse_args_rejects_invalid_json() {
        let err = parse_args(Some("{q: 1")).unwrap_err();
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn read_output_from_tool_result() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.json");
        std::fs::write(
            &path,
            r#"{"content": [{"type": "text", "text": "{\"ok\": true}"}]}"#,
        )
        .unwrap();

        assert_eq!(read_output(&path, true).unwrap(), r#"{"ok": true}"#);
        assert!(read_output(&path, false).unwrap().starts_with("{\"content\""));
    }
}
