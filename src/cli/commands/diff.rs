//! Diff command - Schema compatibility check
//!
//! Compares two versions of a tool input schema and gates on severity.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{json, Value};
use tracing::info;

use mcpdrift::drift::{DriftAssessment, DriftSeverity};
use mcpdrift::fingerprinting::{SchemaComparator, SchemaComparison};
use mcpdrift::Config;

use crate::cli::{severity_label, OutputFormat};

/// Schema text of a file holding a bare schema or a tool definition
///
/// Invalid JSON is passed through untouched so the comparator can report it.
fn schema_text(raw: String) -> String {
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(mut obj)) if obj.contains_key("inputSchema") => {
            match obj.remove("inputSchema") {
                Some(schema) => schema.to_string(),
                None => raw,
            }
        }
        _ => raw,
    }
}

fn read_schema(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file '{}'", path.display()))?;
    Ok(schema_text(raw))
}

/// Returns true when the fail threshold is reached
pub fn run(
    before: &Path,
    after: &Path,
    fail_on: Option<DriftSeverity>,
    config: &Config,
    format: OutputFormat,
) -> Result<bool> {
    let previous = read_schema(before)?;
    let current = read_schema(after)?;

    let comparison =
        SchemaComparator::compare_json(&previous, &current, config.fingerprint_options());
    let assessment = DriftAssessment::from_parts(&comparison.changes, &[], DriftSeverity::None);
    let threshold = fail_on.unwrap_or(config.ci.fail_on);

    info!(
        before = %before.display(),
        after = %after.display(),
        severity = %assessment.severity,
        "compared schemas"
    );

    match format {
        OutputFormat::Json => {
            let result = json!({
                "comparison": comparison,
                "assessment": assessment,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => print_comparison_text(before, after, &comparison, &assessment),
    }

    Ok(assessment.fails(threshold))
}

fn print_comparison_text(
    before: &Path,
    after: &Path,
    comparison: &SchemaComparison,
    assessment: &DriftAssessment,
) {
    println!("{}", "━".repeat(60).dimmed());
    println!(
        "{} {} → {}",
        "Comparing:".cyan(),
        before.display().to_string().yellow(),
        after.display().to_string().yellow()
    );
    println!("  Previous: {}", comparison.previous_hash);
    println!("  Current:  {}", comparison.current_hash);
    println!();

    if comparison.identical {
        println!("{}", "✓ Schemas are identical".green().bold());
        return;
    }

    if !comparison.changes.is_empty() {
        println!("{}", "Changes:".yellow().bold());
        for change in &comparison.changes {
            let tag = if change.breaking {
                "BREAKING".red().bold()
            } else {
                "compatible".dimmed()
            };
            println!(
                "  • [{}] {} {}: {}",
                tag,
                change.change_type,
                change.display_path().cyan(),
                change.description
            );
        }
        println!();
    }

    if !comparison.visual_diff.is_empty() {
        println!("{}", "Canonical diff:".cyan());
        for line in comparison.visual_diff.lines() {
            if line.starts_with("+ ") {
                println!("  {}", line.green());
            } else if line.starts_with("- ") {
                println!("  {}", line.red());
            } else {
                println!("  {}", line.dimmed());
            }
        }
        println!();
    }

    println!("{} {}", "Summary:".cyan(), comparison.summary());
    println!("{} {}", "Severity:".cyan(), severity_label(assessment.severity));
}
