//! Golden command - Capture and check golden tool outputs

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use serde_json::{json, Value};
use tracing::{info, warn};

use mcpdrift::client::{GoldenCheck, GoldenRunner, ReplayInvoker};
use mcpdrift::drift::{DriftAssessment, DriftSeverity};
use mcpdrift::errors::DriftError;
use mcpdrift::golden::{
    args_key, ComparisonMode, ComparisonResult, GoldenComparator, GoldenSnapshot, GoldenStore,
};
use mcpdrift::Config;

use crate::cli::{parse_args, print_differences, read_output, severity_label, OutputFormat};

/// Arguments of `golden capture`
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub tool: String,
    pub args: Option<String>,
    pub output: PathBuf,
    pub tool_result: bool,
    pub mode: Option<ComparisonMode>,
    pub allow: Vec<String>,
    pub description: Option<String>,
}

/// Error for a `(tool, args)` pair missing from the store
fn missing_snapshot(store: &GoldenStore, tool: &str, args: &Value) -> anyhow::Error {
    let known = store.tool_names();
    if known.iter().any(|t| t == tool) {
        DriftError::SnapshotNotFound {
            tool: tool.to_string(),
            args: args_key(args),
        }
        .into()
    } else {
        DriftError::unknown_tool(tool, &known).into()
    }
}

pub fn run_capture(request: CaptureRequest, config: &Config, format: OutputFormat) -> Result<()> {
    let store_path = &config.golden.store;
    let mut store = GoldenStore::load(store_path)?;

    let args = parse_args(request.args.as_deref())?;
    let raw = read_output(&request.output, request.tool_result)?;

    let mut tolerance = config.tolerance();
    if let Some(mode) = request.mode {
        tolerance.mode = mode;
    }
    tolerance.allowed_drift.extend(request.allow);

    let mut snapshot = GoldenSnapshot::capture(&request.tool, args, raw, tolerance);
    if let Some(description) = request.description {
        snapshot = snapshot.with_description(description);
    }

    let replaced = store.upsert(snapshot.clone());
    store.save(store_path)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => {
            let verb = if replaced { "Updated" } else { "Captured" };
            println!(
                "{} {} golden output for {}",
                "✓".green(),
                verb,
                snapshot.tool_name.yellow().bold()
            );
            println!("  Args:    {}", args_key(&snapshot.input_args).dimmed());
            println!("  Content: {:?}", snapshot.output.content_type);
            println!("  Mode:    {}", snapshot.tolerance.mode);
            println!("  Hash:    {}", &snapshot.output.content_hash[..16]);
            println!("  Store:   {}", store_path.display());
        }
    }

    Ok(())
}

/// Returns true when the fail threshold is reached
pub fn run_compare(
    tool: &str,
    args: Option<&str>,
    output: &Path,
    tool_result: bool,
    fail_on: Option<DriftSeverity>,
    config: &Config,
    format: OutputFormat,
) -> Result<bool> {
    let store = GoldenStore::load(&config.golden.store)?;
    let args = parse_args(args)?;
    let snapshot = store
        .get(tool, &args)
        .ok_or_else(|| missing_snapshot(&store, tool, &args))?;

    let raw = read_output(output, tool_result)?;
    let result = GoldenComparator::compare(snapshot, &raw);
    let assessment = DriftAssessment::assess(&[], &result.differences, snapshot.tolerance.mode)
        .for_tool(tool);
    let threshold = fail_on.unwrap_or(config.ci.fail_on);

    info!(tool, severity = %assessment.severity, "compared golden output");

    match format {
        OutputFormat::Json => {
            let report = json!({ "result": result, "assessment": assessment });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("{}", "━".repeat(60).dimmed());
            println!(
                "{} {} ({} mode)",
                "Golden:".cyan(),
                tool.yellow().bold(),
                snapshot.tolerance.mode
            );
            print_result_text(&result);
        }
    }

    Ok(assessment.fails(threshold))
}

/// Returns true when any check reaches the fail threshold
pub async fn run_check(
    responses: &Path,
    fail_on: Option<DriftSeverity>,
    config: &Config,
    format: OutputFormat,
) -> Result<bool> {
    let store = GoldenStore::load(&config.golden.store)?;
    let invoker = ReplayInvoker::load(responses)?;

    if store.is_empty() {
        warn!(store = %config.golden.store.display(), "golden store is empty");
    }

    let checks = GoldenRunner::check_all(&invoker, &store).await;
    let worst = GoldenRunner::worst(&checks);
    let threshold = fail_on.unwrap_or(config.ci.fail_on);

    match format {
        OutputFormat::Json => {
            let report = json!({ "severity": worst, "checks": checks });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_checks_text(&checks, worst),
    }

    Ok(worst.meets(threshold))
}

pub fn run_list(tool: Option<&str>, config: &Config, format: OutputFormat) -> Result<()> {
    let store = GoldenStore::load(&config.golden.store)?;
    let snapshots = store.list(tool);

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    if snapshots.is_empty() {
        println!("{}", "No golden snapshots".yellow());
        return Ok(());
    }

    println!(
        "{} {} snapshot(s) in {}",
        "Golden:".cyan(),
        snapshots.len(),
        config.golden.store.display()
    );
    println!();
    for snapshot in snapshots {
        println!(
            "  {} {}",
            snapshot.tool_name.yellow().bold(),
            args_key(&snapshot.input_args).dimmed()
        );
        println!(
            "    {:?}, {} mode, captured {}",
            snapshot.output.content_type,
            snapshot.tolerance.mode,
            snapshot.captured_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        if let Some(description) = &snapshot.description {
            println!("    {}", description);
        }
        if !snapshot.tolerance.allowed_drift.is_empty() {
            println!("    allowed: {}", snapshot.tolerance.allowed_drift.join(", "));
        }
    }

    Ok(())
}

pub fn run_delete(tool: &str, args: Option<&str>, config: &Config) -> Result<()> {
    let store_path = &config.golden.store;
    let mut store = GoldenStore::load(store_path)?;

    let removed = match args {
        Some(raw) => {
            let args = parse_args(Some(raw))?;
            match store.remove(tool, &args) {
                Some(_) => 1,
                None => return Err(missing_snapshot(&store, tool, &args)),
            }
        }
        None => match store.remove_tool(tool) {
            0 => return Err(DriftError::unknown_tool(tool, &store.tool_names()).into()),
            n => n,
        },
    };

    store.save(store_path)?;
    println!(
        "{} Deleted {} snapshot(s) for {}",
        "✓".green(),
        removed,
        tool.yellow().bold()
    );
    Ok(())
}

fn print_result_text(result: &ComparisonResult) {
    print_differences(&result.differences);
    if !result.differences.is_empty() {
        println!();
    }
    println!("{} {}", "Summary:".cyan(), result.summary);
    println!("{} {}", "Severity:".cyan(), severity_label(result.severity));
}

fn print_checks_text(checks: &[GoldenCheck], worst: DriftSeverity) {
    for check in checks {
        println!(
            "{} {} {}",
            severity_label(check.severity()),
            check.tool_name.yellow().bold(),
            args_key(&check.input_args).dimmed()
        );
        print_differences(&check.result.differences);
    }

    println!();
    let failing = checks
        .iter()
        .filter(|c| c.severity() != DriftSeverity::None)
        .count();
    println!(
        "{} {} checked, {} drifted",
        "Summary:".cyan(),
        checks.len(),
        failing
    );
    println!("{} {}", "Severity:".cyan(), severity_label(worst));
}
