//! mcpdrift - Contract drift detection for MCP tool servers
//!
//! Fingerprints and diffs tool input schemas, and captures and checks
//! golden tool outputs for CI gating.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mcpdrift::errors::{format_error, ConfigError};
use mcpdrift::golden::ComparisonMode;
use mcpdrift::{Config, DriftSeverity};

mod cli;

use cli::commands;
use cli::OutputFormat;

/// mcpdrift - Contract drift detection for MCP servers
#[derive(Parser)]
#[command(
    name = "mcpdrift",
    author = "Russ Smith",
    version,
    about = "Contract drift detection for MCP tool servers",
    long_about = "mcpdrift decides whether an MCP tool's contract changed between two points in time.\n\n\
                  Features:\n\
                  • Order-independent schema fingerprints\n\
                  • Breaking/non-breaking schema diffs\n\
                  • Golden output snapshots with exact, structural and semantic comparison\n\
                  • CI gating with --fail-on"
)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file (searched for if not specified)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fingerprint and canonical form of a schema
    Fingerprint {
        /// Schema file: a bare JSON Schema, a tool definition, or a tools/list result
        schema: PathBuf,
    },

    /// Compare two versions of a tool input schema
    Diff {
        /// Previous schema (bare schema or tool definition)
        before: PathBuf,

        /// Current schema (bare schema or tool definition)
        after: PathBuf,

        /// Exit 1 when drift reaches this severity (none, info, warning, breaking)
        #[arg(long)]
        fail_on: Option<DriftSeverity>,
    },

    /// Capture and check golden tool outputs
    Golden {
        #[command(subcommand)]
        action: GoldenAction,
    },

    /// Generate a configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".mcpdrift.toml")]
        output: String,

        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum GoldenAction {
    /// Capture (or overwrite) the golden output for a tool call
    Capture {
        /// Tool name
        #[arg(short, long)]
        tool: String,

        /// Tool arguments as JSON
        #[arg(short, long)]
        args: Option<String>,

        /// File holding the tool output
        #[arg(short, long)]
        output: PathBuf,

        /// Treat the file as a tools/call result and use its first text block
        #[arg(long)]
        tool_result: bool,

        /// Comparison mode (exact, structural, semantic)
        #[arg(short, long)]
        mode: Option<ComparisonMode>,

        /// Allowed-drift path pattern, e.g. '$.meta.*' (repeatable)
        #[arg(long = "allow")]
        allow: Vec<String>,

        /// Description stored with the snapshot
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Compare a fresh tool output against its golden snapshot
    Compare {
        /// Tool name
        #[arg(short, long)]
        tool: String,

        /// Tool arguments as JSON
        #[arg(short, long)]
        args: Option<String>,

        /// File holding the fresh tool output
        #[arg(short, long)]
        output: PathBuf,

        /// Treat the file as a tools/call result and use its first text block
        #[arg(long)]
        tool_result: bool,

        /// Exit 1 when drift reaches this severity
        #[arg(long)]
        fail_on: Option<DriftSeverity>,
    },

    /// Check every snapshot against a recorded response transcript
    Check {
        /// Transcript file: [{toolName, inputArgs, result|error}]
        #[arg(short, long)]
        responses: PathBuf,

        /// Exit 1 when any tool's drift reaches this severity
        #[arg(long)]
        fail_on: Option<DriftSeverity>,
    },

    /// List golden snapshots
    List {
        /// Only show snapshots for this tool
        #[arg(short, long)]
        tool: Option<String>,
    },

    /// Delete one snapshot, or every snapshot of a tool
    Delete {
        /// Tool name
        #[arg(short, long)]
        tool: String,

        /// Tool arguments as JSON; omit to delete all snapshots of the tool
        #[arg(short, long)]
        args: Option<String>,
    },
}

fn init_logging(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbosity {
            0 => EnvFilter::new("mcpdrift=info"),
            1 => EnvFilter::new("mcpdrift=debug"),
            2 => EnvFilter::new("mcpdrift=trace"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Run the selected command; `Ok(true)` means the fail threshold was reached
async fn run(cli: Cli) -> Result<bool> {
    // init must work even when an existing config is broken
    if let Commands::Init { output, force } = &cli.command {
        commands::init::run(output, *force)?;
        return Ok(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Fingerprint { schema } => {
            commands::fingerprint::run(&schema, &config, format)?;
            Ok(false)
        }
        Commands::Diff {
            before,
            after,
            fail_on,
        } => commands::diff::run(&before, &after, fail_on, &config, format),
        Commands::Golden { action } => match action {
            GoldenAction::Capture {
                tool,
                args,
                output,
                tool_result,
                mode,
                allow,
                description,
            } => {
                let request = commands::golden::CaptureRequest {
                    tool,
                    args,
                    output,
                    tool_result,
                    mode,
                    allow,
                    description,
                };
                commands::golden::run_capture(request, &config, format)?;
                Ok(false)
            }
            GoldenAction::Compare {
                tool,
                args,
                output,
                tool_result,
                fail_on,
            } => commands::golden::run_compare(
                &tool,
                args.as_deref(),
                &output,
                tool_result,
                fail_on,
                &config,
                format,
            ),
            GoldenAction::Check { responses, fail_on } => {
                commands::golden::run_check(&responses, fail_on, &config, format).await
            }
            GoldenAction::List { tool } => {
                commands::golden::run_list(tool.as_deref(), &config, format)?;
                Ok(false)
            }
            GoldenAction::Delete { tool, args } => {
                commands::golden::run_delete(&tool, args.as_deref(), &config)?;
                Ok(false)
            }
        },
        Commands::Init { .. } => Ok(false),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(err) => {
            // Config errors carry a source span; let miette render it
            match err.downcast::<ConfigError>() {
                Ok(config_err) => eprintln!("{:?}", miette::Report::new(config_err)),
                Err(err) => eprintln!("{} {}", "✖".red(), format_error(&err)),
            }
            std::process::exit(2);
        }
    }
}
