//! Error handling with miette diagnostics
//!
//! Storage and configuration anomalies are fatal and surface here with
//! codes and help text. Comparison-level anomalies never reach this module:
//! they are folded into change and difference lists as data.

pub mod suggestions;

use std::ops::Range;
use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors reading or writing the golden store file
#[derive(Error, Debug, Diagnostic)]
pub enum StoreError {
    /// Store file exists but could not be read or written
    #[error("Failed to access golden store '{path}': {source}")]
    #[diagnostic(
        code(mcpdrift::store::io),
        help("Check that the path is readable and its directory is writable")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Store file exists but is not a valid store document
    #[error("Golden store '{path}' is corrupted: {reason}")]
    #[diagnostic(
        code(mcpdrift::store::corrupted),
        help(
            "The store is not a valid golden store document.\n\
             Restore it from version control, or delete it and re-capture with:\n  \
             mcpdrift golden capture --tool <name> --output <file>"
        )
    )]
    Corrupted { path: String, reason: String },

    /// Store was written by a newer version
    #[error("Golden store '{path}' has version {found}, newest supported is {supported}")]
    #[diagnostic(
        code(mcpdrift::store::version),
        help("Upgrade mcpdrift to read this store; older readers cannot interpret newer fields")
    )]
    VersionMismatch {
        path: String,
        found: u64,
        supported: u32,
    },

    /// Store could not be serialized
    #[error("Failed to serialize golden store: {source}")]
    #[diagnostic(code(mcpdrift::store::serialize))]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn corrupted(path: &Path, reason: impl Into<String>) -> Self {
        Self::Corrupted {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors loading `.mcpdrift.toml`
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to read config file '{path}': {source}")]
    #[diagnostic(code(mcpdrift::config::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has invalid values
    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(mcpdrift::config::invalid),
        help("Regenerate a commented template with: mcpdrift init --force")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("error here")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn parse(
        path: &Path,
        content: String,
        span: Option<Range<usize>>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            src: NamedSource::new(path.display().to_string(), content),
            span: span.map(SourceSpan::from),
            message: message.into(),
        }
    }
}

/// User-facing lookup errors raised by the CLI
#[derive(Error, Debug, Diagnostic)]
pub enum DriftError {
    /// No snapshot exists for the requested tool
    #[error("Unknown tool: '{tool}'")]
    #[diagnostic(code(mcpdrift::unknown_tool), help("{suggestion}"))]
    UnknownTool { tool: String, suggestion: String },

    /// The tool exists but not with these arguments
    #[error("No golden snapshot for '{tool}' with args {args}")]
    #[diagnostic(
        code(mcpdrift::snapshot::not_found),
        help("Capture one first:\n  mcpdrift golden capture --tool {tool} --args '{args}' --output <file>")
    )]
    SnapshotNotFound { tool: String, args: String },

    /// Command-line input could not be interpreted
    #[error("Invalid input: {message}")]
    #[diagnostic(code(mcpdrift::invalid_input))]
    InvalidInput { message: String },
}

impl DriftError {
    /// Create an unknown tool error with suggestions
    pub fn unknown_tool(tool: impl Into<String>, known_tools: &[String]) -> Self {
        let tool = tool.into();
        let suggestion = suggestions::suggest_tool(&tool, known_tools);
        Self::UnknownTool { tool, suggestion }
    }
}

/// Append contextual hints to an error for display
pub fn format_error(err: &anyhow::Error) -> String {
    let err_string = format!("{:#}", err);
    let err_lower = err_string.to_lowercase();

    if err_lower.contains("corrupted") {
        format!(
            "{}\n\nHint: Delete the store and re-capture, or restore it from version control",
            err_string
        )
    } else if err_lower.contains("newest supported") {
        format!("{}\n\nHint: Upgrade mcpdrift to read this store", err_string)
    } else if err_lower.contains("unknown tool") || err_lower.contains("no golden snapshot") {
        format!(
            "{}\n\nHint: Run 'mcpdrift golden list' to see captured snapshots",
            err_string
        )
    } else if err_lower.contains("no such file") || err_lower.contains("not found") {
        format!(
            "{}\n\nHint: Check the file path; relative paths resolve from the current directory",
            err_string
        )
    } else if err_lower.contains("invalid configuration") {
        format!(
            "{}\n\nHint: Run 'mcpdrift init --force' to regenerate the config file",
            err_string
        )
    } else {
        err_string
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    #[test]
    fn unknown_tool_generates_suggestion() {
        let known = vec!["search_files".to_string(), "read_file".to_string()];
        let err = DriftError::unknown_tool("serch_files", &known);
        if let DriftError::UnknownTool { suggestion, .. } = err {
            assert!(suggestion.contains("search_files"));
        } else {
            panic!("Expected UnknownTool");
        }
    }

    #[test]
    fn store_errors_have_codes() {
        let err = StoreError::corrupted(Path::new("golden.json"), "expected value at line 1");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("mcpdrift::store::corrupted".to_string())
        );
        assert!(err.to_string().contains("golden.json"));
    }

    #[test]
    fn version_mismatch_message() {
        let err = StoreError::VersionMismatch {
            path: "g.json".into(),
            found: 3,
            supported: 1,
        };
        assert!(err.to_string().contains("version 3"));
        assert!(err.help().is_some());
    }

    #[test]
    fn config_parse_error_keeps_span() {
        let err = ConfigError::parse(
            Path::new(".mcpdrift.toml"),
            "[golden]\nmode = 3\n".into(),
            Some(16..17),
            "invalid type",
        );
        if let ConfigError::Parse { span, .. } = &err {
            assert!(span.is_some());
        } else {
            panic!("Expected Parse");
        }
    }

    #[test]
    fn format_error_adds_hints() {
        let err = anyhow::Error::new(StoreError::corrupted(Path::new("g.json"), "bad"));
        assert!(format_error(&err).contains("re-capture"));

        let err = anyhow::anyhow!("Unknown tool: 'x'");
        assert!(format_error(&err).contains("golden list"));

        let err = anyhow::anyhow!("something else");
        assert_eq!(format_error(&err), "something else");
    }
}
