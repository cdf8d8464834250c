//! Replay invoker backed by a recorded transcript
//!
//! Transcript format: a JSON array of
//! `{"toolName", "inputArgs", "result"?, "error"?}` entries. A call with no
//! matching entry fails with [`InvokeError::NoResponse`].

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::golden::args_key;
use crate::protocol::mcp::CallToolResult;

use super::{InvokeError, ToolInvoker};

/// One recorded tool call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEntry {
    pub tool_name: String,

    #[serde(default = "empty_args")]
    pub input_args: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<CallToolResult>,

    /// Transport-level failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn empty_args() -> Value {
    Value::Object(Default::default())
}

/// Serves recorded results keyed by tool name and arguments
#[derive(Debug, Clone, Default)]
pub struct ReplayInvoker {
    entries: Vec<(String, ReplayEntry)>,
}

impl ReplayInvoker {
    pub fn from_entries(entries: Vec<ReplayEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (args_key(&e.input_args), e))
            .collect();
        Self { entries }
    }

    /// Parse a transcript document
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<ReplayEntry> =
            serde_json::from_str(json).context("Invalid replay transcript")?;
        Ok(Self::from_entries(entries))
    }

    /// Load a transcript file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay transcript '{}'", path.display()))?;
        let invoker = Self::from_json(&content)
            .with_context(|| format!("Failed to load '{}'", path.display()))?;
        debug!(path = %path.display(), entries = invoker.len(), "loaded replay transcript");
        Ok(invoker)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ToolInvoker for ReplayInvoker {
    async fn call_tool(&self, name: &str, arguments: &Value) -> Result<CallToolResult, InvokeError> {
        let key = args_key(arguments);
        let entry = self
            .entries
            .iter()
            .find(|(k, e)| e.tool_name == name && *k == key)
            .map(|(_, e)| e);

        match entry {
            Some(ReplayEntry {
                error: Some(message),
                ..
            }) => Err(InvokeError::Failed {
                tool: name.to_string(),
                message: message.clone(),
            }),
            Some(ReplayEntry {
                result: Some(result),
                ..
            }) => Ok(result.clone()),
            Some(_) => Err(InvokeError::Failed {
                tool: name.to_string(),
                message: "recorded entry has neither result nor error".to_string(),
            }),
            None => Err(InvokeError::NoResponse {
                tool: name.to_string(),
                args: key,
            }),
        }
    }

    fn invoker_type(&self) -> &'static str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TRANSCRIPT: &str = r#"[
        {"toolName": "search", "inputArgs": {"q": "rust", "limit": 5},
         "result": {"content": [{"type": "text", "text": "{\"hits\": 3}"}]}},
        {"toolName": "search", "inputArgs": {"q": "go"}, "error": "timeout"},
        {"toolName": "ping", "result": {"content": [{"type": "text", "text": "pong"}]}}
    ]"#;

    #[tokio::test]
    async fn replay_matches_args_in_any_order() {
        let invoker = ReplayInvoker::from_json(TRANSCRIPT).unwrap();
        assert_eq!(invoker.len(), 3);

        let result = invoker
            .call_tool("search", &json!({ "limit": 5, "q": "rust" }))
            .await
            .unwrap();
        assert_eq!(result.first_text(), Some("{\"hits\": 3}"));
    }

    #[tokio::test]
    async fn replay_default_args_are_empty_object() {
        let invoker = ReplayInvoker::from_json(TRANSCRIPT).unwrap();
        let result = invoker.call_tool("ping", &json!({})).await.unwrap();
        assert_eq!(result.first_text(), Some("pong"));
    }

    #[tokio::test]
    async fn replay_recorded_error() {
        let invoker = ReplayInvoker::from_json(TRANSCRIPT).unwrap();
        let err = invoker.call_tool("search", &json!({ "q": "go" })).await.unwrap_err();
        assert_eq!(
            err,
            InvokeError::Failed {
                tool: "search".into(),
                message: "timeout".into()
            }
        );
    }

    #[tokio::test]
    async fn replay_missing_entry() {
        let invoker = ReplayInvoker::from_json(TRANSCRIPT).unwrap();
        let err = invoker.call_tool("search", &json!({ "q": "c" })).await.unwrap_err();
        assert!(matches!(err, InvokeError::NoResponse { .. }));
    }

    #[test]
    fn replay_rejects_invalid_transcript() {
        assert!(ReplayInvoker::from_json("{}").is_err());
    }
}
