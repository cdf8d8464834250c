//! Mock invoker for testing
//!
//! Scripted in memory: responses are registered per tool (optionally per
//! argument set) and every call is recorded for later assertions.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::golden::args_key;
use crate::protocol::mcp::{CallToolParams, CallToolResult};

use super::{InvokeError, ToolInvoker};

/// Mock configuration for a tool response
#[derive(Clone)]
struct MockToolResponse {
    name: String,
    /// Matches any arguments when `None`
    args: Option<String>,
    response: Result<CallToolResult, String>,
}

/// Mock invoker for tests
#[derive(Clone, Default)]
pub struct MockInvoker {
    responses: Arc<Mutex<Vec<MockToolResponse>>>,
    calls: Arc<Mutex<Vec<CallToolParams>>>,
}

impl MockInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to every call of `name`
    pub async fn set_tool_response(&self, name: &str, response: CallToolResult) {
        self.push(name, None, Ok(response)).await;
    }

    /// Respond to calls of `name` with exactly these arguments
    pub async fn set_tool_response_for(&self, name: &str, args: &Value, response: CallToolResult) {
        self.push(name, Some(args_key(args)), Ok(response)).await;
    }

    /// Fail every call of `name`
    pub async fn set_tool_failure(&self, name: &str, message: &str) {
        self.push(name, None, Err(message.to_string())).await;
    }

    /// Calls made so far, in order
    pub async fn calls(&self) -> Vec<CallToolParams> {
        self.calls.lock().await.clone()
    }

    async fn push(&self, name: &str, args: Option<String>, response: Result<CallToolResult, String>) {
        let mut responses = self.responses.lock().await;
        responses.push(MockToolResponse {
            name: name.to_string(),
            args,
            response,
        });
    }
}

#[async_trait]
impl ToolInvoker for MockInvoker {
    async fn call_tool(&self, name: &str, arguments: &Value) -> Result<CallToolResult, InvokeError> {
        self.calls
            .lock()
            .await
            .push(CallToolParams::new(name).with_arguments(arguments.clone()));

        let key = args_key(arguments);
        let responses = self.responses.lock().await;

        // Exact-args responses win over catch-all ones
        let found = responses
            .iter()
            .filter(|r| r.name == name)
            .find(|r| r.args.as_deref() == Some(key.as_str()))
            .or_else(|| responses.iter().find(|r| r.name == name && r.args.is_none()));

        match found {
            Some(MockToolResponse {
                response: Ok(result),
                ..
            }) => Ok(result.clone()),
            Some(MockToolResponse {
                response: Err(message),
                ..
            }) => Err(InvokeError::Failed {
                tool: name.to_string(),
                message: message.clone(),
            }),
            None => Err(InvokeError::NoResponse {
                tool: name.to_string(),
                args: key,
            }),
        }
    }

    fn invoker_type(&self) -> &'static str {
        "mock"
    }
}
