//! Tool invocation seam
//!
//! The drift engine never talks to a server itself. Whatever executes tool
//! calls (a live MCP client, a recorded transcript, a test double) plugs in
//! through [`ToolInvoker`], and [`GoldenRunner`] replays stored snapshots
//! through it.

mod mock;
mod replay;
mod runner;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::protocol::mcp::CallToolResult;

pub use mock::MockInvoker;
pub use replay::{ReplayEntry, ReplayInvoker};
pub use runner::{GoldenCheck, GoldenRunner};

/// Failure to obtain a tool-call result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// Nothing is recorded or configured for this call
    #[error("No response available for tool '{tool}' with args {args}")]
    NoResponse { tool: String, args: String },

    /// The call was made and failed
    #[error("Tool '{tool}' failed: {message}")]
    Failed { tool: String, message: String },
}

/// Executes tool calls
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Call a tool with JSON arguments
    async fn call_tool(&self, name: &str, arguments: &Value) -> Result<CallToolResult, InvokeError>;

    /// Short name for logs
    fn invoker_type(&self) -> &'static str;
}
