//! Protocol types shared with the MCP transport
//!
//! The transport itself lives outside this crate; these are the message
//! shapes the drift engine consumes.

pub mod mcp;

pub use mcp::{CallToolParams, CallToolResult, Content, ListToolsResult, Tool};
