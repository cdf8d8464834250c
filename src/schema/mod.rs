//! Schema Model
//!
//! Arena representation of the JSON-Schema-like subset declared by MCP tool
//! input schemas. Children are referenced by [`NodeId`], so a graph can share
//! a subtree between parents or point back at an ancestor.
//!
//! # Example
//!
//! ```rust
//! use mcpdrift::schema::SchemaGraph;
//! use serde_json::json;
//!
//! let mut graph = SchemaGraph::from_value(&json!({
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } }
//! }));
//!
//! // Make the root refer to itself
//! let root = graph.root();
//! graph.set_property(root, "parent", root);
//! assert_eq!(graph.node(root).property("parent"), Some(root));
//! ```

mod graph;
mod node;

pub use graph::SchemaGraph;
pub use node::{AdditionalProperties, NodeId, SchemaNode, SchemaType};
