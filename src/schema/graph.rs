//! Schema arena and JSON ingestion

use serde_json::{Map, Value};
use tracing::trace;

use super::node::{AdditionalProperties, NodeId, SchemaNode, SchemaType};

/// Arena of schema nodes with a designated root
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaGraph {
    nodes: Vec<SchemaNode>,
    root: NodeId,
}

impl Default for SchemaGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaGraph {
    /// Create a graph holding a single empty root node
    pub fn new() -> Self {
        Self::with_root(SchemaNode::default())
    }

    /// Create a graph whose root is `root`
    pub fn with_root(root: SchemaNode) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Build a tree-shaped graph from a JSON schema value
    ///
    /// Unknown keywords are ignored and non-object subschemas become empty
    /// nodes, so ingestion never fails.
    pub fn from_value(value: &Value) -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        graph.root = graph.ingest(value);
        trace!(nodes = graph.nodes.len(), "ingested schema");
        graph
    }

    /// Root node id
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (never true for a constructed graph)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// Mutably borrow a node
    pub fn node_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id.0]
    }

    /// Append a node and return its id
    pub fn add_node(&mut self, node: SchemaNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Point property `name` of `parent` at `child`, replacing any existing entry
    ///
    /// `child` may be any node in the graph, including an ancestor.
    pub fn set_property(&mut self, parent: NodeId, name: impl Into<String>, child: NodeId) {
        let name = name.into();
        let props = &mut self.nodes[parent.0].properties;
        match props.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = child,
            None => props.push((name, child)),
        }
    }

    /// Set the array item schema of `parent`
    pub fn set_items(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].items = Some(child);
    }

    fn ingest(&mut self, value: &Value) -> NodeId {
        let id = self.add_node(SchemaNode::default());
        let Some(obj) = value.as_object() else {
            return id;
        };

        let mut node = Self::scalar_fields(obj);

        if let Some(items) = obj.get("items") {
            // Tuple-style item lists are not part of the supported subset
            if items.is_object() {
                node.items = Some(self.ingest(items));
            }
        }

        if let Some(Value::Object(props)) = obj.get("properties") {
            for (key, val) in props {
                let child = self.ingest(val);
                node.properties.push((key.clone(), child));
            }
        }

        node.additional_properties = match obj.get("additionalProperties") {
            Some(Value::Bool(b)) => Some(AdditionalProperties::Allowed(*b)),
            Some(schema @ Value::Object(_)) => {
                Some(AdditionalProperties::Schema(self.ingest(schema)))
            }
            _ => None,
        };

        self.nodes[id.0] = node;
        id
    }

    fn scalar_fields(obj: &Map<String, Value>) -> SchemaNode {
        let string = |key: &str| obj.get(key).and_then(Value::as_str).map(String::from);
        let number = |key: &str| match obj.get(key) {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        };

        let schema_type = match obj.get("type") {
            Some(Value::String(s)) => Some(SchemaType::Single(s.clone())),
            Some(Value::Array(arr)) => Some(SchemaType::Union(
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect(),
            )),
            _ => None,
        };

        let required = match obj.get("required") {
            Some(Value::Array(arr)) => arr
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        };

        SchemaNode {
            schema_type,
            format: string("format"),
            description: string("description"),
            enum_values: obj.get("enum").and_then(Value::as_array).cloned(),
            minimum: number("minimum"),
            maximum: number("maximum"),
            min_length: number("minLength"),
            max_length: number("maxLength"),
            pattern: string("pattern"),
            default: obj.get("default").cloned(),
            required,
            ..Default::default()
        }
    }
}
