//! Schema node types

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Index of a node inside a [`super::SchemaGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Declared `type`: a single name or a union of names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Union(Vec<String>),
}

impl SchemaType {
    /// Canonical string form: union members sorted and pipe-joined
    ///
    /// `["string", "number"]` becomes `"number|string"`.
    pub fn canonical(&self) -> String {
        match self {
            SchemaType::Single(name) => name.clone(),
            SchemaType::Union(names) => {
                let mut sorted = names.clone();
                sorted.sort();
                sorted.dedup();
                sorted.join("|")
            }
        }
    }

    /// Canonical JSON form: scalar pass-through, unions sorted
    pub fn canonical_value(&self) -> Value {
        match self {
            SchemaType::Single(name) => Value::String(name.clone()),
            SchemaType::Union(names) => {
                let mut sorted = names.clone();
                sorted.sort();
                sorted.dedup();
                Value::Array(sorted.into_iter().map(Value::String).collect())
            }
        }
    }
}

/// `additionalProperties`: a flag or a nested schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(NodeId),
}

/// One schema object
///
/// Properties keep their declared order and raw (unnormalized) names; the
/// fingerprinter is responsible for canonical ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub schema_type: Option<SchemaType>,
    pub format: Option<String>,
    pub description: Option<String>,
    pub enum_values: Option<Vec<Value>>,
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub min_length: Option<Number>,
    pub max_length: Option<Number>,
    pub pattern: Option<String>,
    pub default: Option<Value>,
    pub items: Option<NodeId>,
    pub properties: Vec<(String, NodeId)>,
    pub required: Vec<String>,
    pub additional_properties: Option<AdditionalProperties>,
}

impl SchemaNode {
    /// Create an empty node with the given type
    pub fn typed(name: impl Into<String>) -> Self {
        Self {
            schema_type: Some(SchemaType::Single(name.into())),
            ..Default::default()
        }
    }

    /// Look up a property by its raw name
    pub fn property(&self, name: &str) -> Option<NodeId> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, id)| *id)
    }

    /// Canonical type string, if a type is declared
    pub fn canonical_type(&self) -> Option<String> {
        self.schema_type.as_ref().map(SchemaType::canonical)
    }

    /// Check whether a property name is listed in `required`
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_type_canonical_is_sorted() {
        let t = SchemaType::Union(vec!["string".into(), "number".into()]);
        assert_eq!(t.canonical(), "number|string");
        assert_eq!(
            t.canonical_value(),
            Value::Array(vec!["number".into(), "string".into()])
        );
    }

    #[test]
    fn single_type_passes_through() {
        let t = SchemaType::Single("integer".into());
        assert_eq!(t.canonical(), "integer");
        assert_eq!(t.canonical_value(), Value::String("integer".into()));
    }

    #[test]
    fn property_lookup_uses_raw_name() {
        let mut node = SchemaNode::typed("object");
        node.properties.push(("a".into(), NodeId(1)));
        node.required.push("a".into());

        assert_eq!(node.property("a"), Some(NodeId(1)));
        assert_eq!(node.property("b"), None);
        assert!(node.is_required("a"));
        assert!(!node.is_required("b"));
    }
}
