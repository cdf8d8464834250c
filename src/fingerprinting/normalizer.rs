//! Schema Canonicalizer
//!
//! Builds the canonical tree that fingerprints are hashed from. Equivalent
//! schemas produce identical trees regardless of property insertion order,
//! enum order, integral-vs-float literals or NFC/NFD key spellings.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::normalize::{
    canonicalize_value, cycle_guard, depth_guard, normalize_key, normalize_numeric,
};
use crate::schema::{AdditionalProperties, NodeId, SchemaGraph, SchemaNode};

use super::types::FingerprintOptions;

/// Canonicalizer for schema graphs
pub struct SchemaCanonicalizer;

impl SchemaCanonicalizer {
    /// Canonicalize the whole graph starting at its root
    ///
    /// The visited set is created here and threaded through the recursion,
    /// so concurrent calls share no state.
    pub fn canonicalize(graph: &SchemaGraph, options: FingerprintOptions) -> Value {
        let root = graph.root();
        let mut visited = HashSet::from([root]);
        Self::canonical_node(graph, root, 0, &mut visited, options)
    }

    fn canonical_node(
        graph: &SchemaGraph,
        id: NodeId,
        depth: usize,
        visited: &mut HashSet<NodeId>,
        options: FingerprintOptions,
    ) -> Value {
        let node = graph.node(id);
        let mut out = Map::new();

        if let Some(schema_type) = &node.schema_type {
            out.insert("type".into(), schema_type.canonical_value());
        }
        if let Some(format) = &node.format {
            out.insert("format".into(), Value::String(format.clone()));
        }
        if let Some(description) = &node.description {
            out.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(values) = &node.enum_values {
            out.insert("enum".into(), Value::Array(Self::sorted_enum(values)));
        }

        Self::insert_constraints(node, &mut out);

        if !node.required.is_empty() {
            out.insert("required".into(), Value::Array(Self::sorted_required(node)));
        }

        if !node.properties.is_empty() {
            let mut keys: Vec<(String, NodeId)> = Vec::with_capacity(node.properties.len());
            for (raw, child) in &node.properties {
                let key = normalize_key(raw);
                // First declared spelling wins when two raw keys normalize alike
                if !keys.iter().any(|(k, _)| *k == key) {
                    keys.push((key, *child));
                }
            }
            keys.sort_by(|a, b| a.0.cmp(&b.0));

            let mut props = Map::new();
            for (key, child) in keys {
                props.insert(key, Self::guarded_child(graph, child, depth, visited, options));
            }
            out.insert("properties".into(), Value::Object(props));
        }

        if let Some(items) = node.items {
            out.insert(
                "items".into(),
                Self::guarded_child(graph, items, depth, visited, options),
            );
        }

        match node.additional_properties {
            Some(AdditionalProperties::Allowed(flag)) => {
                out.insert("additionalProperties".into(), Value::Bool(flag));
            }
            Some(AdditionalProperties::Schema(child)) => {
                out.insert(
                    "additionalProperties".into(),
                    Self::guarded_child(graph, child, depth, visited, options),
                );
            }
            None => {}
        }

        Value::Object(out)
    }

    /// Recurse into a child unless the depth or cycle guard fires
    fn guarded_child(
        graph: &SchemaGraph,
        child: NodeId,
        depth: usize,
        visited: &mut HashSet<NodeId>,
        options: FingerprintOptions,
    ) -> Value {
        let child_depth = depth + 1;
        if let Some(sentinel) = depth_guard(child_depth, options.max_depth) {
            debug!(depth = child_depth, "schema truncated at depth limit");
            return sentinel;
        }
        if let Some(sentinel) = cycle_guard(&child, visited) {
            debug!(node = child.index(), "circular schema reference");
            return sentinel;
        }

        visited.insert(child);
        let value = Self::canonical_node(graph, child, child_depth, visited, options);
        visited.remove(&child);
        value
    }

    /// Sort enum values by their JSON serialization after numeric normalization
    fn sorted_enum(values: &[Value]) -> Vec<Value> {
        let mut keyed: Vec<(String, Value)> = values
            .iter()
            .map(canonicalize_value)
            .map(|v| (serde_json::to_string(&v).unwrap_or_default(), v))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, v)| v).collect()
    }

    fn sorted_required(node: &SchemaNode) -> Vec<Value> {
        let mut required: Vec<String> = node.required.iter().map(|r| normalize_key(r)).collect();
        required.sort();
        required.dedup();
        required.into_iter().map(Value::String).collect()
    }

    fn insert_constraints(node: &SchemaNode, out: &mut Map<String, Value>) {
        let numeric = [
            ("minimum", &node.minimum),
            ("maximum", &node.maximum),
            ("minLength", &node.min_length),
            ("maxLength", &node.max_length),
        ];
        for (key, value) in numeric {
            if let Some(n) = value {
                out.insert(key.into(), normalize_numeric(&Value::Number(n.clone())));
            }
        }
        if let Some(pattern) = &node.pattern {
            out.insert("pattern".into(), Value::String(pattern.clone()));
        }
        if let Some(default) = &node.default {
            out.insert("default".into(), canonicalize_value(default));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;
    use serde_json::json;

    fn canonical(value: Value) -> Value {
        SchemaCanonicalizer::canonicalize(&SchemaGraph::from_value(&value), Default::default())
    }

    #[test]
    fn property_order_does_not_matter() {
        let a = canonical(json!({
            "type": "object",
            "properties": { "a": { "type": "string" }, "b": { "type": "number" } }
        }));
        let b = canonical(json!({
            "type": "object",
            "properties": { "b": { "type": "number" }, "a": { "type": "string" } }
        }));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn enum_sorted_by_serialization() {
        let c = canonical(json!({ "enum": ["b", 10, "a", 2, null] }));
        // JSON text order: "\"a\"" < "\"b\"" < "10" < "2" < "null"
        assert_eq!(c["enum"], json!(["a", "b", 10, 2, null]));
    }

    #[test]
    fn union_types_sorted() {
        let c = canonical(json!({ "type": ["string", "null", "integer"] }));
        assert_eq!(c["type"], json!(["integer", "null", "string"]));
    }

    #[test]
    fn required_sorted_and_normalized() {
        let c = canonical(json!({ "required": ["z", "cafe\u{301}", "a"] }));
        assert_eq!(c["required"], json!(["a", "caf\u{e9}", "z"]));
    }

    #[test]
    fn numeric_constraints_collapse() {
        let parsed: Value =
            serde_json::from_str(r#"{"minimum": 1.0, "maxLength": 5.0, "maximum": 2.5}"#).unwrap();
        let c = canonical(parsed);
        assert_eq!(serde_json::to_string(&c["minimum"]).unwrap(), "1");
        assert_eq!(serde_json::to_string(&c["maxLength"]).unwrap(), "5");
        assert_eq!(c["maximum"], json!(2.5));
    }

    #[test]
    fn boolean_additional_properties_passes_through() {
        let c = canonical(json!({ "type": "object", "additionalProperties": false }));
        assert_eq!(c["additionalProperties"], json!(false));
    }

    #[test]
    fn self_reference_becomes_circular_sentinel() {
        let mut graph = SchemaGraph::with_root(SchemaNode::typed("object"));
        let root = graph.root();
        graph.set_property(root, "self", root);

        let c = SchemaCanonicalizer::canonicalize(&graph, Default::default());
        assert_eq!(c["properties"]["self"], json!({ "_circular": true }));
    }

    #[test]
    fn shared_subtree_is_not_a_cycle() {
        let mut graph = SchemaGraph::with_root(SchemaNode::typed("object"));
        let root = graph.root();
        let shared = graph.add_node(SchemaNode::typed("string"));
        graph.set_property(root, "a", shared);
        graph.set_property(root, "b", shared);

        let c = SchemaCanonicalizer::canonicalize(&graph, Default::default());
        assert_eq!(c["properties"]["a"], json!({ "type": "string" }));
        assert_eq!(c["properties"]["b"], json!({ "type": "string" }));
    }

    #[test]
    fn depth_limit_truncates() {
        let c = SchemaCanonicalizer::canonicalize(
            &SchemaGraph::from_value(&json!({
                "properties": { "a": { "properties": { "b": { "type": "string" } } } }
            })),
            FingerprintOptions::default().with_max_depth(1),
        );
        let truncated = &c["properties"]["a"]["properties"]["b"];
        assert_eq!(truncated["_truncated"], json!(true));
        assert_eq!(truncated["_depth"], json!(2));
    }
}
