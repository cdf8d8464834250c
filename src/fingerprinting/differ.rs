//! Schema Differ
//!
//! Walks two schema graphs in lockstep and emits path-addressed,
//! breaking-tagged [`SchemaChange`]s. The rules here are the compatibility
//! contract:
//!
//! | Change | Breaking when |
//! |---|---|
//! | required entry added / removed | added / never |
//! | property added / removed | newly required / always |
//! | type | always |
//! | format | undefined → defined only |
//! | enum | a previously allowed value disappears |
//! | minimum, minLength | new bound defined and larger (or no old bound) |
//! | maximum, maxLength | new bound defined and smaller (or no old bound) |
//! | pattern | a new pattern is defined |
//! | items on one side only | never |

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use serde_json::{json, Number, Value};

use crate::normalize::{canonicalize_value, normalize_key};
use crate::schema::{AdditionalProperties, NodeId, SchemaGraph, SchemaNode};

use super::types::{FingerprintOptions, SchemaChange, SchemaChangeType};

/// Compares schema graphs and classifies every difference
pub struct SchemaDiffer;

impl SchemaDiffer {
    /// Diff two graphs with default options
    pub fn diff(before: &SchemaGraph, after: &SchemaGraph) -> Vec<SchemaChange> {
        Self::diff_with(before, after, FingerprintOptions::default())
    }

    /// Diff two graphs with explicit options
    pub fn diff_with(
        before: &SchemaGraph,
        after: &SchemaGraph,
        options: FingerprintOptions,
    ) -> Vec<SchemaChange> {
        let roots = (before.root(), after.root());
        let mut walk = DiffWalk {
            before,
            after,
            options,
            visited: HashSet::from([roots]),
            changes: Vec::new(),
        };
        walk.diff_node(roots.0, roots.1, "", 0);
        walk.changes
    }
}

/// Per-call traversal state
struct DiffWalk<'a> {
    before: &'a SchemaGraph,
    after: &'a SchemaGraph,
    options: FingerprintOptions,
    /// Node pairs on the current path; re-entering one means a cycle
    visited: HashSet<(NodeId, NodeId)>,
    changes: Vec<SchemaChange>,
}

impl DiffWalk<'_> {
    fn diff_node(&mut self, b: NodeId, a: NodeId, path: &str, depth: usize) {
        let before = self.before.node(b);
        let after = self.after.node(a);

        self.diff_required(before, after, path);
        self.diff_type(before, after, path);
        self.diff_format(before, after, path);
        self.diff_description(before, after, path);
        self.diff_enum(before, after, path);
        self.diff_constraints(before, after, path);
        self.diff_additional_properties(before, after, path, depth);
        self.diff_properties(before, after, path, depth);
        self.diff_items(before, after, path, depth);
    }

    fn descend(&mut self, b: NodeId, a: NodeId, path: &str, depth: usize) {
        let child_depth = depth + 1;
        if child_depth > self.options.max_depth || self.visited.contains(&(b, a)) {
            return;
        }
        self.visited.insert((b, a));
        self.diff_node(b, a, path, child_depth);
        self.visited.remove(&(b, a));
    }

    fn push(
        &mut self,
        path: &str,
        change_type: SchemaChangeType,
        before: Option<Value>,
        after: Option<Value>,
        breaking: bool,
        description: String,
    ) {
        self.changes.push(SchemaChange::new(
            path,
            change_type,
            before,
            after,
            breaking,
            description,
        ));
    }

    fn diff_required(&mut self, before: &SchemaNode, after: &SchemaNode, path: &str) {
        let old = normalized_set(&before.required);
        let new = normalized_set(&after.required);

        let added: Vec<&String> = new.difference(&old).collect();
        let removed: Vec<&String> = old.difference(&new).collect();
        if added.is_empty() && removed.is_empty() {
            return;
        }

        let before_value = json!(before.required);
        let after_value = json!(after.required);

        if !added.is_empty() {
            self.push(
                path,
                SchemaChangeType::RequiredChanged,
                Some(before_value.clone()),
                Some(after_value.clone()),
                true,
                format!("Now required: {}", quoted_list(&added)),
            );
        }
        if !removed.is_empty() {
            self.push(
                path,
                SchemaChangeType::RequiredChanged,
                Some(before_value),
                Some(after_value),
                false,
                format!("No longer required: {}", quoted_list(&removed)),
            );
        }
    }

    fn diff_type(&mut self, before: &SchemaNode, after: &SchemaNode, path: &str) {
        let old = before.canonical_type();
        let new = after.canonical_type();
        if old == new {
            return;
        }
        let description = format!(
            "Type changed from '{}' to '{}'",
            old.as_deref().unwrap_or("any"),
            new.as_deref().unwrap_or("any")
        );
        self.push(
            path,
            SchemaChangeType::TypeChanged,
            old.map(Value::String),
            new.map(Value::String),
            true,
            description,
        );
    }

    /// Only undefined → defined is breaking; see the known-gap test below
    fn diff_format(&mut self, before: &SchemaNode, after: &SchemaNode, path: &str) {
        if before.format == after.format {
            return;
        }
        let breaking = before.format.is_none() && after.format.is_some();
        let description = match (&before.format, &after.format) {
            (None, Some(new)) => format!("Format '{}' added", new),
            (Some(old), None) => format!("Format '{}' removed", old),
            (Some(old), Some(new)) => format!("Format changed from '{}' to '{}'", old, new),
            (None, None) => return,
        };
        self.push(
            path,
            SchemaChangeType::FormatChanged,
            before.format.clone().map(Value::String),
            after.format.clone().map(Value::String),
            breaking,
            description,
        );
    }

    fn diff_description(&mut self, before: &SchemaNode, after: &SchemaNode, path: &str) {
        if before.description == after.description {
            return;
        }
        self.push(
            path,
            SchemaChangeType::DescriptionChanged,
            before.description.clone().map(Value::String),
            after.description.clone().map(Value::String),
            false,
            "Description changed".to_string(),
        );
    }

    fn diff_enum(&mut self, before: &SchemaNode, after: &SchemaNode, path: &str) {
        let old = before.enum_values.as_deref().map(enum_set);
        let new = after.enum_values.as_deref().map(enum_set);
        if old == new {
            return;
        }

        let (breaking, description) = match (&old, &new) {
            (Some(old), Some(new)) => {
                let removed: Vec<&String> = old.difference(new).collect();
                let added: Vec<&String> = new.difference(old).collect();
                let mut parts = Vec::new();
                if !removed.is_empty() {
                    parts.push(format!("removed {}", value_list(&removed)));
                }
                if !added.is_empty() {
                    parts.push(format!("added {}", value_list(&added)));
                }
                (
                    !removed.is_empty(),
                    format!("Enum values changed: {}", parts.join("; ")),
                )
            }
            (None, Some(_)) => (true, "Enum restriction added".to_string()),
            (Some(_), None) => (false, "Enum restriction removed".to_string()),
            (None, None) => return,
        };

        self.push(
            path,
            SchemaChangeType::EnumChanged,
            before.enum_values.clone().map(Value::Array),
            after.enum_values.clone().map(Value::Array),
            breaking,
            description,
        );
    }

    fn diff_constraints(&mut self, before: &SchemaNode, after: &SchemaNode, path: &str) {
        let lower = [
            ("minimum", &before.minimum, &after.minimum),
            ("minLength", &before.min_length, &after.min_length),
        ];
        for (name, old, new) in lower {
            self.diff_bound(path, name, old.as_ref(), new.as_ref(), Ordering::Greater);
        }

        let upper = [
            ("maximum", &before.maximum, &after.maximum),
            ("maxLength", &before.max_length, &after.max_length),
        ];
        for (name, old, new) in upper {
            self.diff_bound(path, name, old.as_ref(), new.as_ref(), Ordering::Less);
        }

        if before.pattern != after.pattern {
            self.push(
                path,
                SchemaChangeType::ConstraintChanged,
                before.pattern.clone().map(Value::String),
                after.pattern.clone().map(Value::String),
                after.pattern.is_some(),
                format!(
                    "Constraint 'pattern' changed from {} to {}",
                    display_opt(before.pattern.as_deref()),
                    display_opt(after.pattern.as_deref())
                ),
            );
        }

        let old_default = before.default.as_ref().map(canonicalize_value);
        let new_default = after.default.as_ref().map(canonicalize_value);
        if old_default != new_default {
            self.push(
                path,
                SchemaChangeType::ConstraintChanged,
                before.default.clone(),
                after.default.clone(),
                false,
                "Default value changed".to_string(),
            );
        }
    }

    /// `stricter` is the ordering of new vs old that tightens the bound
    fn diff_bound(
        &mut self,
        path: &str,
        name: &str,
        old: Option<&Number>,
        new: Option<&Number>,
        stricter: Ordering,
    ) {
        let old_f = old.and_then(Number::as_f64);
        let new_f = new.and_then(Number::as_f64);
        if old_f == new_f {
            return;
        }

        let breaking = match (old_f, new_f) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(o), Some(n)) => n.partial_cmp(&o) == Some(stricter),
        };

        self.push(
            path,
            SchemaChangeType::ConstraintChanged,
            old.cloned().map(Value::Number),
            new.cloned().map(Value::Number),
            breaking,
            format!(
                "Constraint '{}' changed from {} to {}",
                name,
                display_opt(old.map(|n| n.to_string()).as_deref()),
                display_opt(new.map(|n| n.to_string()).as_deref())
            ),
        );
    }

    /// Open (absent or `true`) < schema-valued < closed (`false`)
    fn diff_additional_properties(
        &mut self,
        before: &SchemaNode,
        after: &SchemaNode,
        path: &str,
        depth: usize,
    ) {
        if let (Some(AdditionalProperties::Schema(old)), Some(AdditionalProperties::Schema(new))) =
            (before.additional_properties, after.additional_properties)
        {
            self.descend(old, new, &join_path(path, "*"), depth);
            return;
        }

        let old = openness(before.additional_properties);
        let new = openness(after.additional_properties);
        if old == new {
            return;
        }
        self.push(
            path,
            SchemaChangeType::ConstraintChanged,
            Some(Value::String(old.1.to_string())),
            Some(Value::String(new.1.to_string())),
            new.0 > old.0,
            format!(
                "Constraint 'additionalProperties' changed from {} to {}",
                old.1, new.1
            ),
        );
    }

    fn diff_properties(&mut self, before: &SchemaNode, after: &SchemaNode, path: &str, depth: usize) {
        let old_required = normalized_set(&before.required);
        let new_required = normalized_set(&after.required);

        let old_props = normalized_properties(before);
        let new_props = normalized_properties(after);

        for (key, child) in &old_props {
            let child_path = join_path(path, key);
            match new_props.iter().find(|(k, _)| k == key) {
                Some((_, new_child)) => self.descend(*child, *new_child, &child_path, depth),
                None => self.push(
                    &child_path,
                    SchemaChangeType::PropertyRemoved,
                    self.before.node(*child).canonical_type().map(Value::String),
                    None,
                    true,
                    format!("Property '{}' removed", key),
                ),
            }
        }

        for (key, child) in &new_props {
            if old_props.iter().any(|(k, _)| k == key) {
                continue;
            }
            let newly_required = new_required.contains(key) && !old_required.contains(key);
            let description = if newly_required {
                format!("Required property '{}' added", key)
            } else {
                format!("Optional property '{}' added", key)
            };
            self.push(
                &join_path(path, key),
                SchemaChangeType::PropertyAdded,
                None,
                self.after.node(*child).canonical_type().map(Value::String),
                newly_required,
                description,
            );
        }
    }

    fn diff_items(&mut self, before: &SchemaNode, after: &SchemaNode, path: &str, depth: usize) {
        let items_path = format!("{}[]", path);
        match (before.items, after.items) {
            (Some(old), Some(new)) => self.descend(old, new, &items_path, depth),
            (Some(old), None) => self.push(
                &items_path,
                SchemaChangeType::PropertyRemoved,
                self.before.node(old).canonical_type().map(Value::String),
                None,
                false,
                "Array item type removed".to_string(),
            ),
            (None, Some(new)) => self.push(
                &items_path,
                SchemaChangeType::PropertyAdded,
                None,
                self.after.node(new).canonical_type().map(Value::String),
                false,
                "Array item type added".to_string(),
            ),
            (None, None) => {}
        }
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn normalized_set(names: &[String]) -> BTreeSet<String> {
    names.iter().map(|n| normalize_key(n)).collect()
}

/// Properties keyed by normalized name, first declared spelling wins
fn normalized_properties(node: &SchemaNode) -> Vec<(String, NodeId)> {
    let mut out: Vec<(String, NodeId)> = Vec::with_capacity(node.properties.len());
    for (raw, id) in &node.properties {
        let key = normalize_key(raw);
        if !out.iter().any(|(k, _)| *k == key) {
            out.push((key, *id));
        }
    }
    out
}

fn enum_set(values: &[Value]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| serde_json::to_string(&canonicalize_value(v)).unwrap_or_default())
        .collect()
}

fn openness(ap: Option<AdditionalProperties>) -> (u8, &'static str) {
    match ap {
        None | Some(AdditionalProperties::Allowed(true)) => (0, "open"),
        Some(AdditionalProperties::Schema(_)) => (1, "schema"),
        Some(AdditionalProperties::Allowed(false)) => (2, "closed"),
    }
}

fn quoted_list(names: &[&String]) -> String {
    names
        .iter()
        .map(|n| format!("'{}'", n))
        .collect::<Vec<_>>()
        .join(", ")
}

fn value_list(values: &[&String]) -> String {
    values
        .iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_opt(value: Option<&str>) -> String {
    value.map_or_else(|| "none".to_string(), |v| format!("'{}'", v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaNode;

    fn diff(before: Value, after: Value) -> Vec<SchemaChange> {
        SchemaDiffer::diff(
            &SchemaGraph::from_value(&before),
            &SchemaGraph::from_value(&after),
        )
    }

    fn only(changes: &[SchemaChange]) -> &SchemaChange {
        assert_eq!(changes.len(), 1, "expected one change, got {:?}", changes);
        &changes[0]
    }

    #[test]
    fn identical_schemas_have_no_changes() {
        let schema = json!({
            "type": "object",
            "properties": { "a": { "type": "string", "minLength": 1 } },
            "required": ["a"]
        });
        assert!(diff(schema.clone(), schema).is_empty());
    }

    #[test]
    fn required_addition_is_breaking() {
        let changes = diff(json!({ "required": ["a"] }), json!({ "required": ["a", "b"] }));
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::RequiredChanged);
        assert!(change.breaking);
        assert!(change.description.contains("'b'"));
        assert_eq!(change.path, "");
    }

    #[test]
    fn required_removal_is_not_breaking() {
        let changes = diff(json!({ "required": ["a", "foo"] }), json!({ "required": ["a"] }));
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::RequiredChanged);
        assert!(!change.breaking);
        assert!(change.description.contains("foo"));
    }

    #[test]
    fn required_addition_and_removal_report_one_each() {
        let changes = diff(
            json!({ "required": ["a", "b"] }),
            json!({ "required": ["c", "d"] }),
        );
        assert_eq!(changes.len(), 2);
        assert!(changes[0].breaking);
        assert!(!changes[1].breaking);
    }

    #[test]
    fn optional_property_added_is_not_breaking() {
        let changes = diff(
            json!({ "properties": { "a": { "type": "string" } } }),
            json!({ "properties": { "a": { "type": "string" }, "b": { "type": "number" } } }),
        );
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::PropertyAdded);
        assert_eq!(change.path, "b");
        assert!(!change.breaking);
        assert_eq!(change.after, Some(json!("number")));
    }

    #[test]
    fn required_property_added_is_breaking() {
        let changes = diff(
            json!({ "properties": {} }),
            json!({ "properties": { "b": { "type": "number" } }, "required": ["b"] }),
        );
        assert_eq!(changes.len(), 2);
        let added = changes
            .iter()
            .find(|c| c.change_type == SchemaChangeType::PropertyAdded)
            .unwrap();
        assert!(added.breaking);
    }

    #[test]
    fn property_removed_is_breaking() {
        let changes = diff(
            json!({ "properties": { "a": { "type": "string" }, "b": { "type": "string" } } }),
            json!({ "properties": { "a": { "type": "string" } } }),
        );
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::PropertyRemoved);
        assert_eq!(change.path, "b");
        assert!(change.breaking);
    }

    #[test]
    fn type_change_uses_canonical_union_string() {
        let unchanged = diff(
            json!({ "type": ["string", "number"] }),
            json!({ "type": ["number", "string"] }),
        );
        assert!(unchanged.is_empty());

        let changes = diff(
            json!({ "type": ["string", "number"] }),
            json!({ "type": ["string", "null"] }),
        );
        let change = only(&changes);
        assert_eq!(change.before, Some(json!("number|string")));
        assert_eq!(change.after, Some(json!("null|string")));
        assert!(change.breaking);
    }

    #[test]
    fn nested_paths_use_dots_and_brackets() {
        let changes = diff(
            json!({ "properties": { "user": { "properties": {
                "tags": { "type": "array", "items": { "type": "string" } }
            } } } }),
            json!({ "properties": { "user": { "properties": {
                "tags": { "type": "array", "items": { "type": "integer" } }
            } } } }),
        );
        let change = only(&changes);
        assert_eq!(change.path, "user.tags[]");
        assert_eq!(change.change_type, SchemaChangeType::TypeChanged);
    }

    #[test]
    fn nested_required_compared_per_path() {
        let changes = diff(
            json!({ "properties": { "opts": { "properties": {}, "required": [] } } }),
            json!({ "properties": { "opts": { "properties": {}, "required": ["x"] } } }),
        );
        let change = only(&changes);
        assert_eq!(change.path, "opts");
        assert_eq!(change.change_type, SchemaChangeType::RequiredChanged);
        assert!(change.breaking);
    }

    #[test]
    fn format_added_is_breaking() {
        let change = diff(json!({ "type": "string" }), json!({ "type": "string", "format": "email" }));
        assert!(only(&change).breaking);
    }

    #[test]
    fn format_removed_is_not_breaking() {
        let change = diff(json!({ "format": "email" }), json!({}));
        assert!(!only(&change).breaking);
    }

    #[test]
    fn known_gap_format_to_format_is_not_breaking() {
        // date -> date-time rejects previously valid input, yet the policy
        // only flags undefined -> defined. Kept for baseline compatibility.
        let changes = diff(json!({ "format": "date" }), json!({ "format": "date-time" }));
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::FormatChanged);
        assert!(!change.breaking);
    }

    #[test]
    fn enum_value_removed_is_breaking() {
        let changes = diff(json!({ "enum": ["a", "b", "c"] }), json!({ "enum": ["a", "b"] }));
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::EnumChanged);
        assert!(change.breaking);
        assert!(change.description.contains("\"c\""));
    }

    #[test]
    fn enum_value_added_is_not_breaking() {
        let changes = diff(json!({ "enum": ["a"] }), json!({ "enum": ["b", "a"] }));
        assert!(!only(&changes).breaking);
    }

    #[test]
    fn enum_reordering_is_not_a_change() {
        assert!(diff(json!({ "enum": [1, 2, 3] }), json!({ "enum": [3, 1, 2.0] })).is_empty());
    }

    #[test]
    fn enum_introduced_is_breaking() {
        let changes = diff(json!({ "type": "string" }), json!({ "type": "string", "enum": ["x"] }));
        assert!(only(&changes).breaking);
    }

    #[test]
    fn minimum_raised_is_breaking() {
        let changes = diff(json!({ "minimum": 5 }), json!({ "minimum": 10 }));
        assert!(only(&changes).breaking);
    }

    #[test]
    fn minimum_lowered_is_not_breaking() {
        let changes = diff(json!({ "minimum": 10 }), json!({ "minimum": 5 }));
        assert!(!only(&changes).breaking);
    }

    #[test]
    fn bound_added_is_breaking_and_removed_is_not() {
        assert!(only(&diff(json!({}), json!({ "minLength": 1 }))).breaking);
        assert!(only(&diff(json!({}), json!({ "maxLength": 10 }))).breaking);
        assert!(!only(&diff(json!({ "maximum": 10 }), json!({}))).breaking);
    }

    #[test]
    fn maximum_mirror_logic() {
        assert!(only(&diff(json!({ "maximum": 10 }), json!({ "maximum": 5 }))).breaking);
        assert!(!only(&diff(json!({ "maxLength": 5 }), json!({ "maxLength": 10 }))).breaking);
    }

    #[test]
    fn integral_float_bound_is_not_a_change() {
        let before: Value = serde_json::from_str(r#"{"minimum": 1}"#).unwrap();
        let after: Value = serde_json::from_str(r#"{"minimum": 1.0}"#).unwrap();
        assert!(diff(before, after).is_empty());
    }

    #[test]
    fn pattern_changes() {
        assert!(only(&diff(json!({}), json!({ "pattern": "^a" }))).breaking);
        assert!(only(&diff(json!({ "pattern": "^a" }), json!({ "pattern": "^b" }))).breaking);
        assert!(!only(&diff(json!({ "pattern": "^a" }), json!({}))).breaking);
    }

    #[test]
    fn default_change_is_not_breaking() {
        let changes = diff(json!({ "default": 1 }), json!({ "default": 2 }));
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::ConstraintChanged);
        assert!(!change.breaking);
    }

    #[test]
    fn closing_additional_properties_is_breaking() {
        let closed = diff(json!({}), json!({ "additionalProperties": false }));
        assert!(only(&closed).breaking);

        let opened = diff(json!({ "additionalProperties": false }), json!({ "additionalProperties": true }));
        assert!(!only(&opened).breaking);

        assert!(diff(json!({}), json!({ "additionalProperties": true })).is_empty());
    }

    #[test]
    fn additional_properties_schemas_are_diffed() {
        let changes = diff(
            json!({ "type": "object", "additionalProperties": { "type": "string" } }),
            json!({ "type": "object", "additionalProperties": { "type": "integer" } }),
        );
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::TypeChanged);
        assert_eq!(change.path, "*");
        assert!(change.breaking);

        let nested = diff(
            json!({ "properties": { "tags": { "additionalProperties": { "type": "string" } } } }),
            json!({ "properties": { "tags": { "additionalProperties": { "type": "string", "minLength": 1 } } } }),
        );
        assert_eq!(only(&nested).path, "tags.*");
    }

    #[test]
    fn description_change_is_not_breaking() {
        let changes = diff(json!({ "description": "old" }), json!({ "description": "new" }));
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::DescriptionChanged);
        assert!(!change.breaking);
    }

    #[test]
    fn one_sided_items_is_not_breaking() {
        let added = diff(json!({ "type": "array" }), json!({ "type": "array", "items": { "type": "string" } }));
        let change = only(&added);
        assert_eq!(change.path, "[]");
        assert_eq!(change.change_type, SchemaChangeType::PropertyAdded);
        assert!(!change.breaking);

        let removed = diff(json!({ "type": "array", "items": { "type": "string" } }), json!({ "type": "array" }));
        let change = only(&removed);
        assert_eq!(change.change_type, SchemaChangeType::PropertyRemoved);
        assert!(!change.breaking);
    }

    #[test]
    fn nfd_property_matches_nfc_property() {
        let changes = diff(
            json!({ "properties": { "caf\u{e9}": { "type": "string" } } }),
            json!({ "properties": { "cafe\u{301}": { "type": "string" } } }),
        );
        assert!(changes.is_empty());
    }

    #[test]
    fn cyclic_graphs_terminate() {
        let mut before = SchemaGraph::with_root(SchemaNode::typed("object"));
        let root = before.root();
        before.set_property(root, "self", root);

        let mut after = before.clone();
        let after_root = after.root();
        after.node_mut(after_root).description = Some("changed".into());

        let changes = SchemaDiffer::diff(&before, &after);
        let change = only(&changes);
        assert_eq!(change.change_type, SchemaChangeType::DescriptionChanged);
    }

    #[test]
    fn depth_limit_stops_descent() {
        let before = json!({ "properties": { "a": { "properties": { "b": { "type": "string" } } } } });
        let after = json!({ "properties": { "a": { "properties": { "b": { "type": "number" } } } } });

        let shallow = SchemaDiffer::diff_with(
            &SchemaGraph::from_value(&before),
            &SchemaGraph::from_value(&after),
            FingerprintOptions::default().with_max_depth(1),
        );
        assert!(shallow.is_empty());

        let full = SchemaDiffer::diff(
            &SchemaGraph::from_value(&before),
            &SchemaGraph::from_value(&after),
        );
        assert_eq!(only(&full).path, "a.b");
    }
}
