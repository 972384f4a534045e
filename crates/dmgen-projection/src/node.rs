//! # Projection Nodes
//!
//! A projection is a tree: each node names a model, the scalar fields to
//! fetch, relation fields included only as flat references, and relation
//! fields expanded into child nodes. Insertion order is preserved and a
//! field name appears at most once per node.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A relation field expanded into its own projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedProjection {
    /// Relation field on the parent model.
    pub field: String,
    /// Projection of the related model.
    pub node: ProjectionNode,
}

/// One level of a projection tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionNode {
    /// Model projected at this level.
    pub model: String,
    /// Scalar and enum fields.
    pub scalars: Vec<String>,
    /// Relation fields (and unrecognized names) included without
    /// expansion.
    pub references: Vec<String>,
    /// Expanded relation fields.
    pub nested: Vec<NestedProjection>,
}

impl ProjectionNode {
    /// An empty node for `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            scalars: Vec::new(),
            references: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Whether `name` already appears at this level.
    pub fn contains(&self, name: &str) -> bool {
        self.scalars.iter().any(|s| s == name)
            || self.references.iter().any(|r| r == name)
            || self.nested.iter().any(|n| n.field == name)
    }

    pub(crate) fn push_scalar(&mut self, name: &str) {
        if !self.contains(name) {
            self.scalars.push(name.to_string());
        }
    }

    pub(crate) fn push_reference(&mut self, name: &str) {
        if !self.contains(name) {
            self.references.push(name.to_string());
        }
    }

    pub(crate) fn push_nested(&mut self, field: &str, node: ProjectionNode) {
        if !self.contains(field) {
            self.nested.push(NestedProjection {
                field: field.to_string(),
                node,
            });
        }
    }

    /// The child projection for relation field `field`.
    pub fn nested(&self, field: &str) -> Option<&ProjectionNode> {
        self.nested
            .iter()
            .find(|n| n.field == field)
            .map(|n| &n.node)
    }

    /// Levels below this node: 0 for a node with no expanded relations.
    pub fn depth(&self) -> usize {
        self.nested
            .iter()
            .map(|n| 1 + n.node.depth())
            .max()
            .unwrap_or(0)
    }

    /// Number of fields selected at this level.
    pub fn len(&self) -> usize {
        self.scalars.len() + self.references.len() + self.nested.len()
    }

    /// Whether nothing is selected at this level.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as a JSON selection object:
    /// `{"id": true, "author": {"select": {"name": true}}}`.
    pub fn to_select_value(&self) -> Value {
        let mut select = Map::new();
        for name in self.scalars.iter().chain(&self.references) {
            select.insert(name.clone(), Value::Bool(true));
        }
        for nested in &self.nested {
            let mut child = Map::new();
            child.insert("select".to_string(), nested.node.to_select_value());
            select.insert(nested.field.clone(), Value::Object(child));
        }
        Value::Object(select)
    }
}
