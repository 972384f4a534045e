//! # Schema
//!
//! The ordered set of models for one generation run. Model order is the
//! host's declaration order and is preserved everywhere it is observable.

use serde::{Deserialize, Serialize};

use crate::model::ModelDescriptor;

/// All models known to a generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    models: Vec<ModelDescriptor>,
}

impl Schema {
    /// Build a schema from models in declaration order.
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    /// Models in declaration order.
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Look up a model by exact name.
    pub fn model(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Whether a model with this exact name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.model(name).is_some()
    }

    /// Model names in declaration order.
    pub fn model_names(&self) -> Vec<String> {
        self.models.iter().map(|m| m.name.clone()).collect()
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true if the schema declares no models.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
