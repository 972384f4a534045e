//! # Model & Field Descriptors
//!
//! Immutable description of the data model as supplied by the host. A
//! [`ModelDescriptor`] is created once per generation run and never
//! mutated; every analysis downstream borrows it.
//!
//! ## Ownership Invariant
//!
//! A relation field with a non-empty `foreign_key_fields` list is the
//! *owning* side of its relation. A relation field with no foreign key
//! fields that is a list is the *non-owning* collection side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relation::Cardinality;

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ScalarType {
    /// Text.
    String,
    /// Integer (including big integers).
    Int,
    /// Floating point or decimal.
    Float,
    /// Boolean.
    Boolean,
    /// Date and time.
    DateTime,
    /// Arbitrary JSON document.
    Json,
    /// A user-declared enum, by name.
    Enum(String),
    /// A relation to another model, by model name.
    Relation(String),
    /// A host type the engine does not interpret (e.g. `Bytes`).
    Other(String),
    /// An `Unsupported("...")` column, by native type. The query client
    /// cannot read or write it.
    Unsupported(String),
}

impl ScalarType {
    /// Whether this is a relation to another model.
    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(_))
    }

    /// Whether this is an enum type.
    pub fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Whether the query client can select a field of this type.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// The target model of a relation type.
    pub fn relation_target(&self) -> Option<&str> {
        match self {
            Self::Relation(model) => Some(model),
            _ => None,
        }
    }
}

/// A default value as declared in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclaredDefault {
    /// A literal value (`@default("draft")`, `@default(0)`).
    Literal {
        /// The literal as JSON.
        value: Value,
    },
    /// A generator function (`@default(now())`, `@default(uuid())`).
    Function {
        /// Function name as written in the schema.
        name: String,
        /// Function arguments, if any.
        #[serde(default)]
        args: Vec<Value>,
    },
}

impl DeclaredDefault {
    /// A literal default.
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal {
            value: value.into(),
        }
    }

    /// A generator-function default without arguments.
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Canonical function name: trimmed, lowercased, call parentheses
    /// stripped. `None` for literal defaults.
    pub fn function_name(&self) -> Option<String> {
        match self {
            Self::Function { name, .. } => {
                let name = name.trim();
                let name = name.strip_suffix("()").unwrap_or(name);
                Some(name.to_ascii_lowercase())
            }
            Self::Literal { .. } => None,
        }
    }
}

/// One field of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as declared in the schema.
    pub name: String,
    /// Declared type.
    pub scalar_type: ScalarType,
    /// Whether a value must always be present.
    pub is_required: bool,
    /// Whether the field holds a list.
    pub is_list: bool,
    /// Whether the field carries a uniqueness constraint.
    pub is_unique: bool,
    /// Whether the field is the model's identifier.
    pub is_id: bool,
    /// Token pairing both sides of a relation. Relation fields only.
    pub relation_name: Option<String>,
    /// Ordered local fields forming the foreign key. Empty unless this is
    /// the owning side of a relation.
    #[serde(default)]
    pub foreign_key_fields: Vec<String>,
    /// Declared default value.
    pub default: Option<DeclaredDefault>,
    /// Whether the schema flags this field as maintained on every update.
    pub is_updated_at: bool,
    /// Declared maximum length, from the native column type.
    pub max_length: Option<u32>,
}

impl FieldDescriptor {
    /// A required, single-valued field with no attributes.
    pub fn new(name: impl Into<String>, scalar_type: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar_type,
            is_required: true,
            is_list: false,
            is_unique: false,
            is_id: false,
            relation_name: None,
            foreign_key_fields: Vec::new(),
            default: None,
            is_updated_at: false,
            max_length: None,
        }
    }

    /// A relation field to `target`, paired through `relation_name`.
    /// Pass the local foreign-key fields for the owning side, or an empty
    /// slice for the non-owning side.
    pub fn relation(
        name: impl Into<String>,
        target: impl Into<String>,
        relation_name: impl Into<String>,
        foreign_key_fields: &[&str],
    ) -> Self {
        let mut field = Self::new(name, ScalarType::Relation(target.into()));
        field.relation_name = Some(relation_name.into());
        field.foreign_key_fields = foreign_key_fields.iter().map(|f| f.to_string()).collect();
        field
    }

    /// Mark the field optional.
    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    /// Mark the field as a list.
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Mark the field unique.
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Mark the field as the identifier.
    pub fn id(mut self) -> Self {
        self.is_id = true;
        self
    }

    /// Attach a declared default.
    pub fn with_default(mut self, default: DeclaredDefault) -> Self {
        self.default = Some(default);
        self
    }

    /// Flag the field as maintained on every update.
    pub fn updated_at(mut self) -> Self {
        self.is_updated_at = true;
        self
    }

    /// Declare a maximum length.
    pub fn max_length(mut self, max: u32) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Whether this field is a relation to another model.
    pub fn is_relation(&self) -> bool {
        self.scalar_type.is_relation()
    }

    /// The related model, for relation fields.
    pub fn related_model(&self) -> Option<&str> {
        self.scalar_type.relation_target()
    }

    /// Whether this field is the owning side of a relation.
    pub fn is_owning(&self) -> bool {
        self.is_relation() && !self.foreign_key_fields.is_empty()
    }

    /// Whether a default value is declared.
    pub fn has_default_value(&self) -> bool {
        self.default.is_some()
    }

    /// Whether the default is a database auto-increment sequence.
    pub fn is_auto_increment(&self) -> bool {
        self.default
            .as_ref()
            .and_then(DeclaredDefault::function_name)
            .is_some_and(|name| name == "autoincrement")
    }

    /// Cardinality from this side, for relation fields.
    pub fn relation_cardinality(&self) -> Option<Cardinality> {
        self.is_relation()
            .then(|| Cardinality::classify(self.is_owning(), self.is_list))
    }
}

/// A model and its ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Model name as declared in the schema.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
}

impl ModelDescriptor {
    /// Create a model from its fields.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Relation fields in declaration order.
    pub fn relation_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    /// Selectable non-relation fields (scalars, enums, unknown host types)
    /// in declaration order. `Unsupported` columns are left out.
    pub fn scalar_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(|f| !f.is_relation() && f.scalar_type.is_selectable())
    }

    /// The identifier field, if one is declared.
    pub fn id_field(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.is_id)
    }
}
