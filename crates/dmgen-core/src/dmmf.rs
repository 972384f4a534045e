//! # Host Metadata Ingestion
//!
//! Deserializes the host's DMMF-shaped JSON datamodel into a [`Schema`].
//!
//! ## Wire Shape
//!
//! ```json
//! { "models": [ { "name": "Post", "fields": [
//!     { "name": "id", "kind": "scalar", "type": "Int", "isId": true,
//!       "isRequired": true, "default": { "name": "autoincrement", "args": [] } },
//!     { "name": "author", "kind": "object", "type": "User",
//!       "relationName": "PostToUser", "relationFromFields": ["authorId"] }
//! ] } ] }
//! ```
//!
//! Fields the engine does not consume are ignored, so newer host payloads
//! keep deserializing.

use serde::Deserialize;
use serde_json::Value;

use crate::error::GeneratorError;
use crate::model::{DeclaredDefault, FieldDescriptor, ModelDescriptor, ScalarType};
use crate::schema::Schema;

/// Native column types whose first argument is a maximum length.
const LENGTH_BOUNDED_NATIVE_TYPES: &[&str] = &["VarChar", "Char", "NVarChar", "NChar"];

#[derive(Debug, Deserialize)]
struct RawDatamodel {
    models: Vec<RawModel>,
}

#[derive(Debug, Deserialize)]
struct RawModel {
    name: String,
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawFieldKind {
    Scalar,
    Enum,
    Object,
    Unsupported,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDefault {
    Function {
        name: String,
        #[serde(default)]
        args: Vec<Value>,
    },
    Literal(Value),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    kind: RawFieldKind,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    is_required: bool,
    #[serde(default)]
    is_list: bool,
    #[serde(default)]
    is_unique: bool,
    #[serde(default)]
    is_id: bool,
    #[serde(default)]
    relation_name: Option<String>,
    #[serde(default)]
    relation_from_fields: Option<Vec<String>>,
    #[serde(default)]
    default: Option<RawDefault>,
    #[serde(default)]
    is_updated_at: bool,
    #[serde(default)]
    native_type: Option<(String, Vec<String>)>,
}

impl RawField {
    fn scalar_type(&self) -> ScalarType {
        match self.kind {
            RawFieldKind::Object => ScalarType::Relation(self.type_name.clone()),
            RawFieldKind::Enum => ScalarType::Enum(self.type_name.clone()),
            RawFieldKind::Unsupported => ScalarType::Unsupported(self.type_name.clone()),
            RawFieldKind::Scalar => match self.type_name.as_str() {
                "String" => ScalarType::String,
                "Int" | "BigInt" => ScalarType::Int,
                "Float" | "Decimal" => ScalarType::Float,
                "Boolean" => ScalarType::Boolean,
                "DateTime" => ScalarType::DateTime,
                "Json" => ScalarType::Json,
                other => ScalarType::Other(other.to_string()),
            },
        }
    }

    fn max_length(&self) -> Option<u32> {
        let (name, args) = self.native_type.as_ref()?;
        if !LENGTH_BOUNDED_NATIVE_TYPES.contains(&name.as_str()) {
            return None;
        }
        args.first()?.trim().parse().ok()
    }

    fn into_descriptor(self) -> FieldDescriptor {
        let scalar_type = self.scalar_type();
        let max_length = self.max_length();
        let is_relation = scalar_type.is_relation();

        let default = self.default.map(|raw| match raw {
            RawDefault::Function { name, args } => DeclaredDefault::Function { name, args },
            RawDefault::Literal(value) => DeclaredDefault::Literal { value },
        });

        FieldDescriptor {
            name: self.name,
            scalar_type,
            is_required: self.is_required,
            is_list: self.is_list,
            is_unique: self.is_unique,
            is_id: self.is_id,
            relation_name: if is_relation { self.relation_name } else { None },
            foreign_key_fields: if is_relation {
                self.relation_from_fields.unwrap_or_default()
            } else {
                Vec::new()
            },
            default,
            is_updated_at: self.is_updated_at,
            max_length,
        }
    }
}

impl Schema {
    /// Deserialize a schema from the host's DMMF-shaped JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Metadata`] if the value does not have the
    /// expected shape.
    pub fn from_dmmf_value(value: Value) -> Result<Self, GeneratorError> {
        let raw: RawDatamodel = serde_json::from_value(value)?;
        Ok(Self::from_raw(raw))
    }

    /// Deserialize a schema from the host's DMMF-shaped JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Metadata`] if the text is not valid JSON
    /// or does not have the expected shape.
    pub fn from_dmmf_json(json: &str) -> Result<Self, GeneratorError> {
        let raw: RawDatamodel = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawDatamodel) -> Self {
        Self::new(
            raw.models
                .into_iter()
                .map(|m| {
                    ModelDescriptor::new(
                        m.name,
                        m.fields.into_iter().map(RawField::into_descriptor).collect(),
                    )
                })
                .collect(),
        )
    }
}
