//! # Error Types — Generator Error Taxonomy
//!
//! Defines the errors a generation run can report. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Configuration errors carry the offending key so the host can point
//!   the user at the exact setting.
//! - Unknown-model errors carry the full list of unknown names, not just
//!   the first one found.
//! - Only configuration resolution and metadata ingestion fail. The
//!   analyzers and the projection synthesizer degrade to safe defaults
//!   instead of returning errors.

use thiserror::Error;

/// Top-level error type for a generation run.
///
/// Every variant is terminal: the run must abort so that a partial,
/// inconsistent configuration never reaches projection synthesis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// A required configuration key is missing, or an override carries an
    /// illegal value.
    #[error("configuration error for key '{key}': {reason}")]
    Configuration {
        /// The configuration key at fault (e.g. `postOptimistic`).
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration references models that do not exist in the schema.
    #[error("models not found in schema: {}", .models.join(", "))]
    ModelNotFound {
        /// Every unknown model name, in configuration order.
        models: Vec<String>,
    },

    /// The host-supplied schema metadata or configuration payload could not
    /// be deserialized.
    #[error("invalid host metadata: {0}")]
    Metadata(String),
}

impl GeneratorError {
    /// Shorthand for a [`GeneratorError::Configuration`] error.
    pub fn configuration(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// The configuration key this error names, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Configuration { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GeneratorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Metadata(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_names_key() {
        let err = GeneratorError::configuration("postOptimistic", "bad value");
        assert_eq!(err.key(), Some("postOptimistic"));
        assert!(err.to_string().contains("postOptimistic"));
    }

    #[test]
    fn test_model_not_found_lists_all_names() {
        let err = GeneratorError::ModelNotFound {
            models: vec!["Ghost".to_string(), "Phantom".to_string()],
        };
        assert_eq!(err.key(), None);
        assert_eq!(
            err.to_string(),
            "models not found in schema: Ghost, Phantom"
        );
    }

    #[test]
    fn test_json_error_becomes_metadata() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GeneratorError = json_err.into();
        assert!(matches!(err, GeneratorError::Metadata(_)));
    }
}
