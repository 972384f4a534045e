//! # Generator Configuration
//!
//! The typed, per-model configuration the rest of the pipeline consumes.
//! Produced by [`crate::parse_config`]; string-suffix keys never leak past
//! that boundary.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the client reconciles an optimistic update with the server response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimisticStrategy {
    /// Merge the server record into the optimistic one.
    #[default]
    Merge,
    /// Replace the optimistic record with the server record.
    Overwrite,
    /// Leave reconciliation to hand-written code.
    Manual,
}

impl OptimisticStrategy {
    /// Returns all strategies in canonical order.
    pub fn all() -> &'static [OptimisticStrategy] {
        &[Self::Merge, Self::Overwrite, Self::Manual]
    }

    /// The configuration spelling of this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Overwrite => "overwrite",
            Self::Manual => "manual",
        }
    }

    /// The legal spellings joined for error messages.
    pub fn legal_values() -> String {
        Self::all()
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl std::fmt::Display for OptimisticStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimisticStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s.trim())
            .ok_or_else(|| format!("'{s}' is not one of {}", Self::legal_values()))
    }
}

/// A `<model>Select` override after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOverride {
    /// Trimmed field names, in the order given.
    Fields(Vec<String>),
    /// The raw value had no list form; rejected by
    /// [`crate::validate_config`].
    Malformed {
        /// Shape of the value the host sent.
        found: String,
    },
}

/// Per-model overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOverrides {
    /// Fields to select for this model, if overridden.
    pub select: Option<SelectOverride>,
    /// Optimistic update reconciliation.
    pub optimistic_strategy: OptimisticStrategy,
    /// Whether list queries are paginated.
    pub pagination_enabled: bool,
}

impl ModelOverrides {
    /// The select override as a field list. `None` when there is no
    /// override or it is malformed.
    pub fn select_fields(&self) -> Option<&[String]> {
        match &self.select {
            Some(SelectOverride::Fields(fields)) => Some(fields),
            _ => None,
        }
    }
}

/// Validated-shape generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Where the emitters write generated sources.
    pub output: PathBuf,
    /// Module path generated code imports the data-access client from.
    pub data_source_import_path: String,
    /// Models to generate for, in configuration order, without duplicates.
    pub models: Vec<String>,
    /// Overrides keyed by model name. Every configured model has an entry.
    pub overrides: BTreeMap<String, ModelOverrides>,
}

impl GeneratorConfig {
    /// Overrides for a configured model.
    pub fn model(&self, name: &str) -> Option<&ModelOverrides> {
        self.overrides.get(name)
    }

    /// Whether the model is configured for generation.
    pub fn includes(&self, name: &str) -> bool {
        self.models.iter().any(|m| m == name)
    }

    /// Convenience lookup for a model's select override.
    pub fn select_fields(&self, name: &str) -> Option<&[String]> {
        self.model(name).and_then(ModelOverrides::select_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("merge".parse::<OptimisticStrategy>(), Ok(OptimisticStrategy::Merge));
        assert_eq!(" overwrite ".parse::<OptimisticStrategy>(), Ok(OptimisticStrategy::Overwrite));
        assert_eq!("manual".parse::<OptimisticStrategy>(), Ok(OptimisticStrategy::Manual));
        let err = "bogus".parse::<OptimisticStrategy>().unwrap_err();
        assert!(err.contains("merge|overwrite|manual"));
    }

    #[test]
    fn test_default_strategy_is_merge() {
        assert_eq!(OptimisticStrategy::default(), OptimisticStrategy::Merge);
        assert_eq!(ModelOverrides::default().optimistic_strategy, OptimisticStrategy::Merge);
    }

    #[test]
    fn test_malformed_select_has_no_fields() {
        let overrides = ModelOverrides {
            select: Some(SelectOverride::Malformed {
                found: "boolean".to_string(),
            }),
            ..ModelOverrides::default()
        };
        assert_eq!(overrides.select_fields(), None);
    }
}
