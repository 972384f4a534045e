//! # Configuration Resolution
//!
//! Parses the host's flat configuration bag into a [`GeneratorConfig`].
//!
//! ## Key Conventions
//!
//! | Key | Value | Required |
//! |-----|-------|----------|
//! | `output` | output directory | yes |
//! | `models` | list, or comma-delimited string | yes |
//! | `importPath` | data-source import specifier | no |
//! | `<model>Select` | list, or comma-delimited string | no |
//! | `<model>Optimistic` | `merge` \| `overwrite` \| `manual` | no |
//! | `<model>Pagination` | boolean, or `"true"`/`"false"` | no |
//!
//! `<model>` is the model name lowercased. Override keys are only consulted
//! for models listed in `models`; anything else is ignored so that older
//! engines accept newer configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dmgen_core::GeneratorError;

use crate::config::{GeneratorConfig, ModelOverrides, OptimisticStrategy, SelectOverride};
use crate::import_path::{resolve_import_path, DEFAULT_DATA_SOURCE_IMPORT};
use crate::raw::{RawConfig, RawValue};

/// Required: output directory.
pub const OUTPUT_KEY: &str = "output";
/// Required: models to generate for.
pub const MODELS_KEY: &str = "models";
/// Optional: data-source import specifier.
pub const IMPORT_PATH_KEY: &str = "importPath";

/// Suffix of per-model select overrides.
pub const SELECT_SUFFIX: &str = "Select";
/// Suffix of per-model optimistic strategy overrides.
pub const OPTIMISTIC_SUFFIX: &str = "Optimistic";
/// Suffix of per-model pagination overrides.
pub const PAGINATION_SUFFIX: &str = "Pagination";

const OVERRIDE_SUFFIXES: &[&str] = &[SELECT_SUFFIX, OPTIMISTIC_SUFFIX, PAGINATION_SUFFIX];

/// The override key for `model` with `suffix`, e.g. `postSelect`.
pub fn override_key(model: &str, suffix: &str) -> String {
    format!("{}{suffix}", model.to_lowercase())
}

/// Parse a raw configuration bag.
///
/// `schema_model_names` is only used to report override keys that target a
/// schema model left out of `models`; membership is enforced separately by
/// [`crate::validate_config`]. `schema_path` anchors a relative
/// `importPath` override.
///
/// # Errors
///
/// Returns [`GeneratorError::Configuration`] naming the key when `output`
/// or `models` is missing or empty, when an optimistic strategy is not one
/// of `merge|overwrite|manual`, when a pagination flag is not a boolean,
/// or when a relative `importPath` cannot be rebased onto `output` without
/// knowing the working directory.
pub fn parse_config(
    raw: &RawConfig,
    schema_model_names: &[String],
    schema_path: &Path,
) -> Result<GeneratorConfig, GeneratorError> {
    let output = parse_output(raw)?;
    let models = parse_models(raw)?;

    let data_source_import_path = match raw.get(IMPORT_PATH_KEY) {
        None => DEFAULT_DATA_SOURCE_IMPORT.to_string(),
        Some(RawValue::Text(spec)) if !spec.trim().is_empty() => {
            resolve_import_path(spec.trim(), schema_path, &output).ok_or_else(|| {
                GeneratorError::configuration(
                    IMPORT_PATH_KEY,
                    format!(
                        "cannot rebase {} from {} onto {} without the working directory",
                        spec.trim(),
                        schema_path.display(),
                        output.display()
                    ),
                )
            })?
        }
        Some(other) => {
            return Err(GeneratorError::configuration(
                IMPORT_PATH_KEY,
                format!("expected a non-empty string, found {}", other.shape()),
            ))
        }
    };

    let mut overrides = BTreeMap::new();
    for model in &models {
        overrides.insert(model.clone(), parse_overrides(raw, model)?);
    }

    report_ignored_keys(raw, &models, schema_model_names);

    Ok(GeneratorConfig {
        output,
        data_source_import_path,
        models,
        overrides,
    })
}

fn parse_output(raw: &RawConfig) -> Result<PathBuf, GeneratorError> {
    match raw.get(OUTPUT_KEY) {
        None => Err(GeneratorError::configuration(
            OUTPUT_KEY,
            "missing required key",
        )),
        Some(RawValue::Text(path)) if !path.trim().is_empty() => Ok(PathBuf::from(path.trim())),
        Some(other) => Err(GeneratorError::configuration(
            OUTPUT_KEY,
            format!("expected a non-empty path string, found {}", other.shape()),
        )),
    }
}

fn parse_models(raw: &RawConfig) -> Result<Vec<String>, GeneratorError> {
    let value = raw
        .get(MODELS_KEY)
        .ok_or_else(|| GeneratorError::configuration(MODELS_KEY, "missing required key"))?;

    let listed = value.to_list().ok_or_else(|| {
        GeneratorError::configuration(
            MODELS_KEY,
            format!("expected a list or comma-delimited string, found {}", value.shape()),
        )
    })?;

    let mut models: Vec<String> = Vec::with_capacity(listed.len());
    for name in listed {
        if !models.contains(&name) {
            models.push(name);
        }
    }

    if models.is_empty() {
        return Err(GeneratorError::configuration(
            MODELS_KEY,
            "must name at least one model",
        ));
    }
    Ok(models)
}

fn parse_overrides(raw: &RawConfig, model: &str) -> Result<ModelOverrides, GeneratorError> {
    let select_key = override_key(model, SELECT_SUFFIX);
    let select = raw.get(&select_key).map(|value| match value.to_list() {
        Some(fields) => SelectOverride::Fields(fields),
        None => SelectOverride::Malformed {
            found: value.shape().to_string(),
        },
    });

    let optimistic_key = override_key(model, OPTIMISTIC_SUFFIX);
    let optimistic_strategy = match raw.get(&optimistic_key) {
        None => OptimisticStrategy::default(),
        Some(RawValue::Text(text)) => text
            .parse::<OptimisticStrategy>()
            .map_err(|reason: String| GeneratorError::configuration(&optimistic_key, reason))?,
        Some(other) => {
            return Err(GeneratorError::configuration(
                &optimistic_key,
                format!(
                    "expected one of {}, found {}",
                    OptimisticStrategy::legal_values(),
                    other.shape()
                ),
            ))
        }
    };

    let pagination_key = override_key(model, PAGINATION_SUFFIX);
    let pagination_enabled = match raw.get(&pagination_key) {
        None => false,
        Some(RawValue::Bool(flag)) => *flag,
        Some(RawValue::Text(text)) if text.trim().eq_ignore_ascii_case("true") => true,
        Some(RawValue::Text(text)) if text.trim().eq_ignore_ascii_case("false") => false,
        Some(other) => {
            return Err(GeneratorError::configuration(
                &pagination_key,
                format!("expected a boolean, found {}", describe(other)),
            ))
        }
    };

    Ok(ModelOverrides {
        select,
        optimistic_strategy,
        pagination_enabled,
    })
}

fn describe(value: &RawValue) -> String {
    match value {
        RawValue::Text(text) => format!("'{text}'"),
        other => other.shape().to_string(),
    }
}

/// Emit a debug event for override keys aimed at a schema model that is
/// not configured. Such keys are ignored, not rejected.
fn report_ignored_keys(raw: &RawConfig, models: &[String], schema_model_names: &[String]) {
    for key in raw.keys() {
        for suffix in OVERRIDE_SUFFIXES {
            let Some(prefix) = key.strip_suffix(*suffix) else {
                continue;
            };
            let unconfigured = schema_model_names
                .iter()
                .filter(|name| name.to_lowercase() == prefix)
                .find(|name| !models.contains(name));
            if let Some(model) = unconfigured {
                tracing::debug!(key, model = %model, "ignoring override for model not listed in `models`");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn schema_names() -> Vec<String> {
        vec!["Post".to_string(), "User".to_string(), "Comment".to_string()]
    }

    fn parse(raw: &RawConfig) -> Result<GeneratorConfig, GeneratorError> {
        parse_config(raw, &schema_names(), Path::new("prisma/schema.prisma"))
    }

    fn base() -> RawConfig {
        RawConfig::new()
            .with("output", "src/generated")
            .with("models", "Post,User")
    }

    #[test]
    fn test_minimal_config() {
        let config = parse(&base()).unwrap();
        assert_eq!(config.output, PathBuf::from("src/generated"));
        assert_eq!(config.models, vec!["Post", "User"]);
        assert_eq!(config.data_source_import_path, DEFAULT_DATA_SOURCE_IMPORT);
        let post = config.model("Post").unwrap();
        assert_eq!(post.select, None);
        assert_eq!(post.optimistic_strategy, OptimisticStrategy::Merge);
        assert!(!post.pagination_enabled);
    }

    #[test]
    fn test_select_override_from_string() {
        let raw = base().with("postSelect", "id,title,author");
        let config = parse(&raw).unwrap();
        assert_eq!(
            config.select_fields("Post").unwrap(),
            &["id".to_string(), "title".to_string(), "author".to_string()]
        );
        assert_eq!(config.select_fields("User"), None);
    }

    #[test]
    fn test_select_override_from_list() {
        let raw = base().with("userSelect", vec![" id ", "email"]);
        let config = parse(&raw).unwrap();
        assert_eq!(
            config.select_fields("User").unwrap(),
            &["id".to_string(), "email".to_string()]
        );
    }

    #[test]
    fn test_boolean_select_kept_as_malformed() {
        let raw = base().with("postSelect", true);
        let config = parse(&raw).unwrap();
        assert_eq!(
            config.model("Post").unwrap().select,
            Some(SelectOverride::Malformed {
                found: "boolean".to_string()
            })
        );
    }

    #[test]
    fn test_bogus_optimistic_strategy_names_key() {
        let raw = RawConfig::new()
            .with("output", "out")
            .with("models", "Post")
            .with("postOptimistic", "bogus");
        let err = parse(&raw).unwrap_err();
        assert_eq!(err.key(), Some("postOptimistic"));
        assert!(err.to_string().contains("merge|overwrite|manual"));
    }

    #[test]
    fn test_optimistic_strategy_parsed() {
        let raw = base().with("userOptimistic", "overwrite");
        let config = parse(&raw).unwrap();
        assert_eq!(
            config.model("User").unwrap().optimistic_strategy,
            OptimisticStrategy::Overwrite
        );
    }

    #[test]
    fn test_non_string_optimistic_rejected() {
        let raw = base().with("postOptimistic", false);
        let err = parse(&raw).unwrap_err();
        assert_eq!(err.key(), Some("postOptimistic"));
    }

    #[test]
    fn test_pagination_flags() {
        let raw = base()
            .with("postPagination", true)
            .with("userPagination", "TRUE");
        let config = parse(&raw).unwrap();
        assert!(config.model("Post").unwrap().pagination_enabled);
        assert!(config.model("User").unwrap().pagination_enabled);

        let err = parse(&base().with("postPagination", "sometimes")).unwrap_err();
        assert_eq!(err.key(), Some("postPagination"));
    }

    #[test]
    fn test_missing_output() {
        let raw = RawConfig::new().with("models", "Post");
        let err = parse(&raw).unwrap_err();
        assert_eq!(err.key(), Some("output"));
    }

    #[test]
    fn test_missing_models() {
        let raw = RawConfig::new().with("output", "out");
        let err = parse(&raw).unwrap_err();
        assert_eq!(err.key(), Some("models"));
    }

    #[test]
    fn test_empty_models_rejected() {
        let raw = RawConfig::new().with("output", "out").with("models", " , ");
        let err = parse(&raw).unwrap_err();
        assert_eq!(err.key(), Some("models"));
    }

    #[test]
    fn test_models_list_and_string_equivalent() {
        let from_string = parse(&base()).unwrap();
        let from_list = parse(&base().with("models", vec!["Post", " User"])).unwrap();
        assert_eq!(from_string, from_list);
    }

    #[test]
    fn test_models_deduplicated_in_order() {
        let config = parse(&base().with("models", "User, Post, User")).unwrap();
        assert_eq!(config.models, vec!["User", "Post"]);
    }

    #[test]
    fn test_unmatched_override_keys_ignored() {
        let raw = base()
            .with("commentSelect", "id")
            .with("commentOptimistic", "bogus")
            .with("somethingElse", "x");
        let config = parse(&raw).unwrap();
        assert!(config.model("Comment").is_none());
        assert_eq!(config.overrides.len(), 2);
    }

    #[test]
    fn test_relative_import_path_rebased() {
        let raw = base().with("importPath", "../src/lib/db");
        let config = parse(&raw).unwrap();
        assert_eq!(config.data_source_import_path, "../lib/db");
    }

    #[test]
    fn test_unrebasable_import_path_rejected() {
        let climbing = base().with("output", "../out").with("importPath", "./db");
        assert_eq!(parse(&climbing).unwrap_err().key(), Some("importPath"));

        let absolute = base().with("output", "/srv/out").with("importPath", "./db");
        assert_eq!(parse(&absolute).unwrap_err().key(), Some("importPath"));

        let package = base().with("output", "../out").with("importPath", "@acme/db");
        assert_eq!(parse(&package).unwrap().data_source_import_path, "@acme/db");
    }

    #[test]
    fn test_package_import_path_kept() {
        let raw = base().with("importPath", "@acme/db");
        let config = parse(&raw).unwrap();
        assert_eq!(config.data_source_import_path, "@acme/db");
    }

    #[test]
    fn test_override_key_lowercases_model() {
        assert_eq!(override_key("BlogPost", SELECT_SUFFIX), "blogpostSelect");
    }

    proptest! {
        /// Parsing the same raw input twice yields equal configurations.
        #[test]
        fn parse_is_idempotent(
            models in prop::collection::vec("[A-Z][a-z]{1,6}", 1..5),
            select in prop::collection::vec("[a-z]{1,6}", 0..5),
            strategy in prop::sample::select(vec!["merge", "overwrite", "manual"]),
            paginate in any::<bool>(),
        ) {
            let first = models[0].clone();
            let raw = RawConfig::new()
                .with("output", "out/gen")
                .with("models", models.join(","))
                .with(override_key(&first, SELECT_SUFFIX), select.join(","))
                .with(override_key(&first, OPTIMISTIC_SUFFIX), strategy)
                .with(override_key(&first, PAGINATION_SUFFIX), paginate)
                .with("importPath", "./client");
            let a = parse_config(&raw, &models, Path::new("schema.prisma")).unwrap();
            let b = parse_config(&raw, &models, Path::new("schema.prisma")).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
