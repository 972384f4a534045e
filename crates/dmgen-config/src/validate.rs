//! # Configuration Validation
//!
//! Second pass over a parsed [`GeneratorConfig`], run once both the
//! configuration and the schema are loaded. Rejects, never repairs: a
//! configuration that fails here must not reach projection synthesis.

use dmgen_core::GeneratorError;

use crate::config::{GeneratorConfig, SelectOverride};
use crate::resolve::{override_key, SELECT_SUFFIX};

/// Validate a parsed configuration against the schema's model names.
///
/// # Errors
///
/// - [`GeneratorError::ModelNotFound`] listing every configured model the
///   schema does not declare.
/// - [`GeneratorError::Configuration`] naming the `<model>Select` key of
///   the first select override that did not normalize to a list.
pub fn validate_config(
    config: &GeneratorConfig,
    schema_model_names: &[String],
) -> Result<(), GeneratorError> {
    // Overrides are keyed by configured models, so checking `models` covers them.
    let unknown: Vec<String> = config
        .models
        .iter()
        .filter(|name| !schema_model_names.contains(name))
        .fold(Vec::new(), |mut acc, name| {
            if !acc.contains(name) {
                acc.push(name.clone());
            }
            acc
        });

    if !unknown.is_empty() {
        return Err(GeneratorError::ModelNotFound { models: unknown });
    }

    for model in &config.models {
        let Some(overrides) = config.model(model) else {
            continue;
        };
        if let Some(SelectOverride::Malformed { found }) = &overrides.select {
            return Err(GeneratorError::configuration(
                override_key(model, SELECT_SUFFIX),
                format!("expected a list of field names, found {found}"),
            ));
        }
    }

    Ok(())
}
