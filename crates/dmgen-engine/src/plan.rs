//! # Generation Plan
//!
//! One generation run, start to finish:
//!
//! 1. Build the [`RelationshipGraph`] over the whole schema.
//! 2. Analyze every model in the schema.
//! 3. Parse the host configuration, then validate it against the schema.
//!    Any error aborts the run here.
//! 4. Synthesize one root projection per configured model. The root
//!    selection is the model's select override, or all of its scalar
//!    fields.
//!
//! The resulting [`GenerationPlan`] is immutable and is what the emitters
//! read from.

use std::collections::BTreeMap;
use std::path::Path;

use dmgen_analysis::{analyze_model, analyze_relationships, ModelAnalysis, RelationshipGraph};
use dmgen_config::{parse_config, validate_config, GeneratorConfig, ModelOverrides, RawConfig};
use dmgen_core::{GeneratorError, Schema};
use dmgen_projection::{synthesize_projection, ProjectionNode};
use serde::Serialize;

/// Everything generated for one configured model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPlan {
    /// Model name.
    pub model: String,
    /// Field analysis.
    pub analysis: ModelAnalysis,
    /// Per-model configuration overrides (defaults when none were given).
    pub overrides: ModelOverrides,
    /// Root projection for the model's queries.
    pub projection: ProjectionNode,
}

/// The analyzed schema, validated configuration and projections for one
/// generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationPlan {
    config: GeneratorConfig,
    graph: RelationshipGraph,
    analyses: BTreeMap<String, ModelAnalysis>,
    models: Vec<ModelPlan>,
}

impl GenerationPlan {
    /// Run the pipeline over an already-ingested schema.
    ///
    /// `schema_path` is the location of the schema file; relative
    /// data-source import paths are rebased from its directory.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Configuration`] for missing or illegal
    /// configuration values and [`GeneratorError::ModelNotFound`] when the
    /// configuration names models the schema does not declare.
    pub fn prepare(
        schema: &Schema,
        raw_config: &RawConfig,
        schema_path: &Path,
    ) -> Result<Self, GeneratorError> {
        let graph = tracing::info_span!("relationships", models = schema.len())
            .in_scope(|| analyze_relationships(schema));

        let analyses: BTreeMap<String, ModelAnalysis> = tracing::info_span!("analysis")
            .in_scope(|| {
                schema
                    .models()
                    .iter()
                    .map(|m| (m.name.clone(), analyze_model(m)))
                    .collect()
            });

        let config = tracing::info_span!("config").in_scope(|| {
            let model_names = schema.model_names();
            let config = parse_config(raw_config, &model_names, schema_path)?;
            validate_config(&config, &model_names)?;
            Ok::<_, GeneratorError>(config)
        })?;

        let models = tracing::info_span!("projection", models = config.models.len()).in_scope(
            || {
                config
                    .models
                    .iter()
                    .filter_map(|name| {
                        let descriptor = schema.model(name)?;
                        let analysis = analyses.get(name)?.clone();
                        let selection: Vec<String> = match config.select_fields(name) {
                            Some(fields) => fields.to_vec(),
                            None => descriptor.scalar_fields().map(|f| f.name.clone()).collect(),
                        };
                        let projection =
                            synthesize_projection(schema, name, &selection, &graph, &config);
                        Some(ModelPlan {
                            model: name.clone(),
                            analysis,
                            overrides: config.model(name).cloned().unwrap_or_default(),
                            projection,
                        })
                    })
                    .collect::<Vec<_>>()
            },
        );

        tracing::info!(
            schema_models = analyses.len(),
            generated_models = models.len(),
            output = %config.output.display(),
            "generation plan prepared"
        );

        Ok(Self {
            config,
            graph,
            analyses,
            models,
        })
    }

    /// Ingest the host's DMMF JSON and configuration JSON, then
    /// [`prepare`](Self::prepare).
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Metadata`] if either payload cannot be
    /// deserialized, and otherwise the errors of [`prepare`](Self::prepare).
    pub fn from_json(
        schema_json: &str,
        config_json: &str,
        schema_path: &Path,
    ) -> Result<Self, GeneratorError> {
        let schema = tracing::info_span!("ingest").in_scope(|| Schema::from_dmmf_json(schema_json))?;
        let raw_config = RawConfig::from_json(config_json)?;
        Self::prepare(&schema, &raw_config, schema_path)
    }

    /// The validated configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The relationship graph over the whole schema.
    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    /// Analysis of any schema model, configured or not.
    pub fn analysis(&self, model: &str) -> Option<&ModelAnalysis> {
        self.analyses.get(model)
    }

    /// Root projection of a configured model.
    pub fn projection(&self, model: &str) -> Option<&ProjectionNode> {
        self.model(model).map(|m| &m.projection)
    }

    /// Overrides of a configured model.
    pub fn overrides(&self, model: &str) -> Option<&ModelOverrides> {
        self.model(model).map(|m| &m.overrides)
    }

    /// Plan for a configured model.
    pub fn model(&self, model: &str) -> Option<&ModelPlan> {
        self.models.iter().find(|m| m.model == model)
    }

    /// Plans for every configured model, in configuration order.
    pub fn models(&self) -> &[ModelPlan] {
        &self.models
    }
}
