//! Integration test: run the whole pipeline over the shared blog fixtures
//! (`fixtures/blog.dmmf.json`, `fixtures/blog.config.json`).

use dmgen_analysis::{OptimisticValue, RuleKind};
use dmgen_config::{OptimisticStrategy, RawConfig};
use dmgen_core::{Cardinality, GeneratorError, Schema};
use dmgen_engine::GenerationPlan;
use serde_json::json;
use std::path::{Path, PathBuf};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn fixture(name: &str) -> String {
    let path = repo_root().join("fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

fn schema_path() -> &'static Path {
    Path::new("prisma/schema.prisma")
}

fn blog_plan() -> GenerationPlan {
    init_tracing();
    GenerationPlan::from_json(
        &fixture("blog.dmmf.json"),
        &fixture("blog.config.json"),
        schema_path(),
    )
    .unwrap()
}

#[test]
fn test_configured_models_in_order() {
    let plan = blog_plan();
    let models: Vec<&str> = plan.models().iter().map(|m| m.model.as_str()).collect();
    assert_eq!(models, vec!["Post", "User", "Comment"]);
    assert_eq!(plan.config().data_source_import_path, "../lib/db");
    assert_eq!(plan.config().output, PathBuf::from("src/generated"));
}

#[test]
fn test_overrides_resolved() {
    let plan = blog_plan();
    let post = plan.overrides("Post").unwrap();
    assert_eq!(post.optimistic_strategy, OptimisticStrategy::Overwrite);
    assert!(post.pagination_enabled);
    assert_eq!(
        post.select_fields().unwrap(),
        &["id", "title", "published", "author", "comments"]
    );

    let comment = plan.overrides("Comment").unwrap();
    assert_eq!(comment.optimistic_strategy, OptimisticStrategy::Merge);
    assert!(!comment.pagination_enabled);
    assert!(plan.overrides("Profile").is_none());
}

#[test]
fn test_post_projection() {
    let plan = blog_plan();
    assert_eq!(
        plan.projection("Post").unwrap().to_select_value(),
        json!({
            "id": true,
            "title": true,
            "published": true,
            "comments": true,
            "author": { "select": { "id": true, "name": true, "email": true } }
        })
    );
}

#[test]
fn test_comment_projection_uses_post_override() {
    let plan = blog_plan();
    let comment = plan.projection("Comment").unwrap();
    assert_eq!(comment.scalars, vec!["id", "body"]);
    assert!(comment.references.is_empty());

    let post = comment.nested("post").unwrap();
    assert_eq!(post.scalars, vec!["id", "title", "published"]);
    assert!(!post.contains("comments"));
    let post_author = post.nested("author").unwrap();
    assert_eq!(post_author.scalars, vec!["id", "name", "email"]);
    assert_eq!(comment.depth(), 2);
}

#[test]
fn test_default_root_selection_is_scalars() {
    init_tracing();
    let plan = GenerationPlan::from_json(
        &fixture("blog.dmmf.json"),
        r#"{ "output": "out", "models": ["Comment"] }"#,
        schema_path(),
    )
    .unwrap();
    let comment = plan.projection("Comment").unwrap();
    assert_eq!(comment.scalars, vec!["id", "body", "postId", "authorId", "createdAt"]);
    assert!(!comment.contains("location"));
    assert!(comment.to_select_value().get("location").is_none());
    assert_eq!(comment.depth(), 0);
    assert_eq!(plan.config().data_source_import_path, "@prisma/client");
}

#[test]
fn test_unconfigured_models_still_analyzed() {
    let plan = blog_plan();
    let profile = plan.analysis("Profile").unwrap();
    assert_eq!(profile.foreign_key_fields, vec!["userId"]);
    assert!(plan.projection("Profile").is_none());
    assert_eq!(plan.graph().owns("Profile")[0].cardinality, Cardinality::ManyToOne);
}

#[test]
fn test_user_analysis_through_plan() {
    let plan = blog_plan();
    let user = &plan.model("User").unwrap().analysis;
    assert_eq!(
        user.field("id").unwrap().optimistic_value,
        OptimisticValue::TemporaryId
    );
    assert!(user
        .validation_rules
        .iter()
        .any(|r| r.field == "website" && r.kind == RuleKind::Url));
}

#[test]
fn test_plan_serializes() {
    let plan = blog_plan();
    let value = serde_json::to_value(&plan).unwrap();
    assert_eq!(value["models"][0]["model"], "Post");
    assert_eq!(value["config"]["data_source_import_path"], "../lib/db");
}

#[test]
fn test_bogus_optimistic_strategy_aborts() {
    init_tracing();
    let schema = Schema::from_dmmf_json(&fixture("blog.dmmf.json")).unwrap();
    let raw = RawConfig::new()
        .with("output", "out")
        .with("models", "Post")
        .with("postOptimistic", "bogus");
    let err = GenerationPlan::prepare(&schema, &raw, schema_path()).unwrap_err();
    assert_eq!(err.key(), Some("postOptimistic"));
}

#[test]
fn test_unknown_models_listed() {
    init_tracing();
    let err = GenerationPlan::from_json(
        &fixture("blog.dmmf.json"),
        r#"{ "output": "out", "models": "Post,Ghost,Phantom" }"#,
        schema_path(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        GeneratorError::ModelNotFound {
            models: vec!["Ghost".to_string(), "Phantom".to_string()]
        }
    );
}

#[test]
fn test_malformed_select_aborts() {
    init_tracing();
    let err = GenerationPlan::from_json(
        &fixture("blog.dmmf.json"),
        r#"{ "output": "out", "models": "Post", "postSelect": true }"#,
        schema_path(),
    )
    .unwrap_err();
    assert_eq!(err.key(), Some("postSelect"));
}
