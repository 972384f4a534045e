//! Integration test: synthesize projections over the shared blog fixture
//! with overrides coming from a parsed and validated configuration.

use dmgen_analysis::analyze_relationships;
use dmgen_config::{parse_config, validate_config, GeneratorConfig, RawConfig};
use dmgen_core::Schema;
use dmgen_projection::synthesize_projection;
use serde_json::json;
use std::path::{Path, PathBuf};

fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn blog() -> Schema {
    let path = repo_root().join("fixtures/blog.dmmf.json");
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    Schema::from_dmmf_json(&json).unwrap()
}

fn config(schema: &Schema, raw: RawConfig) -> GeneratorConfig {
    let names = schema.model_names();
    let config = parse_config(&raw, &names, Path::new("prisma/schema.prisma")).unwrap();
    validate_config(&config, &names).unwrap();
    config
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_comment_projection_two_levels() {
    let schema = blog();
    let graph = analyze_relationships(&schema);
    let config = config(
        &schema,
        RawConfig::new()
            .with("output", "src/generated")
            .with("models", "Comment,Post,User")
            .with("postSelect", "id,title,author,comments")
            .with("userSelect", "id,name,posts,profile"),
    );

    let node = synthesize_projection(
        &schema,
        "Comment",
        &names(&["id", "body", "post"]),
        &graph,
        &config,
    );

    assert_eq!(
        node.to_select_value(),
        json!({
            "id": true,
            "body": true,
            "post": { "select": {
                "id": true,
                "title": true,
                "author": { "select": {
                    "id": true,
                    "name": true,
                    "profile": { "select": {
                        "id": true,
                        "avatarUrl": true,
                        "userId": true
                    } }
                } }
            } }
        })
    );
    assert_eq!(node.depth(), 3);
}

#[test]
fn test_post_projection_without_overrides() {
    let schema = blog();
    let graph = analyze_relationships(&schema);
    let config = config(
        &schema,
        RawConfig::new().with("output", "out").with("models", "Post"),
    );

    let node = synthesize_projection(
        &schema,
        "Post",
        &names(&["id", "author", "comments", "tags", "category"]),
        &graph,
        &config,
    );

    assert_eq!(node.references, names(&["comments", "tags"]));
    let author = node.nested("author").unwrap();
    assert_eq!(
        author.scalars,
        names(&[
            "id",
            "email",
            "name",
            "bio",
            "website",
            "role",
            "createdAt",
            "updatedAt"
        ])
    );
    let category = node.nested("category").unwrap();
    assert_eq!(category.scalars, names(&["id", "name", "parentId"]));
}

#[test]
fn test_category_tree_terminates() {
    let schema = blog();
    let graph = analyze_relationships(&schema);
    let config = config(
        &schema,
        RawConfig::new()
            .with("output", "out")
            .with("models", "Category")
            .with("categorySelect", "id,name,parent,children"),
    );

    let node = synthesize_projection(
        &schema,
        "Category",
        &names(&["id", "parent", "children"]),
        &graph,
        &config,
    );
    assert_eq!(node.references, names(&["parent", "children"]));
    assert_eq!(node.depth(), 0);
}
