//! # Data-Source Import Path
//!
//! A relative import-path override is written relative to the schema file,
//! but generated code lives under the output directory. This module
//! re-expresses the path relative to the output directory.
//!
//! The computation is purely lexical: no file-system access, `\` and `/`
//! both accepted as separators, `/` always emitted. Identical inputs always
//! produce identical output.
//!
//! ## Unresolvable Inputs
//!
//! Without the working directory, two cases have no lexical answer: an
//! output directory whose unshared part still climbs (`../out` reaching
//! back to `prisma/`), and a schema path and output directory that differ
//! in absoluteness. Both yield `None`.

use std::path::Path;

/// Import path used when the configuration does not override it.
pub const DEFAULT_DATA_SOURCE_IMPORT: &str = "@prisma/client";

/// Whether an import specifier is relative (`./x`, `../x`) rather than a
/// package name or alias.
pub fn is_relative_import(spec: &str) -> bool {
    let spec = spec.replace('\\', "/");
    spec == "." || spec == ".." || spec.starts_with("./") || spec.starts_with("../")
}

/// Re-express `import` (relative to the schema file's directory) relative
/// to the `output` directory.
///
/// Non-relative specifiers are returned unchanged. Returns `None` when the
/// rebased path depends on the working directory.
pub fn resolve_import_path(import: &str, schema_path: &Path, output: &Path) -> Option<String> {
    if !is_relative_import(import) {
        return Some(import.to_string());
    }

    let schema_path = slashed(schema_path);
    let schema_dir = match schema_path.rfind('/') {
        Some(idx) => &schema_path[..=idx],
        None => "",
    };

    let target = LexicalPath::parse(&format!("{schema_dir}{}", import.replace('\\', "/")));
    let base = LexicalPath::parse(&slashed(output));

    let relative = base.relative_to(&target)?;
    Some(if relative.starts_with("../") || relative == ".." {
        relative
    } else if relative.is_empty() {
        ".".to_string()
    } else {
        format!("./{relative}")
    })
}

fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// A normalized path: `.` removed, `..` folded where possible.
#[derive(Debug, PartialEq, Eq)]
struct LexicalPath {
    absolute: bool,
    segments: Vec<String>,
}

impl LexicalPath {
    fn parse(path: &str) -> Self {
        let absolute = path.starts_with('/');
        let mut segments: Vec<String> = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    let foldable = segments.last().is_some_and(|last| last != "..");
                    // Above the root of an absolute path, `..` is dropped.
                    if foldable {
                        segments.pop();
                    } else if !absolute {
                        segments.push("..".to_string());
                    }
                }
                other => segments.push(other.to_string()),
            }
        }
        Self { absolute, segments }
    }

    /// Path from `self` (a directory) to `target`, `/`-separated.
    fn relative_to(&self, target: &Self) -> Option<String> {
        if self.absolute != target.absolute {
            return None;
        }

        let common = self
            .segments
            .iter()
            .zip(&target.segments)
            .take_while(|(a, b)| a == b)
            .count();

        // Climbing out of a `..` would need the name of the directory above.
        if self.segments[common..].iter().any(|s| s == "..") {
            return None;
        }

        let climbs = self.segments.len() - common;
        let mut parts: Vec<&str> = std::iter::repeat("..").take(climbs).collect();
        parts.extend(target.segments[common..].iter().map(String::as_str));
        Some(parts.join("/"))
    }
}
