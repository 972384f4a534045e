//! # Selection Sources
//!
//! Where the synthesizer looks up a related model's configured field
//! selection. The validated [`GeneratorConfig`] is the production source;
//! plain maps serve tests and hosts that bypass the config layer.

use std::collections::{BTreeMap, HashMap};

use dmgen_config::GeneratorConfig;

/// Lookup of per-model select overrides.
pub trait SelectionSource {
    /// The configured field selection for `model`, if any.
    fn selected_fields(&self, model: &str) -> Option<&[String]>;
}

impl SelectionSource for GeneratorConfig {
    fn selected_fields(&self, model: &str) -> Option<&[String]> {
        self.select_fields(model)
    }
}

impl SelectionSource for BTreeMap<String, Vec<String>> {
    fn selected_fields(&self, model: &str) -> Option<&[String]> {
        self.get(model).map(Vec::as_slice)
    }
}

impl SelectionSource for HashMap<String, Vec<String>> {
    fn selected_fields(&self, model: &str) -> Option<&[String]> {
        self.get(model).map(Vec::as_slice)
    }
}

impl<S: SelectionSource + ?Sized> SelectionSource for &S {
    fn selected_fields(&self, model: &str) -> Option<&[String]> {
        (**self).selected_fields(model)
    }
}

/// A source with no overrides: every related model falls back to its
/// scalar fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOverrides;

impl SelectionSource for NoOverrides {
    fn selected_fields(&self, _model: &str) -> Option<&[String]> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmgen_config::{parse_config, RawConfig};
    use std::path::Path;

    #[test]
    fn test_config_source() {
        let raw = RawConfig::new()
            .with("output", "out")
            .with("models", "Post,User")
            .with("userSelect", "id,name");
        let names = vec!["Post".to_string(), "User".to_string()];
        let config = parse_config(&raw, &names, Path::new("schema.prisma")).unwrap();
        assert_eq!(
            config.selected_fields("User"),
            Some(&["id".to_string(), "name".to_string()][..])
        );
        assert_eq!(config.selected_fields("Post"), None);
    }

    #[test]
    fn test_map_source() {
        let mut map = BTreeMap::new();
        map.insert("User".to_string(), vec!["id".to_string()]);
        assert_eq!(map.selected_fields("User").map(<[String]>::len), Some(1));
        assert_eq!(map.selected_fields("Post"), None);
        assert_eq!(NoOverrides.selected_fields("User"), None);
    }
}
