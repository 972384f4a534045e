//! # Raw Configuration Bag
//!
//! The flat key/value configuration exactly as the host supplies it. Values
//! are strings, string lists, or booleans; nested objects are not part of
//! the protocol. Nothing outside [`crate::resolve`] interprets these keys.

use std::collections::BTreeMap;

use dmgen_core::GeneratorError;
use serde::{Deserialize, Serialize};

/// One raw configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A boolean flag.
    Bool(bool),
    /// A single string, possibly comma-delimited.
    Text(String),
    /// A pre-split list of strings.
    List(Vec<String>),
}

impl RawValue {
    /// Short name of the value's shape, for error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Text(_) => "string",
            Self::List(_) => "list",
        }
    }

    /// Normalize to a list of trimmed, non-empty entries. Strings are split
    /// on commas. Returns `None` for booleans, which have no list form.
    pub fn to_list(&self) -> Option<Vec<String>> {
        let items: Vec<String> = match self {
            Self::Bool(_) => return None,
            Self::Text(text) => text.split(',').map(|s| s.trim().to_string()).collect(),
            Self::List(items) => items.iter().map(|s| s.trim().to_string()).collect(),
        };
        Some(items.into_iter().filter(|s| !s.is_empty()).collect())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for RawValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// The host's flat configuration bag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConfig {
    entries: BTreeMap<String, RawValue>,
}

impl RawConfig {
    /// An empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Deserialize a bag from the host's JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Metadata`] if the text is not a flat JSON
    /// object of strings, string lists, and booleans.
    pub fn from_json(json: &str) -> Result<Self, GeneratorError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_splits_and_trims() {
        let value = RawValue::from(" Post, User ,,Comment ");
        assert_eq!(
            value.to_list().unwrap(),
            vec!["Post", "User", "Comment"]
        );
    }

    #[test]
    fn test_list_trims_entries() {
        let value = RawValue::from(vec![" id", "title ", ""]);
        assert_eq!(value.to_list().unwrap(), vec!["id", "title"]);
    }

    #[test]
    fn test_bool_has_no_list_form() {
        assert_eq!(RawValue::Bool(true).to_list(), None);
    }

    #[test]
    fn test_from_json_accepts_all_shapes() {
        let raw = RawConfig::from_json(
            r#"{ "output": "src/gen", "models": ["Post"], "postPagination": true }"#,
        )
        .unwrap();
        assert_eq!(raw.get("output"), Some(&RawValue::from("src/gen")));
        assert_eq!(raw.get("models"), Some(&RawValue::from(vec!["Post"])));
        assert_eq!(raw.get("postPagination"), Some(&RawValue::Bool(true)));
    }

    #[test]
    fn test_from_json_rejects_nested_objects() {
        let err = RawConfig::from_json(r#"{ "output": { "dir": "x" } }"#).unwrap_err();
        assert!(matches!(err, GeneratorError::Metadata(_)));
    }
}
