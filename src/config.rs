use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON key emitted for a compiled `Match` node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafQuery {
    /// Analyzed full-text match (`{"match": {...}}`)
    #[default]
    Match,
    /// Exact term lookup (`{"term": {...}}`)
    Term,
}

impl LeafQuery {
    pub fn key(&self) -> &'static str {
        match self {
            LeafQuery::Match => "match",
            LeafQuery::Term => "term",
        }
    }
}

/// Output configuration for compiled queries.
///
/// - `all_fields` is the field name used for values written without a field.
/// - `leaf_query` picks `match` or `term` for leaf constraints.
/// - `should_match_key` is the key emitted next to `should`.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "leaf_query": "term", "should_match_key": "minimum_should_match" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field name matching across all fields
    pub all_fields: String,
    /// Leaf query kind
    pub leaf_query: LeafQuery,
    /// Minimum-should-match key of a disjunction
    pub should_match_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            all_fields: "_all".to_string(),
            leaf_query: LeafQuery::Match,
            should_match_key: "min_should_match".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

impl Config {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_all_fields(mut self, name: &str) -> Self {
        self.all_fields = name.to_string();
        self
    }

    pub fn with_leaf_query(mut self, leaf_query: LeafQuery) -> Self {
        self.leaf_query = leaf_query;
        self
    }

    pub fn with_should_match_key(mut self, key: &str) -> Self {
        self.should_match_key = key.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.all_fields, "_all");
        assert_eq!(config.leaf_query, LeafQuery::Match);
        assert_eq!(config.should_match_key, "min_should_match");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json_str(r#"{ "leaf_query": "term" }"#).unwrap();
        assert_eq!(config.leaf_query, LeafQuery::Term);
        assert_eq!(config.all_fields, "_all");
    }

    #[test]
    fn builder() {
        let config = Config::new()
            .with_all_fields("*")
            .with_should_match_key("minimum_should_match");
        assert_eq!(config.all_fields, "*");
        assert_eq!(config.should_match_key, "minimum_should_match");
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            Config::from_json_str(r#"{ "leaf_query": "fuzzy" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            Config::from_file("/nonexistent/nestql.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
