//! JSON output for compiled queries and aggregations.
//!
//! This module turns [`QueryTree`] and [`AggregationTree`] values into the
//! nested-object structure a nested-document search backend accepts.
//!
//! # Shapes
//!
//! | tree                      | JSON                                                    |
//! |---------------------------|---------------------------------------------------------|
//! | `MatchAll`                | `{"match_all": {}}`                                     |
//! | `Match`                   | `{"match": {field: value}}` (or `term`, see [`Config`]) |
//! | `BoolMust`                | `{"bool": {"must": [...]}}`                             |
//! | `BoolShould`              | `{"bool": {"min_should_match": 1, "should": [...]}}`    |
//! | `Nested`                  | `{"nested": {"path": p, "query": {...}}}`               |
//! | `AggregationTree::Terms`  | `{"terms": {"field": f}}`                               |
//! | `AggregationTree::Nested` | `{"nested": {"path": p}, "aggregations": {...}}`        |
//!
//! # Examples
//!
//! ```
//! use nestql::{compile_query, output::to_json};
//!
//! let query = compile_query("type:publication").unwrap();
//! assert_eq!(to_json(&query), r#"{"match":{"type":"publication"}}"#);
//! ```

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::{
    aggregation::AggregationTree,
    config::Config,
    query::{MatchField, QueryTree},
};

pub struct JsonEmitter<'a> {
    config: &'a Config,
}

impl<'a> JsonEmitter<'a> {
    pub fn new(config: &'a Config) -> Self {
        JsonEmitter { config }
    }

    pub fn query(&self, tree: &QueryTree) -> Value {
        match tree {
            QueryTree::MatchAll => json!({ "match_all": {} }),
            QueryTree::Match { field, value } => {
                let field = match field {
                    MatchField::All => self.config.all_fields.clone(),
                    MatchField::Path(path) => path.clone(),
                };
                let mut leaf = Map::new();
                leaf.insert(field, Value::String(value.clone()));
                let mut node = Map::new();
                node.insert(self.config.leaf_query.key().to_string(), Value::Object(leaf));
                Value::Object(node)
            }
            QueryTree::BoolMust(clauses) => json!({
                "bool": {
                    "must": clauses.iter().map(|c| self.query(c)).collect::<Vec<_>>()
                }
            }),
            QueryTree::BoolShould { groups, min_match } => {
                let mut body = Map::new();
                body.insert(self.config.should_match_key.clone(), json!(min_match));
                body.insert(
                    "should".to_string(),
                    Value::Array(groups.iter().map(|g| self.query(g)).collect()),
                );
                json!({ "bool": body })
            }
            QueryTree::Nested { path, query } => json!({
                "nested": {
                    "path": path,
                    "query": self.query(query)
                }
            }),
        }
    }

    pub fn aggregation(&self, tree: &AggregationTree) -> Value {
        match tree {
            AggregationTree::Terms { field } => json!({ "terms": { "field": field } }),
            AggregationTree::Nested { path, children } => json!({
                "nested": { "path": path },
                "aggregations": self.aggregations(children)
            }),
        }
    }

    pub fn aggregations(&self, aggregations: &IndexMap<String, AggregationTree>) -> Value {
        Value::Object(
            aggregations
                .iter()
                .map(|(name, tree)| (name.clone(), self.aggregation(tree)))
                .collect(),
        )
    }

    /// Search request body: `{"query": ..., "aggregations": ...}`, with the
    /// members that were given.
    pub fn request(
        &self,
        query: Option<&QueryTree>,
        aggregations: Option<&IndexMap<String, AggregationTree>>,
    ) -> Value {
        let mut body = Map::new();
        if let Some(query) = query {
            body.insert("query".to_string(), self.query(query));
        }
        if let Some(aggregations) = aggregations {
            body.insert("aggregations".to_string(), self.aggregations(aggregations));
        }
        Value::Object(body)
    }
}

// Convenience functions

/// Compact JSON for `tree` with the default [`Config`].
pub fn to_json(tree: &QueryTree) -> String {
    JsonEmitter::new(&Config::default()).query(tree).to_string()
}

/// Pretty-printed JSON (2-space indentation) for `tree` with the default [`Config`].
pub fn to_json_pretty(tree: &QueryTree) -> String {
    let value = JsonEmitter::new(&Config::default()).query(tree);
    // a Value always serializes
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}
