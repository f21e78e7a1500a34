//! Aggregation (facet) specifications and their compiled form.
//!
//! A specification maps an aggregation name to the field it groups by. A
//! field inside nested objects is reached by a chain of single-key objects,
//! one per nested scope:
//!
//! ```json
//! {
//!   "type": "type",
//!   "role": { "contribution": "role" },
//!   "agent": { "contribution": { "agent": "lastName" } }
//! }
//! ```
//!
//! Every nested scope the compiler opens reuses the aggregation's own name for
//! its single child, because the backend needs a name at each level. The
//! response therefore repeats the name once per scope; [`crate::flatten`]
//! removes those extra levels again.

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::path::FieldPath;

/// Malformed aggregation specification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("ambiguous nested aggregation target for '{name}': expected one key, got {}", .keys.join(", "))]
    AmbiguousTarget { name: String, keys: Vec<String> },

    #[error("empty nested aggregation target for '{name}': expected one key")]
    EmptyTarget { name: String },

    #[error("invalid value for aggregation '{name}': expected a field name or an object, got {found}")]
    InvalidValue { name: String, found: &'static str },

    #[error("invalid field '{field}' in aggregation '{name}': field names must not be empty")]
    InvalidField { name: String, field: String },

    #[error("aggregation specification must be an object, got {found}")]
    NotAMapping { found: &'static str },
}

/// Target of one declared aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationTarget {
    /// Field to group by, relative to the enclosing scope
    Field(String),
    /// Descend into the nested field `field`, then continue with `inner`
    Scope {
        field: String,
        inner: Box<AggregationTarget>,
    },
}

impl AggregationTarget {
    pub fn field(name: &str) -> Self {
        AggregationTarget::Field(name.to_string())
    }

    pub fn scope(field: &str, inner: AggregationTarget) -> Self {
        AggregationTarget::Scope {
            field: field.to_string(),
            inner: Box::new(inner),
        }
    }

    fn from_json(name: &str, value: &Value) -> Result<Self, SpecError> {
        match value {
            Value::String(field) => Ok(AggregationTarget::Field(checked_field(name, field)?)),
            Value::Object(map) => {
                let mut entries = map.iter();
                match (entries.next(), entries.next()) {
                    (None, _) => Err(SpecError::EmptyTarget {
                        name: name.to_string(),
                    }),
                    (Some((field, inner)), None) => Ok(AggregationTarget::Scope {
                        field: checked_field(name, field)?,
                        inner: Box::new(Self::from_json(name, inner)?),
                    }),
                    (Some(_), Some(_)) => Err(SpecError::AmbiguousTarget {
                        name: name.to_string(),
                        keys: map.keys().cloned().collect(),
                    }),
                }
            }
            other => Err(SpecError::InvalidValue {
                name: name.to_string(),
                found: json_type(other),
            }),
        }
    }
}

/// Backend field names are taken as given (`@timestamp`, `agent name`); only
/// an empty name is rejected.
fn checked_field(name: &str, field: &str) -> Result<String, SpecError> {
    if field.is_empty() {
        return Err(SpecError::InvalidField {
            name: name.to_string(),
            field: field.to_string(),
        });
    }
    Ok(field.to_string())
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Declared aggregations, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationSpec {
    entries: IndexMap<String, AggregationTarget>,
}

impl AggregationSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or replace) aggregation `name`.
    pub fn with(mut self, name: &str, target: AggregationTarget) -> Self {
        self.entries.insert(name.to_string(), target);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AggregationTarget> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AggregationTarget)> {
        self.entries.iter()
    }

    /// Read a specification from its JSON form.
    pub fn from_json(value: &Value) -> Result<Self, SpecError> {
        let map = value.as_object().ok_or_else(|| SpecError::NotAMapping {
            found: json_type(value),
        })?;

        let mut spec = AggregationSpec::new();
        for (name, target) in map {
            spec.entries
                .insert(name.clone(), AggregationTarget::from_json(name, target)?);
        }
        Ok(spec)
    }

    /// Lower every declared aggregation, keyed by its name.
    pub fn compile(&self) -> IndexMap<String, AggregationTree> {
        let compiled: IndexMap<_, _> = self
            .entries
            .iter()
            .map(|(name, target)| (name.clone(), compile_target(name, target, &FieldPath::root())))
            .collect();
        debug!(aggregations = ?compiled.keys().collect::<Vec<_>>(), "compiled aggregations");
        compiled
    }
}

/// Compiled aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationTree {
    /// Bucket documents by the values of `field`
    ///
    /// ```json
    /// { "terms": { "field": "contribution.role" } }
    /// ```
    Terms { field: String },

    /// Enter the nested scope at `path` (never empty) and run `children` there
    ///
    /// ```json
    /// { "nested": { "path": "contribution" }, "aggregations": { ... } }
    /// ```
    Nested {
        path: String,
        children: IndexMap<String, AggregationTree>,
    },
}

fn compile_target(name: &str, target: &AggregationTarget, prefix: &FieldPath) -> AggregationTree {
    match target {
        AggregationTarget::Field(field) => AggregationTree::Terms {
            field: prefix.child(field).dotted(),
        },
        AggregationTarget::Scope { field, inner } => {
            let path = prefix.child(field);
            let mut children = IndexMap::new();
            children.insert(name.to_string(), compile_target(name, inner, &path));
            AggregationTree::Nested {
                path: path.dotted(),
                children,
            }
        }
    }
}

/// Validate and lower a JSON aggregation specification.
pub fn compile_aggregations(spec: &Value) -> Result<IndexMap<String, AggregationTree>, SpecError> {
    Ok(AggregationSpec::from_json(spec)?.compile())
}
