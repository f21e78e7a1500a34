//! Compile an aggregation specification

use serde_json::Value;

use super::CliError;
use crate::{AggregationSpec, Config, JsonEmitter};

/// Options for the aggs command
#[derive(Debug, Clone, Default)]
pub struct AggsOptions {
    /// JSON aggregation specification
    pub input: Option<String>,
    /// Output configuration
    pub config: Config,
}

/// Compile the specification into a request body `{"aggregations": ...}`
pub fn execute_aggs(options: &AggsOptions) -> Result<Value, CliError> {
    let text = options.input.as_ref().ok_or(CliError::NoInput)?;
    let spec: Value = serde_json::from_str(text)?;

    let aggregations = AggregationSpec::from_json(&spec)?.compile();

    Ok(JsonEmitter::new(&options.config).request(None, Some(&aggregations)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(input: &str) -> Result<Value, CliError> {
        execute_aggs(&AggsOptions {
            input: Some(input.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn wraps_in_aggregations_envelope() {
        let body = run(r#"{ "type": "type" }"#).unwrap();
        assert_eq!(body, json!({ "aggregations": { "type": { "terms": { "field": "type" } } } }));
    }

    #[test]
    fn rejects_ambiguous_targets() {
        assert!(matches!(
            run(r#"{ "role": { "contribution": "role", "agent": "name" } }"#),
            Err(CliError::Spec(_))
        ));
    }

    #[test]
    fn rejects_bad_json_and_missing_input() {
        assert!(matches!(run("{"), Err(CliError::Json(_))));
        assert!(matches!(execute_aggs(&AggsOptions::default()), Err(CliError::NoInput)));
    }
}
