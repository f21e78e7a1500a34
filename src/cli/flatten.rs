//! Flatten a backend search response

use serde_json::Value;

use super::CliError;
use crate::flatten_response;

/// Parse `input` as a backend response and flatten its aggregations.
pub fn execute_flatten(input: Option<&str>) -> Result<Value, CliError> {
    let text = input.ok_or(CliError::NoInput)?;
    let response: Value = serde_json::from_str(text)?;
    Ok(flatten_response(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_aggregations_member() {
        let input = r#"{
            "hits": { "total": 2 },
            "aggregations": { "role": { "doc_count": 4, "role": { "buckets": [] } } }
        }"#;

        assert_eq!(
            execute_flatten(Some(input)).unwrap(),
            json!({
                "hits": { "total": 2 },
                "aggregations": { "role": { "buckets": [] } }
            })
        );
    }

    #[test]
    fn missing_input() {
        assert!(matches!(execute_flatten(None), Err(CliError::NoInput)));
    }
}
