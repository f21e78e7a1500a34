// tests/integration_tests.rs

use nestql::cli::{self, AggsOptions, CliError, CompileOptions, CompileOutput};
use nestql::{Config, JsonEmitter, LeafQuery, compile_aggregations, compile_query, to_json, to_json_pretty};
use serde_json::{Value, json};

fn emit(text: &str, config: &Config) -> Value {
    JsonEmitter::new(config).query(&compile_query(text).unwrap())
}

fn emit_default(text: &str) -> Value {
    emit(text, &Config::default())
}

// ============================================================================
// Query output
// ============================================================================

#[test]
fn test_match_all() {
    assert_eq!(emit_default("*"), json!({ "match_all": {} }));
}

#[test]
fn test_bare_value_uses_all_field() {
    assert_eq!(emit_default("Olsson"), json!({ "match": { "_all": "Olsson" } }));
}

#[test]
fn test_boolean_output() {
    assert_eq!(
        emit_default("a:x and b:y or c:z"),
        json!({
            "bool": {
                "min_should_match": 1,
                "should": [
                    { "bool": { "must": [ { "match": { "a": "x" } }, { "match": { "b": "y" } } ] } },
                    { "match": { "c": "z" } }
                ]
            }
        })
    );
}

#[test]
fn test_contribution_example_output() {
    assert_eq!(
        emit_default("contribution:{ role:aut, agent:{ firstName:Pelle, lastName:Olsson } }"),
        json!({
            "nested": {
                "path": "contribution",
                "query": {
                    "bool": {
                        "must": [
                            { "match": { "contribution.role": "aut" } },
                            {
                                "nested": {
                                    "path": "contribution.agent",
                                    "query": {
                                        "bool": {
                                            "must": [
                                                { "match": { "contribution.agent.firstName": "Pelle" } },
                                                { "match": { "contribution.agent.lastName": "Olsson" } }
                                            ]
                                        }
                                    }
                                }
                            }
                        ]
                    }
                }
            }
        })
    );
}

#[test]
fn test_empty_dictionary_output() {
    assert_eq!(
        emit_default("nested:{}"),
        json!({ "nested": { "path": "nested", "query": { "match_all": {} } } })
    );
}

#[test]
fn test_compact_and_pretty_strings() {
    let query = compile_query("type:publication").unwrap();
    assert_eq!(to_json(&query), r#"{"match":{"type":"publication"}}"#);
    assert_eq!(
        to_json_pretty(&query),
        "{\n  \"match\": {\n    \"type\": \"publication\"\n  }\n}"
    );
}

#[test]
fn test_should_members_keep_key_order() {
    let text = to_json(&compile_query("a:x or b:y").unwrap());
    assert_eq!(
        text,
        r#"{"bool":{"min_should_match":1,"should":[{"match":{"a":"x"}},{"match":{"b":"y"}}]}}"#
    );
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_term_leaf_and_should_key() {
    let config = Config::new()
        .with_leaf_query(LeafQuery::Term)
        .with_should_match_key("minimum_should_match");

    assert_eq!(
        emit("a:x or b:y", &config),
        json!({
            "bool": {
                "minimum_should_match": 1,
                "should": [ { "term": { "a": "x" } }, { "term": { "b": "y" } } ]
            }
        })
    );
}

#[test]
fn test_custom_all_fields() {
    let config = Config::new().with_all_fields("*");
    assert_eq!(emit("Olsson", &config), json!({ "match": { "*": "Olsson" } }));
}

#[test]
fn test_config_from_json() {
    let config = Config::from_json_str(r#"{ "leaf_query": "term", "all_fields": "text" }"#).unwrap();
    assert_eq!(emit("x", &config), json!({ "term": { "text": "x" } }));
}

#[test]
fn test_config_rejects_unknown_leaf_query() {
    assert!(Config::from_json_str(r#"{ "leaf_query": "fuzzy" }"#).is_err());
}

// ============================================================================
// Request bodies
// ============================================================================

#[test]
fn test_request_with_query_and_aggregations() {
    let config = Config::default();
    let query = compile_query("type:publication").unwrap();
    let aggregations = compile_aggregations(&json!({ "role": { "contribution": "role" } })).unwrap();

    assert_eq!(
        JsonEmitter::new(&config).request(Some(&query), Some(&aggregations)),
        json!({
            "query": { "match": { "type": "publication" } },
            "aggregations": {
                "role": {
                    "nested": { "path": "contribution" },
                    "aggregations": {
                        "role": { "terms": { "field": "contribution.role" } }
                    }
                }
            }
        })
    );
}

#[test]
fn test_empty_request() {
    assert_eq!(JsonEmitter::new(&Config::default()).request(None, None), json!({}));
}

// ============================================================================
// CLI operations
// ============================================================================

#[test]
fn test_cli_compile_with_config() {
    let output = cli::execute_compile(&CompileOptions {
        query: "Olsson".to_string(),
        config: Config::new().with_leaf_query(LeafQuery::Term),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        output,
        CompileOutput::Request(json!({ "query": { "term": { "_all": "Olsson" } } }))
    );
    assert_eq!(output.render(false).unwrap(), r#"{"query":{"term":{"_all":"Olsson"}}}"#);
}

#[test]
fn test_cli_compile_lines() {
    let outputs = cli::execute_compile_lines("*\ntype:book\n", &CompileOptions::default()).unwrap();
    assert_eq!(
        outputs,
        vec![
            CompileOutput::Request(json!({ "query": { "match_all": {} } })),
            CompileOutput::Request(json!({ "query": { "match": { "type": "book" } } })),
        ]
    );
}

#[test]
fn test_cli_aggs_then_flatten() {
    let body = cli::execute_aggs(&AggsOptions {
        input: Some(r#"{ "agent": { "contribution": { "agent": "lastName" } } }"#.to_string()),
        config: Config::default(),
    })
    .unwrap();
    assert_eq!(
        body["aggregations"]["agent"]["aggregations"]["agent"]["nested"]["path"],
        json!("contribution.agent")
    );

    let response = r#"{
        "aggregations": {
            "agent": { "doc_count": 5, "agent": { "doc_count": 3, "agent": { "buckets": [] } } }
        }
    }"#;
    assert_eq!(
        cli::execute_flatten(Some(response)).unwrap(),
        json!({ "aggregations": { "agent": { "buckets": [] } } })
    );
}

#[test]
fn test_cli_errors_are_displayable() {
    let err = cli::execute_compile(&CompileOptions {
        query: "a:x b:y".to_string(),
        ..Default::default()
    })
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error: unexpected identifier 'b' at line 1, column 5, expected 'and' or 'or' or end of input"
    );

    assert!(matches!(cli::get_doc_category("nope"), Err(CliError::UnknownCategory(_))));
    assert!(cli::get_docs_overview().contains("aggregations"));
}
