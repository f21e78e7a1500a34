// tests/parser_tests.rs

use nestql::ast::{Operator, SyntaxNode};
use nestql::parser::{MAX_DEPTH, ParseError, parse};

fn part(node: SyntaxNode) -> SyntaxNode {
    SyntaxNode::QueryPart(Box::new(node))
}

fn query(node: SyntaxNode) -> SyntaxNode {
    SyntaxNode::Query(Box::new(node))
}

fn fielded(field: &str, value: SyntaxNode) -> SyntaxNode {
    SyntaxNode::Expr(Box::new(SyntaxNode::FieldedExpr {
        field: Box::new(SyntaxNode::Field(field.to_string())),
        value: Box::new(value),
    }))
}

fn key_val(field: &str, value: SyntaxNode) -> SyntaxNode {
    SyntaxNode::KeyVal {
        field: Box::new(SyntaxNode::Field(field.to_string())),
        value: Box::new(value),
    }
}

fn string(text: &str) -> SyntaxNode {
    SyntaxNode::StringLiteral(text.to_string())
}

/// Unwraps `Query(QueryPart(x))` and returns `x`.
fn single_part(node: SyntaxNode) -> SyntaxNode {
    match node {
        SyntaxNode::Query(inner) => match *inner {
            SyntaxNode::QueryPart(part) => *part,
            other => panic!("Expected query part, got {}", other.kind()),
        },
        other => panic!("Expected query, got {}", other.kind()),
    }
}

fn unexpected(err: ParseError) -> (usize, Vec<String>) {
    match err {
        ParseError::UnexpectedToken { position, expected, .. } => (position.offset, expected),
        other => panic!("Expected unexpected-token error, got {other:?}"),
    }
}

// ============================================================================
// Single parts
// ============================================================================

#[test]
fn test_asterisk() {
    assert_eq!(parse("*").unwrap(), query(part(SyntaxNode::Asterisk)));
}

#[test]
fn test_bare_value() {
    assert_eq!(
        parse("Olsson").unwrap(),
        query(part(SyntaxNode::Expr(Box::new(string("Olsson")))))
    );
}

#[test]
fn test_fielded_value() {
    assert_eq!(
        parse("type:publication").unwrap(),
        query(part(fielded("type", string("publication"))))
    );
}

#[test]
fn test_quoted_value_keeps_quotes() {
    assert_eq!(
        parse(r#"title:"hello world""#).unwrap(),
        query(part(fielded("title", string(r#""hello world""#))))
    );
}

#[test]
fn test_quoted_field_is_unquoted() {
    assert_eq!(
        parse(r#""type":publication"#).unwrap(),
        query(part(fielded("type", string("publication"))))
    );
}

#[test]
fn test_parenthesized_query() {
    assert_eq!(
        parse("(a:x)").unwrap(),
        query(part(query(part(fielded("a", string("x"))))))
    );
}

// ============================================================================
// Braces
// ============================================================================

#[test]
fn test_empty_dictionary() {
    assert_eq!(single_part(parse("{}").unwrap()), SyntaxNode::Dictionary(vec![]));
}

#[test]
fn test_dictionary_under_field() {
    let expected = fielded(
        "contribution",
        SyntaxNode::Dictionary(vec![
            key_val("role", string("aut")),
            key_val(
                "agent",
                SyntaxNode::Dictionary(vec![
                    key_val("firstName", string("Pelle")),
                    key_val("lastName", string("Olsson")),
                ]),
            ),
        ]),
    );

    assert_eq!(
        single_part(parse("contribution:{ role:aut, agent:{ firstName:Pelle, lastName:Olsson } }").unwrap()),
        expected
    );
}

#[test]
fn test_single_entry_braces_read_as_dictionary() {
    assert_eq!(
        single_part(parse("f:{ a:x }").unwrap()),
        fielded("f", SyntaxNode::Dictionary(vec![key_val("a", string("x"))]))
    );
}

#[test]
fn test_operators_in_braces_read_as_nested_query() {
    let node = single_part(parse("f:{ a:x or b:y }").unwrap());

    let SyntaxNode::Expr(expr) = node else {
        panic!("Expected expr");
    };
    let SyntaxNode::FieldedExpr { value, .. } = *expr else {
        panic!("Expected fielded expr");
    };
    assert!(matches!(*value, SyntaxNode::NestedQuery(_)));
}

#[test]
fn test_nested_query_inside_nested_query() {
    assert!(parse("f:{ a:{ b:c or d:e } }").is_ok());
    assert!(parse("{ a:x and b:y }").is_ok());
}

// ============================================================================
// Boolean queries
// ============================================================================

#[test]
fn test_operands_and_operators_in_source_order() {
    let a = part(fielded("a", string("x")));
    let b = part(fielded("b", string("y")));
    let c = part(fielded("c", string("z")));

    assert_eq!(
        parse("a:x and b:y or c:z").unwrap(),
        query(SyntaxNode::BooleanQuery(vec![
            a,
            SyntaxNode::Operator(Operator::And),
            b,
            SyntaxNode::Operator(Operator::Or),
            c,
        ]))
    );
}

#[test]
fn test_keywords_any_case() {
    assert_eq!(parse("a:x AND b:y").unwrap(), parse("a:x and b:y").unwrap());
    assert_eq!(parse("a:x Or b:y").unwrap(), parse("a:x or b:y").unwrap());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_parenthesis_as_value() {
    let (offset, expected) = unexpected(parse("a:(b").unwrap_err());
    assert_eq!(offset, 2);
    assert!(expected.contains(&"identifier".to_string()));
}

#[test]
fn test_error_message_names_position() {
    let err = parse("a:(b").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected '(' at line 1, column 3, expected identifier or string or '{'"
    );
}

#[test]
fn test_furthest_brace_error_wins() {
    // The dictionary reading fails at the second comma, past the nested
    // query reading, which fails at the first.
    let (offset, expected) = unexpected(parse("{a:1,,}").unwrap_err());
    assert_eq!(offset, 5);
    assert_eq!(expected, vec!["field name".to_string()]);
}

#[test]
fn test_unclosed_brace() {
    let (offset, expected) = unexpected(parse("f:{a:x").unwrap_err());
    assert_eq!(offset, 6);
    assert_eq!(expected, vec!["','".to_string(), "'}'".to_string()]);
}

#[test]
fn test_juxtaposition_is_rejected() {
    let (offset, expected) = unexpected(parse("a:x b:y").unwrap_err());
    assert_eq!(offset, 4);
    assert_eq!(expected, vec!["'and'", "'or'", "end of input"]);
}

#[test]
fn test_dangling_operator() {
    let err = parse("a:x and").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { ref found, .. } if found == "end of input"));
}

#[test]
fn test_empty_input() {
    let (offset, _) = unexpected(parse("").unwrap_err());
    assert_eq!(offset, 0);
}

#[test]
fn test_quoted_field_must_be_identifier() {
    let (offset, expected) = unexpected(parse(r#""a b":x"#).unwrap_err());
    assert_eq!(offset, 0);
    assert_eq!(expected, vec!["field name".to_string()]);
}

#[test]
fn test_empty_field_segments_are_rejected() {
    for text in ["a..b:x", ".a:x", "a.:x", "f:{ a..b:x }"] {
        let err = parse(text).unwrap_err();
        assert!(
            matches!(err, ParseError::UnexpectedToken { ref expected, .. } if expected == &["field name"]),
            "{text}: {err}"
        );
    }
}

#[test]
fn test_dotted_values_are_still_values() {
    assert!(parse("a:x..y").is_ok());
    assert!(parse(".hidden").is_ok());
}

#[test]
fn test_deep_parentheses_are_rejected() {
    let text = format!("{}a{}", "(".repeat(1000), ")".repeat(1000));
    let err = parse(&text).unwrap_err();
    assert_eq!(
        err,
        ParseError::TooDeep {
            position: err.position(),
            limit: MAX_DEPTH,
        }
    );
    assert_eq!(err.position().offset, MAX_DEPTH);
}

#[test]
fn test_deep_braces_are_rejected() {
    let text = format!("f:{}a:x{}", "{".repeat(1000), "}".repeat(1000));
    assert!(matches!(parse(&text), Err(ParseError::TooDeep { limit: MAX_DEPTH, .. })));

    let text = format!("{}a{}", "{".repeat(1000), "}".repeat(1000));
    assert!(matches!(parse(&text), Err(ParseError::TooDeep { .. })));
}

#[test]
fn test_nesting_within_limit() {
    let text = format!("{}a:x{}", "(".repeat(100), ")".repeat(100));
    assert!(parse(&text).is_ok());

    let text = format!("f:{}{{ a:x }}{}", "{ g:".repeat(50), "}".repeat(50));
    assert!(parse(&text).is_ok());

    // depth is released when a brace reading is abandoned
    let text = format!("{}{{ a:x or b:y }}{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
    assert!(parse(&text).is_ok());
}

#[test]
fn test_lex_errors_pass_through() {
    let err = parse("a:x & b:y").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(err.position().column, 5);
}

// ============================================================================
// Tree dump
// ============================================================================

#[test]
fn test_pretty() {
    assert_eq!(
        parse("type:publication").unwrap().pretty(),
        "query\n  query_part\n    expr\n      fielded_expr\n        field\ttype\n        string\tpublication\n"
    );
}

#[test]
fn test_pretty_boolean() {
    let dump = parse("a:x or *").unwrap().pretty();
    assert!(dump.contains("  boolean_query\n"));
    assert!(dump.contains("    operator\tor\n"));
    assert!(dump.ends_with("      asterisk\n"));
}
