//! Documentation content for nestql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Nesting,
    Booleans,
    Aggregations,
    Output,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "nesting" | "nested" | "dictionaries" => Some(Self::Nesting),
            "booleans" | "boolean" | "operators" | "ops" => Some(Self::Booleans),
            "aggregations" | "aggregation" | "aggs" => Some(Self::Aggregations),
            "output" | "config" | "json" => Some(Self::Output),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"NESTQL DOCUMENTATION

nestql is a compact query language for documents that hold arrays of nested
objects. Queries compile to the JSON query trees of a nested-document search
backend, where constraints inside one nested scope must hold on the same
nested element.

DOCUMENTATION CATEGORIES

  syntax            Values, fields, wildcards, quoting and grouping
  nesting           Dotted fields, dictionaries and nested queries
  booleans          and / or, precedence and parentheses
  aggregations      Aggregation specs and response flattening
  output            JSON shapes and the output config file

QUICK REFERENCE

  *                       Match everything
  Olsson                  Value searched across all fields
  type:publication        Fielded value
  a:x and b:y or c:z      (a:x and b:y) or c:z
  f:{ a:x, b:y }          Both on the same nested f
  f:{ a:x or b:y }        Nested query with operators

Run 'nestql doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Nesting) => Ok(NESTING_DOC),
        Some(DocCategory::Booleans) => Ok(BOOLEANS_DOC),
        Some(DocCategory::Aggregations) => Ok(AGGREGATIONS_DOC),
        Some(DocCategory::Output) => Ok(OUTPUT_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Values, Fields and Grouping

MATCH ALL
  *
    Matches every document.
    Output: {"match_all": {}}

VALUES
  Olsson
  "hello world"
    A bare value is searched across all fields (the "_all" field by default).
    Identifiers use letters, digits, '_', '.' and '-'.
    Quoted strings may hold anything; escapes follow JSON (\" \\ \n \uXXXX).

    Example:
      Query:  Olsson
      Output: {"match": {"_all": "Olsson"}}

FIELDED VALUES
  field:value
    Matches documents whose field holds the value.

    Example:
      Query:  type:publication
      Output: {"match": {"type": "publication"}}

    A field may be quoted ("type":publication) but must still be a valid
    identifier. Dotted fields need a name on both sides of every '.'.

GROUPING
  ( query )
    Parentheses group a query so it acts as a single part.

    Example:
      a:x and (b:y or c:z)

    Parentheses and braces nest at most 256 levels deep.

KEYWORDS
  'and' and 'or' are keywords in any letter case. Quote them to search
  for the words themselves: "and".

ERRORS
  Every syntax error names its line and column plus what was expected:
    $ nestql compile 'a:(b'
    syntax error: unexpected '(' at line 1, column 3, expected identifier or string or '{'
"#;

const NESTING_DOC: &str = r#"NESTING - Dotted Fields, Dictionaries and Nested Queries

DOTTED FIELDS
  contribution.role:aut
    Reaches into nested objects. Each constraint written this way gets its
    own nested scope at the parent path, so two dotted constraints may hold
    on different elements.

    Output:
      {"nested": {"path": "contribution", "query":
        {"match": {"contribution.role": "aut"}}}}

DICTIONARIES
  field:{ key:value, key:value }
    All entries must hold on the same nested element of 'field'.
    Values may be strings or further dictionaries.

    Example:
      Query:  contribution:{ role:aut, agent:{ firstName:Pelle, lastName:Olsson } }

      Finds publications where one contribution has role 'aut' and an agent
      named Pelle Olsson.

    Output:
      {"nested": {"path": "contribution", "query": {"bool": {"must": [
        {"match": {"contribution.role": "aut"}},
        {"nested": {"path": "contribution.agent", "query": {"bool": {"must": [
          {"match": {"contribution.agent.firstName": "Pelle"}},
          {"match": {"contribution.agent.lastName": "Olsson"}}
        ]}}}}
      ]}}}}

    An empty dictionary matches any nested element: field:{}

NESTED QUERIES
  field:{ query }
    Like a dictionary, but the inside is a full query with operators.

    Example:
      contribution:{ role:aut and agent:{ lastName:Olsson or lastName:Svensson } }

PATHS
  Field names inside a scope are joined to the enclosing path with '.':
  the constraint role:aut inside contribution:{...} targets
  "contribution.role". Every scope becomes one nested node whose path is
  the full dotted path.
"#;

const BOOLEANS_DOC: &str = r#"BOOLEANS - and / or

OPERATORS
  and    Both parts must match
  or     At least one group must match

PRECEDENCE
  'and' binds tighter than 'or'. A chain is split at every 'or' and each
  run of 'and'-joined parts becomes one group.

    a:x and b:y or c:z      =>  (a:x and b:y) or c:z
    a:x or b:y and c:z      =>  a:x or (b:y and c:z)

  Output for 'a:x and b:y or c:z':
    {"bool": {"min_should_match": 1, "should": [
      {"bool": {"must": [{"match": {"a": "x"}}, {"match": {"b": "y"}}]}},
      {"match": {"c": "z"}}
    ]}}

  Use parentheses to override: a:x and (b:y or c:z)

JUXTAPOSITION
  Two parts without an operator between them are a syntax error:
    a:x b:y     =>  expected 'and' or 'or'

NEGATION
  There is no 'not' operator.
"#;

const AGGREGATIONS_DOC: &str = r#"AGGREGATIONS - Specs and Response Flattening

SPEC
  A JSON object mapping each aggregation name to a target:

    "field"                    terms aggregation over 'field'
    {"scope": target}          nested aggregation over 'scope'

  Example:
    $ nestql aggs --input '{"type": "type", "role": {"contribution": "role"}}'

    {"aggregations": {
      "type": {"terms": {"field": "type"}},
      "role": {
        "nested": {"path": "contribution"},
        "aggregations": {"role": {"terms": {"field": "contribution.role"}}}
      }
    }}

  Nested levels reuse the aggregation name, which is what flattening relies
  on. A nested target must have exactly one key.

FLATTENING
  The backend answers a nested aggregation with one level per scope, each
  keyed by the same name. 'nestql flatten' collapses those levels so every
  aggregation looks like a plain terms result:

    Input:   {"aggregations": {"role": {"doc_count": 4, "role": {"buckets": [...]}}}}
    Output:  {"aggregations": {"role": {"buckets": [...]}}}

  Everything outside 'aggregations' is left as is.
"#;

const OUTPUT_DOC: &str = r#"OUTPUT - JSON Shapes and Config

QUERY SHAPES
  *                 {"match_all": {}}
  value             {"match": {"_all": value}}
  field:value       {"match": {field: value}}
  a and b           {"bool": {"must": [a, b]}}
  a or b            {"bool": {"min_should_match": 1, "should": [a, b]}}
  scope             {"nested": {"path": p, "query": q}}

REQUEST BODY
  'nestql compile' prints {"query": ...}; 'nestql aggs' prints
  {"aggregations": ...}. Use --pretty for 2-space indentation.

CONFIG FILE
  A JSON file passed with --config. Every key is optional:

    {
      "all_fields": "_all",
      "leaf_query": "match",
      "should_match_key": "min_should_match"
    }

  leaf_query         "match" or "term"
  all_fields         field used for values written without a field
  should_match_key   key emitted next to 'should' (e.g. "minimum_should_match")

LOGGING
  Set RUST_LOG=nestql=debug (or trace) to log parsing and compilation to
  stderr.
"#;
