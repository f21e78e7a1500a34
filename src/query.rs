use crate::path::FieldPath;

/// Field targeted by a leaf match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchField {
    /// No field scope was active; match across all fields
    All,
    /// Dotted field path
    Path(String),
}

impl MatchField {
    pub fn from_path(path: &FieldPath) -> Self {
        if path.is_root() {
            MatchField::All
        } else {
            MatchField::Path(path.dotted())
        }
    }
}

/// Compiled query, independent of any particular backend's JSON dialect.
///
/// [`crate::output::JsonEmitter`] turns it into the nested-object structure a
/// nested-document search backend expects.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryTree {
    /// Matches every document
    ///
    /// ```json
    /// { "match_all": {} }
    /// ```
    MatchAll,

    /// Single field/value constraint
    ///
    /// ```json
    /// { "match": { "contribution.role": "aut" } }
    /// ```
    Match { field: MatchField, value: String },

    /// Conjunction
    ///
    /// ```json
    /// { "bool": { "must": [ ... ] } }
    /// ```
    BoolMust(Vec<QueryTree>),

    /// Disjunction; `min_match` is always 1 in this language
    ///
    /// ```json
    /// { "bool": { "min_should_match": 1, "should": [ ... ] } }
    /// ```
    BoolShould { groups: Vec<QueryTree>, min_match: u32 },

    /// Evaluates `query` against one element of the nested array at `path`.
    /// `path` is never empty.
    ///
    /// ```json
    /// { "nested": { "path": "contribution", "query": { ... } } }
    /// ```
    Nested { path: String, query: Box<QueryTree> },
}

impl QueryTree {
    pub fn matching(field: MatchField, value: impl Into<String>) -> Self {
        QueryTree::Match {
            field,
            value: value.into(),
        }
    }

    /// Wraps `query` in a nested scope. Callers must not pass the root path.
    pub fn nested(path: &FieldPath, query: QueryTree) -> Self {
        debug_assert!(!path.is_root(), "nested scope needs a non-empty path");
        QueryTree::Nested {
            path: path.dotted(),
            query: Box::new(query),
        }
    }

    /// Disjunction over `groups` with a minimum match of one.
    pub fn any_of(groups: Vec<QueryTree>) -> Self {
        QueryTree::BoolShould {
            groups,
            min_match: 1,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            QueryTree::MatchAll => "match_all",
            QueryTree::Match { .. } => "match",
            QueryTree::BoolMust(_) => "bool_must",
            QueryTree::BoolShould { .. } => "bool_should",
            QueryTree::Nested { .. } => "nested",
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            QueryTree::MatchAll | QueryTree::Match { .. } => 1,
            QueryTree::BoolMust(clauses) => 1 + clauses.iter().map(QueryTree::size).sum::<usize>(),
            QueryTree::BoolShould { groups, .. } => {
                1 + groups.iter().map(QueryTree::size).sum::<usize>()
            }
            QueryTree::Nested { query, .. } => 1 + query.size(),
        }
    }
}
