//! CLI support for nestql
//!
//! Provides programmatic access to the nestql CLI functionality for embedding
//! in other tools (search front-ends, test drivers).

mod aggs;
mod compile;
mod docs;
mod flatten;

pub use aggs::{AggsOptions, execute_aggs};
pub use compile::{CompileOptions, CompileOutput, execute_compile, execute_compile_lines};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use flatten::execute_flatten;

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Query text did not parse or compile
    #[error("{0}")]
    Query(#[from] crate::QueryError),

    /// Aggregation specification is malformed
    #[error("Invalid aggregation spec: {0}")]
    Spec(#[from] crate::SpecError),

    /// Config file could not be loaded
    #[error("{0}")]
    Config(#[from] crate::ConfigError),

    /// JSON input did not parse
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failure while processing one line of a batch
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<CliError>,
    },

    /// No input provided
    #[error("No input provided. Pass it as an argument, use --input or pipe it to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'nestql docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Query(e.into())
    }
}

/// Serialize `value` compactly or with 2-space indentation.
pub fn render_json(value: &serde_json::Value, pretty: bool) -> Result<String, CliError> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
