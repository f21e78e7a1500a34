//! Compile query text into a search request body

use serde_json::Value;

use super::{CliError, render_json};
use crate::{Compiler, Config, JsonEmitter, QueryError, parse};

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The query to compile
    pub query: String,
    /// Only validate syntax, don't compile
    pub syntax_only: bool,
    /// Print the syntax tree instead of the compiled query
    pub tree: bool,
    /// Output configuration
    pub config: Config,
}

/// Result of a compile operation
#[derive(Debug, Clone, PartialEq)]
pub enum CompileOutput {
    /// Syntax validation passed
    SyntaxValid,
    /// Indented syntax tree dump
    Tree(String),
    /// Request body `{"query": ...}`
    Request(Value),
}

impl CompileOutput {
    pub fn render(&self, pretty: bool) -> Result<String, CliError> {
        match self {
            CompileOutput::SyntaxValid => Ok("Syntax is valid".to_string()),
            CompileOutput::Tree(tree) => Ok(tree.trim_end().to_string()),
            CompileOutput::Request(body) => render_json(body, pretty),
        }
    }
}

/// Execute a compile operation on a single query
pub fn execute_compile(options: &CompileOptions) -> Result<CompileOutput, CliError> {
    let syntax = parse(&options.query)?;

    if options.tree {
        return Ok(CompileOutput::Tree(syntax.pretty()));
    }

    if options.syntax_only {
        return Ok(CompileOutput::SyntaxValid);
    }

    let query = Compiler::new()
        .compile(&syntax)
        .map_err(QueryError::from)?;

    Ok(CompileOutput::Request(
        JsonEmitter::new(&options.config).request(Some(&query), None),
    ))
}

/// Compile every non-empty line of `input` as its own query.
///
/// Stops at the first failing line; the error carries its 1-based line number.
pub fn execute_compile_lines(input: &str, options: &CompileOptions) -> Result<Vec<CompileOutput>, CliError> {
    let mut outputs = vec![];

    for (index, line) in input.lines().enumerate() {
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let line_options = CompileOptions {
            query: query.to_string(),
            ..options.clone()
        };

        let output = execute_compile(&line_options).map_err(|e| CliError::Line {
            line: index + 1,
            source: Box::new(e),
        })?;
        outputs.push(output);
    }

    Ok(outputs)
}
