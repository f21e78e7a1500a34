pub mod aggregation;
pub mod ast;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod flatten;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod path;
pub mod query;

pub use aggregation::{AggregationSpec, AggregationTarget, AggregationTree, SpecError, compile_aggregations};
pub use ast::{Operator, SyntaxNode, Token};
pub use compiler::{CompileError, Compiler, QueryError, compile_query};
pub use config::{Config, ConfigError, LeafQuery};
pub use flatten::{flatten_aggregations, flatten_response};
pub use lexer::{LexError, Lexer, Position};
pub use output::{JsonEmitter, to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse};
pub use path::FieldPath;
pub use query::{MatchField, QueryTree};
