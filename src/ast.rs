//! # Nested Query Language - Syntax Tree
//!
//! This module defines the concrete syntax tree for the nested query language,
//! a compact filter language for documents whose fields hold arrays of
//! sub-objects (a publication with contributions, each with an agent, ...).
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Boolean operators between query parts
//! - **[syntax]** - Syntax tree nodes, one per grammar rule
//!
//! ## Grammar
//!
//! ```text
//! query          = query_part | boolean_query
//! query_part     = "*" | expr | dictionary | "(" query ")" | nested_query
//! boolean_query  = query_part operator query_part (operator query_part)*
//! nested_query   = "{" query "}"
//! dictionary     = "{" [key_val] ("," key_val)* "}"
//! key_val        = field ":" (string | dictionary)
//! operator       = "and" | "or"
//! expr           = string | fielded_expr
//! fielded_expr   = field ":" (string | dictionary | nested_query)
//! field          = identifier | quoted identifier
//! string         = identifier | quoted string
//! ```
//!
//! ## Nesting
//!
//! A dotted field reaches into nested objects independently for every
//! constraint:
//!
//! ```text
//! contribution.role:aut and contribution.agent.lastName:Olsson
//! ```
//!
//! A dictionary keeps all of its constraints on the *same* nested element:
//!
//! ```text
//! contribution:{ role:aut, agent:{ lastName:Olsson } }
//! ```
//!
//! A nested query does the same, with boolean operators inside:
//!
//! ```text
//! contribution:{ role:aut and agent:{ firstName:Pelle, lastName:Olsson } }
//! ```
pub mod operators;
pub mod syntax;
pub mod tokens;

pub use operators::Operator;
pub use syntax::SyntaxNode;
pub use tokens::{Spanned, Token};
