//! Lowers the syntax tree into a [`QueryTree`].
//!
//! The compiler is a pure function of the tree: the field path reached so far
//! is passed down explicitly, never stored, so one `Compiler` can serve any
//! number of threads.
//!
//! # Scoping rules
//!
//! - `field:value` extends the current path by `field`.
//! - A dotted field with a plain value (`contribution.role:aut`) gets its own
//!   `nested` scope at the parent path, so two dotted constraints may hold on
//!   different nested elements.
//! - A dictionary under a field becomes one `nested` scope around all of its
//!   entries, so they have to hold on the same nested element.
//! - A nested query (`{ query }`) under a field becomes a `nested` scope around
//!   the inner query; at the root the braces only group.
//! - `and` binds tighter than `or`.

use std::mem;

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Operator, SyntaxNode},
    parser::{self, ParseError},
    path::FieldPath,
    query::{MatchField, QueryTree},
};

/// A syntax tree shape the compiler does not know how to lower.
///
/// The parser never produces such trees; seeing this error means the grammar
/// and the compiler disagree. It is a defect, not bad user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("internal error: unexpected {found} node in {context}")]
    UnexpectedNode {
        context: &'static str,
        found: &'static str,
    },
}

/// Failure of the text → query tree pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Compiler;

impl Compiler {
    pub fn new() -> Self {
        Compiler
    }

    /// Compile a whole query, starting at the root scope.
    pub fn compile(&self, node: &SyntaxNode) -> Result<QueryTree, CompileError> {
        let tree = self.compile_at(node, &FieldPath::root())?;
        debug!(kind = tree.kind(), nodes = tree.size(), "compiled query");
        Ok(tree)
    }

    /// Compile `node` with `path` as the active field scope.
    pub fn compile_at(&self, node: &SyntaxNode, path: &FieldPath) -> Result<QueryTree, CompileError> {
        match node {
            SyntaxNode::Query(inner) | SyntaxNode::QueryPart(inner) | SyntaxNode::Expr(inner) => {
                self.compile_at(inner, path)
            }

            SyntaxNode::Asterisk => Ok(QueryTree::MatchAll),

            SyntaxNode::StringLiteral(text) => {
                Ok(QueryTree::matching(MatchField::from_path(path), unquote(text)))
            }

            SyntaxNode::FieldedExpr { field, value } | SyntaxNode::KeyVal { field, value } => {
                let name = field_name(field, node.kind())?;
                let compiled = self.compile_at(value, &path.child(name))?;
                if matches!(**value, SyntaxNode::StringLiteral(_)) {
                    Ok(dotted_scope(path, name, compiled))
                } else {
                    Ok(compiled)
                }
            }

            SyntaxNode::Dictionary(entries) => {
                let inner = match entries.as_slice() {
                    [] => QueryTree::MatchAll,
                    [entry] => self.compile_entry(entry, path)?,
                    _ => QueryTree::BoolMust(
                        entries
                            .iter()
                            .map(|entry| self.compile_entry(entry, path))
                            .collect::<Result<_, _>>()?,
                    ),
                };
                Ok(scoped(path, inner))
            }

            SyntaxNode::NestedQuery(inner) => {
                let inner = self.compile_at(inner, path)?;
                Ok(scoped(path, inner))
            }

            SyntaxNode::BooleanQuery(children) => self.compile_boolean(children, path),

            SyntaxNode::Operator(_) | SyntaxNode::Field(_) => Err(CompileError::UnexpectedNode {
                context: "query",
                found: node.kind(),
            }),
        }
    }

    fn compile_entry(&self, entry: &SyntaxNode, path: &FieldPath) -> Result<QueryTree, CompileError> {
        match entry {
            SyntaxNode::KeyVal { .. } => self.compile_at(entry, path),
            _ => Err(CompileError::UnexpectedNode {
                context: "dictionary",
                found: entry.kind(),
            }),
        }
    }

    /// Splits the operands at every `or`; each group is a conjunction, and
    /// more than one group becomes a disjunction over the groups.
    fn compile_boolean(&self, children: &[SyntaxNode], path: &FieldPath) -> Result<QueryTree, CompileError> {
        let mut groups: Vec<Vec<&SyntaxNode>> = vec![];
        let mut current = vec![];

        for child in children {
            match child {
                SyntaxNode::Operator(Operator::Or) => groups.push(mem::take(&mut current)),
                SyntaxNode::Operator(Operator::And) => {}
                operand => current.push(operand),
            }
        }
        groups.push(current);

        if groups.len() == 1 {
            return self.compile_conjunction(&groups[0], path);
        }

        let compiled = groups
            .iter()
            .map(|group| match group.as_slice() {
                [single] => self.compile_at(single, path),
                members => self.compile_conjunction(members, path),
            })
            .collect::<Result<_, _>>()?;

        Ok(QueryTree::any_of(compiled))
    }

    fn compile_conjunction(&self, members: &[&SyntaxNode], path: &FieldPath) -> Result<QueryTree, CompileError> {
        let clauses = members
            .iter()
            .map(|member| self.compile_at(member, path))
            .collect::<Result<_, _>>()?;
        Ok(QueryTree::BoolMust(clauses))
    }
}

/// Wraps `inner` in a nested scope unless we are at the root.
fn scoped(path: &FieldPath, inner: QueryTree) -> QueryTree {
    if path.is_root() {
        inner
    } else {
        QueryTree::nested(path, inner)
    }
}

/// Wraps the match of a dotted field `a.b.c` in a nested scope at `a.b`,
/// relative to `path`. Undotted fields are returned as is.
fn dotted_scope(path: &FieldPath, name: &str, compiled: QueryTree) -> QueryTree {
    match name.rsplit_once('.') {
        Some((parent, leaf)) if !parent.is_empty() && !leaf.is_empty() => {
            QueryTree::nested(&path.child(parent), compiled)
        }
        _ => compiled,
    }
}

fn field_name<'a>(field: &'a SyntaxNode, context: &'static str) -> Result<&'a str, CompileError> {
    match field {
        SyntaxNode::Field(name) => Ok(name),
        other => Err(CompileError::UnexpectedNode {
            context,
            found: other.kind(),
        }),
    }
}

/// Strips surrounding double quotes and decodes the escapes inside them.
/// Unquoted text is returned as is.
pub fn unquote(text: &str) -> String {
    let inner = match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) if text.len() >= 2 => inner,
        _ => return text.to_string(),
    };

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000c}'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('u') => {
                let high = read_hex4(&mut chars);
                let code = match high {
                    Some(h @ 0xD800..=0xDBFF) => {
                        let mut lookahead = chars.clone();
                        match (lookahead.next(), lookahead.next()) {
                            (Some('\\'), Some('u')) => match read_hex4(&mut lookahead) {
                                Some(low @ 0xDC00..=0xDFFF) => {
                                    chars = lookahead;
                                    Some(0x10000 + ((h - 0xD800) << 10) + (low - 0xDC00))
                                }
                                _ => None,
                            },
                            _ => None,
                        }
                    }
                    other => other,
                };
                result.push(code.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

fn read_hex4(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u32> {
    let mut code = 0;
    for _ in 0..4 {
        let digit = chars.peek()?.to_digit(16)?;
        chars.next();
        code = code * 16 + digit;
    }
    Some(code)
}

/// Parse and compile query text in one step.
pub fn compile_query(text: &str) -> Result<QueryTree, QueryError> {
    let syntax = parser::parse(text)?;
    Ok(Compiler::new().compile(&syntax)?)
}
