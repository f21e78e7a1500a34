use std::fmt;

use crate::ast::Operator;

/// Concrete syntax tree node produced by the parser.
///
/// The tree mirrors the grammar productions one to one, so the compiler can
/// walk it with a single exhaustive match. Leaves keep their source text.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    /// Start rule, wraps a `QueryPart` or a `BooleanQuery`
    Query(Box<SyntaxNode>),

    /// One operand of a query
    ///
    /// # Examples
    /// ```text
    /// *
    /// title:rust
    /// (a:x or b:y)
    /// { role:aut }
    /// ```
    QueryPart(Box<SyntaxNode>),

    /// Operands interleaved with `Operator` nodes, in source order
    ///
    /// # Example
    /// ```text
    /// a:x and b:y or c:z
    /// ```
    BooleanQuery(Vec<SyntaxNode>),

    /// A full query in braces
    ///
    /// Used for grouping under a field rather than for key/value pairs.
    ///
    /// # Example
    /// ```text
    /// contribution:{ role:aut and agent.name:Pelle }
    /// ```
    NestedQuery(Box<SyntaxNode>),

    /// Comma-separated `KeyVal` entries in braces, possibly empty
    ///
    /// # Examples
    /// ```text
    /// {}
    /// { role:aut, agent:{ lastName:Olsson } }
    /// ```
    Dictionary(Vec<SyntaxNode>),

    /// Dictionary entry
    KeyVal {
        field: Box<SyntaxNode>,
        value: Box<SyntaxNode>,
    },

    /// `and` / `or` between boolean operands
    Operator(Operator),

    /// Either a bare `StringLiteral` or a `FieldedExpr`
    Expr(Box<SyntaxNode>),

    /// Field-scoped value
    ///
    /// # Examples
    /// ```text
    /// type:publication
    /// contribution:{ role:aut }
    /// ```
    FieldedExpr {
        field: Box<SyntaxNode>,
        value: Box<SyntaxNode>,
    },

    /// Field name segment, unquoted
    Field(String),

    /// Value as written, including the quotes when it was quoted
    StringLiteral(String),

    /// `*`
    Asterisk,
}

impl SyntaxNode {
    /// Grammar rule name of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            SyntaxNode::Query(_) => "query",
            SyntaxNode::QueryPart(_) => "query_part",
            SyntaxNode::BooleanQuery(_) => "boolean_query",
            SyntaxNode::NestedQuery(_) => "nested_query",
            SyntaxNode::Dictionary(_) => "dictionary",
            SyntaxNode::KeyVal { .. } => "key_val",
            SyntaxNode::Operator(_) => "operator",
            SyntaxNode::Expr(_) => "expr",
            SyntaxNode::FieldedExpr { .. } => "fielded_expr",
            SyntaxNode::Field(_) => "field",
            SyntaxNode::StringLiteral(_) => "string",
            SyntaxNode::Asterisk => "asterisk",
        }
    }

    /// Indented dump of the tree, one rule per line.
    ///
    /// ```text
    /// query
    ///   query_part
    ///     expr
    ///       fielded_expr
    ///         field	type
    ///         string	publication
    /// ```
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(self.kind());

        match self {
            SyntaxNode::Field(text) | SyntaxNode::StringLiteral(text) => {
                out.push('\t');
                out.push_str(text);
                out.push('\n');
            }
            SyntaxNode::Operator(op) => {
                out.push('\t');
                out.push_str(&op.to_string());
                out.push('\n');
            }
            SyntaxNode::Asterisk => out.push('\n'),
            SyntaxNode::Query(inner)
            | SyntaxNode::QueryPart(inner)
            | SyntaxNode::NestedQuery(inner)
            | SyntaxNode::Expr(inner) => {
                out.push('\n');
                inner.write_pretty(out, depth + 1);
            }
            SyntaxNode::BooleanQuery(children) | SyntaxNode::Dictionary(children) => {
                out.push('\n');
                for child in children {
                    child.write_pretty(out, depth + 1);
                }
            }
            SyntaxNode::KeyVal { field, value } | SyntaxNode::FieldedExpr { field, value } => {
                out.push('\n');
                field.write_pretty(out, depth + 1);
                value.write_pretty(out, depth + 1);
            }
        }
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}
