use std::mem;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{Operator, Spanned, SyntaxNode, Token},
    lexer::{LexError, Lexer, Position},
    path::is_field_name,
};

/// How deep parentheses and braces may nest before parsing gives up.
pub const MAX_DEPTH: usize = 256;

/// Malformed query text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected {found} at {position}, expected {}", .expected.join(" or "))]
    UnexpectedToken {
        found: String,
        position: Position,
        expected: Vec<String>,
    },

    #[error("query nested deeper than {limit} levels at {position}")]
    TooDeep { position: Position, limit: usize },
}

impl ParseError {
    /// Where the offending token or character starts.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { position, .. } | ParseError::TooDeep { position, .. } => *position,
        }
    }

    /// Keeps whichever error got further into the input.
    fn furthest(self, other: ParseError) -> ParseError {
        if other.position().offset > self.position().offset {
            other
        } else {
            self
        }
    }
}

pub struct Parser {
    tokens: Vec<Spanned>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Result<Self, ParseError> {
        let tokens = lexer.tokenize()?;
        Ok(Parser {
            tokens,
            cursor: 0,
            depth: 0,
        })
    }

    fn current(&self) -> &Spanned {
        // tokenize() always ends with Eof, and the cursor never moves past it
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn peek(&self, offset: usize) -> &Token {
        let index = (self.cursor + offset).min(self.tokens.len() - 1);
        &self.tokens[index].token
    }

    fn advance(&mut self) {
        if self.current().token != Token::Eof {
            self.cursor += 1;
        }
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current().token) == mem::discriminant(token)
    }

    fn error(&self, expected: &[&str]) -> ParseError {
        let current = self.current();
        ParseError::UnexpectedToken {
            found: current.token.describe(),
            position: current.position,
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Enter one level of `(` or `{`.
    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                position: self.current().position,
                limit: MAX_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            let expected = expected.describe();
            return Err(self.error(&[expected.as_str()]));
        }
        self.advance();
        Ok(())
    }

    /// Parse the whole input as a single query.
    pub fn parse(&mut self) -> Result<SyntaxNode, ParseError> {
        let query = self.parse_query()?;
        if !self.check(&Token::Eof) {
            return Err(self.error(&["'and'", "'or'", "end of input"]));
        }
        debug!(tokens = self.tokens.len(), "parsed query");
        Ok(query)
    }

    fn parse_query(&mut self) -> Result<SyntaxNode, ParseError> {
        let first = self.parse_query_part()?;

        if self.operator().is_none() {
            return Ok(SyntaxNode::Query(Box::new(first)));
        }

        let mut children = vec![first];
        while let Some(op) = self.operator() {
            self.advance();
            children.push(SyntaxNode::Operator(op));
            children.push(self.parse_query_part()?);
        }

        Ok(SyntaxNode::Query(Box::new(SyntaxNode::BooleanQuery(children))))
    }

    fn operator(&self) -> Option<Operator> {
        match self.current().token {
            Token::And => Some(Operator::And),
            Token::Or => Some(Operator::Or),
            _ => None,
        }
    }

    fn parse_query_part(&mut self) -> Result<SyntaxNode, ParseError> {
        let part = match &self.current().token {
            Token::Star => {
                self.advance();
                SyntaxNode::Asterisk
            }
            Token::LParen => {
                self.descend()?;
                self.advance();
                let query = self.parse_query()?;
                self.expect(Token::RParen)?;
                self.ascend();
                query
            }
            Token::LBrace => self.parse_braced()?,
            Token::Identifier(_) | Token::Quoted(_) => self.parse_expr()?,
            _ => return Err(self.error(&["'*'", "'('", "'{'", "identifier", "string"])),
        };

        Ok(SyntaxNode::QueryPart(Box::new(part)))
    }

    /// `{` starts either a dictionary or a nested query. The dictionary reading
    /// is tried first; both readings compile the same when both succeed.
    fn parse_braced(&mut self) -> Result<SyntaxNode, ParseError> {
        let (start, depth) = (self.cursor, self.depth);

        let dictionary_err = match self.parse_dictionary() {
            Ok(dictionary) => return Ok(dictionary),
            Err(e @ ParseError::TooDeep { .. }) => return Err(e),
            Err(e) => e,
        };

        trace!(offset = self.current().position.offset, "not a dictionary, trying nested query");
        self.cursor = start;
        self.depth = depth;

        self.parse_nested_query()
            .map_err(|nested_err| dictionary_err.furthest(nested_err))
    }

    fn parse_nested_query(&mut self) -> Result<SyntaxNode, ParseError> {
        self.descend()?;
        self.expect(Token::LBrace)?;
        let query = self.parse_query()?;
        self.expect(Token::RBrace)?;
        self.ascend();
        Ok(SyntaxNode::NestedQuery(Box::new(query)))
    }

    fn parse_dictionary(&mut self) -> Result<SyntaxNode, ParseError> {
        self.descend()?;
        self.expect(Token::LBrace)?;
        let mut entries = vec![];

        if self.is_field_start() {
            entries.push(self.parse_key_val()?);
        }

        while self.check(&Token::Comma) {
            self.advance();
            entries.push(self.parse_key_val()?);
        }

        if !self.check(&Token::RBrace) {
            return Err(self.error(&["','", "'}'"]));
        }
        self.advance();
        self.ascend();

        Ok(SyntaxNode::Dictionary(entries))
    }

    fn is_field_start(&self) -> bool {
        matches!(self.current().token, Token::Identifier(_) | Token::Quoted(_))
    }

    fn parse_key_val(&mut self) -> Result<SyntaxNode, ParseError> {
        let field = self.parse_field()?;
        self.expect(Token::Colon)?;

        let value = if self.check(&Token::LBrace) {
            self.parse_dictionary()?
        } else {
            self.parse_string()?
        };

        Ok(SyntaxNode::KeyVal {
            field: Box::new(field),
            value: Box::new(value),
        })
    }

    fn parse_expr(&mut self) -> Result<SyntaxNode, ParseError> {
        if self.peek(1) != &Token::Colon {
            return Ok(SyntaxNode::Expr(Box::new(self.parse_string()?)));
        }

        let field = self.parse_field()?;
        self.expect(Token::Colon)?;

        let value = if self.check(&Token::LBrace) {
            self.parse_braced()?
        } else {
            self.parse_string()?
        };

        Ok(SyntaxNode::Expr(Box::new(SyntaxNode::FieldedExpr {
            field: Box::new(field),
            value: Box::new(value),
        })))
    }

    fn parse_field(&mut self) -> Result<SyntaxNode, ParseError> {
        let name = match &self.current().token {
            Token::Identifier(name) if is_field_name(name) => name.clone(),
            Token::Quoted(raw) => {
                let inner = &raw[1..raw.len() - 1];
                if !is_field_name(inner) {
                    return Err(self.error(&["field name"]));
                }
                inner.to_string()
            }
            _ => return Err(self.error(&["field name"])),
        };

        self.advance();
        Ok(SyntaxNode::Field(name))
    }

    fn parse_string(&mut self) -> Result<SyntaxNode, ParseError> {
        match &self.current().token {
            Token::Identifier(text) | Token::Quoted(text) => {
                let text = text.clone();
                self.advance();
                Ok(SyntaxNode::StringLiteral(text))
            }
            _ => Err(self.error(&["identifier", "string", "'{'"])),
        }
    }
}

/// Parse query text into a syntax tree.
pub fn parse(text: &str) -> Result<SyntaxNode, ParseError> {
    Parser::new(Lexer::new(text))?.parse()
}
