use std::fmt;

use thiserror::Error;

use crate::ast::{Spanned, Token};

/// Location of a character in the query text.
///
/// `offset` counts characters from the start; `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while splitting the query text into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: Position },

    #[error("unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    #[error("invalid escape sequence '\\{ch}' at {position}")]
    InvalidEscape { ch: char, position: Position },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. } => *position,
        }
    }
}

/// Characters allowed in a bare identifier.
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' || ch == '-'
}

pub struct Lexer {
    input: Vec<char>,
    position: Position,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: Position::start(),
        }
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> Position {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position.offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position.offset += 1;
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_identifier_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a double-quoted string, returning it with its quotes and escapes intact.
    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::from('"');
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    result.push('"');
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    result.push('\\');
                    self.advance();
                    let escape_at = self.position;
                    match self.current_char() {
                        Some(c @ ('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't')) => {
                            result.push(c);
                            self.advance();
                        }
                        Some('u') => {
                            result.push('u');
                            self.advance();
                            for _ in 0..4 {
                                match self.current_char() {
                                    Some(h) if h.is_ascii_hexdigit() => {
                                        result.push(h);
                                        self.advance();
                                    }
                                    Some(_) => {
                                        return Err(LexError::InvalidEscape {
                                            ch: 'u',
                                            position: escape_at,
                                        });
                                    }
                                    None => {
                                        return Err(LexError::UnterminatedString { position: start });
                                    }
                                }
                            }
                        }
                        Some(c) => {
                            return Err(LexError::InvalidEscape {
                                ch: c,
                                position: escape_at,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => Token::Eof,
            Some('{') => self.single(Token::LBrace),
            Some('}') => self.single(Token::RBrace),
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some(':') => self.single(Token::Colon),
            Some(',') => self.single(Token::Comma),
            Some('*') => self.single(Token::Star),
            Some('"') => Token::Quoted(self.read_string()?),
            Some(ch) if is_identifier_char(ch) => {
                let ident = self.read_identifier();

                match ident.to_ascii_lowercase().as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    _ => Token::Identifier(ident),
                }
            }
            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    position: self.position,
                });
            }
        };

        Ok(token)
    }

    /// Next token together with the position it starts at.
    pub fn next_spanned(&mut self) -> Result<Spanned, LexError> {
        self.skip_whitespace();
        let position = self.position;
        let token = self.next_token()?;
        Ok(Spanned { token, position })
    }

    /// Reads the whole input. The last element is always `Token::Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_spanned()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_keywords_are_case_insensitive() {
    let mut lexer = Lexer::new("and AND Or order");
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("order".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_fielded_value() {
    let mut lexer = Lexer::new("contribution:{ role:aut }");
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("contribution".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Colon);
    assert_eq!(lexer.next_token().unwrap(), Token::LBrace);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("role".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Colon);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("aut".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RBrace);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
