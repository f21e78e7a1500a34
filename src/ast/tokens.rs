use std::fmt;

use crate::lexer::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Bare identifier, used both as a field name and as an unquoted value
    ///
    /// Made of ASCII letters, digits, `_`, `.` and `-`.
    ///
    /// # Examples
    /// ```text
    /// title
    /// contribution.role
    /// 978-91-0-012345-6
    /// ```
    Identifier(String),

    /// Double-quoted string, kept as written in the source
    ///
    /// The surrounding quotes and any escape sequences are preserved; the
    /// compiler strips and decodes them when it builds a match.
    ///
    /// # Examples
    /// ```text
    /// "hello world"
    /// "say \"hi\""
    /// ```
    Quoted(String),

    // Operators
    /// Conjunction (`and`, case-insensitive)
    And,

    /// Disjunction (`or`, case-insensitive)
    Or,

    /// Match everything
    ///
    /// # Example
    /// ```text
    /// *
    /// ```
    Star,

    // Delimiters
    /// Separates a field from its value
    ///
    /// # Examples
    /// ```text
    /// type:publication
    /// contribution:{ role:aut }
    /// ```
    Colon,

    /// Separates dictionary entries
    Comma,

    /// Opens a dictionary or a nested query
    LBrace,

    /// Closes a dictionary or a nested query
    RBrace,

    /// Opens a grouped query
    LParen,

    /// Closes a grouped query
    RParen,

    /// End of input
    Eof,
}

impl Token {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(s) => format!("identifier '{}'", s),
            Token::Quoted(s) => format!("string {}", s),
            Token::And => "'and'".to_string(),
            Token::Or => "'or'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Comma => "','".to_string(),
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A token together with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: Position,
}
