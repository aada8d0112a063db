//! Token definitions for the filter expression language

use bigdecimal::BigDecimal;
use std::fmt;

/// A token with position information
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source text for this token
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: String, line: usize, column: usize) -> Self {
        Self { kind, text, line, column }
    }

    /// How this token is named in a diagnostic
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of text".to_string(),
            TokenKind::StringLit(_) => self.text.clone(),
            _ => format!("'{}'", self.text),
        }
    }
}

/// The kind of token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords (case-insensitive)
    And,
    Or,
    Not,
    In,
    Is,
    Null,
    NaN,
    Like,
    True,
    False,

    // Comparison operators
    Eq,   // = or ==
    Neq,  // != or <>
    Lt,   // <
    Gt,   // >
    LtEq, // <=
    GtEq, // >=

    // Literals
    /// Single-quoted text, escapes left in place
    StringLit(String),
    IntLit(i64),
    DecimalLit(BigDecimal),

    // Identifiers
    Ident(String),
    /// Double-quoted identifier, taken verbatim
    QuotedIdent(String),

    // Punctuation
    Comma,  // ,
    Dot,    // .
    LParen, // (
    RParen, // )

    // Special
    Eof,
    Error(String),
}

impl TokenKind {
    /// Look up a keyword, ignoring case
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word.to_ascii_lowercase().as_str() {
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "in" => TokenKind::In,
            "is" => TokenKind::Is,
            "null" => TokenKind::Null,
            "nan" => TokenKind::NaN,
            "like" => TokenKind::Like,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this token is a comparison operator
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::Neq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::LtEq
                | TokenKind::GtEq
        )
    }


}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::In => write!(f, "IN"),
            TokenKind::Is => write!(f, "IS"),
            TokenKind::Null => write!(f, "NULL"),
            TokenKind::NaN => write!(f, "NAN"),
            TokenKind::Like => write!(f, "LIKE"),
            TokenKind::True => write!(f, "TRUE"),
            TokenKind::False => write!(f, "FALSE"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::Neq => write!(f, "!="),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::LtEq => write!(f, "<="),
            TokenKind::GtEq => write!(f, ">="),
            TokenKind::StringLit(s) => write!(f, "'{}'", s),
            TokenKind::IntLit(n) => write!(f, "{}", n),
            TokenKind::DecimalLit(d) => write!(f, "{}", d.to_plain_string()),
            TokenKind::Ident(s) => write!(f, "{}", s),
            TokenKind::QuotedIdent(s) => write!(f, "\"{}\"", s),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Dot => write!(f, "."),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Eof => write!(f, "end of text"),
            TokenKind::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}
