//! Scan filter expressions
//!
//! Parses SQL-like filter text such as `foo is not null and foo < 5` into an
//! immutable predicate tree for scan planning and file pruning.
//!
//! ```
//! use scanfilter_core::{parse, Predicate};
//!
//! let predicate = parse("foo LIKE 'data%'").unwrap();
//! assert_eq!(predicate, Predicate::starts_with("foo", "data"));
//! ```

pub mod ast;
pub mod parser;

pub use ast::{
    ComparisonOp, Literal, LiteralSet, LiteralType, Predicate, PrefixOp, Reference, SetOp,
    TypeError, UnaryOp, Visitor,
};
pub use parser::{parse, parse_with_config, ParseError, ParseResult, Parser, ParserConfig};

use std::fmt;
use thiserror::Error;

/// Diagnostic category shared by every error this crate reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text does not match the grammar
    Syntax,
    /// The text is well formed but describes an invalid predicate
    Semantic,
    /// A node was constructed with invalid operands
    Type,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "SyntaxError"),
            ErrorKind::Semantic => write!(f, "SemanticError"),
            ErrorKind::Type => write!(f, "TypeError"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Type error: {0}")]
    Type(#[from] TypeError),
}

impl Error {
    /// Diagnostic category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(err) => err.kind(),
            Error::Type(err) => err.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
