//! Filter expression parser
//!
//! This module turns SQL-like filter text into a [`Predicate`] tree. The
//! parser holds no state between calls, so `parse` can run concurrently from
//! any number of threads.

pub mod lexer;
pub mod parse;
pub mod token;

pub use lexer::Lexer;
pub use parse::{ParseError, ParseResult, Parser, ParserConfig};
pub use token::{Token, TokenKind};

use crate::ast::Predicate;
use tracing::debug;

/// Parse a complete filter expression with the default configuration
pub fn parse(text: &str) -> ParseResult<Predicate> {
    parse_with_config(text, &ParserConfig::default())
}

/// Parse a complete filter expression
pub fn parse_with_config(text: &str, config: &ParserConfig) -> ParseResult<Predicate> {
    Parser::with_config(text, *config).parse().map_err(|err| {
        debug!(len = text.len(), kind = %err.kind(), error = %err, "failed to parse filter");
        err
    })
}
