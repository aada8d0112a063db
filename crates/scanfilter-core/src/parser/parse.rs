//! Parser implementation for filter expressions
//!
//! Precedence, from loosest to tightest: `OR`, `AND`, `NOT`, then
//! parenthesized groups and predicate atoms. Chains of the same connective
//! are folded into one variadic node while parsing.

use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::ast::{ComparisonOp, Literal, LiteralSet, Predicate, Reference, SetOp, TypeError};
use crate::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

const COMPARISON_OPS: &str = "<= | <> | < | >= | > | == | = | !=";

/// Parse error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Expected {expected}, found {found} (line {line}, column {column})")]
    UnexpectedToken { expected: String, found: String, line: usize, column: usize },

    #[error("{message} (line {line}, column {column})")]
    InvalidToken { message: String, line: usize, column: usize },

    #[error("Expression nested deeper than {limit} levels (line {line}, column {column})")]
    NestingTooDeep { limit: usize, line: usize, column: usize },

    #[error("Invalid IN list: {0}")]
    InvalidLiteralSet(#[source] TypeError),

    #[error("LIKE expressions only supports wildcard, '%', at the end of a string")]
    InvalidLikePattern { pattern: String },
}

impl ParseError {
    /// Diagnostic category
    ///
    /// `Syntax` means the text is malformed; `Semantic` means it is well
    /// formed but describes an invalid predicate.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnexpectedToken { .. }
            | ParseError::InvalidToken { .. }
            | ParseError::NestingTooDeep { .. } => ErrorKind::Syntax,
            ParseError::InvalidLiteralSet(_) | ParseError::InvalidLikePattern { .. } => {
                ErrorKind::Semantic
            }
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Maximum nesting of parentheses and `NOT`
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl ParserConfig {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// No nesting limit; only use with trusted input
    pub fn unbounded() -> Self {
        Self { max_depth: usize::MAX }
    }
}

/// Result of lowering a `LIKE` pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum LikePattern {
    /// No wildcard: plain equality
    Exact(String),
    /// A single trailing wildcard: prefix match
    Prefix(String),
}

/// Resolve a backslash escape, keeping unknown escapes verbatim
fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\'' | '\\' | '%' => out.push(ch),
        other => {
            out.push('\\');
            out.push(other);
        }
    }
}

/// Turn the raw body of a single-quoted string into its value
fn unescape(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(escaped) => push_escaped(&mut value, escaped),
                None => value.push('\\'),
            },
            _ => value.push(ch),
        }
    }
    value
}

/// Lower the raw body of a `LIKE` pattern
///
/// Returns `None` when an unescaped `%` appears anywhere but the final
/// position.
fn lower_like(raw: &str) -> Option<LikePattern> {
    let mut value = String::with_capacity(raw.len());
    let mut wildcard = false;
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if wildcard {
            return None;
        }
        match ch {
            '\\' => match chars.next() {
                Some(escaped) => push_escaped(&mut value, escaped),
                None => value.push('\\'),
            },
            '%' => wildcard = true,
            _ => value.push(ch),
        }
    }

    if wildcard {
        Some(LikePattern::Prefix(value))
    } else {
        Some(LikePattern::Exact(value))
    }
}

/// Parser for filter expressions
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    config: ParserConfig,
    depth: usize,
}

impl Parser {
    /// Create a new parser from source text
    pub fn new(source: &str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Create a new parser with an explicit configuration
    pub fn with_config(source: &str, config: ParserConfig) -> Self {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize();
        Self { tokens, position: 0, config, depth: 0 }
    }

    /// Parse the complete input as one predicate
    pub fn parse(&mut self) -> ParseResult<Predicate> {
        self.check_lexical_errors()?;

        let predicate = self.parse_expression()?;

        if !self.is_at_end() {
            return Err(self.unexpected("end of text"));
        }

        Ok(predicate)
    }

    /// Parse an expression, leaving any trailing tokens unconsumed
    pub fn parse_expression(&mut self) -> ParseResult<Predicate> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ParseResult<Predicate> {
        let mut operands = vec![self.parse_and()?];

        while self.check_token(&TokenKind::Or) {
            match self.parse_connective_operand(Self::parse_and)? {
                Some(operand) => operands.push(operand),
                None => break,
            }
        }

        Ok(Self::fold(operands, Predicate::Or))
    }

    fn parse_and(&mut self) -> ParseResult<Predicate> {
        let mut operands = vec![self.parse_not()?];

        while self.check_token(&TokenKind::And) {
            match self.parse_connective_operand(Self::parse_not)? {
                Some(operand) => operands.push(operand),
                None => break,
            }
        }

        Ok(Self::fold(operands, Predicate::And))
    }

    /// Parse the operand after a connective keyword
    ///
    /// If the operand is malformed, the parser rewinds to the keyword and
    /// returns `None`, leaving the keyword as the unconsumed suffix.
    fn parse_connective_operand(
        &mut self,
        operand: fn(&mut Self) -> ParseResult<Predicate>,
    ) -> ParseResult<Option<Predicate>> {
        let checkpoint = self.position;
        self.advance(); // consume the connective

        match operand(self) {
            Ok(predicate) => Ok(Some(predicate)),
            Err(ParseError::UnexpectedToken { .. }) => {
                self.position = checkpoint;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn fold(mut operands: Vec<Predicate>, connective: fn(Vec<Predicate>) -> Predicate) -> Predicate {
        if operands.len() == 1 {
            operands.remove(0)
        } else {
            connective(operands)
        }
    }

    fn parse_not(&mut self) -> ParseResult<Predicate> {
        if self.check_token(&TokenKind::Not) {
            self.advance();
            self.enter()?;
            let operand = self.parse_not();
            self.depth -= 1;
            Ok(Predicate::not(operand?))
        } else {
            self.parse_primary()
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Predicate> {
        if self.check_token(&TokenKind::LParen) {
            self.advance();
            self.enter()?;
            let expr = self.parse_expression();
            self.depth -= 1;
            let expr = expr?;
            self.expect_token(TokenKind::RParen)?;
            return Ok(expr);
        }

        self.parse_atom()
    }

    fn parse_atom(&mut self) -> ParseResult<Predicate> {
        let token_kind = self.current().kind.clone();

        match token_kind {
            TokenKind::True | TokenKind::False => {
                if self.peek_kind(1).is_operator() {
                    return self.parse_reflected_comparison();
                }
                self.advance();
                if token_kind == TokenKind::True {
                    Ok(Predicate::AlwaysTrue)
                } else {
                    Ok(Predicate::AlwaysFalse)
                }
            }

            TokenKind::IntLit(_) | TokenKind::DecimalLit(_) => self.parse_reflected_comparison(),

            // Single-quoted text names a column unless a column follows the operator
            TokenKind::StringLit(_) => {
                let literal_on_left = self.peek_kind(1).is_operator()
                    && matches!(self.peek_kind(2), TokenKind::Ident(_) | TokenKind::QuotedIdent(_));
                if literal_on_left {
                    self.parse_reflected_comparison()
                } else {
                    self.parse_column_predicate()
                }
            }

            TokenKind::Ident(_) | TokenKind::QuotedIdent(_) => self.parse_column_predicate(),

            _ => Err(self.unexpected("TRUE | FALSE | NOT | ( | column | literal")),
        }
    }

    /// `<literal> <op> <column>`, stored as `<column> <flipped op> <literal>`
    fn parse_reflected_comparison(&mut self) -> ParseResult<Predicate> {
        let literal = self.parse_literal()?;
        let op = self.expect_comparison_op()?;
        let term = self.parse_column()?;
        Ok(Predicate::Comparison { op: op.flipped(), term, literal })
    }

    fn parse_column_predicate(&mut self) -> ParseResult<Predicate> {
        let term = self.parse_column()?;
        let token_kind = self.current().kind.clone();

        match token_kind {
            TokenKind::Is => {
                self.advance();
                let negated = self.consume_token(&TokenKind::Not);
                let next = self.current().kind.clone();
                match next {
                    TokenKind::Null => {
                        self.advance();
                        Ok(if negated { Predicate::not_null(term) } else { Predicate::is_null(term) })
                    }
                    TokenKind::NaN => {
                        self.advance();
                        Ok(if negated { Predicate::not_nan(term) } else { Predicate::is_nan(term) })
                    }
                    _ if negated => Err(self.unexpected("NULL | NAN")),
                    _ => Err(self.unexpected("NOT | NULL | NAN")),
                }
            }

            TokenKind::Not => {
                self.advance();
                let next = self.current().kind.clone();
                match next {
                    TokenKind::In => {
                        self.advance();
                        self.parse_set(SetOp::NotIn, term)
                    }
                    TokenKind::Like => {
                        self.advance();
                        self.parse_like(true, term)
                    }
                    _ => Err(self.unexpected("IN | LIKE")),
                }
            }

            TokenKind::In => {
                self.advance();
                self.parse_set(SetOp::In, term)
            }

            TokenKind::Like => {
                self.advance();
                self.parse_like(false, term)
            }

            _ => {
                let op = self.expect_comparison_op()?;
                let literal = self.parse_literal()?;
                Ok(Predicate::Comparison { op, term, literal })
            }
        }
    }

    fn parse_set(&mut self, op: SetOp, term: Reference) -> ParseResult<Predicate> {
        self.expect_token(TokenKind::LParen)?;

        let mut values = Vec::new();
        loop {
            values.push(self.parse_literal()?);

            if self.consume_token(&TokenKind::Comma) {
                continue;
            }
            break;
        }

        self.expect_token(TokenKind::RParen)?;

        let literals = LiteralSet::new(values).map_err(ParseError::InvalidLiteralSet)?;
        Ok(Predicate::Set { op, term, literals })
    }

    fn parse_like(&mut self, negated: bool, term: Reference) -> ParseResult<Predicate> {
        let raw = match &self.current().kind {
            TokenKind::StringLit(raw) => raw.clone(),
            _ => return Err(self.unexpected("string literal")),
        };
        self.advance();

        let pattern =
            lower_like(&raw).ok_or_else(|| ParseError::InvalidLikePattern { pattern: raw.clone() })?;
        trace!(pattern = %raw, lowered = ?pattern, "lowered LIKE pattern");

        Ok(match (pattern, negated) {
            (LikePattern::Exact(value), false) => Predicate::equal_to(term, value),
            (LikePattern::Exact(value), true) => Predicate::not_equal_to(term, value),
            (LikePattern::Prefix(prefix), false) => Predicate::starts_with(term, prefix),
            (LikePattern::Prefix(prefix), true) => Predicate::not_starts_with(term, prefix),
        })
    }

    /// Parse a column name: a dotted path, or one quoted identifier
    fn parse_column(&mut self) -> ParseResult<Reference> {
        let token_kind = self.current().kind.clone();

        match token_kind {
            TokenKind::Ident(first) => {
                self.advance();
                let mut segments = vec![first];
                while self.check_token(&TokenKind::Dot) {
                    self.advance();
                    segments.push(self.expect_identifier()?);
                }
                Ok(Reference::new(segments.join(".")))
            }
            TokenKind::QuotedIdent(name) => {
                self.advance();
                Ok(Reference::new(name))
            }
            TokenKind::StringLit(raw) => {
                self.advance();
                Ok(Reference::new(unescape(&raw)))
            }
            _ => Err(self.unexpected("column")),
        }
    }

    fn parse_literal(&mut self) -> ParseResult<Literal> {
        let literal = match &self.current().kind {
            TokenKind::StringLit(raw) => Literal::String(unescape(raw)),
            TokenKind::IntLit(n) => Literal::Integer(*n),
            TokenKind::DecimalLit(d) => Literal::Decimal(d.clone()),
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            _ => return Err(self.unexpected("literal")),
        };
        self.advance();
        Ok(literal)
    }

    fn comparison_op(&self) -> Option<ComparisonOp> {
        match self.current().kind {
            TokenKind::Eq => Some(ComparisonOp::EqualTo),
            TokenKind::Neq => Some(ComparisonOp::NotEqualTo),
            TokenKind::Lt => Some(ComparisonOp::LessThan),
            TokenKind::LtEq => Some(ComparisonOp::LessThanOrEqual),
            TokenKind::Gt => Some(ComparisonOp::GreaterThan),
            TokenKind::GtEq => Some(ComparisonOp::GreaterThanOrEqual),
            _ => None,
        }
    }

    fn expect_comparison_op(&mut self) -> ParseResult<ComparisonOp> {
        let op = self.comparison_op().ok_or_else(|| self.unexpected(COMPARISON_OPS))?;
        self.advance();
        Ok(op)
    }

    // Helper methods

    fn check_lexical_errors(&self) -> ParseResult<()> {
        for token in &self.tokens {
            if let TokenKind::Error(message) = &token.kind {
                return Err(ParseError::InvalidToken {
                    message: message.clone(),
                    line: token.line,
                    column: token.column,
                });
            }
        }
        Ok(())
    }

    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= self.config.max_depth {
            let token = self.current();
            return Err(ParseError::NestingTooDeep {
                limit: self.config.max_depth,
                line: token.line,
                column: token.column,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn peek_kind(&self, offset: usize) -> &TokenKind {
        let index = (self.position + offset).min(self.tokens.len() - 1);
        &self.tokens[index].kind
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn check_token(&self, kind: &TokenKind) -> bool {
        !self.is_at_end() && &self.current().kind == kind
    }

    fn consume_token(&mut self, kind: &TokenKind) -> bool {
        if self.check_token(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: token.describe(),
            line: token.line,
            column: token.column,
        }
    }

    fn expect_token(&mut self, expected: TokenKind) -> ParseResult<()> {
        if self.consume_token(&expected) {
            Ok(())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        match &self.current().kind {
            TokenKind::Ident(s) => {
                let result = s.clone();
                self.advance();
                Ok(result)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }
}
