//! Predicate node definitions

use super::literal::{quote_string, Literal, LiteralSet};
use super::types::TypeError;
use crate::parser::token::TokenKind;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// A column reference
///
/// The name is opaque: `location.x` is a nested-field path, while a quoted
/// `"foo.bar"` is a single column that happens to contain a dot. Both are
/// stored as the text the binder resolves.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference {
    name: String,
}

impl Reference {
    /// Create a new reference
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the name can be written without quotes
    fn is_bare(&self) -> bool {
        !self.name.is_empty()
            && self.name.split('.').all(|segment| {
                let mut chars = segment.chars();
                matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
                    && chars.all(|c| c.is_alphanumeric() || c == '_')
                    && TokenKind::keyword(segment).is_none()
            })
    }
}

impl From<&str> for Reference {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Reference {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            f.write_str(&self.name)
        } else if self.name.contains('"') {
            f.write_str(&quote_string(&self.name, false))
        } else {
            write!(f, "\"{}\"", self.name)
        }
    }
}

/// Unary tests over a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    IsNull,
    NotNull,
    IsNaN,
    NotNaN,
}

impl UnaryOp {
    /// Returns the complementary test
    pub fn negated(self) -> Self {
        match self {
            UnaryOp::IsNull => UnaryOp::NotNull,
            UnaryOp::NotNull => UnaryOp::IsNull,
            UnaryOp::IsNaN => UnaryOp::NotNaN,
            UnaryOp::NotNaN => UnaryOp::IsNaN,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::IsNull => write!(f, "IS NULL"),
            UnaryOp::NotNull => write!(f, "IS NOT NULL"),
            UnaryOp::IsNaN => write!(f, "IS NAN"),
            UnaryOp::NotNaN => write!(f, "IS NOT NAN"),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl ComparisonOp {
    /// Returns the operator that swaps the left and right side
    ///
    /// `'a' > foo` means the same as `foo < 'a'`.
    pub fn flipped(self) -> Self {
        match self {
            ComparisonOp::EqualTo => ComparisonOp::EqualTo,
            ComparisonOp::NotEqualTo => ComparisonOp::NotEqualTo,
            ComparisonOp::LessThan => ComparisonOp::GreaterThan,
            ComparisonOp::LessThanOrEqual => ComparisonOp::GreaterThanOrEqual,
            ComparisonOp::GreaterThan => ComparisonOp::LessThan,
            ComparisonOp::GreaterThanOrEqual => ComparisonOp::LessThanOrEqual,
        }
    }

    /// Returns the logical negation of this operator
    pub fn negated(self) -> Self {
        match self {
            ComparisonOp::EqualTo => ComparisonOp::NotEqualTo,
            ComparisonOp::NotEqualTo => ComparisonOp::EqualTo,
            ComparisonOp::LessThan => ComparisonOp::GreaterThanOrEqual,
            ComparisonOp::LessThanOrEqual => ComparisonOp::GreaterThan,
            ComparisonOp::GreaterThan => ComparisonOp::LessThanOrEqual,
            ComparisonOp::GreaterThanOrEqual => ComparisonOp::LessThan,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOp::EqualTo => write!(f, "="),
            ComparisonOp::NotEqualTo => write!(f, "!="),
            ComparisonOp::LessThan => write!(f, "<"),
            ComparisonOp::LessThanOrEqual => write!(f, "<="),
            ComparisonOp::GreaterThan => write!(f, ">"),
            ComparisonOp::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

/// Set membership operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOp {
    In,
    NotIn,
}

impl SetOp {
    /// Returns the complementary membership test
    pub fn negated(self) -> Self {
        match self {
            SetOp::In => SetOp::NotIn,
            SetOp::NotIn => SetOp::In,
        }
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetOp::In => write!(f, "IN"),
            SetOp::NotIn => write!(f, "NOT IN"),
        }
    }
}

/// Prefix-match operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixOp {
    StartsWith,
    NotStartsWith,
}

impl PrefixOp {
    /// Returns the complementary prefix test
    pub fn negated(self) -> Self {
        match self {
            PrefixOp::StartsWith => PrefixOp::NotStartsWith,
            PrefixOp::NotStartsWith => PrefixOp::StartsWith,
        }
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::StartsWith => write!(f, "LIKE"),
            PrefixOp::NotStartsWith => write!(f, "NOT LIKE"),
        }
    }
}

/// A boolean predicate over columns
///
/// Trees are values: equality is structural, `And`/`Or` children keep the
/// order they were written in, and transformations such as [`Predicate::negate`]
/// build a new tree instead of editing this one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    AlwaysTrue,
    AlwaysFalse,

    /// `IS [NOT] NULL`, `IS [NOT] NAN`
    Unary { op: UnaryOp, term: Reference },

    /// Column compared against a literal
    Comparison { op: ComparisonOp, term: Reference, literal: Literal },

    /// `[NOT] IN (...)`
    Set { op: SetOp, term: Reference, literals: LiteralSet },

    /// Lowered `[NOT] LIKE 'prefix%'`
    Prefix { op: PrefixOp, term: Reference, prefix: String },

    Not(Box<Predicate>),

    /// Conjunction of two or more predicates
    And(#[serde(deserialize_with = "deserialize_and")] Vec<Predicate>),

    /// Disjunction of two or more predicates
    Or(#[serde(deserialize_with = "deserialize_or")] Vec<Predicate>),
}

fn deserialize_operands<'de, D>(
    deserializer: D,
    connective: &'static str,
) -> Result<Vec<Predicate>, D::Error>
where
    D: Deserializer<'de>,
{
    let operands = Vec::<Predicate>::deserialize(deserializer)?;
    if operands.len() < 2 {
        return Err(de::Error::custom(TypeError::TooFewOperands {
            connective,
            count: operands.len(),
        }));
    }
    Ok(operands)
}

fn deserialize_and<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Predicate>, D::Error> {
    deserialize_operands(deserializer, "AND")
}

fn deserialize_or<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Predicate>, D::Error> {
    deserialize_operands(deserializer, "OR")
}

impl Predicate {
    pub fn is_null(term: impl Into<Reference>) -> Self {
        Self::Unary { op: UnaryOp::IsNull, term: term.into() }
    }

    pub fn not_null(term: impl Into<Reference>) -> Self {
        Self::Unary { op: UnaryOp::NotNull, term: term.into() }
    }

    pub fn is_nan(term: impl Into<Reference>) -> Self {
        Self::Unary { op: UnaryOp::IsNaN, term: term.into() }
    }

    pub fn not_nan(term: impl Into<Reference>) -> Self {
        Self::Unary { op: UnaryOp::NotNaN, term: term.into() }
    }

    /// Create a comparison between a column and a literal
    pub fn comparison(
        op: ComparisonOp,
        term: impl Into<Reference>,
        literal: impl Into<Literal>,
    ) -> Self {
        Self::Comparison { op, term: term.into(), literal: literal.into() }
    }

    pub fn equal_to(term: impl Into<Reference>, literal: impl Into<Literal>) -> Self {
        Self::comparison(ComparisonOp::EqualTo, term, literal)
    }

    pub fn not_equal_to(term: impl Into<Reference>, literal: impl Into<Literal>) -> Self {
        Self::comparison(ComparisonOp::NotEqualTo, term, literal)
    }

    pub fn less_than(term: impl Into<Reference>, literal: impl Into<Literal>) -> Self {
        Self::comparison(ComparisonOp::LessThan, term, literal)
    }

    pub fn less_than_or_equal(term: impl Into<Reference>, literal: impl Into<Literal>) -> Self {
        Self::comparison(ComparisonOp::LessThanOrEqual, term, literal)
    }

    pub fn greater_than(term: impl Into<Reference>, literal: impl Into<Literal>) -> Self {
        Self::comparison(ComparisonOp::GreaterThan, term, literal)
    }

    pub fn greater_than_or_equal(term: impl Into<Reference>, literal: impl Into<Literal>) -> Self {
        Self::comparison(ComparisonOp::GreaterThanOrEqual, term, literal)
    }

    /// Create a membership test; the literals must be non-empty and share a type
    pub fn set<I>(op: SetOp, term: impl Into<Reference>, literals: I) -> Result<Self, TypeError>
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        let literals = LiteralSet::new(literals.into_iter().map(Into::into))?;
        Ok(Self::Set { op, term: term.into(), literals })
    }

    pub fn is_in<I>(term: impl Into<Reference>, literals: I) -> Result<Self, TypeError>
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        Self::set(SetOp::In, term, literals)
    }

    pub fn not_in<I>(term: impl Into<Reference>, literals: I) -> Result<Self, TypeError>
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        Self::set(SetOp::NotIn, term, literals)
    }

    pub fn starts_with(term: impl Into<Reference>, prefix: impl Into<String>) -> Self {
        Self::Prefix { op: PrefixOp::StartsWith, term: term.into(), prefix: prefix.into() }
    }

    pub fn not_starts_with(term: impl Into<Reference>, prefix: impl Into<String>) -> Self {
        Self::Prefix { op: PrefixOp::NotStartsWith, term: term.into(), prefix: prefix.into() }
    }

    /// Wrap a predicate in NOT
    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Predicate) -> Self {
        Self::Not(Box::new(operand))
    }

    /// Create a conjunction of at least two predicates
    pub fn and(operands: Vec<Predicate>) -> Result<Self, TypeError> {
        if operands.len() < 2 {
            return Err(TypeError::TooFewOperands { connective: "AND", count: operands.len() });
        }
        Ok(Self::And(operands))
    }

    /// Create a disjunction of at least two predicates
    pub fn or(operands: Vec<Predicate>) -> Result<Self, TypeError> {
        if operands.len() < 2 {
            return Err(TypeError::TooFewOperands { connective: "OR", count: operands.len() });
        }
        Ok(Self::Or(operands))
    }

    /// The column this predicate tests, if it is a leaf over one column
    pub fn term(&self) -> Option<&Reference> {
        match self {
            Predicate::Unary { term, .. }
            | Predicate::Comparison { term, .. }
            | Predicate::Set { term, .. }
            | Predicate::Prefix { term, .. } => Some(term),
            _ => None,
        }
    }

    /// Returns true when the node has no child predicates
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Predicate::Not(_) | Predicate::And(_) | Predicate::Or(_))
    }

    /// Build the logical complement of this predicate
    ///
    /// Leaves flip to their inverse operator, `NOT` is removed, and
    /// `AND`/`OR` follow De Morgan.
    pub fn negate(&self) -> Predicate {
        match self {
            Predicate::AlwaysTrue => Predicate::AlwaysFalse,
            Predicate::AlwaysFalse => Predicate::AlwaysTrue,
            Predicate::Unary { op, term } => {
                Predicate::Unary { op: op.negated(), term: term.clone() }
            }
            Predicate::Comparison { op, term, literal } => Predicate::Comparison {
                op: op.negated(),
                term: term.clone(),
                literal: literal.clone(),
            },
            Predicate::Set { op, term, literals } => Predicate::Set {
                op: op.negated(),
                term: term.clone(),
                literals: literals.clone(),
            },
            Predicate::Prefix { op, term, prefix } => Predicate::Prefix {
                op: op.negated(),
                term: term.clone(),
                prefix: prefix.clone(),
            },
            Predicate::Not(inner) => inner.as_ref().clone(),
            Predicate::And(operands) => Predicate::Or(operands.iter().map(Self::negate).collect()),
            Predicate::Or(operands) => Predicate::And(operands.iter().map(Self::negate).collect()),
        }
    }

    /// Collect every column reference in document order
    pub fn references(&self) -> Vec<&Reference> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a Reference>) {
        match self {
            Predicate::AlwaysTrue | Predicate::AlwaysFalse => {}
            Predicate::Not(inner) => inner.collect_references(out),
            Predicate::And(operands) | Predicate::Or(operands) => {
                for operand in operands {
                    operand.collect_references(out);
                }
            }
            leaf => out.extend(leaf.term()),
        }
    }
}

/// Write `operands` joined by `keyword`, parenthesizing nested connectives
fn write_connective(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    operands: &[Predicate],
) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", keyword)?;
        }
        match operand {
            Predicate::And(_) | Predicate::Or(_) => write!(f, "({})", operand)?,
            _ => write!(f, "{}", operand)?,
        }
    }
    Ok(())
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::AlwaysTrue => write!(f, "TRUE"),
            Predicate::AlwaysFalse => write!(f, "FALSE"),
            Predicate::Unary { op, term } => write!(f, "{} {}", term, op),
            Predicate::Comparison { op, term, literal } => {
                write!(f, "{} {} {}", term, op, literal)
            }
            Predicate::Set { op, term, literals } => write!(f, "{} {} {}", term, op, literals),
            Predicate::Prefix { op, term, prefix } => {
                let quoted = quote_string(prefix, true);
                // Re-open the quoted prefix to append the trailing wildcard
                let body = &quoted[..quoted.len() - 1];
                write!(f, "{} {} {}%'", term, op, body)
            }
            Predicate::Not(inner) if inner.is_leaf() || matches!(**inner, Predicate::Not(_)) => {
                write!(f, "NOT {}", inner)
            }
            Predicate::Not(inner) => write!(f, "NOT ({})", inner),
            Predicate::And(operands) => write_connective(f, "AND", operands),
            Predicate::Or(operands) => write_connective(f, "OR", operands),
        }
    }
}
