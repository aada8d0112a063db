//! Literal type system for predicate trees

use super::literal::Literal;
use crate::ErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The closed set of literal types a predicate can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralType {
    Boolean,
    Integer,
    Decimal,
    String,
}

impl LiteralType {
    /// Check if this type is compatible with another
    ///
    /// Literal types only unify with themselves; an `Integer` is never
    /// widened to a `Decimal`.
    pub fn is_compatible_with(&self, other: &LiteralType) -> bool {
        self == other
    }

    /// Get type from literal
    pub fn of(literal: &Literal) -> Self {
        match literal {
            Literal::Boolean(_) => LiteralType::Boolean,
            Literal::Integer(_) => LiteralType::Integer,
            Literal::Decimal(_) => LiteralType::Decimal,
            Literal::String(_) => LiteralType::String,
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralType::Boolean => write!(f, "boolean"),
            LiteralType::Integer => write!(f, "integer"),
            LiteralType::Decimal => write!(f, "decimal"),
            LiteralType::String => write!(f, "string"),
        }
    }
}

/// Construction-time errors raised when building an invalid node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("IN/NOT IN requires at least one literal")]
    EmptyLiteralSet,

    #[error("Literals must share one type: expected {expected}, found {found}")]
    HeterogeneousLiterals { expected: LiteralType, found: LiteralType },

    #[error("{connective} requires at least two operands, got {count}")]
    TooFewOperands { connective: &'static str, count: usize },
}

impl TypeError {
    /// Diagnostic category
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Type
    }
}

/// Verify that every literal shares the type of the first one
///
/// Returns the common type, or `None` for an empty input.
pub fn check_homogeneous<'a, I>(literals: I) -> Result<Option<LiteralType>, TypeError>
where
    I: IntoIterator<Item = &'a Literal>,
{
    let mut common: Option<LiteralType> = None;
    for literal in literals {
        let typ = literal.literal_type();
        match common {
            None => common = Some(typ),
            Some(expected) if !expected.is_compatible_with(&typ) => {
                return Err(TypeError::HeterogeneousLiterals { expected, found: typ });
            }
            Some(_) => {}
        }
    }
    Ok(common)
}
