//! Typed literal values carried by predicate nodes

use super::types::{check_homogeneous, LiteralType, TypeError};
use bigdecimal::{BigDecimal, ParseBigDecimalError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A typed scalar value
///
/// Decimals keep the scale they were written with: `52.00` stays `52.00`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Literal {
    Boolean(bool),
    Integer(i64),
    Decimal(BigDecimal),
    String(String),
}

impl Literal {
    /// Create a decimal literal from its textual form
    pub fn decimal(text: &str) -> Result<Self, ParseBigDecimalError> {
        BigDecimal::from_str(text).map(Literal::Decimal)
    }

    /// Get the literal's type
    pub fn literal_type(&self) -> LiteralType {
        LiteralType::of(self)
    }

    /// Borrow the string payload, if this is a string literal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(i64::from(value))
    }
}

impl From<BigDecimal> for Literal {
    fn from(value: BigDecimal) -> Self {
        Literal::Decimal(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Decimal(d) => f.write_str(&d.to_plain_string()),
            Literal::String(s) => f.write_str(&quote_string(s, false)),
        }
    }
}

/// Render a string as a single-quoted literal that the lexer reads back verbatim
pub(crate) fn quote_string(value: &str, escape_percent: bool) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' | '\'' => {
                out.push('\\');
                out.push(ch);
            }
            '%' if escape_percent => out.push_str("\\%"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// A non-empty, homogeneously typed set of literals
///
/// Duplicates collapse and equality ignores the order the literals were
/// written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Literal>", into = "Vec<Literal>")]
pub struct LiteralSet {
    literals: BTreeSet<Literal>,
    literal_type: LiteralType,
}

impl LiteralSet {
    /// Create a literal set, rejecting empty or mixed-type input
    pub fn new<I>(literals: I) -> Result<Self, TypeError>
    where
        I: IntoIterator<Item = Literal>,
    {
        let literals: BTreeSet<Literal> = literals.into_iter().collect();
        let literal_type = check_homogeneous(&literals)?.ok_or(TypeError::EmptyLiteralSet)?;
        Ok(Self { literals, literal_type })
    }

    /// Number of distinct literals
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns true if the set has no members
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The type every member shares
    pub fn literal_type(&self) -> LiteralType {
        self.literal_type
    }

    /// Check membership
    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    /// Iterate members in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }
}

impl TryFrom<Vec<Literal>> for LiteralSet {
    type Error = TypeError;

    fn try_from(literals: Vec<Literal>) -> Result<Self, Self::Error> {
        LiteralSet::new(literals)
    }
}

impl From<LiteralSet> for Vec<Literal> {
    fn from(set: LiteralSet) -> Self {
        set.literals.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a LiteralSet {
    type Item = &'a Literal;
    type IntoIter = std::collections::btree_set::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl fmt::Display for LiteralSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", literal)?;
        }
        write!(f, ")")
    }
}
