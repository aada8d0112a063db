//! Visitor pattern for traversing predicate trees

use super::literal::Literal;
use super::nodes::{Predicate, Reference};

/// Visitor trait for predicate traversal
///
/// Binders and evaluators override the hooks they care about and call the
/// matching `walk_*` function to keep descending.
pub trait Visitor: Sized {
    /// Visit a predicate
    fn visit_predicate(&mut self, predicate: &Predicate) {
        walk_predicate(self, predicate);
    }

    /// Visit a column reference
    fn visit_reference(&mut self, _reference: &Reference) {
        // Leaf node, no children
    }

    /// Visit a literal
    fn visit_literal(&mut self, _literal: &Literal) {
        // Leaf node, no children
    }
}

/// Walk a predicate node
pub fn walk_predicate<V: Visitor>(visitor: &mut V, predicate: &Predicate) {
    match predicate {
        Predicate::AlwaysTrue | Predicate::AlwaysFalse => {}

        Predicate::Unary { term, .. } | Predicate::Prefix { term, .. } => {
            visitor.visit_reference(term);
        }

        Predicate::Comparison { term, literal, .. } => {
            visitor.visit_reference(term);
            visitor.visit_literal(literal);
        }

        Predicate::Set { term, literals, .. } => {
            visitor.visit_reference(term);
            for literal in literals {
                visitor.visit_literal(literal);
            }
        }

        Predicate::Not(inner) => {
            visitor.visit_predicate(inner);
        }

        Predicate::And(operands) | Predicate::Or(operands) => {
            for operand in operands {
                visitor.visit_predicate(operand);
            }
        }
    }
}
