//! Abstract Syntax Tree (AST) for scan filter predicates
//!
//! The AST is the immutable predicate tree the parser produces and the
//! schema binder and pruning evaluators consume.

pub mod literal;
pub mod nodes;
pub mod types;
pub mod visitor;

pub use literal::{Literal, LiteralSet};
pub use nodes::{ComparisonOp, Predicate, PrefixOp, Reference, SetOp, UnaryOp};
pub use types::{LiteralType, TypeError};
pub use visitor::{walk_predicate, Visitor};
