//! Predicate construction for compiled filters.
//!
//! This module provides:
//! - The `PredicateBuilder` capability the compiler is written against
//! - A reference predicate tree and its builder
//! - In-memory evaluation of predicate trees against JSON documents

pub mod builder;
pub mod eval;
pub mod expr;
pub mod filter_builder;

pub use builder::PredicateBuilder;
pub use eval::{evaluate, PredicateEvaluator};
pub use expr::Predicate;
pub use filter_builder::{FilterBuilder, LIKE_WILDCARD};
