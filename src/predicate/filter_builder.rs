//! Builder producing [`Predicate`] trees.
//!
//! This is the reference backend: its output can be printed, serialized or
//! evaluated in memory with [`evaluate`](crate::predicate::evaluate).

use crate::predicate::builder::PredicateBuilder;
use crate::predicate::expr::Predicate;
use crate::schema::{PropertyPath, Value};

/// SQL-style wildcard used in [`Predicate::Like`] patterns
pub const LIKE_WILDCARD: char = '%';

/// Builder for creating predicate trees
#[derive(Debug, Default, Clone, Copy)]
pub struct FilterBuilder;

impl FilterBuilder {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self
    }
}

impl PredicateBuilder for FilterBuilder {
    type Predicate = Predicate;

    fn wildcard(&self) -> char {
        LIKE_WILDCARD
    }

    fn equal(&self, path: &PropertyPath, value: &Value) -> Predicate {
        Predicate::equal(path.clone(), value.clone())
    }

    fn not_equal(&self, path: &PropertyPath, value: &Value) -> Predicate {
        Predicate::NotEqual {
            path: path.clone(),
            value: value.clone(),
        }
    }

    fn like_ignore_case(&self, path: &PropertyPath, pattern: &str) -> Predicate {
        Predicate::like(path.clone(), pattern)
    }

    fn greater_than(&self, path: &PropertyPath, value: &Value) -> Predicate {
        Predicate::GreaterThan {
            path: path.clone(),
            value: value.clone(),
        }
    }

    fn greater_than_or_equal(&self, path: &PropertyPath, value: &Value) -> Predicate {
        Predicate::GreaterThanOrEqual {
            path: path.clone(),
            value: value.clone(),
        }
    }

    fn less_than(&self, path: &PropertyPath, value: &Value) -> Predicate {
        Predicate::LessThan {
            path: path.clone(),
            value: value.clone(),
        }
    }

    fn less_than_or_equal(&self, path: &PropertyPath, value: &Value) -> Predicate {
        Predicate::LessThanOrEqual {
            path: path.clone(),
            value: value.clone(),
        }
    }

    fn is_in(&self, path: &PropertyPath, values: &[Value]) -> Predicate {
        Predicate::In {
            path: path.clone(),
            values: values.to_vec(),
        }
    }

    fn not(&self, predicate: Predicate) -> Predicate {
        Predicate::not(predicate)
    }

    fn and(&self, predicates: Vec<Predicate>) -> Predicate {
        Predicate::And(predicates)
    }

    fn or(&self, predicates: Vec<Predicate>) -> Predicate {
        Predicate::Or(predicates)
    }

    fn map_entry(&self, path: &PropertyPath, key: Predicate, value: Predicate) -> Predicate {
        Predicate::entry(path.clone(), vec![key, value])
    }

    fn conjunction(&self) -> Predicate {
        Predicate::Conjunction
    }
}
