//! Predicate tree definitions.

use crate::schema::{PropertyPath, Value};
use serde::Serialize;
use std::fmt;

/// Compiled filter condition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Always true
    Conjunction,

    Equal {
        path: PropertyPath,
        value: Value,
    },

    NotEqual {
        path: PropertyPath,
        value: Value,
    },

    /// Case-insensitive match of an upper-cased pattern using `%` wildcards
    Like {
        path: PropertyPath,
        pattern: String,
    },

    GreaterThan {
        path: PropertyPath,
        value: Value,
    },

    GreaterThanOrEqual {
        path: PropertyPath,
        value: Value,
    },

    LessThan {
        path: PropertyPath,
        value: Value,
    },

    LessThanOrEqual {
        path: PropertyPath,
        value: Value,
    },

    In {
        path: PropertyPath,
        values: Vec<Value>,
    },

    Not(Box<Predicate>),

    And(Vec<Predicate>),

    Or(Vec<Predicate>),

    /// Holds when one element of the collection at `path` satisfies
    /// `predicate`. Paths inside `predicate` starting with `path` refer to
    /// that element.
    Entry {
        path: PropertyPath,
        predicate: Box<Predicate>,
    },
}

impl Predicate {
    pub fn equal(path: PropertyPath, value: Value) -> Self {
        Predicate::Equal { path, value }
    }

    pub fn like(path: PropertyPath, pattern: impl Into<String>) -> Self {
        Predicate::Like {
            path,
            pattern: pattern.into(),
        }
    }

    pub fn not(predicate: Predicate) -> Self {
        Predicate::Not(Box::new(predicate))
    }

    /// Scope the conjunction of `predicates` to a single element at `path`
    pub fn entry(path: PropertyPath, predicates: Vec<Predicate>) -> Self {
        Predicate::Entry {
            path,
            predicate: Box::new(Predicate::And(predicates)),
        }
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) | Value::Enum(s) => write!(f, "'{}'", s.replace('\'', "''")),
        other => write!(f, "{}", other),
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, predicates: &[Predicate], op: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, predicate) in predicates.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", predicate)?;
    }
    write!(f, ")")
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Conjunction => write!(f, "TRUE"),
            Predicate::Equal { path, value } => {
                write!(f, "{} = ", path)?;
                write_value(f, value)
            }
            Predicate::NotEqual { path, value } => {
                write!(f, "{} <> ", path)?;
                write_value(f, value)
            }
            Predicate::Like { path, pattern } => {
                write!(f, "UPPER({}) LIKE '{}'", path, pattern.replace('\'', "''"))
            }
            Predicate::GreaterThan { path, value } => {
                write!(f, "{} > ", path)?;
                write_value(f, value)
            }
            Predicate::GreaterThanOrEqual { path, value } => {
                write!(f, "{} >= ", path)?;
                write_value(f, value)
            }
            Predicate::LessThan { path, value } => {
                write!(f, "{} < ", path)?;
                write_value(f, value)
            }
            Predicate::LessThanOrEqual { path, value } => {
                write!(f, "{} <= ", path)?;
                write_value(f, value)
            }
            Predicate::In { path, values } => {
                write!(f, "{} IN (", path)?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_value(f, value)?;
                }
                write!(f, ")")
            }
            Predicate::Not(inner) => write!(f, "NOT ({})", inner),
            Predicate::And(predicates) => write_joined(f, predicates, "AND"),
            Predicate::Or(predicates) => write_joined(f, predicates, "OR"),
            Predicate::Entry { path, predicate } => write!(f, "ANY {} {}", path, predicate),
        }
    }
}
