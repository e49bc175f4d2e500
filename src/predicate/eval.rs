//! In-memory evaluation of predicate trees against JSON documents.
//!
//! Paths are resolved through nested objects; arrays met along the way are
//! expanded, and a leaf predicate holds when any resolved value satisfies it.
//! Leaves are independent of each other unless an [`Predicate::Entry`] binds
//! them to a single element of a collection.

use crate::predicate::expr::Predicate;
use crate::predicate::filter_builder::LIKE_WILDCARD;
use crate::schema::{PropertyPath, Value};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

/// Evaluator for predicates over a single document
pub struct PredicateEvaluator<'a> {
    document: &'a JsonValue,
    /// Element bound by the innermost enclosing entry, with the entry's path
    entry: Option<(&'a [String], &'a JsonValue)>,
}

impl<'a> PredicateEvaluator<'a> {
    pub fn new(document: &'a JsonValue) -> Self {
        Self {
            document,
            entry: None,
        }
    }

    /// Evaluate a predicate and return whether the document matches
    pub fn evaluate(&self, predicate: &Predicate) -> bool {
        match predicate {
            Predicate::Conjunction => true,
            Predicate::Equal { path, value } => self.any(path, |j| json_equals(j, value)),
            Predicate::NotEqual { path, value } => self.any(path, |j| !json_equals(j, value)),
            Predicate::Like { path, pattern } => {
                let pattern: Vec<char> = pattern.chars().collect();
                self.any(path, |j| {
                    json_text(j).is_some_and(|text| {
                        let text: Vec<char> = text.to_uppercase().chars().collect();
                        like_matches(&text, &pattern)
                    })
                })
            }
            Predicate::GreaterThan { path, value } => {
                self.any(path, |j| json_compare(j, value) == Some(Ordering::Greater))
            }
            Predicate::GreaterThanOrEqual { path, value } => self.any(path, |j| {
                matches!(
                    json_compare(j, value),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            }),
            Predicate::LessThan { path, value } => {
                self.any(path, |j| json_compare(j, value) == Some(Ordering::Less))
            }
            Predicate::LessThanOrEqual { path, value } => self.any(path, |j| {
                matches!(
                    json_compare(j, value),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }),
            Predicate::In { path, values } => {
                self.any(path, |j| values.iter().any(|v| json_equals(j, v)))
            }
            Predicate::Not(inner) => !self.evaluate(inner),
            Predicate::And(predicates) => predicates.iter().all(|p| self.evaluate(p)),
            Predicate::Or(predicates) => predicates.iter().any(|p| self.evaluate(p)),
            Predicate::Entry { path, predicate } => {
                self.resolve(path).into_iter().any(|element| {
                    let scoped = PredicateEvaluator {
                        document: self.document,
                        entry: Some((path.segments(), element)),
                    };
                    scoped.evaluate(predicate)
                })
            }
        }
    }

    fn any(&self, path: &PropertyPath, test: impl Fn(&JsonValue) -> bool) -> bool {
        self.resolve(path).into_iter().any(test)
    }

    fn resolve(&self, path: &PropertyPath) -> Vec<&'a JsonValue> {
        let segments = path.segments();
        let (root, rest) = match self.entry {
            Some((prefix, element)) if segments.starts_with(prefix) => {
                (element, &segments[prefix.len()..])
            }
            _ => (self.document, segments),
        };

        let mut resolved = Vec::new();
        collect_values(root, rest, &mut resolved);
        resolved
    }
}

/// Evaluate a predicate against a document
pub fn evaluate(predicate: &Predicate, document: &JsonValue) -> bool {
    PredicateEvaluator::new(document).evaluate(predicate)
}

fn collect_values<'a>(node: &'a JsonValue, segments: &[String], out: &mut Vec<&'a JsonValue>) {
    if let JsonValue::Array(items) = node {
        for item in items {
            collect_values(item, segments, out);
        }
        return;
    }

    match segments.split_first() {
        None => {
            if !node.is_null() {
                out.push(node);
            }
        }
        Some((head, rest)) => {
            if let Some(child) = node.as_object().and_then(|map| map.get(head)) {
                collect_values(child, rest, out);
            }
        }
    }
}

fn json_equals(json: &JsonValue, value: &Value) -> bool {
    match value {
        Value::Boolean(b) => json.as_bool() == Some(*b),
        Value::Int32(_) | Value::Int64(_) | Value::Float64(_) => {
            json.as_f64().is_some() && json.as_f64() == value.as_f64()
        }
        Value::String(s) => json.as_str() == Some(s.as_str()),
        Value::Enum(s) => json.as_str().is_some_and(|j| j.eq_ignore_ascii_case(s)),
    }
}

fn json_compare(json: &JsonValue, value: &Value) -> Option<Ordering> {
    match value {
        Value::Boolean(b) => json.as_bool().map(|j| j.cmp(b)),
        Value::Int32(_) | Value::Int64(_) | Value::Float64(_) => {
            json.as_f64()?.partial_cmp(&value.as_f64()?)
        }
        Value::String(s) | Value::Enum(s) => json.as_str().map(|j| j.cmp(s.as_str())),
    }
}

fn json_text(json: &JsonValue) -> Option<String> {
    match json {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Match `text` against `pattern`, where the wildcard matches any run of characters
fn like_matches(text: &[char], pattern: &[char]) -> bool {
    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == LIKE_WILDCARD {
            backtrack = Some((p, t));
            p += 1;
        } else if p < pattern.len() && pattern[p] == text[t] {
            p += 1;
            t += 1;
        } else if let Some((star, matched)) = backtrack {
            p = star + 1;
            t = matched + 1;
            backtrack = Some((star, matched + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == LIKE_WILDCARD)
}
