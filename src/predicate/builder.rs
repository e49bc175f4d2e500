//! The predicate-building capability the compiler targets.

use crate::schema::{PropertyPath, Value};

/// Backend-agnostic predicate construction.
///
/// The compiler only ever talks to a query backend through this trait, so an
/// ORM criteria builder, a document-store translator or the in-crate
/// [`FilterBuilder`](crate::predicate::FilterBuilder) can all sit behind it.
pub trait PredicateBuilder {
    type Predicate;

    /// Token the backend uses for "any run of characters" in pattern matches
    fn wildcard(&self) -> char;

    fn equal(&self, path: &PropertyPath, value: &Value) -> Self::Predicate;

    fn not_equal(&self, path: &PropertyPath, value: &Value) -> Self::Predicate;

    /// Case-insensitive pattern match. `pattern` is already upper-cased and
    /// uses [`wildcard`](Self::wildcard) as its wildcard token.
    fn like_ignore_case(&self, path: &PropertyPath, pattern: &str) -> Self::Predicate;

    fn greater_than(&self, path: &PropertyPath, value: &Value) -> Self::Predicate;

    fn greater_than_or_equal(&self, path: &PropertyPath, value: &Value) -> Self::Predicate;

    fn less_than(&self, path: &PropertyPath, value: &Value) -> Self::Predicate;

    fn less_than_or_equal(&self, path: &PropertyPath, value: &Value) -> Self::Predicate;

    fn is_in(&self, path: &PropertyPath, values: &[Value]) -> Self::Predicate;

    fn not(&self, predicate: Self::Predicate) -> Self::Predicate;

    fn not_in(&self, path: &PropertyPath, values: &[Value]) -> Self::Predicate {
        self.not(self.is_in(path, values))
    }

    fn and(&self, predicates: Vec<Self::Predicate>) -> Self::Predicate;

    fn or(&self, predicates: Vec<Self::Predicate>) -> Self::Predicate;

    /// Require `key` and `value` to hold for the same entry of the map at
    /// `path`. Backends that join map entries row by row get this from `and`.
    fn map_entry(
        &self,
        _path: &PropertyPath,
        key: Self::Predicate,
        value: Self::Predicate,
    ) -> Self::Predicate {
        self.and(vec![key, value])
    }

    /// Neutral always-true predicate
    fn conjunction(&self) -> Self::Predicate;
}
