//! Compiles RSQL filter expressions such as `name==foo;status==READY` into
//! backend-agnostic predicate trees, validated against a static entity schema.

pub mod compiler;
pub mod error;
pub mod fields;
pub mod predicate;
pub mod rsql;
pub mod schema;

pub use compiler::RsqlCompiler;
pub use error::{RsqlError, RsqlResult, SchemaError};
pub use predicate::{FilterBuilder, Predicate, PredicateBuilder};
pub use schema::Schema;

/// Compile `rsql` against `schema` into a [`Predicate`] tree
pub fn parse(rsql: &str, schema: &Schema) -> RsqlResult<Predicate> {
    RsqlCompiler::new(schema, &FilterBuilder::new()).compile(rsql)
}
