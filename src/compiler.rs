//! Semantic compilation of RSQL expression trees into predicates.
//!
//! Compilation is a single post-order pass: comparison leaves are resolved
//! against the schema, their arguments coerced and mapped onto predicates,
//! and logical nodes combine their children's predicates with AND or OR.
//! The first invalid selector or value aborts the whole pass.

pub mod coerce;
pub mod operator;
pub mod resolve;

pub use operator::RSQL_WILDCARD;
pub use resolve::{resolve, MapKey, ResolvedField};

use crate::error::RsqlResult;
use crate::predicate::PredicateBuilder;
use crate::rsql::Node;
use crate::schema::Schema;
use log::debug;

/// Compiles RSQL against one schema through one predicate builder
pub struct RsqlCompiler<'a, B: PredicateBuilder> {
    schema: &'a Schema,
    builder: &'a B,
}

impl<'a, B: PredicateBuilder> RsqlCompiler<'a, B> {
    pub fn new(schema: &'a Schema, builder: &'a B) -> Self {
        Self { schema, builder }
    }

    /// Parse and compile an RSQL string
    pub fn compile(&self, rsql: &str) -> RsqlResult<B::Predicate> {
        debug!("parsing rsql string {}", rsql);
        let node = crate::rsql::parse(rsql)?;
        self.compile_node(&node)
    }

    /// Compile an already parsed expression tree
    pub fn compile_node(&self, node: &Node) -> RsqlResult<B::Predicate> {
        let mut predicates = self.visit(node)?;
        Ok(match predicates.len() {
            0 => self.builder.conjunction(),
            1 => predicates.remove(0),
            _ => self.builder.and(predicates),
        })
    }

    fn visit(&self, node: &Node) -> RsqlResult<Vec<B::Predicate>> {
        match node {
            Node::Comparison(comparison) => {
                operator::compile_comparison(self.builder, self.schema, comparison)
            }
            Node::And(children) => {
                let children = self.accept_children(children)?;
                Ok(vec![if children.is_empty() {
                    self.builder.conjunction()
                } else {
                    self.builder.and(children)
                }])
            }
            Node::Or(children) => {
                let children = self.accept_children(children)?;
                Ok(vec![if children.is_empty() {
                    self.builder.conjunction()
                } else {
                    self.builder.or(children)
                }])
            }
        }
    }

    fn accept_children(&self, children: &[Node]) -> RsqlResult<Vec<B::Predicate>> {
        let mut predicates = Vec::with_capacity(children.len());

        for child in children {
            let accepted = self.visit(child)?;
            if accepted.is_empty() {
                debug!("visit logical node children but could not parse it, ignoring {}", child);
            }
            predicates.extend(accepted);
        }

        Ok(predicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RsqlError;
    use crate::predicate::{FilterBuilder, Predicate};
    use crate::rsql::{ComparisonNode, ComparisonOperator};
    use crate::schema::{FieldDescriptor, MapField, PropertyPath, Value, ValueType};

    fn create_test_schema() -> Schema {
        Schema::builder("target")
            .field(FieldDescriptor::new("NAME", "name", ValueType::String))
            .field(FieldDescriptor::new("DESCRIPTION", "description", ValueType::String))
            .field(FieldDescriptor::map(
                "METADATA",
                "metadata",
                MapField::new("key", "value"),
                ValueType::String,
            ))
            .build()
            .unwrap()
    }

    fn compile(rsql: &str) -> RsqlResult<Predicate> {
        let schema = create_test_schema();
        let builder = FilterBuilder::new();
        RsqlCompiler::new(&schema, &builder).compile(rsql)
    }

    fn like(path: &str, pattern: &str) -> Predicate {
        Predicate::like(PropertyPath::parse(path), pattern)
    }

    fn metadata(k: &str, pattern: &str) -> Predicate {
        Predicate::entry(
            PropertyPath::parse("metadata"),
            vec![
                Predicate::equal(
                    PropertyPath::parse("metadata.key"),
                    Value::String(k.to_string()),
                ),
                like("metadata.value", pattern),
            ],
        )
    }

    #[test]
    fn test_single_comparison_is_unwrapped() {
        assert_eq!(compile("name==foo").unwrap(), like("name", "FOO"));
    }

    #[test]
    fn test_and_or_combination() {
        assert_eq!(
            compile("name==a;description==b").unwrap(),
            Predicate::And(vec![like("name", "A"), like("description", "B")])
        );
        assert_eq!(
            compile("name==a,description==b").unwrap(),
            Predicate::Or(vec![like("name", "A"), like("description", "B")])
        );
    }

    #[test]
    fn test_root_map_comparison_is_one_entry() {
        assert_eq!(compile("metadata.k1==v1").unwrap(), metadata("k1", "V1"));
    }

    #[test]
    fn test_map_comparison_stays_grouped_under_or() {
        assert_eq!(
            compile("metadata.k1==v1,name==x").unwrap(),
            Predicate::Or(vec![metadata("k1", "V1"), like("name", "X")])
        );
    }

    #[test]
    fn test_unknown_operators_are_skipped() {
        assert_eq!(
            compile("name=foo=x;description==b").unwrap(),
            Predicate::And(vec![like("description", "B")])
        );
        assert_eq!(
            compile("name=foo=x,description=bar=y").unwrap(),
            Predicate::Conjunction
        );
        assert_eq!(compile("name=foo=x").unwrap(), Predicate::Conjunction);
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(
            compile("name==a;(description==b,description==c)").unwrap(),
            Predicate::And(vec![
                like("name", "A"),
                Predicate::Or(vec![like("description", "B"), like("description", "C")]),
            ])
        );
    }

    #[test]
    fn test_first_error_aborts() {
        assert!(matches!(
            compile("name==a;bogus==b;metadata.x.y==c"),
            Err(RsqlError::UnsupportedField { selector, .. }) if selector == "bogus"
        ));
        assert!(matches!(compile("name==a;"), Err(RsqlError::Syntax { .. })));
    }

    #[test]
    fn test_compile_node() {
        let schema = create_test_schema();
        let builder = FilterBuilder::new();
        let node = Node::And(vec![Node::Comparison(ComparisonNode::new(
            "name",
            ComparisonOperator::Like,
            vec!["*x*".to_string()],
        ))]);
        assert_eq!(
            RsqlCompiler::new(&schema, &builder).compile_node(&node).unwrap(),
            Predicate::And(vec![like("name", "%X%")])
        );
    }
}
