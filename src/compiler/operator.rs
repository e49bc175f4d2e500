//! Operator-to-predicate mapping for a single comparison node.

use super::coerce::{coerce, coerce_comparable};
use super::resolve::{resolve, ResolvedField};
use crate::error::{RsqlError, RsqlResult};
use crate::predicate::PredicateBuilder;
use crate::rsql::{ComparisonNode, ComparisonOperator};
use crate::schema::{Schema, Value};
use log::info;

/// Literal wildcard accepted in RSQL arguments
pub const RSQL_WILDCARD: char = '*';

/// Compile one comparison into its predicates.
///
/// Yields one predicate, or none for an operator the compiler does not
/// implement. For map fields the key match and the value predicate are
/// combined through [`PredicateBuilder::map_entry`] so both apply to the same
/// entry.
pub fn compile_comparison<B: PredicateBuilder>(
    builder: &B,
    schema: &Schema,
    node: &ComparisonNode,
) -> RsqlResult<Vec<B::Predicate>> {
    let field = resolve(schema, &node.selector)?;

    let raw = node.arguments.first().ok_or_else(|| {
        RsqlError::syntax(format!("missing argument for selector {}", node.selector))
    })?;

    let predicate = match operator_predicate(builder, &field, node, raw)? {
        Some(predicate) => predicate,
        None => {
            info!(
                "operator symbol {} is either not supported or not implemented",
                node.operator
            );
            return Ok(Vec::new());
        }
    };

    let predicate = match &field.map_key {
        Some(map_key) => {
            let key = builder.equal(&map_key.path, &Value::String(map_key.key.clone()));
            builder.map_entry(&field.path, key, predicate)
        }
        None => predicate,
    };

    Ok(vec![predicate])
}

fn operator_predicate<B: PredicateBuilder>(
    builder: &B,
    field: &ResolvedField<'_>,
    node: &ComparisonNode,
    raw: &str,
) -> RsqlResult<Option<B::Predicate>> {
    let path = field.value_path();
    let selector = node.selector.as_str();

    let predicate = match &node.operator {
        ComparisonOperator::Equal => {
            let value = coerce(field, selector, raw)?;
            if value.is_textual() {
                builder.like_ignore_case(&path, &like_pattern(builder, &value.to_string()))
            } else {
                builder.equal(&path, &value)
            }
        }
        ComparisonOperator::NotEqual => builder.not_equal(&path, &coerce(field, selector, raw)?),
        ComparisonOperator::Like => {
            let value = coerce(field, selector, raw)?;
            builder.like_ignore_case(&path, &like_pattern(builder, &value.to_string()))
        }
        ComparisonOperator::GreaterThan => {
            builder.greater_than(&path, &coerce_comparable(field, selector, raw)?)
        }
        ComparisonOperator::GreaterThanOrEqual => {
            builder.greater_than_or_equal(&path, &coerce_comparable(field, selector, raw)?)
        }
        ComparisonOperator::LessThan => {
            builder.less_than(&path, &coerce_comparable(field, selector, raw)?)
        }
        ComparisonOperator::LessThanOrEqual => {
            builder.less_than_or_equal(&path, &coerce_comparable(field, selector, raw)?)
        }
        ComparisonOperator::In => builder.is_in(&path, &coerce_all(field, node)?),
        ComparisonOperator::NotIn => builder.not_in(&path, &coerce_all(field, node)?),
        ComparisonOperator::Other(_) => return Ok(None),
    };

    Ok(Some(predicate))
}

/// Coerce every argument of a multi-value operator, failing on the first bad one
fn coerce_all(field: &ResolvedField<'_>, node: &ComparisonNode) -> RsqlResult<Vec<Value>> {
    node.arguments
        .iter()
        .map(|argument| coerce(field, &node.selector, argument))
        .collect()
}

/// Rewrite RSQL `*` wildcards to the backend's token and upper-case the result
fn like_pattern<B: PredicateBuilder>(builder: &B, value: &str) -> String {
    value
        .replace(RSQL_WILDCARD, &builder.wildcard().to_string())
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{FilterBuilder, Predicate};
    use crate::schema::{
        FieldDescriptor, FieldValueConverter, MapField, PropertyPath, ValueType,
    };

    fn active_from_status(raw: &str) -> Option<Value> {
        match raw {
            "pending" => Some(Value::Boolean(true)),
            "finished" => Some(Value::Boolean(false)),
            _ => None,
        }
    }

    fn create_test_schema() -> Schema {
        Schema::builder("target")
            .field(FieldDescriptor::new("NAME", "name", ValueType::String))
            .field(FieldDescriptor::new("WEIGHT", "weight", ValueType::Int32))
            .field(FieldDescriptor::new(
                "UPDATESTATUS",
                "updateStatus",
                ValueType::enumeration("TargetUpdateStatus", &["IN_SYNC", "PENDING", "ERROR"]),
            ))
            .field(FieldDescriptor::map(
                "METADATA",
                "metadata",
                MapField::new("key", "value"),
                ValueType::String,
            ))
            .field(
                FieldDescriptor::new("STATUS", "active", ValueType::Boolean).with_converter(
                    FieldValueConverter::new(active_from_status, &["pending", "finished"]),
                ),
            )
            .build()
            .unwrap()
    }

    fn node(selector: &str, operator: ComparisonOperator, args: &[&str]) -> ComparisonNode {
        ComparisonNode::new(
            selector,
            operator,
            args.iter().map(|a| a.to_string()).collect(),
        )
    }

    fn compile(selector: &str, operator: ComparisonOperator, args: &[&str]) -> Vec<Predicate> {
        compile_comparison(
            &FilterBuilder::new(),
            &create_test_schema(),
            &node(selector, operator, args),
        )
        .unwrap()
    }

    fn path(p: &str) -> PropertyPath {
        PropertyPath::parse(p)
    }

    #[test]
    fn test_equal_on_text_is_pattern() {
        assert_eq!(
            compile("name", ComparisonOperator::Equal, &["targetId1"]),
            vec![Predicate::like(path("name"), "TARGETID1")]
        );
        assert_eq!(
            compile("name", ComparisonOperator::Equal, &["ab*cd"]),
            vec![Predicate::like(path("name"), "AB%CD")]
        );
    }

    #[test]
    fn test_equal_and_like_share_wildcard_rule() {
        assert_eq!(
            compile("name", ComparisonOperator::Equal, &["ab*cd"]),
            compile("name", ComparisonOperator::Like, &["ab*cd"])
        );
    }

    #[test]
    fn test_equal_on_enum_is_strict() {
        assert_eq!(
            compile("updatestatus", ComparisonOperator::Equal, &["pending"]),
            vec![Predicate::equal(
                path("updateStatus"),
                Value::Enum("PENDING".to_string())
            )]
        );
    }

    #[test]
    fn test_not_equal_has_no_wildcard_expansion() {
        assert_eq!(
            compile("name", ComparisonOperator::NotEqual, &["ab*"]),
            vec![Predicate::NotEqual {
                path: path("name"),
                value: Value::String("ab*".to_string())
            }]
        );
    }

    #[test]
    fn test_like_on_enum_uses_pattern() {
        assert_eq!(
            compile("updatestatus", ComparisonOperator::Like, &["pending"]),
            vec![Predicate::like(path("updateStatus"), "PENDING")]
        );
    }

    #[test]
    fn test_ordering_uses_raw_argument() {
        assert_eq!(
            compile("weight", ComparisonOperator::GreaterThanOrEqual, &["10"]),
            vec![Predicate::GreaterThanOrEqual {
                path: path("weight"),
                value: Value::Int32(10)
            }]
        );
        assert_eq!(
            compile("updatestatus", ComparisonOperator::LessThan, &["in_sync"]),
            vec![Predicate::LessThan {
                path: path("updateStatus"),
                value: Value::String("in_sync".to_string())
            }]
        );
    }

    #[test]
    fn test_in_and_out_are_complements() {
        let values = vec![
            Value::Enum("PENDING".to_string()),
            Value::Enum("ERROR".to_string()),
        ];
        let is_in = compile("updatestatus", ComparisonOperator::In, &["pending", "error"]);
        let out = compile("updatestatus", ComparisonOperator::NotIn, &["pending", "error"]);
        assert_eq!(
            is_in,
            vec![Predicate::In {
                path: path("updateStatus"),
                values
            }]
        );
        assert_eq!(out, vec![Predicate::not(is_in[0].clone())]);
    }

    #[test]
    fn test_ordering_skips_enum_coercion() {
        assert_eq!(
            compile("updatestatus", ComparisonOperator::LessThan, &["P"]),
            vec![Predicate::LessThan {
                path: path("updateStatus"),
                value: Value::String("P".to_string())
            }]
        );
    }

    #[test]
    fn test_ordering_skips_custom_converter() {
        assert_eq!(
            compile("status", ComparisonOperator::GreaterThanOrEqual, &["pending"]),
            vec![Predicate::GreaterThanOrEqual {
                path: path("active"),
                value: Value::String("pending".to_string())
            }]
        );
        assert_eq!(
            compile("status", ComparisonOperator::LessThan, &["true"]),
            vec![Predicate::LessThan {
                path: path("active"),
                value: Value::String("true".to_string())
            }]
        );
        assert_eq!(
            compile("status", ComparisonOperator::Equal, &["pending"]),
            vec![Predicate::equal(path("active"), Value::Boolean(true))]
        );
    }

    #[test]
    fn test_ordering_rejects_non_numeric_argument() {
        let result = compile_comparison(
            &FilterBuilder::new(),
            &create_test_schema(),
            &node("weight", ComparisonOperator::GreaterThan, &["heavy"]),
        );
        assert!(matches!(result, Err(RsqlError::Syntax { .. })));
    }

    #[test]
    fn test_map_field_scopes_key_and_value_to_one_entry() {
        assert_eq!(
            compile("metadata.k1", ComparisonOperator::Equal, &["v*"]),
            vec![Predicate::entry(
                path("metadata"),
                vec![
                    Predicate::equal(path("metadata.key"), Value::String("k1".to_string())),
                    Predicate::like(path("metadata.value"), "V%"),
                ]
            )]
        );
    }

    #[test]
    fn test_unknown_operator_produces_nothing() {
        assert!(compile(
            "metadata.k1",
            ComparisonOperator::Other("=foo=".to_string()),
            &["x"]
        )
        .is_empty());
    }

    #[test]
    fn test_multi_value_coercion_fails_fast() {
        let result = compile_comparison(
            &FilterBuilder::new(),
            &create_test_schema(),
            &node("updatestatus", ComparisonOperator::In, &["pending", "bogus"]),
        );
        assert!(matches!(result, Err(RsqlError::UnsupportedValue { .. })));
    }

    #[test]
    fn test_missing_argument() {
        let result = compile_comparison(
            &FilterBuilder::new(),
            &create_test_schema(),
            &node("name", ComparisonOperator::Equal, &[]),
        );
        assert!(matches!(result, Err(RsqlError::Syntax { .. })));
    }
}
