//! Selector resolution: maps a raw selector onto a schema field.

use crate::error::{RsqlError, RsqlResult};
use crate::schema::{
    FieldDescriptor, FieldKind, PropertyPath, Schema, ValueType, SUB_ATTRIBUTE_SEPARATOR,
};
use log::debug;

/// Trailing key segment of a map selector, e.g. `k1` in `metadata.k1`
#[derive(Debug, Clone, PartialEq)]
pub struct MapKey {
    /// Path of the map's key sub-field
    pub path: PropertyPath,
    pub key: String,
}

/// A selector validated against the schema
#[derive(Debug, Clone)]
pub struct ResolvedField<'s> {
    pub descriptor: &'s FieldDescriptor,
    /// Field path plus validated sub-entity segments, without any map key
    pub path: PropertyPath,
    pub value_type: ValueType,
    pub map_key: Option<MapKey>,
}

impl ResolvedField<'_> {
    /// Path operator predicates apply to: the map's value sub-field for map
    /// fields, the normalized path otherwise
    pub fn value_path(&self) -> PropertyPath {
        match self.descriptor.value_field_name() {
            Some(value_field) => self.path.child(value_field),
            None => self.path.clone(),
        }
    }
}

/// Resolve `selector` against `schema`
pub fn resolve<'s>(schema: &'s Schema, selector: &str) -> RsqlResult<ResolvedField<'s>> {
    let graph: Vec<&str> = selector.split(SUB_ATTRIBUTE_SEPARATOR).collect();

    debug!(
        "get field identifier by name {} of entity {}",
        graph[0],
        schema.entity()
    );
    let descriptor = schema
        .field(graph[0])
        .ok_or_else(|| unsupported_field(schema, selector))?;

    let mut path = descriptor.path().clone();

    match descriptor.kind() {
        FieldKind::Map(map) => {
            // enum.key
            if graph.len() != 2 || graph[1].is_empty() {
                return Err(RsqlError::MalformedMapSelector {
                    selector: selector.to_string(),
                });
            }
            let map_key = MapKey {
                path: path.child(map.key_field_name.as_str()),
                key: graph[1].to_string(),
            };
            Ok(ResolvedField {
                descriptor,
                path,
                value_type: descriptor.value_type().clone(),
                map_key: Some(map_key),
            })
        }
        FieldKind::SubEntity(_) => {
            // sub entities need at least one dot
            if graph.len() < 2 {
                return Err(unsupported_field(schema, selector));
            }
            let mut value_type = descriptor.value_type();
            for segment in &graph[1..] {
                let attribute = descriptor
                    .sub_entity_attribute(segment)
                    .ok_or_else(|| unsupported_field(schema, selector))?;
                path.push(attribute.name.as_str());
                value_type = &attribute.value_type;
            }
            Ok(ResolvedField {
                descriptor,
                path,
                value_type: value_type.clone(),
                map_key: None,
            })
        }
        FieldKind::Scalar => {
            if graph.len() > 1 {
                return Err(unsupported_field(schema, selector));
            }
            Ok(ResolvedField {
                descriptor,
                path,
                value_type: descriptor.value_type().clone(),
                map_key: None,
            })
        }
    }
}

fn unsupported_field(schema: &Schema, selector: &str) -> RsqlError {
    RsqlError::UnsupportedField {
        selector: selector.to_string(),
        expected: schema.expected_selectors(),
    }
}
