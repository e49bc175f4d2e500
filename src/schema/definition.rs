//! JSON schema definitions.
//!
//! ```json
//! {
//!   "entity": "target",
//!   "fields": [
//!     { "name": "name", "path": "name" },
//!     { "name": "updatestatus", "path": "updateStatus",
//!       "value_type": { "enum": { "name": "TargetUpdateStatus",
//!                                 "constants": ["IN_SYNC", "PENDING"] } } },
//!     { "name": "metadata", "path": "metadata",
//!       "map": { "key_field_name": "key", "value_field_name": "value" } }
//!   ]
//! }
//! ```

use crate::error::SchemaError;
use crate::schema::field::{FieldDescriptor, MapField, SubAttribute};
use crate::schema::value::{EnumType, ValueType};
use crate::schema::Schema;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SchemaDefinition {
    pub entity: String,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub value_type: ValueTypeDefinition,
    #[serde(default)]
    pub sub_entity_attributes: Vec<SubAttributeDefinition>,
    #[serde(default)]
    pub map: Option<MapDefinition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTypeDefinition {
    #[default]
    String,
    Boolean,
    Int32,
    Int64,
    Float64,
    Enum {
        name: String,
        constants: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
pub struct SubAttributeDefinition {
    pub name: String,
    #[serde(default)]
    pub value_type: ValueTypeDefinition,
}

#[derive(Debug, Deserialize)]
pub struct MapDefinition {
    pub key_field_name: String,
    #[serde(default)]
    pub value_field_name: Option<String>,
}

impl ValueTypeDefinition {
    fn into_value_type(self) -> Result<ValueType, SchemaError> {
        Ok(match self {
            ValueTypeDefinition::String => ValueType::String,
            ValueTypeDefinition::Boolean => ValueType::Boolean,
            ValueTypeDefinition::Int32 => ValueType::Int32,
            ValueTypeDefinition::Int64 => ValueType::Int64,
            ValueTypeDefinition::Float64 => ValueType::Float64,
            ValueTypeDefinition::Enum { name, constants } => {
                if constants.is_empty() {
                    return Err(SchemaError::EmptyEnum(name));
                }
                ValueType::Enum(Arc::new(EnumType { name, constants }))
            }
        })
    }
}

impl FieldDefinition {
    fn into_descriptor(self) -> Result<FieldDescriptor, SchemaError> {
        let value_type = self.value_type.into_value_type()?;

        match (self.map, self.sub_entity_attributes.is_empty()) {
            (Some(_), false) => Err(SchemaError::MapWithSubEntityAttributes(self.name)),
            (Some(map), true) => Ok(FieldDescriptor::map(
                self.name,
                &self.path,
                MapField {
                    key_field_name: map.key_field_name,
                    value_field_name: map.value_field_name,
                },
                value_type,
            )),
            (None, false) => {
                let attributes = self
                    .sub_entity_attributes
                    .into_iter()
                    .map(|a| -> Result<SubAttribute, SchemaError> {
                        Ok(SubAttribute::new(a.name, a.value_type.into_value_type()?))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FieldDescriptor::sub_entity(self.name, &self.path, attributes))
            }
            (None, true) => Ok(FieldDescriptor::new(self.name, &self.path, value_type)),
        }
    }
}

impl SchemaDefinition {
    pub fn into_schema(self) -> Result<Schema, SchemaError> {
        let mut builder = Schema::builder(self.entity);
        for field in self.fields {
            builder = builder.field(field.into_descriptor()?);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_from_json() {
        let schema = Schema::from_json(
            r#"{
                "entity": "target",
                "fields": [
                    { "name": "name", "path": "name" },
                    { "name": "createdAt", "path": "createdAt", "value_type": "int64" },
                    { "name": "updatestatus", "path": "updateStatus",
                      "value_type": { "enum": { "name": "UpdateStatus", "constants": ["IN_SYNC", "PENDING"] } } },
                    { "name": "assignedds", "path": "assignedDistributionSet",
                      "sub_entity_attributes": [ { "name": "name" }, { "name": "version" } ] },
                    { "name": "metadata", "path": "metadata",
                      "map": { "key_field_name": "key", "value_field_name": "value" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.fields().len(), 5);
        assert_eq!(
            schema.field("CREATEDAT").unwrap().value_type(),
            &ValueType::Int64
        );
        assert!(matches!(
            schema.field("updatestatus").unwrap().value_type(),
            ValueType::Enum(e) if e.constants.len() == 2
        ));
        assert_eq!(
            schema.field("assignedds").unwrap().sub_entity_attributes().len(),
            2
        );
        assert_eq!(
            schema.field("metadata").unwrap().key_field_name(),
            Some("key")
        );
    }

    #[test]
    fn test_map_with_sub_entity_attributes_rejected() {
        let result = Schema::from_json(
            r#"{
                "entity": "target",
                "fields": [
                    { "name": "metadata", "path": "metadata",
                      "sub_entity_attributes": [ { "name": "key" } ],
                      "map": { "key_field_name": "key" } }
                ]
            }"#,
        );
        assert!(matches!(
            result,
            Err(SchemaError::MapWithSubEntityAttributes(name)) if name == "metadata"
        ));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            Schema::from_json("{ \"entity\": 1 }"),
            Err(SchemaError::Json(_))
        ));
    }

    #[test]
    fn test_empty_enum_rejected() {
        let result = Schema::from_json(
            r#"{ "entity": "t", "fields": [ { "name": "s", "path": "s",
                 "value_type": { "enum": { "name": "S", "constants": [] } } } ] }"#,
        );
        assert!(matches!(result, Err(SchemaError::EmptyEnum(_))));
    }
}
