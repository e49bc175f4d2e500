//! Schema registry: the statically known set of filterable fields of one
//! entity type.
//!
//! A [`Schema`] is immutable once built and holds no interior mutability, so
//! a single instance can be shared across threads and compiled against
//! concurrently.

pub mod definition;
pub mod field;
pub mod path;
pub mod value;

pub use definition::{FieldDefinition, SchemaDefinition};
pub use field::{FieldDescriptor, FieldKind, FieldValueConverter, MapField, SubAttribute};
pub use path::{PropertyPath, SUB_ATTRIBUTE_SEPARATOR};
pub use value::{EnumType, Value, ValueType};

use crate::error::SchemaError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Schema {
    entity: String,
    fields: Vec<FieldDescriptor>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn builder(entity: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            entity: entity.into(),
            fields: Vec::new(),
        }
    }

    /// Build a schema from a JSON definition
    pub fn from_json(json: &str) -> Result<Schema, SchemaError> {
        let definition: SchemaDefinition = serde_json::from_str(json)?;
        definition.into_schema()
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name, ignoring case
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index
            .get(&name.to_uppercase())
            .map(|&idx| &self.fields[idx])
    }

    /// Every syntactically valid selector, plain and map fields first, then
    /// one entry per sub-entity attribute
    pub fn expected_selectors(&self) -> Vec<String> {
        let (nested, plain): (Vec<_>, Vec<_>) = self
            .fields
            .iter()
            .partition(|f| !f.sub_entity_attributes().is_empty());

        plain
            .iter()
            .chain(nested.iter())
            .flat_map(|f| f.expected_selectors())
            .collect()
    }
}

pub struct SchemaBuilder {
    entity: String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut index = HashMap::with_capacity(self.fields.len());

        for (idx, field) in self.fields.iter().enumerate() {
            if field.name().is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if field.path().is_empty() {
                return Err(SchemaError::EmptyPath(field.name().to_string()));
            }
            if let FieldKind::SubEntity(attributes) = field.kind() {
                if attributes.is_empty() {
                    return Err(SchemaError::EmptySubEntityAttributes(
                        field.name().to_string(),
                    ));
                }
            }
            if index.insert(field.name().to_string(), idx).is_some() {
                return Err(SchemaError::DuplicateField(field.name().to_string()));
            }
        }

        Ok(Schema {
            entity: self.entity,
            fields: self.fields,
            index,
        })
    }
}
