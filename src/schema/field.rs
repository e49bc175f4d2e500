//! Field descriptors: one record per filterable field of an entity.

use crate::schema::path::PropertyPath;
use crate::schema::value::{Value, ValueType};
use std::fmt;

/// Custom conversion from a raw argument into the field's domain value.
///
/// `convert` returns `None` when the argument is not a recognised value;
/// `possible_values` is what the diagnostic offers instead.
#[derive(Clone)]
pub struct FieldValueConverter {
    pub convert: fn(&str) -> Option<Value>,
    pub possible_values: Vec<String>,
}

impl FieldValueConverter {
    pub fn new(convert: fn(&str) -> Option<Value>, possible_values: &[&str]) -> Self {
        Self {
            convert,
            possible_values: possible_values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl fmt::Debug for FieldValueConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValueConverter")
            .field("possible_values", &self.possible_values)
            .finish_non_exhaustive()
    }
}

/// Attribute reachable below a sub-entity field, e.g. `assignedds.version`
#[derive(Debug, Clone, PartialEq)]
pub struct SubAttribute {
    pub name: String,
    pub value_type: ValueType,
}

impl SubAttribute {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

/// Keyed collection stored as rows of (key, value)
#[derive(Debug, Clone, PartialEq)]
pub struct MapField {
    pub key_field_name: String,
    pub value_field_name: Option<String>,
}

impl MapField {
    pub fn new(key_field_name: impl Into<String>, value_field_name: impl Into<String>) -> Self {
        Self {
            key_field_name: key_field_name.into(),
            value_field_name: Some(value_field_name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar,
    SubEntity(Vec<SubAttribute>),
    Map(MapField),
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    path: PropertyPath,
    value_type: ValueType,
    kind: FieldKind,
    converter: Option<FieldValueConverter>,
}

impl FieldDescriptor {
    /// Create a plain field, e.g. `FieldDescriptor::new("NAME", "name", ValueType::String)`
    pub fn new(name: impl Into<String>, field_name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.into().to_uppercase(),
            path: PropertyPath::parse(field_name),
            value_type,
            kind: FieldKind::Scalar,
            converter: None,
        }
    }

    /// Create a field whose selector must name one of `attributes`
    pub fn sub_entity(
        name: impl Into<String>,
        field_name: &str,
        attributes: Vec<SubAttribute>,
    ) -> Self {
        Self {
            kind: FieldKind::SubEntity(attributes),
            ..Self::new(name, field_name, ValueType::String)
        }
    }

    /// Create a map field selected as `name.keyName`; `value_type` types the map values
    pub fn map(
        name: impl Into<String>,
        field_name: &str,
        map: MapField,
        value_type: ValueType,
    ) -> Self {
        Self {
            kind: FieldKind::Map(map),
            ..Self::new(name, field_name, value_type)
        }
    }

    pub fn with_converter(mut self, converter: FieldValueConverter) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Upper-case field name used for selector lookup
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn converter(&self) -> Option<&FieldValueConverter> {
        self.converter.as_ref()
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, FieldKind::Map(_))
    }

    pub fn sub_entity_attributes(&self) -> &[SubAttribute] {
        match &self.kind {
            FieldKind::SubEntity(attributes) => attributes,
            _ => &[],
        }
    }

    /// Find a sub-entity attribute by name, ignoring case
    pub fn sub_entity_attribute(&self, name: &str) -> Option<&SubAttribute> {
        self.sub_entity_attributes()
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn key_field_name(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Map(map) => Some(&map.key_field_name),
            _ => None,
        }
    }

    pub fn value_field_name(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Map(map) => map.value_field_name.as_deref(),
            _ => None,
        }
    }

    /// Selectors this field accepts, as listed in diagnostics
    pub fn expected_selectors(&self) -> Vec<String> {
        let lower = self.name.to_lowercase();
        match &self.kind {
            FieldKind::Scalar => vec![lower],
            FieldKind::Map(_) => vec![format!("{}.keyName", lower)],
            FieldKind::SubEntity(attributes) => attributes
                .iter()
                .map(|a| format!("{}.{}", lower, a.name))
                .collect(),
        }
    }
}
