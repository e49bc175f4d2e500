//! Value coercion: raw string arguments into the resolved field's domain.

use super::resolve::ResolvedField;
use crate::error::{RsqlError, RsqlResult};
use crate::schema::{Value, ValueType};
use log::{debug, info};

/// Convert one raw argument for an equality, pattern or membership operator.
///
/// Enumerations take precedence, then the field's custom converter, then
/// plain primitive parsing.
pub fn coerce(field: &ResolvedField<'_>, selector: &str, raw: &str) -> RsqlResult<Value> {
    if let ValueType::Enum(enum_type) = &field.value_type {
        return match enum_type.constant(raw) {
            Some(constant) => Ok(Value::Enum(constant.to_string())),
            None => {
                info!(
                    "given value {} cannot be transformed into the enum type {}",
                    raw.to_uppercase(),
                    enum_type.name
                );
                Err(RsqlError::UnsupportedValue {
                    selector: selector.to_string(),
                    allowed: enum_type
                        .constants
                        .iter()
                        .map(|c| c.to_lowercase())
                        .collect(),
                })
            }
        };
    }

    if let Some(converter) = field.descriptor.converter() {
        return (converter.convert)(raw).ok_or_else(|| RsqlError::UnsupportedValue {
            selector: selector.to_string(),
            allowed: converter.possible_values.clone(),
        });
    }

    coerce_primitive(&field.value_type, selector, raw)
}

/// Convert a raw argument for an ordering operator.
///
/// Ordering bypasses enum and custom conversion: enum and converter fields
/// compare the raw text, other fields their parsed primitive value.
pub fn coerce_comparable(field: &ResolvedField<'_>, selector: &str, raw: &str) -> RsqlResult<Value> {
    if field.descriptor.converter().is_some() {
        return Ok(Value::String(raw.to_string()));
    }

    match &field.value_type {
        ValueType::Enum(_) => Ok(Value::String(raw.to_string())),
        value_type => coerce_primitive(value_type, selector, raw),
    }
}

fn coerce_primitive(value_type: &ValueType, selector: &str, raw: &str) -> RsqlResult<Value> {
    let value = match value_type {
        ValueType::String | ValueType::Enum(_) => Some(Value::String(raw.to_string())),
        ValueType::Boolean => match raw.to_lowercase().as_str() {
            "true" => Some(Value::Boolean(true)),
            "false" => Some(Value::Boolean(false)),
            _ => None,
        },
        ValueType::Int32 => raw.trim().parse().ok().map(Value::Int32),
        ValueType::Int64 => raw.trim().parse().ok().map(Value::Int64),
        ValueType::Float64 => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::Float64),
    };

    value.ok_or_else(|| {
        debug!("value {} cannot be converted to {}", raw, value_type);
        RsqlError::syntax(format!(
            "value {} of field {} is not a valid {}",
            raw, selector, value_type
        ))
    })
}
