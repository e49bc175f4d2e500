use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Declared value domain of a filterable field
#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    String,
    Boolean,
    Int32,
    Int64,
    Float64,
    Enum(Arc<EnumType>),
}

impl ValueType {
    pub fn enumeration(name: impl Into<String>, constants: &[&str]) -> Self {
        ValueType::Enum(Arc::new(EnumType::new(name, constants)))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Int32 => write!(f, "int32"),
            ValueType::Int64 => write!(f, "int64"),
            ValueType::Float64 => write!(f, "float64"),
            ValueType::Enum(e) => write!(f, "enum {}", e.name),
        }
    }
}

/// An enumeration with a fixed set of constant names
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub constants: Vec<String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, constants: &[&str]) -> Self {
        Self {
            name: name.into(),
            constants: constants.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Find the constant matching `value`, ignoring case
    pub fn constant(&self, value: &str) -> Option<&str> {
        self.constants
            .iter()
            .find(|c| c.eq_ignore_ascii_case(value))
            .map(String::as_str)
    }
}

/// A coerced argument value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Enum(String),
}

impl Value {
    /// Only plain strings take the pattern-match path of `==`
    pub fn is_textual(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int32(i) => Some(f64::from(*i)),
            Value::Int64(i) => Some(*i as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int32(i) => write!(f, "{}", i),
            Value::Int64(i) => write!(f, "{}", i),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(s) | Value::Enum(s) => write!(f, "{}", s),
        }
    }
}
