//! Error types for RSQL compilation and schema definition.

use thiserror::Error;

/// Errors that reject a filter expression.
///
/// Every variant carries the offending selector (where one exists) and the
/// list of alternatives the caller could have used, so front-ends can render
/// their own diagnostics without re-parsing the message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RsqlError {
    /// Malformed expression text or an argument the field's type cannot parse
    #[error("The given search parameter is not valid: {message}")]
    Syntax { message: String },

    /// Unknown selector or a selector shape the field does not support
    #[error(
        "The given search parameter field {{{selector}}} does not exist, must be one of the following fields {{{}}}",
        .expected.join(", ")
    )]
    UnsupportedField {
        selector: String,
        expected: Vec<String>,
    },

    /// Argument that is none of the field's allowed values
    #[error(
        "field {{{selector}}} must be one of the following values {{{}}}",
        .allowed.join(", ")
    )]
    UnsupportedValue {
        selector: String,
        allowed: Vec<String>,
    },

    /// Map field referenced with anything other than `field.keyName`
    #[error(
        "The syntax of the given map search parameter field {{{selector}}} is wrong. Syntax is: fieldname.keyname"
    )]
    MalformedMapSelector { selector: String },
}

impl RsqlError {
    pub fn syntax(message: impl Into<String>) -> Self {
        RsqlError::Syntax {
            message: message.into(),
        }
    }
}

/// Result type for RSQL compilation
pub type RsqlResult<T> = Result<T, RsqlError>;

/// Errors raised while building a [`Schema`](crate::schema::Schema).
///
/// These are definition bugs, not query errors: a schema that fails to build
/// never reaches the compiler.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    #[error("Field name must not be empty")]
    EmptyFieldName,

    #[error("Field {0} has an empty property path")]
    EmptyPath(String),

    #[error("Field {0} declares an empty sub-entity attribute set")]
    EmptySubEntityAttributes(String),

    #[error("Field {0} declares sub-entity attributes on a map, which is not supported")]
    MapWithSubEntityAttributes(String),

    #[error("Enum type {0} declares no constants")]
    EmptyEnum(String),

    #[error("Invalid schema definition: {0}")]
    Json(#[from] serde_json::Error),
}
