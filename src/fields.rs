//! Built-in field registries for the device-management entities the CLI and
//! tests filter on.

use crate::error::SchemaError;
use crate::schema::{
    FieldDescriptor, FieldValueConverter, MapField, Schema, SubAttribute, Value, ValueType,
};

/// Constants of a target's update status
pub const TARGET_UPDATE_STATUS: &[&str] = &["ERROR", "IN_SYNC", "PENDING", "REGISTERED", "UNKNOWN"];

/// Fields of a target (a managed device)
pub fn target_fields() -> Result<Schema, SchemaError> {
    let distribution_set = || {
        vec![
            SubAttribute::new("name", ValueType::String),
            SubAttribute::new("version", ValueType::String),
        ]
    };

    Schema::builder("target")
        .field(FieldDescriptor::new("ID", "controllerId", ValueType::String))
        .field(FieldDescriptor::new("NAME", "name", ValueType::String))
        .field(FieldDescriptor::new("DESCRIPTION", "description", ValueType::String))
        .field(FieldDescriptor::new("CREATEDAT", "createdAt", ValueType::Int64))
        .field(FieldDescriptor::new("LASTMODIFIEDAT", "lastModifiedAt", ValueType::Int64))
        .field(FieldDescriptor::new("CONTROLLERID", "controllerId", ValueType::String))
        .field(FieldDescriptor::new(
            "UPDATESTATUS",
            "updateStatus",
            ValueType::enumeration("TargetUpdateStatus", TARGET_UPDATE_STATUS),
        ))
        .field(FieldDescriptor::new("IPADDRESS", "address", ValueType::String))
        .field(FieldDescriptor::new(
            "LASTCONTROLLERREQUESTAT",
            "lastTargetQuery",
            ValueType::Int64,
        ))
        .field(FieldDescriptor::new("TAG", "tags.name", ValueType::String))
        .field(FieldDescriptor::sub_entity(
            "ASSIGNEDDS",
            "assignedDistributionSet",
            distribution_set(),
        ))
        .field(FieldDescriptor::sub_entity(
            "INSTALLEDDS",
            "installedDistributionSet",
            distribution_set(),
        ))
        .field(FieldDescriptor::map(
            "ATTRIBUTE",
            "controllerAttributes",
            MapField::new("key", "value"),
            ValueType::String,
        ))
        .field(FieldDescriptor::map(
            "METADATA",
            "metadata",
            MapField::new("key", "value"),
            ValueType::String,
        ))
        .build()
}

/// Possible values of an action's `status` selector
pub const ACTION_STATUS_VALUES: &[&str] = &["pending", "finished"];

/// Map the user-facing action status onto the stored `active` flag
fn convert_action_status(raw: &str) -> Option<Value> {
    match raw.to_lowercase().as_str() {
        "pending" => Some(Value::Boolean(true)),
        "finished" => Some(Value::Boolean(false)),
        _ => None,
    }
}

/// Fields of a rollout action
pub fn action_fields() -> Result<Schema, SchemaError> {
    Schema::builder("action")
        .field(FieldDescriptor::new("ID", "id", ValueType::Int64))
        .field(
            FieldDescriptor::new("STATUS", "active", ValueType::Boolean).with_converter(
                FieldValueConverter::new(convert_action_status, ACTION_STATUS_VALUES),
            ),
        )
        .field(FieldDescriptor::new("WEIGHT", "weight", ValueType::Int32))
        .build()
}
