//! Payload normalisation applied before comparing desired and remote state.

use serde_json::Value;

use crate::command::domain::{CommandPayload, RemoteCommand};

/// Returns whether a remote command already matches the desired payload.
///
/// Both sides are normalised identically, so fields the remote side echoes
/// with default values compare equal to fields the payload omits.
#[must_use]
pub fn payload_matches(desired: &CommandPayload, remote: &RemoteCommand) -> bool {
    normalize(desired.to_comparable()) == normalize(remote.to_comparable())
}

/// Recursively drops `null`, `false`, empty strings, and empty arrays from
/// objects.
#[must_use]
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(key, field)| (key, normalize(field)))
                .filter(|(_, field)| !is_default(field))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

fn is_default(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(true) | Value::Number(_) | Value::Object(_) => false,
    }
}
