//! Remote registry records, desired payloads, and reconciliation operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::{CommandKind, CommandOptionSpec, CommandSpec, RemoteScope};

/// Identifier assigned by the remote registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteCommandId(String);

impl RemoteCommandId {
    /// Wraps a remote identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteCommandId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Desired remote state of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPayload {
    /// Command name.
    pub name: String,
    /// Command kind.
    #[serde(rename = "type")]
    pub kind: CommandKind,
    /// Command description.
    #[serde(default)]
    pub description: String,
    /// Whether the command is age-restricted.
    #[serde(default)]
    pub nsfw: bool,
    /// Ordered options.
    #[serde(default)]
    pub options: Vec<CommandOptionSpec>,
}

impl CommandPayload {
    /// Projects a merged spec onto the remote payload.
    #[must_use]
    pub fn from_spec(spec: &CommandSpec) -> Self {
        Self {
            name: spec.name.clone(),
            kind: spec.kind,
            description: spec.description.clone(),
            nsfw: spec.nsfw,
            options: spec.options.clone(),
        }
    }

    /// Returns the payload as a JSON object for comparison.
    #[must_use]
    pub fn to_comparable(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// A command as reported by the remote registry.
///
/// Options are kept as raw JSON because the remote side may echo fields the
/// local payload never sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteCommand {
    /// Remote identifier.
    pub id: RemoteCommandId,
    /// Command name.
    pub name: String,
    /// Command kind.
    #[serde(rename = "type")]
    pub kind: CommandKind,
    /// Command description.
    #[serde(default)]
    pub description: String,
    /// Age restriction as reported remotely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    /// Raw option objects.
    #[serde(default)]
    pub options: Vec<Value>,
}

impl RemoteCommand {
    /// Builds the record the remote side would store for a payload.
    #[must_use]
    pub fn from_payload(id: RemoteCommandId, payload: &CommandPayload) -> Self {
        Self {
            id,
            name: payload.name.clone(),
            kind: payload.kind,
            description: payload.description.clone(),
            nsfw: Some(payload.nsfw),
            options: payload
                .options
                .iter()
                .filter_map(|option| serde_json::to_value(option).ok())
                .collect(),
        }
    }

    /// Returns the compared fields as a JSON object.
    #[must_use]
    pub fn to_comparable(&self) -> Value {
        let mut object = Map::new();
        object.insert("name".to_owned(), Value::String(self.name.clone()));
        object.insert("type".to_owned(), Value::from(self.kind.code()));
        object.insert(
            "description".to_owned(),
            Value::String(self.description.clone()),
        );
        if let Some(nsfw) = self.nsfw {
            object.insert("nsfw".to_owned(), Value::Bool(nsfw));
        }
        object.insert("options".to_owned(), Value::Array(self.options.clone()));
        Value::Object(object)
    }
}

/// A mutation issued against the remote registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RemoteOperation {
    /// A command was created.
    Create {
        /// Target scope.
        scope: RemoteScope,
        /// Command kind.
        kind: CommandKind,
        /// Command name.
        name: String,
        /// Identifier assigned by the remote side.
        id: RemoteCommandId,
    },
    /// An existing command was overwritten.
    Update {
        /// Target scope.
        scope: RemoteScope,
        /// Command kind.
        kind: CommandKind,
        /// Command name.
        name: String,
        /// Remote identifier.
        id: RemoteCommandId,
    },
    /// A command without a local declaration was removed.
    Delete {
        /// Target scope.
        scope: RemoteScope,
        /// Command kind.
        kind: CommandKind,
        /// Command name.
        name: String,
        /// Remote identifier.
        id: RemoteCommandId,
    },
}

impl RemoteOperation {
    /// Returns the scope the operation targeted.
    #[must_use]
    pub const fn scope(&self) -> &RemoteScope {
        match self {
            Self::Create { scope, .. }
            | Self::Update { scope, .. }
            | Self::Delete { scope, .. } => scope,
        }
    }

    /// Returns the command name the operation targeted.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Create { name, .. } | Self::Update { name, .. } | Self::Delete { name, .. } => {
                name
            }
        }
    }

    /// Returns whether this is a create.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create { .. })
    }

    /// Returns whether this is an update.
    #[must_use]
    pub const fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    /// Returns whether this is a delete.
    #[must_use]
    pub const fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }
}
