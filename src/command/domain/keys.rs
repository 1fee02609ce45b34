//! Registry keys: primary command keys and remote registration keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CommandKind, ResolvedScope};

/// Remote guild identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuildId(String);

impl GuildId {
    /// Wraps a remote guild identifier.
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

impl fmt::Display for GuildId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Scope of a remote registry call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteScope {
    /// Platform-wide commands.
    Global,
    /// Commands of one guild.
    Guild(GuildId),
}

impl RemoteScope {
    /// Returns the guild identifier for guild scope.
    #[must_use]
    pub const fn guild_id(&self) -> Option<&GuildId> {
        match self {
            Self::Global => None,
            Self::Guild(guild_id) => Some(guild_id),
        }
    }
}

impl fmt::Display for RemoteScope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => formatter.write_str("global"),
            Self::Guild(guild_id) => write!(formatter, "guild:{guild_id}"),
        }
    }
}

/// Primary key of the executor registry.
///
/// Declarations sharing a kind, name, and resolved scope merge into one
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommandKey {
    /// Command kind.
    pub kind: CommandKind,
    /// Top-level command name.
    pub name: String,
    /// Resolved declaration scope.
    pub scope: ResolvedScope,
}

impl CommandKey {
    /// Creates a primary key.
    #[must_use]
    pub fn new(kind: CommandKind, name: impl Into<String>, scope: ResolvedScope) -> Self {
        Self {
            kind,
            name: name.into(),
            scope,
        }
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            ResolvedScope::Global => write!(formatter, "global:{}:{}", self.kind, self.name),
            ResolvedScope::Guilds(aliases) => write!(
                formatter,
                "guilds[{}]:{}:{}",
                aliases.join(","),
                self.kind,
                self.name
            ),
        }
    }
}

/// Identity of a command as registered remotely: `scope:[guild:]kind:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistrationKey {
    /// Remote scope.
    pub scope: RemoteScope,
    /// Command kind.
    pub kind: CommandKind,
    /// Command name.
    pub name: String,
}

impl RegistrationKey {
    /// Creates a registration key.
    #[must_use]
    pub fn new(scope: RemoteScope, kind: CommandKind, name: impl Into<String>) -> Self {
        Self {
            scope,
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for RegistrationKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}:{}", self.scope, self.kind, self.name)
    }
}
