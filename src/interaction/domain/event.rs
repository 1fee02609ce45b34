//! Inbound interaction events and outbound replies.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::command::domain::{CommandKind, DispatchKey, GuildId};

/// Separator between segments of a component custom id.
pub const CUSTOM_ID_SEPARATOR: char = '|';

/// An invocation of a registered command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandInteraction {
    /// Invoked command name.
    pub command_name: String,
    /// Invoked command kind.
    pub kind: CommandKind,
    /// Guild the event originated from, if any.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// Subcommand group marker.
    #[serde(default)]
    pub group: Option<String>,
    /// Subcommand marker.
    #[serde(default)]
    pub subcommand: Option<String>,
    /// Invoking user.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Resolved option values keyed by option name.
    #[serde(default)]
    pub options: BTreeMap<String, Value>,
}

impl CommandInteraction {
    /// Creates an event for a command outside any guild.
    #[must_use]
    pub fn new(command_name: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            command_name: command_name.into(),
            kind,
            guild_id: None,
            group: None,
            subcommand: None,
            user_id: None,
            options: BTreeMap::new(),
        }
    }

    /// Creates a chat command event.
    #[must_use]
    pub fn chat(command_name: impl Into<String>) -> Self {
        Self::new(command_name, CommandKind::Chat)
    }

    /// Sets the originating guild.
    #[must_use]
    pub fn in_guild(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    /// Sets the subcommand marker.
    #[must_use]
    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    /// Sets the group and subcommand markers.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>, subcommand: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self.subcommand = Some(subcommand.into());
        self
    }

    /// Sets the invoking user.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Adds a resolved option value.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Returns the dispatch key selected by the event's markers.
    #[must_use]
    pub fn dispatch_key(&self) -> DispatchKey {
        DispatchKey::from_markers(self.group.as_deref(), self.subcommand.as_deref())
    }

    /// Returns a resolved option value.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }
}

/// A click on a message component such as a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInteraction {
    /// Delimited custom id, `handler|arg|arg...`.
    pub custom_id: String,
    /// Guild the event originated from, if any.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// Clicking user.
    #[serde(default)]
    pub user_id: Option<String>,
}

impl ComponentInteraction {
    /// Creates a component event.
    #[must_use]
    pub fn new(custom_id: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            guild_id: None,
            user_id: None,
        }
    }

    /// Sets the originating guild.
    #[must_use]
    pub fn in_guild(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    /// Returns the handler name, the leading custom id segment.
    #[must_use]
    pub fn handler_name(&self) -> &str {
        self.custom_id
            .split(CUSTOM_ID_SEPARATOR)
            .next()
            .unwrap_or_default()
    }

    /// Returns the segments following the handler name.
    pub fn arguments(&self) -> impl Iterator<Item = &str> {
        self.custom_id.split(CUSTOM_ID_SEPARATOR).skip(1)
    }
}

/// Any inbound interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    /// Command invocation.
    Command(CommandInteraction),
    /// Component click.
    Component(ComponentInteraction),
}

impl From<CommandInteraction> for Interaction {
    fn from(value: CommandInteraction) -> Self {
        Self::Command(value)
    }
}

impl From<ComponentInteraction> for Interaction {
    fn from(value: ComponentInteraction) -> Self {
        Self::Component(value)
    }
}

/// A user-visible reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Message text.
    pub content: String,
    /// Whether only the invoking user sees the reply.
    pub ephemeral: bool,
}

impl Reply {
    /// Creates a reply visible to everyone in the channel.
    #[must_use]
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    /// Creates a reply visible only to the invoking user.
    #[must_use]
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}
