//! Canonical command specification produced by the compiler.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    CommandOptionSpec, NO_DESCRIPTION_PROVIDED, ParseCommandKindError, UnknownTypeCodeError,
};

/// Maximum length of a command, group, subcommand, or option name.
pub const MAX_NAME_LENGTH: usize = 32;

/// How a command is invoked on the remote platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CommandKind {
    /// Typed slash command.
    Chat,
    /// Context-menu command on a user.
    User,
    /// Context-menu command on a message.
    Message,
}

impl CommandKind {
    /// Returns the remote numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Chat => 1,
            Self::User => 2,
            Self::Message => 3,
        }
    }

    /// Returns the canonical lowercase label used in registration keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::User => "user",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl From<CommandKind> for u8 {
    fn from(value: CommandKind) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for CommandKind {
    type Error = UnknownTypeCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Chat),
            2 => Ok(Self::User),
            3 => Ok(Self::Message),
            _ => Err(UnknownTypeCodeError {
                what: "command kind",
                code,
            }),
        }
    }
}

impl TryFrom<&str> for CommandKind {
    type Error = ParseCommandKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "chat" | "chat_input" => Ok(Self::Chat),
            "user" => Ok(Self::User),
            "message" => Ok(Self::Message),
            _ => Err(ParseCommandKindError(value.to_owned())),
        }
    }
}

/// Canonical, scope-agnostic description of one remote-invocable command.
///
/// A spec leaves the compiler with at most one of three shapes: a plain
/// command (no `sub_name`), a subcommand (`sub_name` only), or a grouped
/// subcommand (`group_name` and `sub_name`). The merger folds the latter two
/// into structural options and clears the scratch fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Top-level command name.
    pub name: String,
    /// Invocation kind.
    pub kind: CommandKind,
    /// Command description; empty for context-menu commands.
    pub description: String,
    /// Description of the subcommand group, before merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_description: Option<String>,
    /// Description of the subcommand, before merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_description: Option<String>,
    /// Subcommand group name, before merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Subcommand name, before merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
    /// Guild aliases this command is registered under.
    ///
    /// `None` leaves the decision to scope resolution; `Some(vec![])` pins
    /// the command to global scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guilds: Option<Vec<String>>,
    /// Whether the command is age-restricted.
    #[serde(default)]
    pub nsfw: bool,
    /// Grouping label for help listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Ordered options; positional on the remote side.
    #[serde(default)]
    pub options: Vec<CommandOptionSpec>,
}

impl CommandSpec {
    /// Creates an empty spec of the given kind.
    ///
    /// Chat commands start with the placeholder description, context-menu
    /// commands with an empty one.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: CommandKind) -> Self {
        let description = match kind {
            CommandKind::Chat => NO_DESCRIPTION_PROVIDED.to_owned(),
            CommandKind::User | CommandKind::Message => String::new(),
        };
        Self {
            name: name.into(),
            kind,
            description,
            group_description: None,
            sub_description: None,
            group_name: None,
            sub_name: None,
            guilds: None,
            nsfw: false,
            category: None,
            options: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends an option.
    #[must_use]
    pub fn with_option(mut self, option: CommandOptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Sets the explicit guild alias list.
    #[must_use]
    pub fn with_guilds(mut self, guilds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.guilds = Some(guilds.into_iter().map(Into::into).collect());
        self
    }

    /// Marks the command as a subcommand of this spec's top-level name.
    #[must_use]
    pub fn with_subcommand(mut self, sub_name: impl Into<String>) -> Self {
        self.sub_name = Some(sub_name.into());
        self
    }

    /// Marks the command as a grouped subcommand.
    #[must_use]
    pub fn with_group(
        mut self,
        group_name: impl Into<String>,
        sub_name: impl Into<String>,
    ) -> Self {
        self.group_name = Some(group_name.into());
        self.sub_name = Some(sub_name.into());
        self
    }

    /// Finds a leaf option by name.
    #[must_use]
    pub fn option_mut(&mut self, name: &str) -> Option<&mut CommandOptionSpec> {
        self.options.iter_mut().find(|option| option.name == name)
    }

    /// Returns whether the spec has any structural option.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.options.iter().any(CommandOptionSpec::is_structural)
    }
}
