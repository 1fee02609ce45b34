//! Framework configuration.
//!
//! Configuration is plain data: it is deserialised from JSON by the
//! bootstrap layer or assembled with builder methods, then validated once
//! before the framework is constructed.

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::command::domain::{GuildDirectory, GuildId, ScopePolicy};

/// Default help category assigned to declarations without one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Reply sent when an event matches no registered command.
pub const DEFAULT_COMMAND_NOT_FOUND: &str = "The requested command does not exist.";

/// Reply sent when a handler fails.
pub const DEFAULT_UNEXPECTED_ERROR: &str =
    "An unexpected error has occurred! If you are the developer, please view your console.";

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for [`ReballConfig`].
    #[error("invalid configuration: {0}")]
    Parse(String),

    /// The development guild alias is not configured.
    #[error("development guild alias '{0}' is not listed in guilds")]
    UnknownDevGuild(String),

    /// A guild alias maps to an empty identifier.
    #[error("guild alias '{0}' has an empty identifier")]
    EmptyGuildId(String),

    /// The handler timeout is zero.
    #[error("handler timeout must be greater than zero")]
    ZeroTimeout,
}

/// User-visible messages sent by the router.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Reply for events that match no registered command.
    pub command_not_found: String,
    /// Reply for failed handlers.
    pub unexpected_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            command_not_found: DEFAULT_COMMAND_NOT_FOUND.to_owned(),
            unexpected_error: DEFAULT_UNEXPECTED_ERROR.to_owned(),
        }
    }
}

/// Framework configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReballConfig {
    /// Whether unscoped commands are registered globally.
    pub production: bool,
    /// Alias of the guild unscoped commands target outside production.
    pub dev_guild: Option<String>,
    /// Guild aliases and their identifiers.
    pub guilds: BTreeMap<String, String>,
    /// Help category for declarations without one.
    pub default_category: String,
    /// Upper bound on one routed interaction, in milliseconds.
    pub handler_timeout_ms: Option<u64>,
    /// User-visible router messages.
    pub messages: Messages,
}

impl Default for ReballConfig {
    fn default() -> Self {
        Self {
            production: false,
            dev_guild: None,
            guilds: BTreeMap::new(),
            default_category: DEFAULT_CATEGORY.to_owned(),
            handler_timeout_ms: None,
            messages: Messages::default(),
        }
    }
}

impl ReballConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error of
    /// [`ReballConfig::validate`].
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets production mode.
    #[must_use]
    pub const fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Sets the development guild alias.
    #[must_use]
    pub fn with_dev_guild(mut self, alias: impl Into<String>) -> Self {
        self.dev_guild = Some(alias.into());
        self
    }

    /// Adds a guild alias.
    #[must_use]
    pub fn with_guild(mut self, alias: impl Into<String>, guild_id: impl Into<String>) -> Self {
        self.guilds.insert(alias.into(), guild_id.into());
        self
    }

    /// Sets the default help category.
    #[must_use]
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Sets the handler timeout.
    #[must_use]
    pub const fn with_handler_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.handler_timeout_ms = Some(timeout_ms);
        self
    }

    /// Replaces the router messages.
    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDevGuild`] when the development guild is
    /// not a configured alias, [`ConfigError::EmptyGuildId`] for an empty
    /// identifier, and [`ConfigError::ZeroTimeout`] for a zero timeout.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some((alias, _)) = self.guilds.iter().find(|(_, id)| id.trim().is_empty()) {
            return Err(ConfigError::EmptyGuildId(alias.clone()));
        }
        if let Some(dev_guild) = &self.dev_guild
            && !self.guilds.contains_key(dev_guild)
        {
            return Err(ConfigError::UnknownDevGuild(dev_guild.clone()));
        }
        if self.handler_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Returns the scope policy derived from this configuration.
    #[must_use]
    pub fn scope_policy(&self) -> ScopePolicy {
        ScopePolicy::new(self.production, self.dev_guild.clone())
    }

    /// Returns the guild alias directory.
    #[must_use]
    pub fn guild_directory(&self) -> GuildDirectory {
        self.guilds
            .iter()
            .map(|(alias, id)| (alias.clone(), GuildId::new(id.trim())))
            .collect()
    }
}
