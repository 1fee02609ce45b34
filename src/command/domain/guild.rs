//! Guild alias directory.

use std::collections::BTreeMap;

use super::GuildId;

/// Maps guild aliases used in declarations onto remote guild identifiers.
///
/// An alias made only of ASCII digits that is not configured is taken to be
/// the identifier itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildDirectory {
    aliases: BTreeMap<String, GuildId>,
}

impl GuildDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>, guild_id: GuildId) -> Self {
        self.aliases.insert(alias.into(), guild_id);
        self
    }

    /// Resolves an alias to a guild identifier.
    #[must_use]
    pub fn resolve(&self, alias: &str) -> Option<GuildId> {
        self.aliases.get(alias).cloned().or_else(|| {
            (!alias.is_empty() && alias.chars().all(|character| character.is_ascii_digit()))
                .then(|| GuildId::new(alias))
        })
    }

    /// Returns whether an alias is configured.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }
}

impl FromIterator<(String, GuildId)> for GuildDirectory {
    fn from_iter<T: IntoIterator<Item = (String, GuildId)>>(iter: T) -> Self {
        Self {
            aliases: iter.into_iter().collect(),
        }
    }
}
