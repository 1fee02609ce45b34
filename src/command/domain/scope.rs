//! Scope resolution for declared commands.

use serde::{Deserialize, Serialize};

use super::CommandSpec;

/// Where a declared command should be registered, in guild aliases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedScope {
    /// Visible platform-wide.
    Global,
    /// Restricted to the listed guild aliases, in declaration order.
    Guilds(Vec<String>),
}

impl ResolvedScope {
    /// Returns the guild aliases, empty for global scope.
    #[must_use]
    pub fn guild_aliases(&self) -> &[String] {
        match self {
            Self::Global => &[],
            Self::Guilds(aliases) => aliases,
        }
    }
}

/// Decides between global and guild scope for every spec.
///
/// A spec is guild-scoped when it lists guilds explicitly, or when the
/// process is not in production mode, a development guild is configured, and
/// the spec has not pinned itself to global scope with an explicit empty
/// list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopePolicy {
    production: bool,
    dev_guild: Option<String>,
}

impl ScopePolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(production: bool, dev_guild: Option<String>) -> Self {
        Self {
            production,
            dev_guild,
        }
    }

    /// Resolves the scope of a spec.
    #[must_use]
    pub fn resolve(&self, spec: &CommandSpec) -> ResolvedScope {
        match (&spec.guilds, &self.dev_guild) {
            (Some(guilds), _) if !guilds.is_empty() => ResolvedScope::Guilds(dedup(guilds)),
            (None, Some(dev_guild)) if !self.production => {
                ResolvedScope::Guilds(vec![dev_guild.clone()])
            }
            _ => ResolvedScope::Global,
        }
    }
}

fn dedup(aliases: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(aliases.len());
    for alias in aliases {
        if !unique.contains(alias) {
            unique.push(alias.clone());
        }
    }
    unique
}
