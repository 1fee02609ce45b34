//! Registration key to primary key lookup built by reconciliation.

use std::collections::BTreeMap;

use crate::command::domain::{CommandKey, CommandKind, GuildId, RegistrationKey, RemoteScope};

/// Maps every remote registration onto the registry entry that serves it.
///
/// Several registration keys may point at one primary key when a command is
/// shared between guilds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMappingTable {
    entries: BTreeMap<RegistrationKey, CommandKey>,
}

impl KeyMappingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a registration, returning the primary key it replaced.
    pub fn insert(&mut self, key: RegistrationKey, primary: CommandKey) -> Option<CommandKey> {
        self.entries.insert(key, primary)
    }

    /// Returns the primary key for a registration.
    #[must_use]
    pub fn get(&self, key: &RegistrationKey) -> Option<&CommandKey> {
        self.entries.get(key)
    }

    /// Returns whether a registration is referenced.
    #[must_use]
    pub fn contains(&self, key: &RegistrationKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Resolves an inbound event, trying its guild before global scope.
    #[must_use]
    pub fn resolve(
        &self,
        kind: CommandKind,
        name: &str,
        guild_id: Option<&GuildId>,
    ) -> Option<&CommandKey> {
        guild_id
            .and_then(|guild| {
                self.get(&RegistrationKey::new(
                    RemoteScope::Guild(guild.clone()),
                    kind,
                    name,
                ))
            })
            .or_else(|| self.get(&RegistrationKey::new(RemoteScope::Global, kind, name)))
    }

    /// Iterates registrations in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&RegistrationKey, &CommandKey)> {
        self.entries.iter()
    }

    /// Returns the number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
