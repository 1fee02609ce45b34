//! Executor registry and the subcommand/group merger.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::command::domain::{
    CommandKey, CommandOptionSpec, CommandSpec, DispatchKey, OptionType, ScopePolicy,
};
use crate::interaction::handler::Handler;

/// One top-level command with the handlers of its dispatch keys.
#[derive(Debug, Clone)]
pub struct CommandEntry {
    key: CommandKey,
    spec: CommandSpec,
    handlers: BTreeMap<DispatchKey, Handler>,
}

impl CommandEntry {
    fn new(key: CommandKey, spec: CommandSpec) -> Self {
        Self {
            key,
            spec,
            handlers: BTreeMap::new(),
        }
    }

    /// Returns the primary key.
    #[must_use]
    pub const fn key(&self) -> &CommandKey {
        &self.key
    }

    /// Returns the merged spec.
    #[must_use]
    pub const fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// Returns the handler for a dispatch key.
    #[must_use]
    pub fn handler(&self, dispatch_key: &DispatchKey) -> Option<&Handler> {
        self.handlers.get(dispatch_key)
    }

    /// Iterates the registered dispatch keys in order.
    pub fn dispatch_keys(&self) -> impl Iterator<Item = &DispatchKey> {
        self.handlers.keys()
    }
}

/// Top-level commands keyed by kind, name, and resolved scope.
///
/// Entries keep declaration order, which is the order reconciliation applies
/// them in.
#[derive(Debug, Clone, Default)]
pub struct ExecutorRegistry {
    policy: ScopePolicy,
    entries: Vec<CommandEntry>,
    index: HashMap<CommandKey, usize>,
}

impl ExecutorRegistry {
    /// Creates an empty registry resolving scopes with `policy`.
    #[must_use]
    pub fn new(policy: ScopePolicy) -> Self {
        Self {
            policy,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the scope policy.
    #[must_use]
    pub const fn policy(&self) -> &ScopePolicy {
        &self.policy
    }

    /// Folds a compiled spec into the registry and attaches its handler.
    ///
    /// Plain commands are registered as they are. A subcommand, or a
    /// subcommand inside a group, is appended to the existing top-level
    /// command of the same kind, name, and scope; when none exists the spec
    /// itself becomes that command with its options wrapped in structural
    /// nodes. Returns `true` when the spec was folded into an existing entry.
    pub fn merge(&mut self, mut spec: CommandSpec, handler: Handler) -> bool {
        let key = self.key_for(&spec);
        let dispatch_key = DispatchKey::for_spec(&spec);
        let group_name = spec.group_name.take();
        let Some(sub_name) = spec.sub_name.take() else {
            self.replace(key, spec, dispatch_key, handler);
            return false;
        };

        let subcommand = CommandOptionSpec::subcommand(
            sub_name,
            spec.sub_description.take(),
            std::mem::take(&mut spec.options),
        );
        let group_description = spec.group_description.take();

        let Some(position) = self.index.get(&key).copied() else {
            spec.options = vec![match group_name {
                Some(group) => {
                    CommandOptionSpec::group(group, group_description, vec![subcommand])
                }
                None => subcommand,
            }];
            debug!(command = %key, dispatch = %dispatch_key, "seeded composite command");
            self.insert(key, spec, dispatch_key, handler);
            return false;
        };

        let Some(entry) = self.entries.get_mut(position) else {
            return false;
        };
        match group_name {
            Some(group) => {
                if let Some(existing) = entry.spec.options.iter_mut().find(|option| {
                    option.option_type == OptionType::SubcommandGroup && option.name == group
                }) {
                    upsert_child(existing, subcommand);
                } else {
                    entry.spec.options.push(CommandOptionSpec::group(
                        group,
                        group_description,
                        vec![subcommand],
                    ));
                }
            }
            None => upsert_child_of_spec(&mut entry.spec, subcommand),
        }
        debug!(command = %key, dispatch = %dispatch_key, "merged into composite command");
        entry.handlers.insert(dispatch_key, handler);
        true
    }

    /// Registers an already merged spec and attaches a handler to one of its
    /// dispatch keys.
    ///
    /// Calling this again with the same spec attaches further dispatch keys;
    /// the stored spec is replaced by the latest one.
    pub fn register_executor(
        &mut self,
        spec: CommandSpec,
        dispatch_key: DispatchKey,
        handler: Handler,
    ) -> CommandKey {
        let key = self.key_for(&spec);
        if let Some(entry) = self
            .index
            .get(&key)
            .copied()
            .and_then(|position| self.entries.get_mut(position))
        {
            entry.spec = spec;
            entry.handlers.insert(dispatch_key, handler);
        } else {
            self.insert(key.clone(), spec, dispatch_key, handler);
        }
        key
    }

    /// Returns the entry for a primary key.
    #[must_use]
    pub fn get(&self, key: &CommandKey) -> Option<&CommandEntry> {
        self.index
            .get(key)
            .and_then(|position| self.entries.get(*position))
    }

    /// Iterates entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    /// Returns command names grouped by help category.
    ///
    /// Commands without a category are omitted.
    #[must_use]
    pub fn categories(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut categories: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for entry in &self.entries {
            if let Some(category) = entry.spec.category.as_deref() {
                categories
                    .entry(category)
                    .or_default()
                    .push(entry.spec.name.as_str());
            }
        }
        categories
    }

    /// Returns the number of top-level commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key_for(&self, spec: &CommandSpec) -> CommandKey {
        CommandKey::new(spec.kind, spec.name.clone(), self.policy.resolve(spec))
    }

    fn insert(
        &mut self,
        key: CommandKey,
        spec: CommandSpec,
        dispatch_key: DispatchKey,
        handler: Handler,
    ) {
        let mut entry = CommandEntry::new(key.clone(), spec);
        entry.handlers.insert(dispatch_key, handler);
        self.index.insert(key, self.entries.len());
        self.entries.push(entry);
    }

    fn replace(
        &mut self,
        key: CommandKey,
        spec: CommandSpec,
        dispatch_key: DispatchKey,
        handler: Handler,
    ) {
        let Some(entry) = self
            .index
            .get(&key)
            .copied()
            .and_then(|position| self.entries.get_mut(position))
        else {
            self.insert(key, spec, dispatch_key, handler);
            return;
        };
        warn!(command = %key, "command declared twice; keeping the latest declaration");
        entry.spec = spec;
        entry.handlers.clear();
        entry.handlers.insert(dispatch_key, handler);
    }
}

fn upsert_child_of_spec(spec: &mut CommandSpec, child: CommandOptionSpec) {
    match spec
        .options
        .iter_mut()
        .find(|option| option.option_type == child.option_type && option.name == child.name)
    {
        Some(existing) => *existing = child,
        None => spec.options.push(child),
    }
}

fn upsert_child(parent: &mut CommandOptionSpec, child: CommandOptionSpec) {
    match parent.child_mut(&child.name, child.option_type) {
        Some(existing) => *existing = child,
        None => parent.options.push(child),
    }
}
