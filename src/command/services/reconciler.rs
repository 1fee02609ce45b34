//! Registration reconciliation against the remote command registry.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use futures::future::try_join_all;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::normalize::payload_matches;
use crate::command::{
    domain::{
        CommandKey, CommandPayload, GuildDirectory, RegistrationKey, RemoteCommand,
        RemoteOperation, RemoteScope, ResolvedScope,
    },
    ports::{RemoteCommandRegistry, RemoteRegistryError},
    registry::{ExecutorRegistry, KeyMappingTable},
};

/// Result type for reconciliation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Errors that abort a reconciliation pass.
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    /// A command targets a guild alias that cannot be resolved.
    #[error("command '{command}' targets unknown guild alias '{alias}'")]
    UnknownGuildAlias {
        /// Command name.
        command: String,
        /// Unresolved alias.
        alias: String,
    },

    /// A remote registry call failed.
    #[error(transparent)]
    Remote(#[from] RemoteRegistryError),
}

/// Outcome of a completed reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    operations: Vec<RemoteOperation>,
    key_table: KeyMappingTable,
}

impl ReconcileReport {
    /// Returns the remote mutations issued, in call order.
    #[must_use]
    pub fn operations(&self) -> &[RemoteOperation] {
        &self.operations
    }

    /// Returns the key mapping table built by the pass.
    #[must_use]
    pub const fn key_table(&self) -> &KeyMappingTable {
        &self.key_table
    }

    /// Consumes the report, returning the key mapping table.
    #[must_use]
    pub fn into_key_table(self) -> KeyMappingTable {
        self.key_table
    }

    /// Returns whether no mutation was issued.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.operations.is_empty()
    }
}

/// A registry entry with its remote targets, the first one authoritative.
struct PlannedCommand {
    primary: CommandKey,
    payload: CommandPayload,
    targets: Vec<RemoteScope>,
}

/// Converges the remote registry onto the declared commands.
///
/// A pass resolves every scope before any remote call, fetches each scope
/// once concurrently, creates or updates each command sequentially in
/// declaration order, then deletes remote commands nothing maps to. The
/// first remote error aborts the pass.
pub struct Reconciler<R>
where
    R: RemoteCommandRegistry,
{
    remote: Arc<R>,
    guilds: GuildDirectory,
}

impl<R> Reconciler<R>
where
    R: RemoteCommandRegistry,
{
    /// Creates a reconciler.
    #[must_use]
    pub const fn new(remote: Arc<R>, guilds: GuildDirectory) -> Self {
        Self { remote, guilds }
    }

    /// Runs one reconciliation pass.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::UnknownGuildAlias`] before any remote call
    /// when an alias cannot be resolved, and [`ReconcileError::Remote`] for
    /// the first failed fetch, create, update, or delete.
    pub async fn reconcile(&self, registry: &ExecutorRegistry) -> ReconcileResult<ReconcileReport> {
        let plan = self.plan(registry)?;
        let snapshots = self.fetch_snapshots(&plan).await?;

        let mut report = ReconcileReport::default();
        for planned in &plan {
            self.apply(planned, &snapshots, &mut report).await?;
        }
        self.prune(&snapshots, &mut report).await?;

        info!(
            operations = report.operations.len(),
            registrations = report.key_table.len(),
            "reconciliation finished"
        );
        Ok(report)
    }

    fn plan(&self, registry: &ExecutorRegistry) -> ReconcileResult<Vec<PlannedCommand>> {
        registry
            .entries()
            .map(|entry| {
                let primary = entry.key().clone();
                let targets = match &primary.scope {
                    ResolvedScope::Global => vec![RemoteScope::Global],
                    ResolvedScope::Guilds(aliases) => aliases
                        .iter()
                        .map(|alias| {
                            self.guilds.resolve(alias).map(RemoteScope::Guild).ok_or_else(|| {
                                ReconcileError::UnknownGuildAlias {
                                    command: primary.name.clone(),
                                    alias: alias.clone(),
                                }
                            })
                        })
                        .collect::<ReconcileResult<Vec<_>>>()?,
                };
                Ok(PlannedCommand {
                    payload: CommandPayload::from_spec(entry.spec()),
                    primary,
                    targets,
                })
            })
            .collect()
    }

    async fn fetch_snapshots(
        &self,
        plan: &[PlannedCommand],
    ) -> ReconcileResult<BTreeMap<RemoteScope, Vec<RemoteCommand>>> {
        let scopes: BTreeSet<RemoteScope> = std::iter::once(RemoteScope::Global)
            .chain(plan.iter().flat_map(|planned| planned.targets.iter().cloned()))
            .collect();

        let fetched = try_join_all(scopes.into_iter().map(|scope| async move {
            let commands = self.remote.fetch(&scope).await?;
            debug!(scope = %scope, commands = commands.len(), "fetched remote snapshot");
            Ok::<_, RemoteRegistryError>((scope, commands))
        }))
        .await?;
        Ok(fetched.into_iter().collect())
    }

    async fn apply(
        &self,
        planned: &PlannedCommand,
        snapshots: &BTreeMap<RemoteScope, Vec<RemoteCommand>>,
        report: &mut ReconcileReport,
    ) -> ReconcileResult<()> {
        let Some((scope, shared)) = planned.targets.split_first() else {
            return Ok(());
        };
        let kind = planned.payload.kind;
        let name = planned.payload.name.as_str();

        let registration = RegistrationKey::new(scope.clone(), kind, name);
        if let Some(owner) = report.key_table.get(&registration) {
            warn!(
                registration = %registration,
                owner = %owner,
                command = %planned.primary,
                "registration already claimed in this pass; skipping"
            );
            return Ok(());
        }

        let existing = snapshots.get(scope).and_then(|commands| {
            commands
                .iter()
                .find(|command| command.name == name && command.kind == kind)
        });
        match existing {
            None => {
                let id = self.remote.create(scope, &planned.payload).await?;
                info!(
                    scope = %scope,
                    kind = %kind,
                    command = name,
                    id = %id,
                    "created remote command"
                );
                report.operations.push(RemoteOperation::Create {
                    scope: scope.clone(),
                    kind,
                    name: name.to_owned(),
                    id,
                });
            }
            Some(remote) if !payload_matches(&planned.payload, remote) => {
                self.remote
                    .update(&remote.id, scope, &planned.payload)
                    .await?;
                info!(
                    scope = %scope,
                    kind = %kind,
                    command = name,
                    id = %remote.id,
                    "updated remote command"
                );
                report.operations.push(RemoteOperation::Update {
                    scope: scope.clone(),
                    kind,
                    name: name.to_owned(),
                    id: remote.id.clone(),
                });
            }
            Some(_) => {
                debug!(scope = %scope, kind = %kind, command = name, "remote command up to date");
            }
        }
        report.key_table.insert(registration, planned.primary.clone());

        if !shared.is_empty() {
            debug!(
                command = %planned.primary,
                authoritative = %scope,
                shared = shared.len(),
                "guild-shared command registered in its first guild only"
            );
        }
        for alias_scope in shared {
            let alias = RegistrationKey::new(alias_scope.clone(), kind, name);
            if let Some(owner) = report.key_table.get(&alias) {
                warn!(
                    registration = %alias,
                    owner = %owner,
                    command = %planned.primary,
                    "shared registration already claimed in this pass; keeping owner"
                );
                continue;
            }
            report.key_table.insert(alias, planned.primary.clone());
        }
        Ok(())
    }

    async fn prune(
        &self,
        snapshots: &BTreeMap<RemoteScope, Vec<RemoteCommand>>,
        report: &mut ReconcileReport,
    ) -> ReconcileResult<()> {
        for (scope, commands) in snapshots {
            for command in commands {
                let registration =
                    RegistrationKey::new(scope.clone(), command.kind, command.name.as_str());
                if report.key_table.contains(&registration) {
                    continue;
                }
                self.remote.delete(&command.id, scope).await?;
                info!(
                    scope = %scope,
                    kind = %command.kind,
                    command = %command.name,
                    id = %command.id,
                    "deleted remote command"
                );
                report.operations.push(RemoteOperation::Delete {
                    scope: scope.clone(),
                    kind: command.kind,
                    name: command.name.clone(),
                    id: command.id.clone(),
                });
            }
        }
        Ok(())
    }
}
