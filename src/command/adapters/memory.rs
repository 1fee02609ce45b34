//! In-memory remote registry that records every mutation.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::command::{
    domain::{CommandPayload, RemoteCommand, RemoteCommandId, RemoteOperation, RemoteScope},
    ports::{RemoteCommandRegistry, RemoteRegistryError, RemoteRegistryResult},
};

/// Thread-safe in-memory remote registry.
///
/// Used for tests and dry runs: every create, update, and delete is applied
/// to the stored commands and appended to an operation log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteRegistry {
    state: Arc<RwLock<InMemoryRemoteState>>,
}

#[derive(Debug, Default)]
struct InMemoryRemoteState {
    scopes: BTreeMap<RemoteScope, Vec<RemoteCommand>>,
    operations: Vec<RemoteOperation>,
    fetches: Vec<RemoteScope>,
}

impl InMemoryRemoteRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a command as if it had been registered out of band.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteRegistryError::Transport`] when the state lock is
    /// poisoned.
    pub fn seed(&self, scope: RemoteScope, command: RemoteCommand) -> RemoteRegistryResult<()> {
        let mut state = self.write()?;
        state.scopes.entry(scope).or_default().push(command);
        Ok(())
    }

    /// Returns the commands stored in a scope.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteRegistryError::Transport`] when the state lock is
    /// poisoned.
    pub fn commands(&self, scope: &RemoteScope) -> RemoteRegistryResult<Vec<RemoteCommand>> {
        let state = self.read()?;
        Ok(state.scopes.get(scope).cloned().unwrap_or_default())
    }

    /// Returns the mutations applied so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteRegistryError::Transport`] when the state lock is
    /// poisoned.
    pub fn operations(&self) -> RemoteRegistryResult<Vec<RemoteOperation>> {
        let state = self.read()?;
        Ok(state.operations.clone())
    }

    /// Returns every fetched scope, in call order.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteRegistryError::Transport`] when the state lock is
    /// poisoned.
    pub fn fetches(&self) -> RemoteRegistryResult<Vec<RemoteScope>> {
        let state = self.read()?;
        Ok(state.fetches.clone())
    }

    /// Clears the operation and fetch logs, keeping stored commands.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteRegistryError::Transport`] when the state lock is
    /// poisoned.
    pub fn clear_logs(&self) -> RemoteRegistryResult<()> {
        let mut state = self.write()?;
        state.operations.clear();
        state.fetches.clear();
        Ok(())
    }

    fn read(&self) -> RemoteRegistryResult<RwLockReadGuard<'_, InMemoryRemoteState>> {
        self.state
            .read()
            .map_err(|err| RemoteRegistryError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> RemoteRegistryResult<RwLockWriteGuard<'_, InMemoryRemoteState>> {
        self.state
            .write()
            .map_err(|err| RemoteRegistryError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl RemoteCommandRegistry for InMemoryRemoteRegistry {
    async fn fetch(&self, scope: &RemoteScope) -> RemoteRegistryResult<Vec<RemoteCommand>> {
        let mut state = self.write()?;
        state.fetches.push(scope.clone());
        Ok(state.scopes.get(scope).cloned().unwrap_or_default())
    }

    async fn create(
        &self,
        scope: &RemoteScope,
        payload: &CommandPayload,
    ) -> RemoteRegistryResult<RemoteCommandId> {
        let mut state = self.write()?;
        let commands = state.scopes.entry(scope.clone()).or_default();
        if commands
            .iter()
            .any(|command| command.name == payload.name && command.kind == payload.kind)
        {
            return Err(RemoteRegistryError::Rejected {
                name: payload.name.clone(),
                reason: format!("already registered in {scope}"),
            });
        }

        let id = RemoteCommandId::new(Uuid::new_v4().to_string());
        commands.push(RemoteCommand::from_payload(id.clone(), payload));
        state.operations.push(RemoteOperation::Create {
            scope: scope.clone(),
            kind: payload.kind,
            name: payload.name.clone(),
            id: id.clone(),
        });
        Ok(id)
    }

    async fn update(
        &self,
        id: &RemoteCommandId,
        scope: &RemoteScope,
        payload: &CommandPayload,
    ) -> RemoteRegistryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .scopes
            .get_mut(scope)
            .and_then(|commands| commands.iter_mut().find(|command| command.id == *id))
            .ok_or_else(|| RemoteRegistryError::NotFound {
                id: id.clone(),
                scope: scope.clone(),
            })?;
        *stored = RemoteCommand::from_payload(id.clone(), payload);
        state.operations.push(RemoteOperation::Update {
            scope: scope.clone(),
            kind: payload.kind,
            name: payload.name.clone(),
            id: id.clone(),
        });
        Ok(())
    }

    async fn delete(&self, id: &RemoteCommandId, scope: &RemoteScope) -> RemoteRegistryResult<()> {
        let mut state = self.write()?;
        let commands = state.scopes.get_mut(scope);
        let removed = commands.and_then(|stored| {
            stored
                .iter()
                .position(|command| command.id == *id)
                .map(|position| stored.remove(position))
        });
        let Some(command) = removed else {
            return Err(RemoteRegistryError::NotFound {
                id: id.clone(),
                scope: scope.clone(),
            });
        };
        state.operations.push(RemoteOperation::Delete {
            scope: scope.clone(),
            kind: command.kind,
            name: command.name,
            id: id.clone(),
        });
        Ok(())
    }
}
