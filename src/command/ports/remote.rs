//! Remote command registry port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::command::domain::{CommandPayload, RemoteCommand, RemoteCommandId, RemoteScope};

/// Result type for remote registry operations.
pub type RemoteRegistryResult<T> = Result<T, RemoteRegistryError>;

/// Command registry of the remote chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteCommandRegistry: Send + Sync {
    /// Lists the commands registered in a scope.
    async fn fetch(&self, scope: &RemoteScope) -> RemoteRegistryResult<Vec<RemoteCommand>>;

    /// Registers a new command and returns its identifier.
    async fn create(
        &self,
        scope: &RemoteScope,
        payload: &CommandPayload,
    ) -> RemoteRegistryResult<RemoteCommandId>;

    /// Overwrites an existing command.
    async fn update(
        &self,
        id: &RemoteCommandId,
        scope: &RemoteScope,
        payload: &CommandPayload,
    ) -> RemoteRegistryResult<()>;

    /// Removes a command.
    async fn delete(&self, id: &RemoteCommandId, scope: &RemoteScope) -> RemoteRegistryResult<()>;
}

/// Errors returned by remote registry adapters.
#[derive(Debug, Clone, Error)]
pub enum RemoteRegistryError {
    /// The command identifier is unknown in the scope.
    #[error("remote command {id} not found in {scope}")]
    NotFound {
        /// Remote identifier.
        id: RemoteCommandId,
        /// Scope searched.
        scope: RemoteScope,
    },

    /// The remote side rejected the payload.
    #[error("remote registry rejected command '{name}': {reason}")]
    Rejected {
        /// Command name.
        name: String,
        /// Reason reported remotely.
        reason: String,
    },

    /// Transport or adapter failure.
    #[error("remote registry transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RemoteRegistryError {
    /// Wraps a transport error from the registry adapter.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
