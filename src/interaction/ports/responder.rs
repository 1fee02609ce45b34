//! Reply port for one inbound interaction.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::interaction::domain::Reply;

/// Result type for responder operations.
pub type ResponderResult<T> = Result<T, ResponderError>;

/// Sends user-visible replies for the interaction being routed.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Sends a reply.
    async fn reply(&self, reply: Reply) -> ResponderResult<()>;
}

/// Errors returned by responder adapters.
#[derive(Debug, Clone, Error)]
pub enum ResponderError {
    /// The interaction was already answered.
    #[error("interaction already acknowledged")]
    AlreadyAcknowledged,

    /// The reply could not be delivered.
    #[error("reply delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResponderError {
    /// Wraps a delivery error from the responder adapter.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
