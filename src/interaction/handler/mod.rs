//! User handler contracts: executors, middleware, and component handlers.
//!
//! Handlers receive an explicit context carrying the event, the resolved
//! dispatch key, and the responder for the interaction. Middleware receives a
//! [`Next`] continuation and must run it to advance the chain; returning
//! without running it vetoes the command.

mod chain;
mod context;
mod func;

pub use chain::Next;
pub use context::{CommandContext, ComponentContext};
pub use func::{component_fn, executor_fn, middleware_fn};

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::interaction::ports::ResponderError;

/// Result type returned by user handlers.
pub type HandlerResult<T = ()> = Result<T, HandlerError>;

/// Errors raised by user handlers.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    /// Handler-provided failure description.
    #[error("{0}")]
    Message(String),

    /// A reply could not be sent.
    #[error(transparent)]
    Responder(#[from] ResponderError),

    /// Any other handler failure.
    #[error("handler error: {0}")]
    Other(Arc<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Creates an error from a description.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wraps an arbitrary handler error.
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Arc::new(err))
    }
}

/// Terminal handler of a command invocation.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Runs the command.
    async fn execute(&self, ctx: CommandContext) -> HandlerResult;
}

/// Step of the middleware chain preceding an executor.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Handles the invocation, running `next` to continue the chain.
    async fn handle(&self, ctx: CommandContext, next: Next) -> HandlerResult;
}

/// Handler for component clicks, selected by custom id prefix.
#[async_trait]
pub trait ComponentHandler: Send + Sync {
    /// Handles the click.
    async fn handle(&self, ctx: ComponentContext) -> HandlerResult;
}

/// An executor with its local middleware, stored per dispatch key.
#[derive(Clone)]
pub struct Handler {
    middleware: Vec<Arc<dyn Middleware>>,
    executor: Arc<dyn Executor>,
}

impl Handler {
    /// Creates a handler without local middleware.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            middleware: Vec::new(),
            executor,
        }
    }

    /// Appends local middleware, run after process-wide middleware.
    #[must_use]
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Returns the local middleware in declaration order.
    #[must_use]
    pub fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Handler")
            .field("middleware", &self.middleware.len())
            .finish_non_exhaustive()
    }
}
