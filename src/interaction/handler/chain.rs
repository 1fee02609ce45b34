//! Explicit continuation through the middleware chain.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{CommandContext, Executor, HandlerResult, Middleware};

/// Continuation handed to each middleware.
///
/// Running it invokes the next middleware, or the executor once the chain is
/// exhausted. It is consumed on use, so a middleware can continue at most
/// once.
pub struct Next {
    chain: Arc<[Arc<dyn Middleware>]>,
    position: usize,
    executor: Arc<dyn Executor>,
    reached: Arc<AtomicBool>,
}

impl Next {
    /// Starts a chain; `reached` is set once the executor is invoked.
    pub(crate) fn start(
        chain: Arc<[Arc<dyn Middleware>]>,
        executor: Arc<dyn Executor>,
        reached: Arc<AtomicBool>,
    ) -> Self {
        Self {
            chain,
            position: 0,
            executor,
            reached,
        }
    }

    /// Continues the chain.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by a later middleware or the
    /// executor.
    pub async fn run(self, ctx: CommandContext) -> HandlerResult {
        let Some(middleware) = self.chain.get(self.position).cloned() else {
            self.reached.store(true, Ordering::Release);
            return self.executor.execute(ctx).await;
        };
        let next = Self {
            position: self.position + 1,
            ..self
        };
        middleware.handle(ctx, next).await
    }

    /// Returns how many middleware remain before the executor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.chain.len().saturating_sub(self.position)
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Next")
            .field("position", &self.position)
            .field("remaining", &self.remaining())
            .finish_non_exhaustive()
    }
}
