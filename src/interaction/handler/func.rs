//! Closure adapters for the handler traits.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use super::{
    CommandContext, ComponentContext, ComponentHandler, Executor, HandlerResult, Middleware, Next,
};

struct FnExecutor<F>(F);

#[async_trait]
impl<F, Fut> Executor for FnExecutor<F>
where
    F: Fn(CommandContext) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn execute(&self, ctx: CommandContext) -> HandlerResult {
        (self.0)(ctx).await
    }
}

struct FnMiddleware<F>(F);

#[async_trait]
impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(CommandContext, Next) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, ctx: CommandContext, next: Next) -> HandlerResult {
        (self.0)(ctx, next).await
    }
}

struct FnComponentHandler<F>(F);

#[async_trait]
impl<F, Fut> ComponentHandler for FnComponentHandler<F>
where
    F: Fn(ComponentContext) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn handle(&self, ctx: ComponentContext) -> HandlerResult {
        (self.0)(ctx).await
    }
}

/// Wraps an async closure as an [`Executor`].
pub fn executor_fn<F, Fut>(handler: F) -> Arc<dyn Executor>
where
    F: Fn(CommandContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(FnExecutor(handler))
}

/// Wraps an async closure as a [`Middleware`].
pub fn middleware_fn<F, Fut>(handler: F) -> Arc<dyn Middleware>
where
    F: Fn(CommandContext, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(FnMiddleware(handler))
}

/// Wraps an async closure as a [`ComponentHandler`].
pub fn component_fn<F, Fut>(handler: F) -> Arc<dyn ComponentHandler>
where
    F: Fn(ComponentContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(FnComponentHandler(handler))
}
