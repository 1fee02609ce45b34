//! Interaction router: resolves events to handlers and runs the middleware
//! chain.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, error, warn};

use crate::command::domain::DispatchKey;
use crate::command::registry::{CommandEntry, ExecutorRegistry, KeyMappingTable};
use crate::config::Messages;
use crate::interaction::{
    domain::{
        CommandInteraction, ComponentInteraction, Interaction, Reply, RouteFailure, RouteOutcome,
    },
    handler::{
        CommandContext, ComponentContext, ComponentHandler, Handler, HandlerResult, Middleware,
        Next,
    },
    ports::InteractionResponder,
};

/// Routes inbound interactions to their handlers.
///
/// Built once after reconciliation and read-only afterwards; cloning shares
/// the registry and key table.
#[derive(Clone)]
pub struct Router {
    registry: Arc<ExecutorRegistry>,
    key_table: Arc<KeyMappingTable>,
    middleware: Vec<Arc<dyn Middleware>>,
    components: BTreeMap<String, Arc<dyn ComponentHandler>>,
    messages: Messages,
    timeout_ms: Option<u64>,
}

impl Router {
    /// Creates a router without middleware or component handlers.
    #[must_use]
    pub fn new(registry: Arc<ExecutorRegistry>, key_table: Arc<KeyMappingTable>) -> Self {
        Self {
            registry,
            key_table,
            middleware: Vec::new(),
            components: BTreeMap::new(),
            messages: Messages::default(),
            timeout_ms: None,
        }
    }

    /// Appends process-wide middleware, run before each command's own.
    #[must_use]
    pub fn with_middleware(
        mut self,
        middleware: impl IntoIterator<Item = Arc<dyn Middleware>>,
    ) -> Self {
        self.middleware.extend(middleware);
        self
    }

    /// Registers a component handler under its custom id prefix.
    #[must_use]
    pub fn with_component(
        mut self,
        name: impl Into<String>,
        handler: Arc<dyn ComponentHandler>,
    ) -> Self {
        self.components.insert(name.into(), handler);
        self
    }

    /// Replaces the user-visible messages.
    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Bounds each routed interaction; `None` waits indefinitely.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the executor registry.
    #[must_use]
    pub fn registry(&self) -> &ExecutorRegistry {
        &self.registry
    }

    /// Returns the key mapping table.
    #[must_use]
    pub fn key_table(&self) -> &KeyMappingTable {
        &self.key_table
    }

    /// Routes one inbound interaction.
    ///
    /// Never fails: unknown commands and handler failures are answered with
    /// the configured generic replies and reported in the outcome.
    pub async fn route(
        &self,
        interaction: Interaction,
        responder: Arc<dyn InteractionResponder>,
    ) -> RouteOutcome {
        match interaction {
            Interaction::Command(command) => self.route_command(command, responder).await,
            Interaction::Component(component) => self.route_component(component, responder).await,
        }
    }

    /// Routes a command invocation through its middleware chain.
    pub async fn route_command(
        &self,
        interaction: CommandInteraction,
        responder: Arc<dyn InteractionResponder>,
    ) -> RouteOutcome {
        let dispatch_key = interaction.dispatch_key();
        let Some((entry, handler)) = self.resolve(&interaction, &dispatch_key) else {
            warn!(
                command = %interaction.command_name,
                kind = %interaction.kind,
                dispatch = %dispatch_key,
                guild = ?interaction.guild_id,
                "no registered command matches the interaction"
            );
            send_generic(responder.as_ref(), &self.messages.command_not_found).await;
            return RouteOutcome::NotFound;
        };

        let chain: Arc<[Arc<dyn Middleware>]> = self
            .middleware
            .iter()
            .chain(handler.middleware())
            .cloned()
            .collect();
        let reached = Arc::new(AtomicBool::new(false));
        let command = entry.key().clone();
        let ctx = CommandContext::new(
            Arc::new(interaction),
            command.clone(),
            dispatch_key.clone(),
            Arc::clone(&responder),
        );
        let next = Next::start(chain, Arc::clone(handler.executor()), Arc::clone(&reached));

        match self.contain(next.run(ctx)).await {
            Ok(()) if reached.load(Ordering::Acquire) => RouteOutcome::Completed,
            Ok(()) => {
                debug!(command = %command, dispatch = %dispatch_key, "middleware halted the chain");
                RouteOutcome::Halted
            }
            Err(failure) => {
                error!(
                    command = %command,
                    dispatch = %dispatch_key,
                    error = %failure,
                    "command handler failed"
                );
                send_generic(responder.as_ref(), &self.messages.unexpected_error).await;
                RouteOutcome::Failed(failure)
            }
        }
    }

    /// Routes a component click to the handler named by its custom id.
    pub async fn route_component(
        &self,
        interaction: ComponentInteraction,
        responder: Arc<dyn InteractionResponder>,
    ) -> RouteOutcome {
        let name = interaction.handler_name().to_owned();
        let Some(handler) = self.components.get(&name).cloned() else {
            debug!(custom_id = %interaction.custom_id, "no component handler; ignoring");
            return RouteOutcome::Ignored;
        };

        let ctx = ComponentContext::new(Arc::new(interaction), Arc::clone(&responder));
        match self.contain(handler.handle(ctx)).await {
            Ok(()) => RouteOutcome::Completed,
            Err(failure) => {
                error!(component = %name, error = %failure, "component handler failed");
                send_generic(responder.as_ref(), &self.messages.unexpected_error).await;
                RouteOutcome::Failed(failure)
            }
        }
    }

    fn resolve(
        &self,
        interaction: &CommandInteraction,
        dispatch_key: &DispatchKey,
    ) -> Option<(&CommandEntry, &Handler)> {
        let primary = self.key_table.resolve(
            interaction.kind,
            &interaction.command_name,
            interaction.guild_id.as_ref(),
        )?;
        let entry = self.registry.get(primary)?;
        let handler = entry.handler(dispatch_key)?;
        Some((entry, handler))
    }

    async fn contain<F>(&self, handler: F) -> Result<(), RouteFailure>
    where
        F: Future<Output = HandlerResult> + Send,
    {
        let guarded = AssertUnwindSafe(handler).catch_unwind();
        let finished = match self.timeout_ms {
            Some(after_ms) => {
                match tokio::time::timeout(Duration::from_millis(after_ms), guarded).await {
                    Ok(finished) => finished,
                    Err(_) => return Err(RouteFailure::TimedOut { after_ms }),
                }
            }
            None => guarded.await,
        };
        match finished {
            Ok(result) => result.map_err(RouteFailure::from),
            Err(payload) => Err(RouteFailure::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Router")
            .field("commands", &self.registry.len())
            .field("registrations", &self.key_table.len())
            .field("middleware", &self.middleware.len())
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

async fn send_generic(responder: &dyn InteractionResponder, content: &str) {
    if let Err(err) = responder.reply(Reply::ephemeral(content)).await {
        warn!(error = %err, "failed to send generic reply");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}
