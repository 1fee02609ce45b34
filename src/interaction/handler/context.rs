//! Per-invocation contexts handed to handlers.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::HandlerResult;
use crate::command::domain::{CommandKey, DispatchKey};
use crate::interaction::{
    domain::{CommandInteraction, ComponentInteraction, Reply},
    ports::InteractionResponder,
};

/// Context of one command invocation.
#[derive(Clone)]
pub struct CommandContext {
    interaction: Arc<CommandInteraction>,
    command: CommandKey,
    dispatch_key: DispatchKey,
    responder: Arc<dyn InteractionResponder>,
}

impl CommandContext {
    /// Creates a context for a resolved invocation.
    #[must_use]
    pub fn new(
        interaction: Arc<CommandInteraction>,
        command: CommandKey,
        dispatch_key: DispatchKey,
        responder: Arc<dyn InteractionResponder>,
    ) -> Self {
        Self {
            interaction,
            command,
            dispatch_key,
            responder,
        }
    }

    /// Returns the inbound event.
    #[must_use]
    pub fn interaction(&self) -> &CommandInteraction {
        &self.interaction
    }

    /// Returns the primary key the event resolved to.
    #[must_use]
    pub const fn command(&self) -> &CommandKey {
        &self.command
    }

    /// Returns the dispatch key the executor was selected by.
    #[must_use]
    pub const fn dispatch_key(&self) -> &DispatchKey {
        &self.dispatch_key
    }

    /// Returns a resolved option value.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.interaction.option(name)
    }

    /// Sends a reply for the invocation.
    ///
    /// # Errors
    ///
    /// Returns [`super::HandlerError::Responder`] when delivery fails.
    pub async fn reply(&self, reply: Reply) -> HandlerResult {
        self.responder.reply(reply).await?;
        Ok(())
    }
}

impl fmt::Debug for CommandContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CommandContext")
            .field("interaction", &self.interaction)
            .field("command", &self.command)
            .field("dispatch_key", &self.dispatch_key)
            .finish_non_exhaustive()
    }
}

/// Context of one component click.
#[derive(Clone)]
pub struct ComponentContext {
    interaction: Arc<ComponentInteraction>,
    responder: Arc<dyn InteractionResponder>,
}

impl ComponentContext {
    /// Creates a context for a component click.
    #[must_use]
    pub fn new(
        interaction: Arc<ComponentInteraction>,
        responder: Arc<dyn InteractionResponder>,
    ) -> Self {
        Self {
            interaction,
            responder,
        }
    }

    /// Returns the inbound event.
    #[must_use]
    pub fn interaction(&self) -> &ComponentInteraction {
        &self.interaction
    }

    /// Returns the custom id segments after the handler name.
    pub fn arguments(&self) -> impl Iterator<Item = &str> {
        self.interaction.arguments()
    }

    /// Sends a reply for the click.
    ///
    /// # Errors
    ///
    /// Returns [`super::HandlerError::Responder`] when delivery fails.
    pub async fn reply(&self, reply: Reply) -> HandlerResult {
        self.responder.reply(reply).await?;
        Ok(())
    }
}

impl fmt::Debug for ComponentContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ComponentContext")
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}
