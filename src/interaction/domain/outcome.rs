//! Terminal states of a routed interaction.

use thiserror::Error;

use crate::interaction::handler::HandlerError;

/// How routing of one interaction ended.
#[derive(Debug, Clone)]
pub enum RouteOutcome {
    /// The executor or component handler ran to completion.
    Completed,
    /// A middleware returned without continuing the chain.
    Halted,
    /// No registry entry or dispatch key matched; the user was told so.
    NotFound,
    /// A handler failed; the user received the generic failure reply.
    Failed(RouteFailure),
    /// A component event named no registered handler.
    Ignored,
}

impl RouteOutcome {
    /// Returns whether the executor or component handler completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns whether the chain was vetoed by a middleware.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        matches!(self, Self::Halted)
    }

    /// Returns whether the event matched nothing registered.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns whether a handler failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns whether a component event was ignored.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Why a handler failed.
#[derive(Debug, Clone, Error)]
pub enum RouteFailure {
    /// A middleware, executor, or component handler returned an error.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// A handler panicked.
    #[error("handler panicked: {0}")]
    Panicked(String),

    /// The handler did not finish within the configured timeout.
    #[error("handler timed out after {after_ms} ms")]
    TimedOut {
        /// Configured timeout.
        after_ms: u64,
    },
}
