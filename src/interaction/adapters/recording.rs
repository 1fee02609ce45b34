//! In-memory responder that records every reply.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::interaction::{
    domain::Reply,
    ports::{InteractionResponder, ResponderError, ResponderResult},
};

/// Thread-safe responder that keeps replies for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingResponder {
    replies: Arc<RwLock<Vec<Reply>>>,
}

impl RecordingResponder {
    /// Creates an empty responder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every reply sent so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ResponderError::Delivery`] when the reply log lock is
    /// poisoned.
    pub fn replies(&self) -> ResponderResult<Vec<Reply>> {
        let replies = self
            .replies
            .read()
            .map_err(|err| ResponderError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(replies.clone())
    }
}

#[async_trait]
impl InteractionResponder for RecordingResponder {
    async fn reply(&self, reply: Reply) -> ResponderResult<()> {
        let mut replies = self
            .replies
            .write()
            .map_err(|err| ResponderError::delivery(std::io::Error::other(err.to_string())))?;
        replies.push(reply);
        Ok(())
    }
}
