//! Port contracts for the interaction layer.

mod responder;

pub use responder::{InteractionResponder, ResponderError, ResponderResult};
