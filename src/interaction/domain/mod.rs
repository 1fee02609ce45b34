//! Interaction domain: inbound events, replies, and routing outcomes.

mod event;
mod outcome;

pub use event::{
    CUSTOM_ID_SEPARATOR, CommandInteraction, ComponentInteraction, Interaction, Reply,
};
pub use outcome::{RouteFailure, RouteOutcome};
