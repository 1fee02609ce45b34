//! Reball: command declaration, registration reconciliation, and interaction
//! routing for chat-platform bots.
//!
//! Commands are declared through a compact shorthand DSL or structured
//! objects, merged into composite remote definitions, reconciled against the
//! commands already registered with the platform, and routed to executors
//! through an ordered middleware chain.
//!
//! # Architecture
//!
//! Reball follows hexagonal architecture principles:
//!
//! - **Domain**: Pure command and interaction models with no I/O
//! - **Ports**: Async trait interfaces to the remote registry and responders
//! - **Adapters**: In-memory implementations of the ports
//!
//! # Modules
//!
//! - [`command`]: Declaration compiler, executor registry, and reconciliation
//! - [`interaction`]: Handler contracts and the interaction router
//! - [`config`]: Framework configuration
//! - [`framework`]: The [`framework::Reball`] facade tying them together

pub mod command;
pub mod config;
pub mod framework;
pub mod interaction;
