//! Inbound interaction routing.
//!
//! Command events resolve through the key mapping table to a registry entry
//! and run the process-wide middleware, then the command's own middleware,
//! then the executor. Component events select a handler by custom id prefix.
//! Failures never escape the router: users get a generic reply and operators
//! get the full error in the logs.
//!
//! - Domain types in [`domain`]
//! - Handler contracts in [`handler`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod handler;
pub mod ports;
pub mod services;
