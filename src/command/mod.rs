//! Command declaration, merging, and remote registration.
//!
//! Declarations are compiled into canonical specs by [`compiler`], folded
//! into composite top-level commands by the [`registry`], and converged onto
//! the remote platform by the reconciler in [`services`]. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod compiler;
pub mod domain;
pub mod ports;
pub mod registry;
pub mod services;
