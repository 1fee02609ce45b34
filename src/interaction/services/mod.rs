//! Orchestration services for inbound interactions.

mod router;

pub use router::Router;
