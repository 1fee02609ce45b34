//! Orchestration services for command registration.

mod normalize;
mod reconciler;

pub use normalize::{normalize, payload_matches};
pub use reconciler::{ReconcileError, ReconcileReport, ReconcileResult, Reconciler};
