//! Shared world state for interaction routing BDD scenarios.

use std::sync::{Arc, Mutex};

use reball::{
    command::adapters::InMemoryRemoteRegistry,
    config::ReballConfig,
    framework::Reball,
    interaction::{
        adapters::RecordingResponder, domain::RouteOutcome, services::Router,
    },
};
use rstest::fixture;

/// Ordered record of handler activity.
pub type ActivityLog = Arc<Mutex<Vec<String>>>;

/// Scenario world for interaction routing behaviour tests.
pub struct RoutingWorld {
    /// Framework collecting declarations.
    pub reball: Reball,
    /// Router built on first dispatch.
    pub router: Option<Router>,
    /// Responder capturing replies.
    pub responder: Arc<RecordingResponder>,
    /// Handler activity in call order.
    pub activity: ActivityLog,
    /// Outcome of the last routed interaction.
    pub last_outcome: Option<RouteOutcome>,
}

impl RoutingWorld {
    /// Creates a world around a production framework.
    ///
    /// # Panics
    ///
    /// Panics if the production configuration is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reball: Reball::new(ReballConfig::new().with_production(true))
                .expect("production configuration is valid"),
            router: None,
            responder: Arc::new(RecordingResponder::new()),
            activity: Arc::new(Mutex::new(Vec::new())),
            last_outcome: None,
        }
    }

    /// Returns the router, reconciling declarations on first use.
    ///
    /// # Errors
    ///
    /// Returns an error when reconciliation fails.
    pub fn router(&mut self) -> Result<Router, eyre::Report> {
        if let Some(router) = &self.router {
            return Ok(router.clone());
        }
        let remote = Arc::new(InMemoryRemoteRegistry::new());
        let (router, _) = run_async(self.reball.reconcile_all(remote))?;
        self.router = Some(router.clone());
        Ok(router)
    }

    /// Returns a snapshot of the activity log.
    ///
    /// # Errors
    ///
    /// Returns an error when the log lock is poisoned.
    pub fn activity(&self) -> Result<Vec<String>, eyre::Report> {
        self.activity
            .lock()
            .map(|entries| entries.clone())
            .map_err(|err| eyre::eyre!("activity log poisoned: {err}"))
    }
}

impl Default for RoutingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RoutingWorld {
    RoutingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Appends an entry to the activity log, ignoring a poisoned lock.
pub fn record(activity: &ActivityLog, entry: impl Into<String>) {
    if let Ok(mut entries) = activity.lock() {
        entries.push(entry.into());
    }
}
