//! Shared world state for command lifecycle BDD scenarios.

use std::sync::Arc;

use reball::{
    command::{
        adapters::InMemoryRemoteRegistry,
        services::{ReconcileError, ReconcileReport},
    },
    config::ReballConfig,
    framework::Reball,
    interaction::handler::{Executor, executor_fn},
};
use rstest::fixture;

/// Scenario world for command lifecycle behaviour tests.
pub struct LifecycleWorld {
    /// Framework under test.
    pub reball: Reball,
    /// Remote registry shared across reconciliation passes.
    pub remote: Arc<InMemoryRemoteRegistry>,
    /// Result of the most recent reconciliation pass.
    pub last_result: Option<Result<ReconcileReport, ReconcileError>>,
}

impl LifecycleWorld {
    /// Creates a world around a production framework.
    ///
    /// # Panics
    ///
    /// Panics if the default production configuration is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ReballConfig::new().with_production(true))
            .expect("production configuration is valid")
    }

    /// Creates a world around the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is rejected.
    pub fn with_config(config: ReballConfig) -> Result<Self, eyre::Report> {
        Ok(Self {
            reball: Reball::new(config)?,
            remote: Arc::new(InMemoryRemoteRegistry::new()),
            last_result: None,
        })
    }

    /// Returns the last successful report.
    ///
    /// # Errors
    ///
    /// Returns an error when no pass ran or the last pass failed.
    pub fn last_report(&self) -> Result<&ReconcileReport, eyre::Report> {
        match &self.last_result {
            Some(Ok(report)) => Ok(report),
            Some(Err(err)) => Err(eyre::eyre!("reconciliation failed: {err}")),
            None => Err(eyre::eyre!("no reconciliation pass ran in scenario world")),
        }
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Executor that does nothing.
pub fn noop_executor() -> Arc<dyn Executor> {
    executor_fn(|_ctx| async { Ok(()) })
}
