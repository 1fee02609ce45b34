//! Shared test helpers for in-memory integration tests.

use std::sync::{Arc, Mutex};

use reball::{
    command::adapters::InMemoryRemoteRegistry,
    config::ReballConfig,
    framework::Reball,
    interaction::{
        adapters::RecordingResponder,
        domain::Reply,
        handler::{Executor, executor_fn},
    },
};
use rstest::fixture;

/// Ordered record of executor activity.
pub type Calls = Arc<Mutex<Vec<String>>>;

/// Guild identifier configured for the `home` alias.
pub const HOME_GUILD: &str = "111";

/// Guild identifier configured for the `lab` alias.
pub const LAB_GUILD: &str = "222";

/// Provides a fresh in-memory remote registry for each test.
#[fixture]
pub fn remote() -> Arc<InMemoryRemoteRegistry> {
    Arc::new(InMemoryRemoteRegistry::new())
}

/// Provides a recording responder.
#[fixture]
pub fn responder() -> Arc<RecordingResponder> {
    Arc::new(RecordingResponder::new())
}

/// Provides an empty call log.
#[fixture]
pub fn calls() -> Calls {
    Arc::new(Mutex::new(Vec::new()))
}

/// Configuration with `home` and `lab` guild aliases.
#[must_use]
pub fn guild_config() -> ReballConfig {
    ReballConfig::new()
        .with_guild("home", HOME_GUILD)
        .with_guild("lab", LAB_GUILD)
}

/// Provides a production framework with guild aliases.
///
/// # Panics
///
/// Panics if the configuration is rejected.
#[fixture]
pub fn production() -> Reball {
    Reball::new(guild_config().with_production(true)).expect("valid configuration")
}

/// Provides a development framework targeting the `home` guild.
///
/// # Panics
///
/// Panics if the configuration is rejected.
#[fixture]
pub fn development() -> Reball {
    Reball::new(guild_config().with_dev_guild("home")).expect("valid configuration")
}

/// Executor that records `label` and replies with it.
#[must_use]
pub fn labelled(calls: &Calls, label: &'static str) -> Arc<dyn Executor> {
    let calls = Arc::clone(calls);
    executor_fn(move |ctx| {
        let calls = Arc::clone(&calls);
        async move {
            calls.lock().expect("call log lock").push(label.to_owned());
            ctx.reply(Reply::public(label)).await
        }
    })
}

/// Returns the recorded calls.
///
/// # Panics
///
/// Panics if the call log lock is poisoned.
#[must_use]
pub fn recorded(calls: &Calls) -> Vec<String> {
    calls.lock().expect("call log lock").clone()
}
