//! Then steps for interaction routing BDD scenarios.

use super::world::RoutingWorld;
use reball::config::{DEFAULT_COMMAND_NOT_FOUND, DEFAULT_UNEXPECTED_ERROR};
use reball::interaction::domain::{Reply, RouteOutcome};
use rstest_bdd_macros::then;

fn replies(world: &RoutingWorld) -> Result<Vec<Reply>, eyre::Report> {
    world
        .responder
        .replies()
        .map_err(|err| eyre::eyre!("responder unreadable: {err}"))
}

fn expect_reply(world: &RoutingWorld, expected: &Reply) -> Result<(), eyre::Report> {
    let sent = replies(world)?;
    if !sent.contains(expected) {
        return Err(eyre::eyre!("expected reply {expected:?}, sent {sent:?}"));
    }
    Ok(())
}

#[then(r#"the outcome is "{label}""#)]
fn the_outcome_is(world: &mut RoutingWorld, label: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no interaction routed in scenario world"))?;
    let matches = match label.as_str() {
        "completed" => outcome.is_completed(),
        "not found" => outcome.is_not_found(),
        "halted" => outcome.is_halted(),
        "failed" => outcome.is_failed(),
        "ignored" => outcome.is_ignored(),
        other => return Err(eyre::eyre!("unknown outcome label '{other}'")),
    };
    if !matches {
        return Err(eyre::eyre!("expected outcome '{label}', got {outcome:?}"));
    }
    Ok(())
}

#[then(r#"the reply "{content}" was sent"#)]
fn reply_was_sent(world: &mut RoutingWorld, content: String) -> Result<(), eyre::Report> {
    expect_reply(world, &Reply::public(content))
}

#[then("the not found reply was sent")]
fn not_found_reply_sent(world: &mut RoutingWorld) -> Result<(), eyre::Report> {
    expect_reply(world, &Reply::ephemeral(DEFAULT_COMMAND_NOT_FOUND))
}

#[then("the generic error reply was sent")]
fn generic_reply_sent(world: &mut RoutingWorld) -> Result<(), eyre::Report> {
    expect_reply(world, &Reply::ephemeral(DEFAULT_UNEXPECTED_ERROR))?;
    let leaked = replies(world)?
        .iter()
        .any(|reply| reply.content.contains("offline"));
    if leaked {
        return Err(eyre::eyre!("handler error details leaked into a reply"));
    }
    Ok(())
}

#[then("the middleware ran before the executor")]
fn middleware_before_executor(world: &mut RoutingWorld) -> Result<(), eyre::Report> {
    let activity = world.activity()?;
    if activity != ["middleware", "executor"] {
        return Err(eyre::eyre!("unexpected activity order {activity:?}"));
    }
    Ok(())
}

#[then("no executor ran")]
fn no_executor_ran(world: &mut RoutingWorld) -> Result<(), eyre::Report> {
    let activity = world.activity()?;
    if activity.iter().any(|entry| entry == "executor") {
        return Err(eyre::eyre!("expected the executor to be skipped, got {activity:?}"));
    }
    Ok(())
}

#[then(r#"the component received the argument "{argument}""#)]
fn component_received(world: &mut RoutingWorld, argument: String) -> Result<(), eyre::Report> {
    let activity = world.activity()?;
    let expected = format!("argument {argument}");
    if !activity.contains(&expected) {
        return Err(eyre::eyre!("expected '{expected}', got {activity:?}"));
    }
    if matches!(world.last_outcome, Some(RouteOutcome::Ignored)) {
        return Err(eyre::eyre!("component click was ignored"));
    }
    Ok(())
}
