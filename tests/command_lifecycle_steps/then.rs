//! Then steps for command lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use reball::command::domain::{GuildId, RemoteCommand, RemoteScope};
use reball::command::services::ReconcileError;
use rstest_bdd_macros::then;
use serde_json::Value;

fn stored(
    world: &LifecycleWorld,
    scope: &RemoteScope,
) -> Result<Vec<RemoteCommand>, eyre::Report> {
    world
        .remote
        .commands(scope)
        .map_err(|err| eyre::eyre!("remote registry unreadable: {err}"))
}

#[then("the remote registry holds {count:usize} global commands")]
fn remote_holds_global(world: &mut LifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    world.last_report()?;
    let commands = stored(world, &RemoteScope::Global)?;
    if commands.len() != count {
        return Err(eyre::eyre!(
            "expected {count} global commands, found {}",
            commands.len()
        ));
    }
    Ok(())
}

#[then(r#"the global command "{name}" has {count:usize} subcommands"#)]
fn global_command_has_subcommands(
    world: &mut LifecycleWorld,
    name: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let commands = stored(world, &RemoteScope::Global)?;
    let command = commands
        .iter()
        .find(|command| command.name == name)
        .ok_or_else(|| eyre::eyre!("expected global command '{name}'"))?;
    let subcommands = command
        .options
        .iter()
        .filter(|option| option.get("type") == Some(&Value::from(1)))
        .count();
    if subcommands != count {
        return Err(eyre::eyre!(
            "expected {count} subcommands of '{name}', found {subcommands}"
        ));
    }
    Ok(())
}

#[then(r#"the global command "{name}" is absent"#)]
fn global_command_absent(world: &mut LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let commands = stored(world, &RemoteScope::Global)?;
    if commands.iter().any(|command| command.name == name) {
        return Err(eyre::eyre!("expected '{name}' to be pruned"));
    }
    Ok(())
}

#[then("the last reconciliation issued {count:usize} operations")]
fn last_pass_issued(world: &mut LifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let report = world.last_report()?;
    if report.operations().len() != count {
        return Err(eyre::eyre!(
            "expected {count} operations, found {:?}",
            report.operations()
        ));
    }
    Ok(())
}

#[then(r#"guild "{alias}" holds {count:usize} commands"#)]
fn guild_holds(
    world: &mut LifecycleWorld,
    alias: String,
    count: usize,
) -> Result<(), eyre::Report> {
    world.last_report()?;
    let guild_id = world
        .reball
        .config()
        .guild_directory()
        .resolve(&alias)
        .ok_or_else(|| eyre::eyre!("guild alias '{alias}' is not configured"))?;
    let commands = stored(world, &RemoteScope::Guild(guild_id))?;
    if commands.len() != count {
        return Err(eyre::eyre!(
            "expected {count} commands in guild '{alias}', found {}",
            commands.len()
        ));
    }
    Ok(())
}

#[then("the key table maps {count:usize} registrations")]
fn key_table_maps(world: &mut LifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let report = world.last_report()?;
    if report.key_table().len() != count {
        return Err(eyre::eyre!(
            "expected {count} registrations, found {}",
            report.key_table().len()
        ));
    }
    let shared = GuildId::new("200");
    if report
        .key_table()
        .iter()
        .all(|(registration, _)| registration.scope.guild_id() != Some(&shared))
    {
        return Err(eyre::eyre!("expected an alias registration for guild 200"));
    }
    Ok(())
}

#[then("reconciliation fails with an unknown guild alias error")]
fn fails_with_unknown_alias(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    match &world.last_result {
        Some(Err(ReconcileError::UnknownGuildAlias { .. })) => Ok(()),
        other => Err(eyre::eyre!("expected unknown guild alias error, got {other:?}")),
    }
}

#[then("the remote registry was never fetched")]
fn never_fetched(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let fetches = world
        .remote
        .fetches()
        .map_err(|err| eyre::eyre!("remote registry unreadable: {err}"))?;
    if !fetches.is_empty() {
        return Err(eyre::eyre!("expected no fetches, found {fetches:?}"));
    }
    Ok(())
}
