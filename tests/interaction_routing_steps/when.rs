//! When steps for interaction routing BDD scenarios.

use super::world::{RoutingWorld, run_async};
use reball::interaction::domain::{CommandInteraction, ComponentInteraction};
use rstest_bdd_macros::when;

#[when(r#"the "{name}" command is invoked"#)]
fn command_is_invoked(world: &mut RoutingWorld, name: String) -> Result<(), eyre::Report> {
    let router = world.router()?;
    let outcome = run_async(router.route(
        CommandInteraction::chat(name).into(),
        world.responder.clone(),
    ));
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"the component "{custom_id}" is clicked"#)]
fn component_is_clicked(world: &mut RoutingWorld, custom_id: String) -> Result<(), eyre::Report> {
    let router = world.router()?;
    let outcome = run_async(router.route(
        ComponentInteraction::new(custom_id).into(),
        world.responder.clone(),
    ));
    world.last_outcome = Some(outcome);
    Ok(())
}
