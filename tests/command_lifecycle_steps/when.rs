//! When steps for command lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

fn reconcile(world: &mut LifecycleWorld) {
    let result = run_async(world.reball.reconcile_all(world.remote.clone()));
    world.last_result = Some(result.map(|(_, report)| report));
}

#[when("commands are reconciled")]
fn commands_are_reconciled(world: &mut LifecycleWorld) {
    reconcile(world);
}

#[when("commands are reconciled again")]
fn commands_are_reconciled_again(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    world.last_report().wrap_err("first pass must succeed")?;
    reconcile(world);
    Ok(())
}
