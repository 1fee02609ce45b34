//! Given steps for interaction routing BDD scenarios.

use std::sync::Arc;

use super::world::{RoutingWorld, record};
use eyre::WrapErr;
use reball::interaction::{
    domain::Reply,
    handler::{HandlerError, component_fn, executor_fn, middleware_fn},
};
use rstest_bdd_macros::given;

#[given("a routed framework")]
fn a_routed_framework(world: &mut RoutingWorld) {
    *world = RoutingWorld::new();
}

#[given("a routed framework with a logging middleware")]
fn a_routed_framework_with_logging(world: &mut RoutingWorld) {
    *world = RoutingWorld::new();
    let activity = Arc::clone(&world.activity);
    world.reball.use_middleware(middleware_fn(move |ctx, next| {
        let activity = Arc::clone(&activity);
        async move {
            record(&activity, "middleware");
            next.run(ctx).await
        }
    }));
}

#[given(r#"the executor for "{declaration}" replies "{content}""#)]
fn executor_replies(
    world: &mut RoutingWorld,
    declaration: String,
    content: String,
) -> Result<(), eyre::Report> {
    let activity = Arc::clone(&world.activity);
    let executor = executor_fn(move |ctx| {
        let activity = Arc::clone(&activity);
        let content = content.clone();
        async move {
            record(&activity, "executor");
            ctx.reply(Reply::public(content)).await
        }
    });
    world
        .reball
        .attach(declaration, [], executor)
        .wrap_err("declare replying command")?;
    Ok(())
}

#[given(r#"the executor for "{declaration}" is guarded by a vetoing middleware"#)]
fn executor_guarded(world: &mut RoutingWorld, declaration: String) -> Result<(), eyre::Report> {
    let activity = Arc::clone(&world.activity);
    let executor = executor_fn(move |_ctx| {
        let activity = Arc::clone(&activity);
        async move {
            record(&activity, "executor");
            Ok(())
        }
    });
    let veto = middleware_fn(|ctx, _next| async move {
        ctx.reply(Reply::ephemeral("You lack the required role.")).await
    });
    world
        .reball
        .attach(declaration, [veto], executor)
        .wrap_err("declare guarded command")?;
    Ok(())
}

#[given(r#"the executor for "{declaration}" fails"#)]
fn executor_fails(world: &mut RoutingWorld, declaration: String) -> Result<(), eyre::Report> {
    let executor =
        executor_fn(|_ctx| async { Err(HandlerError::message("statistics backend offline")) });
    world
        .reball
        .attach(declaration, [], executor)
        .wrap_err("declare failing command")?;
    Ok(())
}

#[given(r#"a component handler named "{name}""#)]
fn a_component_handler(world: &mut RoutingWorld, name: String) {
    let activity = Arc::clone(&world.activity);
    world.reball.click(
        name,
        component_fn(move |ctx| {
            let activity = Arc::clone(&activity);
            async move {
                for argument in ctx.arguments() {
                    record(&activity, format!("argument {argument}"));
                }
                Ok(())
            }
        }),
    );
}
