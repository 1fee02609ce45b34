//! Routing tests: end-to-end dispatch after reconciliation.

use std::sync::Arc;

use super::helpers::{
    Calls, HOME_GUILD, calls, guild_config, labelled, production, recorded, remote, responder,
};
use reball::command::adapters::InMemoryRemoteRegistry;
use reball::command::domain::{CommandKind, GuildId};
use reball::config::{Messages, ReballConfig};
use reball::framework::Reball;
use reball::interaction::{
    adapters::RecordingResponder,
    domain::{CommandInteraction, Reply, RouteOutcome},
    handler::middleware_fn,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_dispatch_key_reaches_its_executor(
    mut production: Reball,
    remote: Arc<InMemoryRemoteRegistry>,
    responder: Arc<RecordingResponder>,
    calls: Calls,
) {
    production
        .attach("/role:add <user:user>", [], labelled(&calls, "add"))
        .expect("role add");
    production
        .attach("/role:remove <user:user>", [], labelled(&calls, "remove"))
        .expect("role remove");
    production
        .attach("/role:perm:grant <user:user>", [], labelled(&calls, "grant"))
        .expect("role perm grant");
    production
        .attach("u/[Inspect]", [], labelled(&calls, "inspect"))
        .expect("inspect");
    let (router, _) = production.reconcile_all(remote).await.expect("reconciled");

    let events = [
        CommandInteraction::chat("role").with_subcommand("remove"),
        CommandInteraction::chat("role").with_group("perm", "grant"),
        CommandInteraction::chat("role").with_subcommand("add"),
        CommandInteraction::new("Inspect", CommandKind::User),
    ];
    for event in events {
        let outcome = router.route(event.into(), responder.clone()).await;
        assert!(outcome.is_completed(), "{outcome:?}");
    }

    assert_eq!(recorded(&calls), ["remove", "grant", "add", "inspect"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guild_events_prefer_guild_registration(
    remote: Arc<InMemoryRemoteRegistry>,
    responder: Arc<RecordingResponder>,
    calls: Calls,
) {
    let mut reball = Reball::new(guild_config().with_production(true)).expect("valid config");
    reball
        .attach("/ping", [], labelled(&calls, "global ping"))
        .expect("global ping");
    reball
        .attach("/ping (guilds=home)", [], labelled(&calls, "home ping"))
        .expect("home ping");
    let (router, _) = reball.reconcile_all(remote).await.expect("reconciled");

    router
        .route(
            CommandInteraction::chat("ping")
                .in_guild(GuildId::new(HOME_GUILD))
                .into(),
            responder.clone(),
        )
        .await;
    router
        .route(
            CommandInteraction::chat("ping")
                .in_guild(GuildId::new("999"))
                .into(),
            responder.clone(),
        )
        .await;
    router
        .route(CommandInteraction::chat("ping").into(), responder.clone())
        .await;

    assert_eq!(
        recorded(&calls),
        ["home ping", "global ping", "global ping"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_command_gets_configured_not_found_reply(
    remote: Arc<InMemoryRemoteRegistry>,
    responder: Arc<RecordingResponder>,
) {
    let config = ReballConfig::new().with_production(true).with_messages(Messages {
        command_not_found: "That command has been retired.".to_owned(),
        ..Messages::default()
    });
    let reball = Reball::new(config).expect("valid config");
    let (router, _) = reball.reconcile_all(remote).await.expect("reconciled");

    let outcome = router
        .route(CommandInteraction::chat("ghost").into(), responder.clone())
        .await;

    assert!(matches!(outcome, RouteOutcome::NotFound));
    assert_eq!(
        responder.replies().expect("replies readable"),
        [Reply::ephemeral("That command has been retired.")]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn process_middleware_can_veto_every_command(
    mut production: Reball,
    remote: Arc<InMemoryRemoteRegistry>,
    responder: Arc<RecordingResponder>,
    calls: Calls,
) {
    production.use_middleware(middleware_fn(|ctx, next| async move {
        if ctx.interaction().user_id.as_deref() == Some("banned-user") {
            return ctx.reply(Reply::ephemeral("You are blocked.")).await;
        }
        next.run(ctx).await
    }));
    production
        .attach("/ping", [], labelled(&calls, "ping"))
        .expect("ping");
    let (router, _) = production.reconcile_all(remote).await.expect("reconciled");

    let blocked = router
        .route(
            CommandInteraction::chat("ping").with_user("banned-user").into(),
            responder.clone(),
        )
        .await;
    let allowed = router
        .route(
            CommandInteraction::chat("ping").with_user("regular-user").into(),
            responder.clone(),
        )
        .await;

    assert!(matches!(blocked, RouteOutcome::Halted));
    assert!(matches!(allowed, RouteOutcome::Completed));
    assert_eq!(recorded(&calls), ["ping"]);
}
