//! Reconciliation tests: remote convergence, pruning, and guild aliasing.

use std::sync::Arc;

use super::helpers::{
    Calls, HOME_GUILD, LAB_GUILD, calls, development, labelled, production, remote,
};
use reball::command::adapters::InMemoryRemoteRegistry;
use reball::command::domain::{
    CommandKind, CommandPayload, GuildId, RegistrationKey, RemoteCommand, RemoteCommandId,
    RemoteOperation, RemoteScope,
};
use reball::command::services::ReconcileError;
use reball::framework::Reball;
use rstest::rstest;

fn home() -> RemoteScope {
    RemoteScope::Guild(GuildId::new(HOME_GUILD))
}

fn lab() -> RemoteScope {
    RemoteScope::Guild(GuildId::new(LAB_GUILD))
}

fn names(remote: &InMemoryRemoteRegistry, scope: &RemoteScope) -> Vec<String> {
    remote
        .commands(scope)
        .expect("remote state readable")
        .into_iter()
        .map(|command| command.name)
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_pass_is_a_noop(
    mut production: Reball,
    remote: Arc<InMemoryRemoteRegistry>,
    calls: Calls,
) {
    production
        .attach("/ban <user:user> [reason:string:max=200]", [], labelled(&calls, "ban"))
        .expect("ban");
    production
        .attach("/role:add <user:user>", [], labelled(&calls, "add"))
        .expect("role add");
    production
        .attach("/role:perm:grant <user:user>", [], labelled(&calls, "grant"))
        .expect("role perm grant");
    production
        .attach("m/[Quote Message]", [], labelled(&calls, "quote"))
        .expect("quote");

    let (_, first) = production
        .reconcile_all(Arc::clone(&remote))
        .await
        .expect("first pass");
    let (_, second) = production
        .reconcile_all(Arc::clone(&remote))
        .await
        .expect("second pass");

    assert_eq!(first.operations().len(), 3);
    assert!(first.operations().iter().all(RemoteOperation::is_create));
    assert!(second.is_noop(), "{:?}", second.operations());
    assert_eq!(first.key_table(), second.key_table());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn changed_declaration_is_updated_in_place(
    remote: Arc<InMemoryRemoteRegistry>,
    calls: Calls,
) {
    let mut before = production();
    before
        .attach("/ban <user:user>", [], labelled(&calls, "ban"))
        .expect("ban");
    before
        .reconcile_all(Arc::clone(&remote))
        .await
        .expect("first pass");
    let original_id = remote
        .commands(&RemoteScope::Global)
        .expect("remote state readable")
        .first()
        .map(|command| command.id.clone())
        .expect("ban registered");

    let mut after = production();
    after
        .attach("/ban <user:user> [reason:string]", [], labelled(&calls, "ban"))
        .expect("ban with reason");
    let (_, report) = after
        .reconcile_all(Arc::clone(&remote))
        .await
        .expect("second pass");

    assert!(matches!(
        report.operations(),
        [RemoteOperation::Update { id, .. }] if *id == original_id
    ));
    let stored = remote
        .commands(&RemoteScope::Global)
        .expect("remote state readable");
    assert_eq!(stored.first().map(|command| command.options.len()), Some(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undeclared_commands_are_pruned_from_every_scope(
    mut production: Reball,
    remote: Arc<InMemoryRemoteRegistry>,
    calls: Calls,
) {
    let stale = |name: &str| CommandPayload {
        name: name.to_owned(),
        kind: CommandKind::Chat,
        description: "stale".to_owned(),
        nsfw: false,
        options: Vec::new(),
    };
    remote
        .seed(
            RemoteScope::Global,
            RemoteCommand::from_payload(RemoteCommandId::new("g-1"), &stale("stale")),
        )
        .expect("seed global");
    remote
        .seed(
            home(),
            RemoteCommand::from_payload(RemoteCommandId::new("h-1"), &stale("old-tag")),
        )
        .expect("seed home");
    production
        .attach("/tag (guilds=home)", [], labelled(&calls, "tag"))
        .expect("tag");

    let (_, report) = production
        .reconcile_all(Arc::clone(&remote))
        .await
        .expect("pass succeeds");

    let deleted: Vec<_> = report
        .operations()
        .iter()
        .filter(|operation| operation.is_delete())
        .map(RemoteOperation::name)
        .collect();
    assert_eq!(deleted, ["stale", "old-tag"]);
    assert!(names(&remote, &RemoteScope::Global).is_empty());
    assert_eq!(names(&remote, &home()), ["tag"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn guild_shared_command_is_created_once(
    mut production: Reball,
    remote: Arc<InMemoryRemoteRegistry>,
    calls: Calls,
) {
    production
        .attach("/tag (guilds=home,lab)", [], labelled(&calls, "tag"))
        .expect("tag");

    let (router, report) = production
        .reconcile_all(Arc::clone(&remote))
        .await
        .expect("pass succeeds");

    assert_eq!(report.operations().len(), 1);
    assert_eq!(names(&remote, &home()), ["tag"]);
    assert!(names(&remote, &lab()).is_empty());
    let home_owner = router
        .key_table()
        .get(&RegistrationKey::new(home(), CommandKind::Chat, "tag"));
    let lab_owner = router
        .key_table()
        .get(&RegistrationKey::new(lab(), CommandKind::Chat, "tag"));
    assert!(home_owner.is_some());
    assert_eq!(home_owner, lab_owner);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn development_mode_registers_in_dev_guild(
    mut development: Reball,
    remote: Arc<InMemoryRemoteRegistry>,
    calls: Calls,
) {
    development
        .attach("/ping", [], labelled(&calls, "ping"))
        .expect("ping");
    development
        .attach("/about -global", [], labelled(&calls, "about"))
        .expect("about");

    development
        .reconcile_all(Arc::clone(&remote))
        .await
        .expect("pass succeeds");

    assert_eq!(names(&remote, &home()), ["ping"]);
    assert_eq!(names(&remote, &RemoteScope::Global), ["about"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_guild_alias_fails_before_remote_calls(
    mut production: Reball,
    remote: Arc<InMemoryRemoteRegistry>,
    calls: Calls,
) {
    production
        .attach("/ping", [], labelled(&calls, "ping"))
        .expect("ping");
    production
        .attach("/tag (guilds=staging)", [], labelled(&calls, "tag"))
        .expect("tag");

    let err = production
        .reconcile_all(Arc::clone(&remote))
        .await
        .expect_err("unknown alias should fail");

    assert!(matches!(
        err,
        ReconcileError::UnknownGuildAlias { ref alias, .. } if alias == "staging"
    ));
    assert!(remote.fetches().expect("fetch log readable").is_empty());
    assert!(remote.operations().expect("operation log readable").is_empty());
}
