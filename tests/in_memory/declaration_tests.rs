//! Declaration tests: compilation and merging through the facade.

use super::helpers::{Calls, calls, labelled, production};
use reball::command::compiler::{Declaration, StructuredCommand};
use reball::command::domain::{CommandKind, DispatchKey, OptionType};
use reball::framework::{DeclarationError, Reball};
use rstest::rstest;

#[rstest]
fn ban_example_compiles_to_two_options() {
    let spec = Reball::compile("/ban <user:user> [reason:string:max=200]")
        .into_spec()
        .expect("ban compiles");

    assert_eq!(spec.name, "ban");
    assert_eq!(spec.kind, CommandKind::Chat);
    let options: Vec<_> = spec
        .options
        .iter()
        .map(|option| (option.name.as_str(), option.option_type, option.required))
        .collect();
    assert_eq!(
        options,
        [
            ("user", OptionType::User, true),
            ("reason", OptionType::String, false)
        ]
    );
    assert_eq!(
        spec.options.get(1).and_then(|option| option.max_length),
        Some(200)
    );
}

#[rstest]
fn role_subcommands_merge_into_one_entry(mut production: Reball, calls: Calls) {
    production
        .attach("/role:add <user:user> <role:role>", [], labelled(&calls, "add"))
        .expect("role add");
    production
        .attach("/role:remove <user:user> <role:role>", [], labelled(&calls, "remove"))
        .expect("role remove");

    assert_eq!(production.registry().len(), 1);
    let entry = production.registry().entries().next().expect("role entry");
    let subcommands: Vec<_> = entry
        .spec()
        .options
        .iter()
        .map(|option| (option.name.as_str(), option.option_type, option.options.len()))
        .collect();
    assert_eq!(
        subcommands,
        [
            ("add", OptionType::Subcommand, 2),
            ("remove", OptionType::Subcommand, 2)
        ]
    );
    let keys: Vec<_> = entry.dispatch_keys().cloned().collect();
    assert_eq!(
        keys,
        [
            DispatchKey::Sub("add".to_owned()),
            DispatchKey::Sub("remove".to_owned())
        ]
    );
}

#[rstest]
fn layered_declaration_refines_shorthand(mut production: Reball, calls: Calls) {
    let overlay: StructuredCommand = serde_json::from_value(serde_json::json!({
        "description": "Remove a member",
        "options": [{ "name": "reason", "description": "Shown in the audit log" }]
    }))
    .expect("overlay deserializes");

    production
        .attach(
            Declaration::layered("/kick <user:user> [reason:string]", overlay),
            [],
            labelled(&calls, "kick"),
        )
        .expect("kick");

    let entry = production.registry().entries().next().expect("kick entry");
    assert_eq!(entry.spec().description, "Remove a member");
    let reason = entry.spec().options.get(1).expect("reason option");
    assert_eq!(reason.description, "Shown in the audit log");
    assert_eq!(reason.option_type, OptionType::String);
}

#[rstest]
fn malformed_declaration_is_rejected(mut production: Reball, calls: Calls) {
    let err = production
        .attach("ban <user:user>", [], labelled(&calls, "ban"))
        .expect_err("missing slash should fail");

    assert!(matches!(err, DeclarationError::Compile(_)));
    assert!(production.registry().is_empty());
}
