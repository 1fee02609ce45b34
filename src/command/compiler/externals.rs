//! The trailing `(key=value|key=value)` segment of a shorthand declaration.
//!
//! Recognised keys: `cmd.dsc`, `grp.dsc`, `sub.dsc`, `<option>.dsc`,
//! `<option>.choi`, `cat`, and `guilds`.

use super::CompileDiagnostic;
use crate::command::domain::{Choice, ChoiceValue, CommandSpec};

/// Splits a declaration into its head and the externals segment body.
///
/// The segment starts at the first ` (` that is followed by a `key=` pair
/// and runs to the closing `)` at the end of the input.
pub(super) fn split(text: &str) -> (&str, Option<&str>) {
    let Some(body) = text.strip_suffix(')') else {
        return (text, None);
    };
    for (index, _) in body.match_indices(" (") {
        let (head, rest) = body.split_at(index);
        if let Some(segment) = rest.strip_prefix(" (")
            && starts_with_key(segment)
        {
            return (head.trim_end(), Some(segment));
        }
    }
    (text, None)
}

fn starts_with_key(segment: &str) -> bool {
    segment.split_once('=').is_some_and(|(key, _)| {
        !key.is_empty()
            && key.chars().all(|character| {
                character.is_ascii_alphanumeric() || matches!(character, '_' | '-' | '.')
            })
    })
}

/// Applies every entry of an externals segment to the spec.
pub(super) fn apply(
    spec: &mut CommandSpec,
    segment: &str,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    for entry in segment.split('|').filter(|entry| !entry.trim().is_empty()) {
        let Some((raw_key, raw_value)) = entry.split_once('=') else {
            diagnostics.push(CompileDiagnostic::MalformedExternal(entry.to_owned()));
            continue;
        };
        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "cmd.dsc" => value.clone_into(&mut spec.description),
            "grp.dsc" => spec.group_description = Some(value.to_owned()),
            "sub.dsc" => spec.sub_description = Some(value.to_owned()),
            "cat" => spec.category = Some(value.to_owned()),
            "guilds" => {
                spec.guilds = Some(
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|alias| !alias.is_empty())
                        .map(str::to_owned)
                        .collect(),
                );
            }
            _ => apply_option_external(spec, key, value, diagnostics),
        }
    }
}

fn apply_option_external(
    spec: &mut CommandSpec,
    key: &str,
    value: &str,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    let (option_name, choices) = if let Some(name) = key.strip_suffix(".dsc") {
        (name, false)
    } else if let Some(name) = key.strip_suffix(".choi") {
        (name, true)
    } else {
        diagnostics.push(CompileDiagnostic::MalformedExternal(format!("{key}={value}")));
        return;
    };

    let normalized = option_name.to_ascii_lowercase();
    let Some(option) = spec.option_mut(&normalized) else {
        diagnostics.push(CompileDiagnostic::UnknownExternalTarget {
            key: key.to_owned(),
            option: normalized,
        });
        return;
    };

    if choices {
        option.choices = parse_choices(value);
    } else {
        value.clone_into(&mut option.description);
    }
}

/// Parses `Label:value,Label:value`. A choice without `:` uses its label as
/// the value. Values stay textual until option constraints are enforced.
fn parse_choices(raw: &str) -> Vec<Choice> {
    raw.split(',')
        .map(str::trim)
        .filter(|choice| !choice.is_empty())
        .map(|choice| {
            let (label, value) = choice.split_once(':').unwrap_or((choice, choice));
            Choice::new(label.trim(), ChoiceValue::String(value.trim().to_owned()))
        })
        .collect()
}
