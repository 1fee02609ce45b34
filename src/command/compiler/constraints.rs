//! Option constraints enforced after parsing and overlaying.

use std::collections::HashSet;

use super::{CompileDiagnostic, shorthand};
use crate::command::domain::{
    ChoiceValue, CommandKind, CommandOptionSpec, CommandSpec, MAX_CHOICES, OptionType,
};

/// Normalises a compiled spec and records invariant violations.
pub(super) fn enforce(spec: &mut CommandSpec, diagnostics: &mut Vec<CompileDiagnostic>) {
    let has_errors = diagnostics.iter().any(CompileDiagnostic::is_error);
    if spec.name.is_empty() && !has_errors {
        diagnostics.push(CompileDiagnostic::InvalidName(String::new()));
    }
    if !spec.name.is_empty() {
        let valid = match spec.kind {
            CommandKind::Chat => shorthand::is_valid_name(&spec.name),
            CommandKind::User | CommandKind::Message => {
                shorthand::is_valid_display_name(&spec.name)
            }
        };
        if !valid {
            diagnostics.push(CompileDiagnostic::InvalidName(spec.name.clone()));
        }
    }

    if spec.kind != CommandKind::Chat {
        if !spec.options.is_empty() {
            diagnostics.push(CompileDiagnostic::OptionsOnContextMenu(spec.name.clone()));
            spec.options.clear();
        }
        spec.group_name = None;
        spec.sub_name = None;
        return;
    }

    for marker in [&spec.group_name, &spec.sub_name].into_iter().flatten() {
        if !shorthand::is_valid_name(marker) {
            diagnostics.push(CompileDiagnostic::InvalidName(marker.clone()));
        }
    }
    if let (Some(group), None) = (&spec.group_name, &spec.sub_name) {
        diagnostics.push(CompileDiagnostic::GroupWithoutSubcommand(group.clone()));
    }

    let mut seen = HashSet::new();
    for option in &mut spec.options {
        if !seen.insert(option.name.clone()) {
            diagnostics.push(CompileDiagnostic::DuplicateOption(option.name.clone()));
        }
        enforce_option(option, diagnostics);
    }
}

fn enforce_option(option: &mut CommandOptionSpec, diagnostics: &mut Vec<CompileDiagnostic>) {
    if option.is_structural() {
        for child in &mut option.options {
            enforce_option(child, diagnostics);
        }
        return;
    }

    let option_type = option.option_type;
    option.options.clear();
    if !option_type.supports_choices() {
        option.autocomplete = false;
    }
    if option_type != OptionType::String {
        option.min_length = None;
        option.max_length = None;
    }
    if !option_type.supports_value_bounds() {
        option.min_value = None;
        option.max_value = None;
    }
    if option_type != OptionType::Channel {
        option.channel_types.clear();
    }

    if !option.choices.is_empty() {
        if let Err(reason) = coerce_choices(option) {
            diagnostics.push(CompileDiagnostic::ChoicesRejected {
                option: option.name.clone(),
                reason,
            });
            option.choices.clear();
        }
    }
}

fn coerce_choices(option: &mut CommandOptionSpec) -> Result<(), String> {
    let option_type = option.option_type;
    if !option_type.supports_choices() {
        return Err(format!("type {} does not accept choices", option_type.code()));
    }
    if option.autocomplete {
        return Err("autocomplete options cannot declare choices".to_owned());
    }
    if option.choices.len() > MAX_CHOICES {
        return Err(format!("more than {MAX_CHOICES} choices"));
    }

    for choice in &mut option.choices {
        let coerced = match (&choice.value, option_type) {
            (ChoiceValue::Number(number), OptionType::String) => {
                ChoiceValue::String(number.to_string())
            }
            (ChoiceValue::String(text), OptionType::Integer | OptionType::Number) => {
                shorthand::parse_number(text, option_type)
                    .map(ChoiceValue::Number)
                    .ok_or_else(|| format!("choice '{}' is not numeric", choice.name))?
            }
            _ => continue,
        };
        choice.value = coerced;
    }
    Ok(())
}
