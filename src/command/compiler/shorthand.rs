//! Single-pass parser for the shorthand declaration grammar.
//!
//! ```text
//! /name[:group[:sub]|:sub] (<opt:type[:mod]*> | [opt:type[:mod]*])* (-flag)* [(key=value|...)]
//! u/[Display Name] (-flag)* [(key=value|...)]
//! m/[Display Name] (-flag)* [(key=value|...)]
//! ```

use serde_json::Number;

use super::{CompileDiagnostic, externals};
use crate::command::domain::{
    ChannelKind, CommandKind, CommandOptionSpec, CommandSpec, MAX_NAME_LENGTH, OptionType,
};

#[derive(Debug, Clone, Copy)]
enum Bound {
    Min,
    Max,
}

/// Parses shorthand text into a best-effort spec.
pub(super) fn parse(text: &str, diagnostics: &mut Vec<CompileDiagnostic>) -> CommandSpec {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        diagnostics.push(CompileDiagnostic::EmptyDeclaration);
        return CommandSpec::new("", CommandKind::Chat);
    }

    let (head, externals_segment) = externals::split(trimmed);
    let mut spec = if let Some(rest) = head.strip_prefix("u/") {
        parse_context_menu(CommandKind::User, head, rest, diagnostics)
    } else if let Some(rest) = head.strip_prefix("m/") {
        parse_context_menu(CommandKind::Message, head, rest, diagnostics)
    } else {
        parse_chat(head, diagnostics)
    };

    if let Some(segment) = externals_segment {
        externals::apply(&mut spec, segment, diagnostics);
    }
    spec
}

fn parse_chat(head: &str, diagnostics: &mut Vec<CompileDiagnostic>) -> CommandSpec {
    let mut tokens = head.split_whitespace();
    let mut spec = CommandSpec::new("", CommandKind::Chat);
    let Some(path) = tokens.next() else {
        diagnostics.push(CompileDiagnostic::EmptyDeclaration);
        return spec;
    };

    let Some(segments) = parse_path(path, diagnostics) else {
        return spec;
    };
    match segments.as_slice() {
        [name] => spec.name.clone_from(name),
        [name, sub] => {
            spec.name.clone_from(name);
            spec.sub_name = Some(sub.clone());
        }
        [name, group, sub] => {
            spec.name.clone_from(name);
            spec.group_name = Some(group.clone());
            spec.sub_name = Some(sub.clone());
        }
        _ => {}
    }

    for token in tokens {
        if token.starts_with('<') || token.starts_with('[') {
            if let Some(option) = parse_option(token, diagnostics) {
                spec.options.push(option);
            }
        } else if let Some(flag) = token.strip_prefix('-') {
            apply_flag(&mut spec, flag, diagnostics);
        } else {
            diagnostics.push(CompileDiagnostic::UnexpectedToken(token.to_owned()));
        }
    }
    spec
}

fn parse_path(path: &str, diagnostics: &mut Vec<CompileDiagnostic>) -> Option<Vec<String>> {
    let Some(body) = path.strip_prefix('/') else {
        diagnostics.push(CompileDiagnostic::MissingLeadingSlash(path.to_owned()));
        return None;
    };

    let segments: Vec<&str> = body.split(':').collect();
    if segments.len() > 3 {
        diagnostics.push(CompileDiagnostic::TooManyPathSegments(path.to_owned()));
        return None;
    }
    if let Some(invalid) = segments.iter().find(|segment| !is_valid_name(segment)) {
        diagnostics.push(CompileDiagnostic::InvalidName((*invalid).to_owned()));
        return None;
    }
    Some(
        segments
            .into_iter()
            .map(str::to_ascii_lowercase)
            .collect(),
    )
}

fn parse_context_menu(
    kind: CommandKind,
    head: &str,
    rest: &str,
    diagnostics: &mut Vec<CompileDiagnostic>,
) -> CommandSpec {
    let mut spec = CommandSpec::new("", kind);
    let Some((name, trailing)) = rest
        .strip_prefix('[')
        .and_then(|bracketed| bracketed.split_once(']'))
    else {
        diagnostics.push(CompileDiagnostic::MalformedContextMenu(head.to_owned()));
        return spec;
    };

    let display_name = name.trim();
    if !is_valid_display_name(display_name) {
        diagnostics.push(CompileDiagnostic::InvalidName(display_name.to_owned()));
        return spec;
    }
    display_name.clone_into(&mut spec.name);

    for token in trailing.split_whitespace() {
        match token.strip_prefix('-') {
            Some(flag) => apply_flag(&mut spec, flag, diagnostics),
            None => diagnostics.push(CompileDiagnostic::UnexpectedToken(token.to_owned())),
        }
    }
    spec
}

fn parse_option(
    token: &str,
    diagnostics: &mut Vec<CompileDiagnostic>,
) -> Option<CommandOptionSpec> {
    let bracketed = token
        .strip_prefix('<')
        .and_then(|inner| inner.strip_suffix('>'))
        .map(|inner| (true, inner))
        .or_else(|| {
            token
                .strip_prefix('[')
                .and_then(|inner| inner.strip_suffix(']'))
                .map(|inner| (false, inner))
        });
    let Some((required, inner)) = bracketed else {
        diagnostics.push(CompileDiagnostic::MalformedOption(token.to_owned()));
        return None;
    };

    let mut parts = inner.split(':');
    let (Some(name), Some(keyword)) = (parts.next(), parts.next()) else {
        diagnostics.push(CompileDiagnostic::MalformedOption(token.to_owned()));
        return None;
    };
    if !is_valid_name(name) {
        diagnostics.push(CompileDiagnostic::InvalidName(name.to_owned()));
        return None;
    }
    let Some(option_type) = OptionType::from_keyword(keyword) else {
        diagnostics.push(CompileDiagnostic::UnknownOptionType {
            option: name.to_ascii_lowercase(),
            keyword: keyword.to_owned(),
        });
        return None;
    };

    let mut option = CommandOptionSpec::new(name, option_type, required);
    for modifier in parts {
        apply_modifier(&mut option, modifier, diagnostics);
    }
    Some(option)
}

fn apply_modifier(
    option: &mut CommandOptionSpec,
    modifier: &str,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    match modifier.split_once('=') {
        Some(("min", value)) => apply_bound(option, Bound::Min, value, diagnostics),
        Some(("max", value)) => apply_bound(option, Bound::Max, value, diagnostics),
        Some(("ch", kinds)) => apply_channel_kinds(option, kinds, diagnostics),
        None if modifier == "ac" => {
            if option.option_type.supports_choices() {
                option.autocomplete = true;
            }
        }
        _ => diagnostics.push(CompileDiagnostic::UnknownModifier {
            option: option.name.clone(),
            modifier: modifier.to_owned(),
        }),
    }
}

/// Applies a `min=`/`max=` bound.
///
/// Bounds on types that do not support them are dropped without a
/// diagnostic.
fn apply_bound(
    option: &mut CommandOptionSpec,
    bound: Bound,
    raw: &str,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    if raw == "-" {
        return;
    }

    let option_type = option.option_type;
    let applied = match option_type {
        OptionType::String => raw.parse::<u16>().ok().map(|length| match bound {
            Bound::Min => option.min_length = Some(length),
            Bound::Max => option.max_length = Some(length),
        }),
        OptionType::Integer | OptionType::Number => {
            parse_number(raw, option_type).map(|value| match bound {
                Bound::Min => option.min_value = Some(value),
                Bound::Max => option.max_value = Some(value),
            })
        }
        _ => Some(()),
    };

    if applied.is_none() {
        diagnostics.push(CompileDiagnostic::InvalidBound {
            option: option.name.clone(),
            value: raw.to_owned(),
        });
    }
}

fn apply_channel_kinds(
    option: &mut CommandOptionSpec,
    raw: &str,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    if option.option_type != OptionType::Channel {
        return;
    }
    for keyword in raw.split(',').filter(|keyword| !keyword.is_empty()) {
        match ChannelKind::try_from(keyword) {
            Ok(kind) if !option.channel_types.contains(&kind) => option.channel_types.push(kind),
            Ok(_) => {}
            Err(_) => diagnostics.push(CompileDiagnostic::UnknownChannelKind {
                option: option.name.clone(),
                kind: keyword.to_owned(),
            }),
        }
    }
}

fn apply_flag(spec: &mut CommandSpec, flag: &str, diagnostics: &mut Vec<CompileDiagnostic>) {
    match flag {
        "nsfw" => spec.nsfw = true,
        "global" => spec.guilds = Some(Vec::new()),
        _ => diagnostics.push(CompileDiagnostic::UnknownFlag(flag.to_owned())),
    }
}

/// Parses a numeric literal for an integer or number option.
pub(super) fn parse_number(raw: &str, option_type: OptionType) -> Option<Number> {
    if let Ok(integer) = raw.parse::<i64>() {
        return Some(Number::from(integer));
    }
    match option_type {
        OptionType::Number => raw.parse::<f64>().ok().and_then(Number::from_f64),
        _ => None,
    }
}

/// Returns whether `value` is a valid command, group, subcommand, or option name.
pub(super) fn is_valid_name(value: &str) -> bool {
    let length = value.chars().count();
    (1..=MAX_NAME_LENGTH).contains(&length)
        && value
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'))
}

/// Returns whether `value` is a valid context-menu display name.
pub(super) fn is_valid_display_name(value: &str) -> bool {
    let length = value.chars().count();
    (1..=MAX_NAME_LENGTH).contains(&length)
        && value.chars().all(|character| {
            character.is_alphanumeric() || character == ' ' || matches!(character, '-' | '_')
        })
}
