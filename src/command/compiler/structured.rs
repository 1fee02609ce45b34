//! Structured declarations and the name-keyed overlay onto shorthand output.

use serde::Deserialize;
use serde_json::Number;

use super::CompileDiagnostic;
use crate::command::domain::{
    ChannelKind, Choice, CommandKind, CommandOptionSpec, CommandSpec, OptionType,
};

/// Object form of a command declaration.
///
/// Every field is optional so the same type serves as a complete declaration
/// and as an overlay refining shorthand output field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StructuredCommand {
    /// Top-level command name.
    pub name: Option<String>,
    /// Command kind.
    #[serde(rename = "type")]
    pub kind: Option<CommandKind>,
    /// Command description.
    pub description: Option<String>,
    /// Subcommand group name.
    #[serde(alias = "subcommand_group")]
    pub group_name: Option<String>,
    /// Subcommand group description.
    pub group_description: Option<String>,
    /// Subcommand name.
    #[serde(alias = "subcommand")]
    pub sub_name: Option<String>,
    /// Subcommand description.
    pub sub_description: Option<String>,
    /// Guild aliases; an empty list pins the command to global scope.
    pub guilds: Option<Vec<String>>,
    /// Age restriction.
    pub nsfw: Option<bool>,
    /// Help category.
    pub category: Option<String>,
    /// Option overlays keyed by name.
    pub options: Vec<StructuredOption>,
}

impl StructuredCommand {
    /// Creates an empty structured declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the command kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: CommandKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the command description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the guild alias list.
    #[must_use]
    pub fn with_guilds(mut self, guilds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.guilds = Some(guilds.into_iter().map(Into::into).collect());
        self
    }

    /// Appends an option overlay.
    #[must_use]
    pub fn with_option(mut self, option: StructuredOption) -> Self {
        self.options.push(option);
        self
    }
}

/// Object form of one option; fields left `None` keep the shorthand value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StructuredOption {
    /// Option name, the overlay key.
    pub name: String,
    /// Value type; required when the option is new.
    #[serde(rename = "type")]
    pub option_type: Option<OptionType>,
    /// Description.
    pub description: Option<String>,
    /// Whether a value is required.
    pub required: Option<bool>,
    /// Whether values are autocompleted.
    pub autocomplete: Option<bool>,
    /// Predefined choices.
    pub choices: Option<Vec<Choice>>,
    /// Minimum string length.
    pub min_length: Option<u16>,
    /// Maximum string length.
    pub max_length: Option<u16>,
    /// Minimum numeric value.
    pub min_value: Option<Number>,
    /// Maximum numeric value.
    pub max_value: Option<Number>,
    /// Accepted channel kinds.
    pub channel_types: Option<Vec<ChannelKind>>,
}

impl StructuredOption {
    /// Creates an overlay for the option with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the value type.
    #[must_use]
    pub const fn with_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets whether a value is required.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets predefined choices.
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.choices = Some(choices.into_iter().collect());
        self
    }
}

/// Overlays a structured declaration onto a spec.
pub(super) fn overlay(
    spec: &mut CommandSpec,
    structured: StructuredCommand,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    if let Some(kind) = structured.kind {
        spec.kind = kind;
    }
    if let Some(name) = structured.name {
        spec.name = match spec.kind {
            CommandKind::Chat => name.trim().to_ascii_lowercase(),
            CommandKind::User | CommandKind::Message => name.trim().to_owned(),
        };
    }
    if let Some(description) = structured.description {
        spec.description = description;
    }
    if let Some(group) = structured.group_name {
        spec.group_name = Some(group.to_ascii_lowercase());
    }
    if let Some(sub) = structured.sub_name {
        spec.sub_name = Some(sub.to_ascii_lowercase());
    }
    if structured.group_description.is_some() {
        spec.group_description = structured.group_description;
    }
    if structured.sub_description.is_some() {
        spec.sub_description = structured.sub_description;
    }
    if structured.guilds.is_some() {
        spec.guilds = structured.guilds;
    }
    if let Some(nsfw) = structured.nsfw {
        spec.nsfw = nsfw;
    }
    if structured.category.is_some() {
        spec.category = structured.category;
    }

    for option in structured.options {
        overlay_option(spec, option, diagnostics);
    }
}

fn overlay_option(
    spec: &mut CommandSpec,
    structured: StructuredOption,
    diagnostics: &mut Vec<CompileDiagnostic>,
) {
    let name = structured.name.trim().to_ascii_lowercase();
    if let Some(existing) = spec.option_mut(&name) {
        apply_fields(existing, structured);
        return;
    }

    let Some(option_type) = structured.option_type else {
        diagnostics.push(CompileDiagnostic::UntypedOption(name));
        return;
    };
    let mut option = CommandOptionSpec::new(name, option_type, false);
    apply_fields(&mut option, structured);
    spec.options.push(option);
}

fn apply_fields(option: &mut CommandOptionSpec, structured: StructuredOption) {
    if let Some(option_type) = structured.option_type {
        option.option_type = option_type;
    }
    if let Some(description) = structured.description {
        option.description = description;
    }
    if let Some(required) = structured.required {
        option.required = required;
    }
    if let Some(autocomplete) = structured.autocomplete {
        option.autocomplete = autocomplete;
    }
    if let Some(choices) = structured.choices {
        option.choices = choices;
    }
    if structured.min_length.is_some() {
        option.min_length = structured.min_length;
    }
    if structured.max_length.is_some() {
        option.max_length = structured.max_length;
    }
    if structured.min_value.is_some() {
        option.min_value = structured.min_value;
    }
    if structured.max_value.is_some() {
        option.max_value = structured.max_value;
    }
    if let Some(channel_types) = structured.channel_types {
        option.channel_types = channel_types;
    }
}
