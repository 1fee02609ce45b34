//! Command option model and the remote option wire shape.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{ParseChannelKindError, UnknownTypeCodeError};

/// Placeholder used wherever a description is required but was not declared.
pub const NO_DESCRIPTION_PROVIDED: &str = "No description provided.";

/// Maximum number of choices a single option may carry.
pub const MAX_CHOICES: usize = 25;

/// Value type of a command option, encoded by its remote numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OptionType {
    /// Structural subcommand node.
    Subcommand,
    /// Structural subcommand group node.
    SubcommandGroup,
    /// Free-form text.
    String,
    /// Whole number.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// User reference.
    User,
    /// Channel reference.
    Channel,
    /// Role reference.
    Role,
    /// User or role reference.
    Mentionable,
    /// Floating point number.
    Number,
    /// Uploaded file.
    Attachment,
}

impl OptionType {
    /// Returns the remote numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Subcommand => 1,
            Self::SubcommandGroup => 2,
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
            Self::User => 6,
            Self::Channel => 7,
            Self::Role => 8,
            Self::Mentionable => 9,
            Self::Number => 10,
            Self::Attachment => 11,
        }
    }

    /// Maps a shorthand type keyword onto a value type.
    ///
    /// Both the long keywords (`string`, `integer`, ...) and the short ones
    /// (`str`, `int`, ...) are accepted. Structural types have no keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "string" | "str" => Some(Self::String),
            "integer" | "int" => Some(Self::Integer),
            "boolean" | "bool" => Some(Self::Boolean),
            "user" => Some(Self::User),
            "channel" | "ch" => Some(Self::Channel),
            "role" => Some(Self::Role),
            "mentionable" | "ment" => Some(Self::Mentionable),
            "number" | "num" => Some(Self::Number),
            "attachment" | "att" => Some(Self::Attachment),
            _ => None,
        }
    }

    /// Returns whether this is a subcommand or subcommand group node.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::Subcommand | Self::SubcommandGroup)
    }

    /// Returns whether options of this type may carry choices or autocomplete.
    #[must_use]
    pub const fn supports_choices(self) -> bool {
        matches!(self, Self::String | Self::Integer | Self::Number)
    }

    /// Returns whether `min_value`/`max_value` apply.
    #[must_use]
    pub const fn supports_value_bounds(self) -> bool {
        matches!(self, Self::Integer | Self::Number)
    }
}

impl From<OptionType> for u8 {
    fn from(value: OptionType) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for OptionType {
    type Error = UnknownTypeCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Subcommand),
            2 => Ok(Self::SubcommandGroup),
            3 => Ok(Self::String),
            4 => Ok(Self::Integer),
            5 => Ok(Self::Boolean),
            6 => Ok(Self::User),
            7 => Ok(Self::Channel),
            8 => Ok(Self::Role),
            9 => Ok(Self::Mentionable),
            10 => Ok(Self::Number),
            11 => Ok(Self::Attachment),
            _ => Err(UnknownTypeCodeError {
                what: "option type",
                code,
            }),
        }
    }
}

/// Channel kinds an option of type [`OptionType::Channel`] may be limited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ChannelKind {
    /// Text channel in a guild.
    GuildText,
    /// Direct message.
    Dm,
    /// Voice channel in a guild.
    GuildVoice,
    /// Group direct message.
    GroupDm,
    /// Channel category.
    GuildCategory,
    /// Announcement channel.
    GuildAnnouncement,
    /// Thread inside an announcement channel.
    AnnouncementThread,
    /// Public thread.
    PublicThread,
    /// Private thread.
    PrivateThread,
    /// Stage voice channel.
    GuildStageVoice,
    /// Hub directory channel.
    GuildDirectory,
    /// Forum channel.
    GuildForum,
    /// Media channel.
    GuildMedia,
}

impl ChannelKind {
    /// Returns the remote numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::GuildText => 0,
            Self::Dm => 1,
            Self::GuildVoice => 2,
            Self::GroupDm => 3,
            Self::GuildCategory => 4,
            Self::GuildAnnouncement => 5,
            Self::AnnouncementThread => 10,
            Self::PublicThread => 11,
            Self::PrivateThread => 12,
            Self::GuildStageVoice => 13,
            Self::GuildDirectory => 14,
            Self::GuildForum => 15,
            Self::GuildMedia => 16,
        }
    }
}

impl From<ChannelKind> for u8 {
    fn from(value: ChannelKind) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for ChannelKind {
    type Error = UnknownTypeCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::GuildText),
            1 => Ok(Self::Dm),
            2 => Ok(Self::GuildVoice),
            3 => Ok(Self::GroupDm),
            4 => Ok(Self::GuildCategory),
            5 => Ok(Self::GuildAnnouncement),
            10 => Ok(Self::AnnouncementThread),
            11 => Ok(Self::PublicThread),
            12 => Ok(Self::PrivateThread),
            13 => Ok(Self::GuildStageVoice),
            14 => Ok(Self::GuildDirectory),
            15 => Ok(Self::GuildForum),
            16 => Ok(Self::GuildMedia),
            _ => Err(UnknownTypeCodeError {
                what: "channel kind",
                code,
            }),
        }
    }
}

impl TryFrom<&str> for ChannelKind {
    type Error = ParseChannelKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gt" => Ok(Self::GuildText),
            "dm" => Ok(Self::Dm),
            "gv" => Ok(Self::GuildVoice),
            "gdm" => Ok(Self::GroupDm),
            "gc" => Ok(Self::GuildCategory),
            "ga" => Ok(Self::GuildAnnouncement),
            "at" => Ok(Self::AnnouncementThread),
            "put" => Ok(Self::PublicThread),
            "prt" => Ok(Self::PrivateThread),
            "gsv" => Ok(Self::GuildStageVoice),
            "gd" => Ok(Self::GuildDirectory),
            "gf" => Ok(Self::GuildForum),
            "gm" => Ok(Self::GuildMedia),
            _ => Err(ParseChannelKindError(value.to_owned())),
        }
    }
}

/// Value carried by a predefined choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    /// Numeric choice for integer and number options.
    Number(Number),
    /// Text choice for string options.
    String(String),
}

/// A predefined `(label, value)` choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the invoking user.
    pub name: String,
    /// Value delivered to the executor.
    pub value: ChoiceValue,
}

impl Choice {
    /// Creates a choice.
    #[must_use]
    pub fn new(name: impl Into<String>, value: ChoiceValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One option of a command, in the shape the remote registry expects.
///
/// Structural options (`Subcommand`, `SubcommandGroup`) nest children in
/// [`CommandOptionSpec::options`]; leaf options never have children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOptionSpec {
    /// Option value type.
    #[serde(rename = "type")]
    pub option_type: OptionType,
    /// Option name.
    pub name: String,
    /// Option description.
    pub description: String,
    /// Whether the invoking user must supply a value.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Whether values are suggested by an autocomplete handler.
    #[serde(default, skip_serializing_if = "is_false")]
    pub autocomplete: bool,
    /// Predefined choices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    /// Minimum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Number>,
    /// Maximum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Number>,
    /// Channel kinds accepted by a channel option.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_types: Vec<ChannelKind>,
    /// Children of a structural option.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOptionSpec>,
}

impl CommandOptionSpec {
    /// Creates a leaf option with the placeholder description.
    #[must_use]
    pub fn new(name: impl Into<String>, option_type: OptionType, required: bool) -> Self {
        Self {
            option_type,
            name: name.into().to_ascii_lowercase(),
            description: NO_DESCRIPTION_PROVIDED.to_owned(),
            required,
            autocomplete: false,
            choices: Vec::new(),
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            channel_types: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Creates a `Subcommand` node wrapping leaf options.
    #[must_use]
    pub fn subcommand(
        name: impl Into<String>,
        description: Option<String>,
        options: Vec<Self>,
    ) -> Self {
        Self::structural(OptionType::Subcommand, name, description, options)
    }

    /// Creates a `SubcommandGroup` node wrapping subcommands.
    #[must_use]
    pub fn group(name: impl Into<String>, description: Option<String>, options: Vec<Self>) -> Self {
        Self::structural(OptionType::SubcommandGroup, name, description, options)
    }

    fn structural(
        option_type: OptionType,
        name: impl Into<String>,
        description: Option<String>,
        options: Vec<Self>,
    ) -> Self {
        let mut node = Self::new(name, option_type, false);
        node.description = description.unwrap_or_else(|| NO_DESCRIPTION_PROVIDED.to_owned());
        node.options = options;
        node
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets string length bounds.
    #[must_use]
    pub const fn with_length(mut self, min: Option<u16>, max: Option<u16>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Sets numeric value bounds.
    #[must_use]
    pub fn with_value_range(mut self, min: Option<Number>, max: Option<Number>) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Adds predefined choices.
    #[must_use]
    pub fn with_choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.choices = choices.into_iter().collect();
        self
    }

    /// Returns whether this is a structural node.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        self.option_type.is_structural()
    }

    /// Finds a direct child by name and type.
    #[must_use]
    pub fn child_mut(&mut self, name: &str, option_type: OptionType) -> Option<&mut Self> {
        self.options
            .iter_mut()
            .find(|child| child.option_type == option_type && child.name == name)
    }
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde skip_serializing_if passes fields by reference"
)]
const fn is_false(value: &bool) -> bool {
    !*value
}
