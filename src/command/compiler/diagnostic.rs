//! Diagnostics reported while compiling a declaration.

use thiserror::Error;

/// A problem found while compiling a declaration.
///
/// Compilation never aborts on these; errors mark the result unusable,
/// warnings record input that was ignored.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileDiagnostic {
    /// The declaration text was empty.
    #[error("command declaration is empty")]
    EmptyDeclaration,

    /// A chat declaration did not start with `/`.
    #[error("chat command declarations must start with '/': '{0}'")]
    MissingLeadingSlash(String),

    /// A command, group, subcommand, or option name is invalid.
    #[error("invalid name '{0}': expected 1-32 letters, digits, '-' or '_'")]
    InvalidName(String),

    /// The command path had more than three segments.
    #[error("command path '{0}' has more than three segments")]
    TooManyPathSegments(String),

    /// A context-menu declaration did not match `u/[Name]` or `m/[Name]`.
    #[error("malformed context-menu declaration '{0}'")]
    MalformedContextMenu(String),

    /// An option token was not `<name:type...>` or `[name:type...]`.
    #[error("malformed option token '{0}'")]
    MalformedOption(String),

    /// An option named a type keyword that does not exist.
    #[error("unknown type '{keyword}' for option '{option}'")]
    UnknownOptionType {
        /// Option name.
        option: String,
        /// Offending keyword.
        keyword: String,
    },

    /// Two options share a name.
    #[error("duplicate option '{0}'")]
    DuplicateOption(String),

    /// A token was neither an option, a flag, nor the externals segment.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    /// A group was declared without a subcommand.
    #[error("subcommand group '{0}' declared without a subcommand")]
    GroupWithoutSubcommand(String),

    /// A structured option introduced a new name without a type.
    #[error("structured option '{0}' has no type")]
    UntypedOption(String),

    /// Context-menu commands cannot carry options.
    #[error("context-menu command '{0}' cannot declare options")]
    OptionsOnContextMenu(String),

    /// A bound modifier value could not be parsed.
    #[error("invalid bound '{value}' for option '{option}'")]
    InvalidBound {
        /// Option name.
        option: String,
        /// Raw bound text.
        value: String,
    },

    /// An option modifier is not recognised.
    #[error("unknown modifier '{modifier}' for option '{option}'")]
    UnknownModifier {
        /// Option name.
        option: String,
        /// Raw modifier text.
        modifier: String,
    },

    /// A channel kind keyword is not recognised.
    #[error("unknown channel kind '{kind}' for option '{option}'")]
    UnknownChannelKind {
        /// Option name.
        option: String,
        /// Raw keyword.
        kind: String,
    },

    /// A trailing flag is not recognised.
    #[error("unknown flag '-{0}'")]
    UnknownFlag(String),

    /// An externals entry was not `key=value`.
    #[error("malformed external '{0}'")]
    MalformedExternal(String),

    /// An externals entry referenced an option that does not exist.
    #[error("external '{key}' targets unknown option '{option}'")]
    UnknownExternalTarget {
        /// Externals key.
        key: String,
        /// Option name derived from the key.
        option: String,
    },

    /// Choices were dropped because the option cannot carry them.
    #[error("choices for option '{option}' dropped: {reason}")]
    ChoicesRejected {
        /// Option name.
        option: String,
        /// Why the choices were dropped.
        reason: String,
    },
}

impl CompileDiagnostic {
    /// Returns whether this diagnostic makes the compiled spec unusable.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(
            self,
            Self::InvalidBound { .. }
                | Self::UnknownModifier { .. }
                | Self::UnknownChannelKind { .. }
                | Self::UnknownFlag(_)
                | Self::MalformedExternal(_)
                | Self::UnknownExternalTarget { .. }
                | Self::ChoicesRejected { .. }
        )
    }
}
