//! Domain model for declared commands.
//!
//! Commands, their options, dispatch keys, scope resolution, and the records
//! exchanged with the remote registry. Nothing here performs I/O.

mod dispatch;
mod error;
mod guild;
mod keys;
mod option;
mod remote;
mod scope;
mod spec;

pub use dispatch::DispatchKey;
pub use error::{ParseChannelKindError, ParseCommandKindError, UnknownTypeCodeError};
pub use guild::GuildDirectory;
pub use keys::{CommandKey, GuildId, RegistrationKey, RemoteScope};
pub use option::{
    ChannelKind, Choice, ChoiceValue, CommandOptionSpec, MAX_CHOICES, NO_DESCRIPTION_PROVIDED,
    OptionType,
};
pub use remote::{CommandPayload, RemoteCommand, RemoteCommandId, RemoteOperation};
pub use scope::{ResolvedScope, ScopePolicy};
pub use spec::{CommandKind, CommandSpec, MAX_NAME_LENGTH};
