//! Dispatch keys selecting an executor inside a composite command.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CommandSpec;

/// Identifies which executor of a command handles an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchKey {
    /// The command itself, without subcommands.
    Main,
    /// A subcommand directly under the command.
    Sub(String),
    /// A subcommand inside a subcommand group.
    GroupSub {
        /// Group name.
        group: String,
        /// Subcommand name.
        sub: String,
    },
}

impl DispatchKey {
    /// Builds a key from optional group and subcommand markers.
    ///
    /// A group without a subcommand cannot be invoked and resolves to
    /// [`DispatchKey::Main`].
    #[must_use]
    pub fn from_markers(group: Option<&str>, sub: Option<&str>) -> Self {
        match (group, sub) {
            (Some(group), Some(sub)) => Self::GroupSub {
                group: group.to_owned(),
                sub: sub.to_owned(),
            },
            (None, Some(sub)) => Self::Sub(sub.to_owned()),
            _ => Self::Main,
        }
    }

    /// Builds the key a compiled spec will be dispatched under.
    #[must_use]
    pub fn for_spec(spec: &CommandSpec) -> Self {
        Self::from_markers(spec.group_name.as_deref(), spec.sub_name.as_deref())
    }
}

impl fmt::Display for DispatchKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => formatter.write_str("(main)"),
            Self::Sub(sub) => formatter.write_str(sub),
            Self::GroupSub { group, sub } => write!(formatter, "{group}:{sub}"),
        }
    }
}
