//! Command declaration compiler.
//!
//! Turns a shorthand string, a structured object, or a shorthand string
//! refined by a structured overlay into a canonical [`CommandSpec`]. The
//! compiler is pure: it performs no I/O and never fails outright. Malformed
//! input yields a best-effort spec plus [`CompileDiagnostic`]s; callers use
//! [`Compilation::into_spec`] to reject unusable results.
//!
//! # Example
//!
//! ```
//! use reball::command::compiler::compile;
//! use reball::command::domain::OptionType;
//!
//! let spec = compile("/ban <user:user> [reason:string:max=200]")
//!     .into_spec()
//!     .expect("declaration compiles");
//!
//! assert_eq!(spec.name, "ban");
//! assert_eq!(spec.options.len(), 2);
//! assert_eq!(spec.options[1].option_type, OptionType::String);
//! assert_eq!(spec.options[1].max_length, Some(200));
//! ```

mod constraints;
mod diagnostic;
mod externals;
mod shorthand;
mod structured;

pub use diagnostic::CompileDiagnostic;
pub use structured::{StructuredCommand, StructuredOption};

use thiserror::Error;

use crate::command::domain::{CommandKind, CommandSpec};

/// A command declaration in any supported form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// Compact shorthand text.
    Shorthand(String),
    /// Structured object.
    Structured(StructuredCommand),
    /// Shorthand refined by a structured overlay keyed by option name.
    Layered {
        /// Shorthand text parsed first.
        shorthand: String,
        /// Overlay applied on top.
        overlay: StructuredCommand,
    },
}

impl Declaration {
    /// Creates a layered declaration.
    #[must_use]
    pub fn layered(shorthand: impl Into<String>, overlay: StructuredCommand) -> Self {
        Self::Layered {
            shorthand: shorthand.into(),
            overlay,
        }
    }
}

impl From<&str> for Declaration {
    fn from(value: &str) -> Self {
        Self::Shorthand(value.to_owned())
    }
}

impl From<String> for Declaration {
    fn from(value: String) -> Self {
        Self::Shorthand(value)
    }
}

impl From<StructuredCommand> for Declaration {
    fn from(value: StructuredCommand) -> Self {
        Self::Structured(value)
    }
}

/// Result of compiling one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    spec: CommandSpec,
    diagnostics: Vec<CompileDiagnostic>,
}

impl Compilation {
    /// Returns the best-effort spec.
    #[must_use]
    pub const fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// Returns every diagnostic in the order it was found.
    #[must_use]
    pub fn diagnostics(&self) -> &[CompileDiagnostic] {
        &self.diagnostics
    }

    /// Returns the diagnostics that make the spec unusable.
    pub fn errors(&self) -> impl Iterator<Item = &CompileDiagnostic> {
        self.diagnostics.iter().filter(|diagnostic| diagnostic.is_error())
    }

    /// Returns whether the spec has a name and no error diagnostics.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !self.spec.name.is_empty() && self.errors().next().is_none()
    }

    /// Converts into the spec, rejecting unusable results.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the spec has no name or an error
    /// diagnostic was recorded.
    pub fn into_spec(self) -> Result<CommandSpec, CompileError> {
        if self.is_ok() {
            Ok(self.spec)
        } else {
            Err(CompileError {
                name: self.spec.name,
                diagnostics: self
                    .diagnostics
                    .into_iter()
                    .filter(CompileDiagnostic::is_error)
                    .collect(),
            })
        }
    }
}

/// A declaration compiled to an unusable spec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("command declaration '{name}' failed to compile: {}", summarize(.diagnostics))]
pub struct CompileError {
    /// Best-effort name, possibly empty.
    pub name: String,
    /// Error diagnostics.
    pub diagnostics: Vec<CompileDiagnostic>,
}

fn summarize(diagnostics: &[CompileDiagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Compiles a declaration into a canonical spec.
#[must_use]
pub fn compile(declaration: impl Into<Declaration>) -> Compilation {
    let mut diagnostics = Vec::new();
    let mut spec = match declaration.into() {
        Declaration::Shorthand(text) => shorthand::parse(&text, &mut diagnostics),
        Declaration::Structured(object) => {
            let mut spec = CommandSpec::new("", object.kind.unwrap_or(CommandKind::Chat));
            structured::overlay(&mut spec, object, &mut diagnostics);
            spec
        }
        Declaration::Layered { shorthand, overlay } => {
            let mut spec = shorthand::parse(&shorthand, &mut diagnostics);
            structured::overlay(&mut spec, overlay, &mut diagnostics);
            spec
        }
    };
    constraints::enforce(&mut spec, &mut diagnostics);
    Compilation { spec, diagnostics }
}
