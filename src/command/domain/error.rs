//! Error types for command domain parsing.

use thiserror::Error;

/// A remote numeric code does not map onto a known enum value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {what} code: {code}")]
pub struct UnknownTypeCodeError {
    /// Which enumeration was being decoded.
    pub what: &'static str,
    /// The offending code.
    pub code: u8,
}

/// A shorthand channel keyword is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown channel kind keyword: {0}")]
pub struct ParseChannelKindError(pub String);

/// A textual command kind is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown command kind: {0}")]
pub struct ParseCommandKindError(pub String);
