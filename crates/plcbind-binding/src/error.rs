//! Binding error types.

use std::path::PathBuf;

use plcbind_address::{DecodeError, IoMode, ManglingError, ValidationError};

/// Errors raised while validating binding configuration.
///
/// Validation is all-or-nothing: the first failing entry aborts the step.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An address literal or variable name failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The address class does not fit the declared role.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The pin descriptor lacks a flag the role requires (or sets a forbidden one).
    #[error("address '{address}' ({mode}): pin '{pin}' {requirement}")]
    PinCapabilityMismatch {
        address: String,
        mode: IoMode,
        pin: String,
        requirement: &'static str,
    },

    /// Two entries canonicalize to the same identifier.
    #[error("duplicate binding for '{identifier}': '{first}' and '{second}' both map to it")]
    DuplicateAddress {
        identifier: String,
        first: String,
        second: String,
    },

    /// An entry is structurally unusable.
    #[error("binding entry #{index}: {detail}")]
    InvalidEntry { index: usize, detail: String },

    /// More entries than the component supports.
    #[error("{count} bindings configured, at most {max} are supported")]
    TooManyBindings { count: usize, max: usize },

    /// The configured mangling requirement is not met.
    #[error(transparent)]
    Mangling(#[from] ManglingError),
}

/// Errors raised while reading the compiler's symbol artifact.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The artifact does not exist.
    #[error("symbol artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The artifact could not be read.
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while resolving used variables against configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// A variable used by compiled logic has no binding.
    #[error("pin has not been configured for PLC variable '{0}'")]
    UnboundAddress(String),
}

/// Any failure of the binding pipeline.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("symbol extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("resolution error: {0}")]
    Resolve(#[from] ResolveError),
}
