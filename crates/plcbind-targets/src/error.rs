//! Error types for pin table operations.

use std::path::PathBuf;

/// Errors that can occur while loading or validating pin tables.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing pin table files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pin table file not found.
    #[error("pin table file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A pin table failed structural validation.
    #[error("invalid pin table for '{platform}': {detail}")]
    Validation {
        /// Platform named by the table.
        platform: String,
        /// Description of the validation failure.
        detail: String,
    },
}

/// Result type for pin table operations.
pub type Result<T> = std::result::Result<T, TargetError>;
