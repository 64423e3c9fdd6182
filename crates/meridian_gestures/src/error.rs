//! Configuration error types

use thiserror::Error;

/// Errors raised while loading handler manager options
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Options file could not be read
    #[error("Failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    /// Options file is not valid TOML or has the wrong shape
    #[error("Failed to parse options: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid option: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
