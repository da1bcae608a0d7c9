//! Error types shared across the exporter crates.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating the process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised while resolving upstream wire values into domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown bond status: {0}")]
    BondStatus(i32),

    #[error("validator {operator}: missing consensus public key")]
    MissingPubKey { operator: String },

    #[error("validator {operator}: unsupported public key type {type_url}")]
    UnsupportedPubKey { operator: String, type_url: String },

    #[error("validator {operator}: malformed {type_url} payload: {reason}")]
    MalformedPubKey {
        operator: String,
        type_url: String,
        reason: String,
    },
}
