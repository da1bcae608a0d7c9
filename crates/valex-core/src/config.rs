//! Exporter configuration.
//!
//! Values come from CLI flags and environment variables (wired up by the
//! daemon) or from a TOML file. Either way the result is validated once at
//! startup and never reloaded.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_GRPC_ADDR: &str = "grpc.constantine.archway.tech:443";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_PREFIX: &str = "archway";
pub const DEFAULT_CHAIN_NAME: &str = "archway";
pub const DEFAULT_CHAIN_ID: &str = "constantine-3";
pub const DEFAULT_PORT: u16 = 8008;
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    /// Upstream gRPC endpoint, `host:port` or a full URI.
    pub grpc_addr: String,
    /// Use TLS for the upstream connection.
    pub tls: bool,
    /// Bound on connecting, on each request, and on a whole scrape.
    pub timeout_secs: u64,
    /// Bech32 prefix of the chain, without the `valcons` suffix.
    pub prefix: String,
    pub chain_name: String,
    pub chain_id: String,
    /// Port the metrics server listens on.
    pub port: u16,
    pub log_level: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            grpc_addr: DEFAULT_GRPC_ADDR.to_string(),
            tls: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            prefix: DEFAULT_PREFIX.to_string(),
            chain_name: DEFAULT_CHAIN_NAME.to_string(),
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ExporterConfig {
    /// Load and validate a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ExporterConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.grpc_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("grpc address must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout must be at least 1 second".to_string()));
        }
        if self.prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("bech32 prefix must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("server port must not be 0".to_string()));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown log level {:?} (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
