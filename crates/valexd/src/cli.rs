//! Command-line flags and environment variables.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use valex_core::config::{
    DEFAULT_CHAIN_ID, DEFAULT_CHAIN_NAME, DEFAULT_GRPC_ADDR, DEFAULT_LOG_LEVEL, DEFAULT_PORT,
    DEFAULT_PREFIX, DEFAULT_TIMEOUT_SECS,
};
use valex_core::{ConfigResult, ExporterConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "valexd",
    about = "Exports Cosmos validator missed blocks as Prometheus metrics",
    version
)]
pub struct Cli {
    /// Read every setting from a TOML file instead of flags and environment.
    #[arg(long, env = "VALEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Upstream gRPC endpoint (host:port or URI).
    #[arg(long, env = "GRPC_ADDR", default_value = DEFAULT_GRPC_ADDR)]
    pub grpc_addr: String,

    /// Use TLS for the upstream connection.
    #[arg(long, env = "GRPC_TLS_ENABLED", default_value_t = true, action = ArgAction::Set)]
    pub tls: bool,

    /// Timeout in seconds for the probe and for each scrape.
    #[arg(long, env = "GRPC_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Bech32 prefix of the chain.
    #[arg(long, env = "PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Value of the chain_name label.
    #[arg(long, env = "CHAIN_NAME", default_value = DEFAULT_CHAIN_NAME)]
    pub chain_name: String,

    /// Value of the chain_id label.
    #[arg(long, env = "CHAIN_ID", default_value = DEFAULT_CHAIN_ID)]
    pub chain_id: String,

    /// Server port.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(short, long, env = "LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Resolve the validated exporter configuration.
    pub fn exporter_config(&self) -> ConfigResult<ExporterConfig> {
        if let Some(path) = &self.config {
            return ExporterConfig::from_file(path);
        }

        let config = ExporterConfig {
            grpc_addr: self.grpc_addr.clone(),
            tls: self.tls,
            timeout_secs: self.timeout,
            prefix: self.prefix.clone(),
            chain_name: self.chain_name.clone(),
            chain_id: self.chain_id.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}
