//! valexd — validator exporter daemon.
//!
//! Probes the upstream Cosmos node once, then serves the
//! `cosmos_validator_missed_blocks` gauge on `/metrics`. Every scrape
//! queries the node afresh; nothing is cached between scrapes.
//!
//! # Usage
//!
//! ```text
//! valexd --grpc-addr grpc.constantine.archway.tech:443 --prefix archway -p 8008
//! GRPC_TLS_ENABLED=false GRPC_ADDR=localhost:9090 valexd
//! valexd --config /etc/valex.toml
//! ```

mod cli;
mod startup;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use valex_core::ExporterConfig;
use valex_grpc::GrpcConnector;
use valex_metrics::{build_router, MissedBlocksCollector, MissedBlocksDesc};

use crate::cli::{Cli, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.exporter_config().context("invalid configuration")?;

    init_tracing(&config.log_level, cli.log_format)?;

    run(config).await
}

/// RUST_LOG wins over the configured level.
fn init_tracing(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("bad log level {level:?}"))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

async fn run(config: ExporterConfig) -> anyhow::Result<()> {
    info!(
        grpc_addr = %config.grpc_addr,
        tls = config.tls,
        prefix = %config.prefix,
        chain_id = %config.chain_id,
        "validator exporter starting"
    );

    let desc = MissedBlocksDesc::new();
    startup::describe_metrics(&desc)?;

    let connector = GrpcConnector::from_config(&config);
    startup::probe(&connector, &config).await?;

    let collector = Arc::new(MissedBlocksCollector::from_config(connector, desc, &config));
    let router = build_router(collector);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "metrics server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("validator exporter stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            // Without a handler the server runs until killed.
            warn!(error = %e, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    }
}
