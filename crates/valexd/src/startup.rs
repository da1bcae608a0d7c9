//! Startup checks: metric schema and upstream connectivity.

use anyhow::{anyhow, Context};
use tracing::{info, warn};

use valex_core::ExporterConfig;
use valex_grpc::{fetch_latest_block, Connector, LatestBlock};
use valex_metrics::MissedBlocksDesc;

/// Declare the gauge schema once, before any scrape can run.
pub fn describe_metrics(desc: &MissedBlocksDesc) -> anyhow::Result<()> {
    let schema = desc
        .describe()
        .map_err(|e| anyhow!("invalid metric descriptor: {e}"))?;
    info!(
        metric = %schema.fq_name,
        help = desc.help(),
        labels = ?desc.labels(),
        "metric schema declared"
    );
    Ok(())
}

/// Fetch the latest block once, bounded by the configured timeout.
///
/// Any failure is fatal: the daemon must not start serving against a node
/// it cannot reach. A chain-id mismatch only warns.
pub async fn probe<K: Connector>(connector: &K, config: &ExporterConfig) -> anyhow::Result<LatestBlock> {
    let timeout = config.timeout();
    let block = tokio::time::timeout(timeout, fetch_latest_block(connector))
        .await
        .map_err(|_| anyhow!("connectivity probe to {} timed out after {timeout:?}", config.grpc_addr))?
        .with_context(|| format!("connectivity probe to {} failed", config.grpc_addr))?;

    if block.chain_id != config.chain_id {
        warn!(
            configured = %config.chain_id,
            reported = %block.chain_id,
            "upstream node reports a different chain id"
        );
    }

    info!(height = block.height, chain_id = %block.chain_id, "upstream node reachable");
    Ok(block)
}
