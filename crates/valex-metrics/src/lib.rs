//! valex-metrics — Prometheus exposition of validator missed blocks.
//!
//! # Architecture
//!
//! ```text
//! GET /metrics
//!   └── MissedBlocksCollector::scrape()
//!         ├── fetch()  → valex_join::signing_validators (timeout-bounded)
//!         └── render() → cosmos_validator_missed_blocks{...} samples
//! ```
//!
//! The gauge schema lives in a [`MissedBlocksDesc`] value owned by the
//! collector rather than in a process-global registry.

pub mod collector;
pub mod descriptor;
pub mod error;
pub mod handler;

pub use collector::{ChainLabels, MissedBlocksCollector};
pub use descriptor::{MissedBlocksDesc, MISSED_BLOCKS_LABELS, MISSED_BLOCKS_METRIC};
pub use error::{MetricsError, MetricsResult};
pub use handler::build_router;
