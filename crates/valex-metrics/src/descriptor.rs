//! Name and label schema of the missed-blocks gauge.

use std::collections::HashMap;

use prometheus::core::Desc;
use prometheus::{GaugeVec, Opts};

pub const MISSED_BLOCKS_METRIC: &str = "cosmos_validator_missed_blocks";
pub const MISSED_BLOCKS_HELP: &str = "Returns missed blocks for a validator.";

/// Label names, in the order values are supplied.
pub const MISSED_BLOCKS_LABELS: [&str; 8] = [
    "chain_name",
    "chain_id",
    "valcons",
    "valoper",
    "moniker",
    "jailed",
    "tombstoned",
    "bond_status",
];

/// Descriptor of the missed-blocks gauge.
///
/// Built once at startup and handed to the collector; each scrape builds a
/// fresh gauge from it.
#[derive(Debug, Clone)]
pub struct MissedBlocksDesc {
    opts: Opts,
}

impl Default for MissedBlocksDesc {
    fn default() -> Self {
        Self::new()
    }
}

impl MissedBlocksDesc {
    pub fn new() -> Self {
        Self {
            opts: Opts::new(MISSED_BLOCKS_METRIC, MISSED_BLOCKS_HELP),
        }
    }

    pub fn name(&self) -> &str {
        &self.opts.name
    }

    pub fn help(&self) -> &str {
        &self.opts.help
    }

    pub fn labels(&self) -> &'static [&'static str] {
        &MISSED_BLOCKS_LABELS
    }

    /// The metric schema, independent of any scrape's data.
    pub fn describe(&self) -> prometheus::Result<Desc> {
        Desc::new(
            self.opts.name.clone(),
            self.opts.help.clone(),
            MISSED_BLOCKS_LABELS.iter().map(|l| l.to_string()).collect(),
            HashMap::new(),
        )
    }

    /// An empty gauge vector with this schema.
    pub fn gauge_vec(&self) -> prometheus::Result<GaugeVec> {
        GaugeVec::new(self.opts.clone(), &MISSED_BLOCKS_LABELS)
    }
}
