//! Missed-blocks collector.
//!
//! Every scrape runs the fetch-and-join against the upstream node under a
//! fixed timeout and turns each validator into one gauge sample. A failed
//! scrape is logged and exposes no samples; it never fails the HTTP request.

use std::collections::HashSet;
use std::time::Duration;

use prometheus::{Encoder, Registry, TextEncoder};
use tracing::{debug, error, warn};

use valex_core::{ExporterConfig, Validator};
use valex_grpc::Connector;

use crate::descriptor::MissedBlocksDesc;
use crate::error::{MetricsError, MetricsResult};

/// Per-process label values shared by every sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLabels {
    pub chain_name: String,
    pub chain_id: String,
}

pub struct MissedBlocksCollector<K> {
    connector: K,
    desc: MissedBlocksDesc,
    chain: ChainLabels,
    prefix: String,
    timeout: Duration,
}

impl<K: Connector> MissedBlocksCollector<K> {
    pub fn new(
        connector: K,
        desc: MissedBlocksDesc,
        chain: ChainLabels,
        prefix: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            connector,
            desc,
            chain,
            prefix: prefix.into(),
            timeout,
        }
    }

    pub fn from_config(connector: K, desc: MissedBlocksDesc, config: &ExporterConfig) -> Self {
        let chain = ChainLabels {
            chain_name: config.chain_name.clone(),
            chain_id: config.chain_id.clone(),
        };
        Self::new(connector, desc, chain, config.prefix.clone(), config.timeout())
    }

    pub fn desc(&self) -> &MissedBlocksDesc {
        &self.desc
    }

    /// Run fetch-and-join, bounded by the scrape timeout.
    ///
    /// Expiry drops the in-flight future, which cancels its requests.
    pub async fn fetch(&self) -> MetricsResult<Vec<Validator>> {
        let fetch = valex_join::signing_validators(&self.connector, &self.prefix);
        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(MetricsError::Timeout(self.timeout)),
        }
    }

    /// Gather one sample per validator into a scrape-local registry.
    ///
    /// Validators sharing a consensus address collapse into one sample; the
    /// later value wins and the collision is logged.
    pub fn registry(&self, validators: &[Validator]) -> MetricsResult<Registry> {
        let registry = Registry::new();
        let gauge = self.desc.gauge_vec()?;
        registry.register(Box::new(gauge.clone()))?;

        for addr in duplicate_addresses(validators) {
            warn!(valcons = addr, "duplicate consensus address in scrape, keeping the last sample");
        }

        for v in validators {
            gauge
                .with_label_values(&[
                    self.chain.chain_name.as_str(),
                    self.chain.chain_id.as_str(),
                    v.consensus_address.as_str(),
                    v.operator_address.as_str(),
                    v.moniker.as_str(),
                    bool_label(v.jailed),
                    bool_label(v.tombstoned),
                    v.bond_status_label(),
                ])
                .set(v.missed_blocks as f64);
        }

        Ok(registry)
    }

    /// Render validators in the Prometheus text exposition format.
    pub fn render(&self, validators: &[Validator]) -> MetricsResult<String> {
        let families = self.registry(validators)?.gather();
        let mut buf = Vec::new();
        TextEncoder::new().encode(&families, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Body for one `/metrics` request. Failures yield an empty exposition.
    pub async fn scrape(&self) -> String {
        let validators = match self.fetch().await {
            Ok(validators) => validators,
            Err(e) => {
                error!(error = %e, "scrape produced no data");
                return String::new();
            }
        };

        debug!(metric = self.desc.name(), "start collecting");
        let body = self.render(&validators).unwrap_or_else(|e| {
            error!(error = %e, "failed to render metrics");
            String::new()
        });
        debug!(metric = self.desc.name(), samples = validators.len(), "stop collecting");
        body
    }
}

/// Consensus addresses that appear more than once, one entry per repeat.
fn duplicate_addresses(validators: &[Validator]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(validators.len());
    validators
        .iter()
        .map(|v| v.consensus_address.as_str())
        .filter(|addr| !seen.insert(*addr))
        .collect()
}

fn bool_label(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valex_core::BondStatus;
    use valex_grpc::mock::MockConnector;

    fn collector() -> MissedBlocksCollector<MockConnector> {
        MissedBlocksCollector::new(
            MockConnector::new(),
            MissedBlocksDesc::new(),
            ChainLabels {
                chain_name: "archway".to_string(),
                chain_id: "constantine-3".to_string(),
            },
            "archway",
            Duration::from_secs(1),
        )
    }

    fn sample_line<'a>(body: &'a str, needle: &str) -> &'a str {
        body.lines()
            .find(|l| l.starts_with("cosmos_validator_missed_blocks{") && l.contains(needle))
            .unwrap_or_else(|| panic!("no sample containing {needle} in:\n{body}"))
    }

    #[test]
    fn renders_one_sample_per_validator() {
        let vals = vec![
            Validator {
                consensus_address: "valconsA".to_string(),
                operator_address: "valoperA".to_string(),
                moniker: "Node1".to_string(),
                missed_blocks: 3,
                bond_status: Some(BondStatus::Bonded),
                jailed: false,
                tombstoned: false,
            },
            Validator {
                consensus_address: "valconsB".to_string(),
                missed_blocks: 0,
                ..Default::default()
            },
        ];

        let body = collector().render(&vals).unwrap();
        assert!(body.contains("# HELP cosmos_validator_missed_blocks Returns missed blocks for a validator."));
        assert!(body.contains("# TYPE cosmos_validator_missed_blocks gauge"));

        let a = sample_line(&body, "valcons=\"valconsA\"");
        for label in [
            "chain_name=\"archway\"",
            "chain_id=\"constantine-3\"",
            "valoper=\"valoperA\"",
            "moniker=\"Node1\"",
            "jailed=\"false\"",
            "tombstoned=\"false\"",
            "bond_status=\"bonded\"",
        ] {
            assert!(a.contains(label), "missing {label} in {a}");
        }
        assert!(a.ends_with(" 3"));

        let b = sample_line(&body, "valcons=\"valconsB\"");
        assert!(b.contains("bond_status=\"\""));
        assert!(b.contains("moniker=\"\""));
        assert!(b.ends_with(" 0"));
    }

    #[test]
    fn flags_render_as_true_false() {
        let vals = vec![Validator {
            consensus_address: "c".to_string(),
            jailed: true,
            tombstoned: true,
            bond_status: Some(BondStatus::Unbonding),
            ..Default::default()
        }];

        let body = collector().render(&vals).unwrap();
        let line = sample_line(&body, "valcons=\"c\"");
        assert!(line.contains("jailed=\"true\""));
        assert!(line.contains("tombstoned=\"true\""));
        assert!(line.contains("bond_status=\"unbonding\""));
    }

    #[test]
    fn duplicate_addresses_are_reported() {
        let vals = vec![
            Validator {
                consensus_address: "a".to_string(),
                ..Default::default()
            },
            Validator {
                consensus_address: "b".to_string(),
                ..Default::default()
            },
            Validator {
                consensus_address: "a".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(duplicate_addresses(&vals), ["a"]);
        assert!(duplicate_addresses(&vals[..2]).is_empty());
    }

    #[test]
    fn duplicate_address_keeps_last_value() {
        let vals = vec![
            Validator {
                consensus_address: "dup".to_string(),
                missed_blocks: 1,
                ..Default::default()
            },
            Validator {
                consensus_address: "dup".to_string(),
                missed_blocks: 5,
                ..Default::default()
            },
        ];

        let body = collector().render(&vals).unwrap();
        let samples: Vec<_> = body
            .lines()
            .filter(|l| l.starts_with("cosmos_validator_missed_blocks{"))
            .collect();
        assert_eq!(samples.len(), 1);
        assert!(samples[0].ends_with(" 5"));
    }

    #[test]
    fn no_validators_renders_nothing() {
        let body = collector().render(&[]).unwrap();
        assert!(!body.contains("cosmos_validator_missed_blocks{"));
    }

    #[test]
    fn from_config_copies_chain_labels() {
        let config = ExporterConfig {
            chain_name: "archway".to_string(),
            chain_id: "archway-1".to_string(),
            timeout_secs: 7,
            ..Default::default()
        };
        let c = MissedBlocksCollector::from_config(MockConnector::new(), MissedBlocksDesc::new(), &config);
        assert_eq!(c.chain.chain_id, "archway-1");
        assert_eq!(c.timeout, Duration::from_secs(7));
        assert_eq!(c.desc().name(), "cosmos_validator_missed_blocks");
    }

    #[tokio::test]
    async fn failed_fetch_scrapes_empty() {
        // Nothing queued: the signing-infos request errors out.
        let body = collector().scrape().await;
        assert!(body.is_empty());
    }
}
