//! valex-core — shared building blocks for the validator exporter.
//!
//! Holds the domain model that flows between the upstream query client,
//! the validator joiner and the metrics adapter, plus the process
//! configuration read once at startup.
//!
//! # Data flow
//!
//! ```text
//! slashing/SigningInfos ──► SigningInfo ─────────┐
//!                                                ├─► Validator (per scrape)
//! staking/Validators ─────► StakingValidator ────┘
//! ```

pub mod config;
pub mod error;
pub mod types;

pub use config::ExporterConfig;
pub use error::{ConfigError, ConfigResult, DecodeError};
pub use types::{BondStatus, ConsensusKey, SigningInfo, StakingValidator, Validator};
