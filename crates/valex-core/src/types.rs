//! Domain model for signing, staking and joined validator records.
//!
//! None of these records outlive a scrape: they are rebuilt from the
//! upstream node every time `/metrics` is hit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Bonding state of a validator in the staking module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondStatus {
    Unbonded,
    Unbonding,
    Bonded,
}

impl BondStatus {
    /// Label value used in the exported metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            BondStatus::Unbonded => "unbonded",
            BondStatus::Unbonding => "unbonding",
            BondStatus::Bonded => "bonded",
        }
    }

    /// Decode the staking module's numeric enum.
    ///
    /// The chain uses 1/2/3 for unbonded/unbonding/bonded. Everything else,
    /// including 0 ("unspecified"), is rejected.
    pub fn from_wire(value: i32) -> Result<Self, DecodeError> {
        match value {
            1 => Ok(BondStatus::Unbonded),
            2 => Ok(BondStatus::Unbonding),
            3 => Ok(BondStatus::Bonded),
            other => Err(DecodeError::BondStatus(other)),
        }
    }
}

impl TryFrom<i32> for BondStatus {
    type Error = DecodeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_wire(value)
    }
}

impl fmt::Display for BondStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validator's resolved consensus public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsensusKey {
    Ed25519(Vec<u8>),
    Secp256k1(Vec<u8>),
}

impl ConsensusKey {
    /// Raw public key bytes.
    pub fn bytes(&self) -> &[u8] {
        match self {
            ConsensusKey::Ed25519(key) | ConsensusKey::Secp256k1(key) => key,
        }
    }
}

/// Slashing-module view of a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningInfo {
    /// Bech32 consensus address (`<prefix>valcons1...`).
    pub consensus_address: String,
    pub missed_blocks_counter: i64,
}

/// Staking-module view of a validator, with its public key resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingValidator {
    pub consensus_key: ConsensusKey,
    pub operator_address: String,
    pub moniker: String,
    pub bond_status: BondStatus,
    pub jailed: bool,
    pub tombstoned: bool,
}

/// Joined view emitted as one gauge sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub consensus_address: String,
    pub operator_address: String,
    pub moniker: String,
    pub missed_blocks: i64,
    /// `None` when the signing info had no staking counterpart.
    pub bond_status: Option<BondStatus>,
    pub jailed: bool,
    pub tombstoned: bool,
}

impl Validator {
    /// Bond status label, empty when unknown.
    pub fn bond_status_label(&self) -> &'static str {
        self.bond_status.as_ref().map_or("", BondStatus::as_str)
    }
}
