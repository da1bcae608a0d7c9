//! Resolution of type-tagged staking payloads.
//!
//! A validator's consensus key arrives as a `google.protobuf.Any`. The
//! registry maps each supported type URL to a decoder and the key length
//! that type must have.

use std::collections::HashMap;

use prost::Message;
use prost_types::Any;

use valex_core::{BondStatus, ConsensusKey, DecodeError, StakingValidator};

use crate::proto;

pub const ED25519_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.ed25519.PubKey";
pub const SECP256K1_PUBKEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";

struct KeyType {
    len: usize,
    build: fn(Vec<u8>) -> ConsensusKey,
}

/// Type registry for consensus public keys.
pub struct KeyRegistry {
    types: HashMap<&'static str, KeyType>,
}

impl Default for KeyRegistry {
    fn default() -> Self {
        let mut registry = Self {
            types: HashMap::new(),
        };
        registry.register(ED25519_PUBKEY_TYPE_URL, 32, ConsensusKey::Ed25519);
        // Compressed SEC1 point.
        registry.register(SECP256K1_PUBKEY_TYPE_URL, 33, ConsensusKey::Secp256k1);
        registry
    }
}

impl KeyRegistry {
    pub fn register(&mut self, type_url: &'static str, len: usize, build: fn(Vec<u8>) -> ConsensusKey) {
        self.types.insert(type_url, KeyType { len, build });
    }

    /// Decode a validator's consensus key.
    pub fn resolve_key(&self, operator: &str, any: Option<&Any>) -> Result<ConsensusKey, DecodeError> {
        let any = any.ok_or_else(|| DecodeError::MissingPubKey {
            operator: operator.to_string(),
        })?;

        let key_type = self.types.get(any.type_url.as_str()).ok_or_else(|| {
            DecodeError::UnsupportedPubKey {
                operator: operator.to_string(),
                type_url: any.type_url.clone(),
            }
        })?;

        let malformed = |reason: String| DecodeError::MalformedPubKey {
            operator: operator.to_string(),
            type_url: any.type_url.clone(),
            reason,
        };

        let pubkey = proto::PubKey::decode(any.value.as_slice()).map_err(|e| malformed(e.to_string()))?;
        if pubkey.key.len() != key_type.len {
            return Err(malformed(format!(
                "expected {} key bytes, got {}",
                key_type.len,
                pubkey.key.len()
            )));
        }

        Ok((key_type.build)(pubkey.key))
    }

    /// Resolve every embedded payload of a staking validator.
    pub fn resolve_validator(&self, validator: proto::Validator) -> Result<StakingValidator, DecodeError> {
        let consensus_key = self.resolve_key(&validator.operator_address, validator.consensus_pubkey.as_ref())?;
        let bond_status = BondStatus::from_wire(validator.status)?;
        let moniker = validator.description.map(|d| d.moniker).unwrap_or_default();

        Ok(StakingValidator {
            consensus_key,
            operator_address: validator.operator_address,
            moniker,
            bond_status,
            jailed: validator.jailed,
            // The staking record carries no tombstone flag.
            tombstoned: false,
        })
    }
}

/// Wrap a raw key as the `Any` a node would send.
pub fn pack_key(type_url: &str, key: &[u8]) -> Any {
    Any {
        type_url: type_url.to_string(),
        value: proto::PubKey { key: key.to_vec() }.encode_to_vec(),
    }
}
