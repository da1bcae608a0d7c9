//! Consensus address derivation.
//!
//! Signing infos are keyed by the bech32 consensus address, so staking
//! validators have to be re-keyed the same way the chain does it: hash the
//! consensus public key down to 20 bytes, then bech32-encode it under the
//! `<prefix>valcons` human-readable part.

use bech32::{Bech32, Hrp};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use valex_core::ConsensusKey;

use crate::error::{JoinError, JoinResult};

pub const VALCONS_SUFFIX: &str = "valcons";

/// The 20-byte address of a consensus key.
///
/// ed25519 keys use the truncated SHA-256 digest; secp256k1 keys use
/// RIPEMD-160 over SHA-256.
pub fn address_bytes(key: &ConsensusKey) -> Vec<u8> {
    match key {
        ConsensusKey::Ed25519(bytes) => Sha256::digest(bytes)[..20].to_vec(),
        ConsensusKey::Secp256k1(bytes) => Ripemd160::digest(Sha256::digest(bytes)).to_vec(),
    }
}

/// Encodes consensus keys as `<prefix>valcons1...` addresses.
#[derive(Debug, Clone, Copy)]
pub struct AddressCodec {
    hrp: Hrp,
}

impl AddressCodec {
    pub fn new(prefix: &str) -> JoinResult<Self> {
        let hrp = format!("{prefix}{VALCONS_SUFFIX}");
        let parsed = Hrp::parse(&hrp).map_err(|e| JoinError::Address {
            hrp: hrp.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { hrp: parsed })
    }

    pub fn hrp(&self) -> &str {
        self.hrp.as_str()
    }

    pub fn encode(&self, key: &ConsensusKey) -> JoinResult<String> {
        bech32::encode::<Bech32>(self.hrp, &address_bytes(key)).map_err(|e| JoinError::Address {
            hrp: self.hrp.to_string(),
            reason: e.to_string(),
        })
    }
}
