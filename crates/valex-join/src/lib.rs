//! valex-join — turns upstream records into the per-validator view.
//!
//! Staking validators are re-keyed by their bech32 consensus address and
//! matched against the slashing module's signing infos.
//!
//! ```text
//! fetch_signing_state (one connection)
//!   ├── signing infos ─────────────────────────────┐
//!   └── validators ──► AddressCodec ──► address map ┴─► join() ──► Vec<Validator>
//! ```

pub mod address;
pub mod error;
pub mod join;

use tracing::debug;

use valex_core::Validator;
use valex_grpc::Connector;

pub use address::{AddressCodec, VALCONS_SUFFIX};
pub use error::{JoinError, JoinResult};
pub use join::{by_consensus_address, join};

/// Fetch signing infos and validators, then join them.
///
/// `prefix` is the chain's bech32 prefix without the `valcons` suffix.
pub async fn signing_validators<K: Connector>(connector: &K, prefix: &str) -> JoinResult<Vec<Validator>> {
    let codec = AddressCodec::new(prefix)?;
    let state = valex_grpc::fetch_signing_state(connector).await?;

    let staking = by_consensus_address(&codec, state.validators)?;
    let validators = join(state.signing_infos, &staking);

    debug!(
        validators = validators.len(),
        matched = validators.iter().filter(|v| v.bond_status.is_some()).count(),
        "joined signing infos with validators"
    );
    Ok(validators)
}
