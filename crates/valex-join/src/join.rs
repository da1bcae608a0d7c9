//! Merge of signing infos with staking validators.

use std::collections::HashMap;

use tracing::debug;

use valex_core::{SigningInfo, StakingValidator, Validator};

use crate::address::AddressCodec;
use crate::error::JoinResult;

/// Key staking validators by their encoded consensus address.
///
/// A later validator with the same address replaces an earlier one.
pub fn by_consensus_address(
    codec: &AddressCodec,
    validators: Vec<StakingValidator>,
) -> JoinResult<HashMap<String, StakingValidator>> {
    let mut map = HashMap::with_capacity(validators.len());
    for validator in validators {
        let addr = codec.encode(&validator.consensus_key)?;
        map.insert(addr, validator);
    }
    Ok(map)
}

/// Build one [`Validator`] per signing info, in signing-info order.
///
/// Signing infos with no staking counterpart are still emitted. Every
/// staking-side field, `jailed` and `tombstoned` included, keeps its default.
pub fn join(infos: Vec<SigningInfo>, staking: &HashMap<String, StakingValidator>) -> Vec<Validator> {
    infos
        .into_iter()
        .map(|info| {
            let mut validator = Validator {
                missed_blocks: info.missed_blocks_counter,
                ..Default::default()
            };

            match staking.get(&info.consensus_address) {
                Some(s) => {
                    validator.operator_address = s.operator_address.clone();
                    validator.moniker = s.moniker.clone();
                    validator.bond_status = Some(s.bond_status);
                    validator.jailed = s.jailed;
                    validator.tombstoned = s.tombstoned;
                }
                None => debug!(address = %info.consensus_address, "not in validators"),
            }

            validator.consensus_address = info.consensus_address;
            validator
        })
        .collect()
}
