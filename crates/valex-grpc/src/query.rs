//! Upstream queries and connection lifecycle.
//!
//! The `fetch_*` operations each open their own connection, run, and close
//! it on every exit path. A close failure is never dropped: it becomes the
//! operation's error, or is chained after the query error already in hand.

use tracing::{debug, trace};

use valex_core::{SigningInfo, StakingValidator};

use crate::client::{Connector, QueryConnection};
use crate::error::{GrpcError, GrpcResult};
use crate::pagination::{page_request, Cursor};
use crate::proto;
use crate::registry::KeyRegistry;

const SIGNING_INFOS: &str = "signing infos";
const VALIDATORS: &str = "validators";
const LATEST_BLOCK: &str = "latest block";

/// Header of the node's latest block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestBlock {
    pub height: i64,
    pub chain_id: String,
}

/// Both halves of the validator view, fetched over one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningState {
    pub signing_infos: Vec<SigningInfo>,
    pub validators: Vec<StakingValidator>,
}

/// Page through the slashing module's signing infos.
pub async fn signing_infos<C: QueryConnection>(conn: &mut C) -> GrpcResult<Vec<SigningInfo>> {
    let mut infos = Vec::new();
    let mut cursor = Cursor::start();

    while let Some(key) = cursor.next_key() {
        trace!(next_key = %hex::encode(&key), "requesting signing infos page");
        let response = conn
            .signing_infos(proto::QuerySigningInfosRequest {
                pagination: page_request(key),
            })
            .await
            .map_err(|status| GrpcError::query(SIGNING_INFOS, status))?;

        infos.extend(response.info.into_iter().map(|info| SigningInfo {
            consensus_address: info.address,
            missed_blocks_counter: info.missed_blocks_counter,
        }));
        cursor.advance(response.pagination);
    }

    debug!(count = infos.len(), pages = cursor.pages(), "fetched signing infos");
    Ok(infos)
}

/// Page through the staking module's validators, resolving each one's
/// consensus key before it is kept.
pub async fn validators<C: QueryConnection>(
    conn: &mut C,
    registry: &KeyRegistry,
) -> GrpcResult<Vec<StakingValidator>> {
    let mut vals = Vec::new();
    let mut cursor = Cursor::start();

    while let Some(key) = cursor.next_key() {
        trace!(next_key = %hex::encode(&key), "requesting validators page");
        let response = conn
            .validators(proto::QueryValidatorsRequest {
                status: String::new(),
                pagination: page_request(key),
            })
            .await
            .map_err(|status| GrpcError::query(VALIDATORS, status))?;

        for validator in response.validators {
            let resolved = registry
                .resolve_validator(validator)
                .map_err(|source| GrpcError::Decode {
                    endpoint: VALIDATORS,
                    source,
                })?;
            vals.push(resolved);
        }
        cursor.advance(response.pagination);
    }

    debug!(count = vals.len(), pages = cursor.pages(), "fetched validators");
    Ok(vals)
}

/// Read the latest block header.
///
/// Prefers `sdk_block` and falls back to the legacy `block` field.
pub async fn latest_block<C: QueryConnection>(conn: &mut C) -> GrpcResult<LatestBlock> {
    let response = conn
        .latest_block(proto::GetLatestBlockRequest {})
        .await
        .map_err(|status| GrpcError::query(LATEST_BLOCK, status))?;

    let header = response
        .sdk_block
        .and_then(|b| b.header)
        .or_else(|| response.block.and_then(|b| b.header))
        .ok_or(GrpcError::EmptyResponse {
            endpoint: LATEST_BLOCK,
        })?;

    debug!(height = header.height, chain_id = %header.chain_id, "latest block");
    Ok(LatestBlock {
        height: header.height,
        chain_id: header.chain_id,
    })
}

/// Close `conn`, folding a close failure into `result`.
pub async fn release<C: QueryConnection, T>(conn: C, result: GrpcResult<T>) -> GrpcResult<T> {
    match (result, conn.close().await) {
        (result, Ok(())) => result,
        (Ok(_), Err(close)) => Err(close),
        (Err(err), Err(close)) => Err(err.chain(close)),
    }
}

pub async fn fetch_signing_infos<K: Connector>(connector: &K) -> GrpcResult<Vec<SigningInfo>> {
    let mut conn = connector.connect().await?;
    let result = signing_infos(&mut conn).await;
    release(conn, result).await
}

pub async fn fetch_validators<K: Connector>(connector: &K) -> GrpcResult<Vec<StakingValidator>> {
    let registry = KeyRegistry::default();
    let mut conn = connector.connect().await?;
    let result = validators(&mut conn, &registry).await;
    release(conn, result).await
}

pub async fn fetch_latest_block<K: Connector>(connector: &K) -> GrpcResult<LatestBlock> {
    let mut conn = connector.connect().await?;
    let result = latest_block(&mut conn).await;
    release(conn, result).await
}

/// Height of the node's latest block. Used as the startup connectivity probe.
pub async fn fetch_latest_block_height<K: Connector>(connector: &K) -> GrpcResult<i64> {
    fetch_latest_block(connector).await.map(|block| block.height)
}

/// Fetch signing infos, then validators, over a single connection.
pub async fn fetch_signing_state<K: Connector>(connector: &K) -> GrpcResult<SigningState> {
    let registry = KeyRegistry::default();
    let mut conn = connector.connect().await?;

    let result = async {
        let signing_infos = signing_infos(&mut conn).await?;
        let validators = validators(&mut conn, &registry).await?;
        Ok::<_, GrpcError>(SigningState {
            signing_infos,
            validators,
        })
    }
    .await;

    release(conn, result).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{self, MockConnector};
    use crate::registry::ED25519_PUBKEY_TYPE_URL;
    use tonic::Status;
    use valex_core::{BondStatus, ConsensusKey};

    #[tokio::test]
    async fn accumulates_pages_in_order() {
        let connector = MockConnector::new()
            .with_signing_page(
                vec![mock::signing_info("a", 1), mock::signing_info("b", 2)],
                Some(&b"c2"[..]),
            )
            .with_signing_page(vec![mock::signing_info("c", 3)], Some(&b"c3"[..]))
            .with_signing_page(vec![mock::signing_info("d", 4)], Some(&b""[..]));

        let infos = fetch_signing_infos(&connector).await.unwrap();
        let addrs: Vec<_> = infos.iter().map(|i| i.consensus_address.as_str()).collect();
        assert_eq!(addrs, ["a", "b", "c", "d"]);
        assert_eq!(infos[2].missed_blocks_counter, 3);

        assert_eq!(
            connector.requested_keys(mock::Endpoint::SigningInfos),
            vec![Vec::new(), b"c2".to_vec(), b"c3".to_vec()]
        );
    }

    #[tokio::test]
    async fn no_pagination_metadata_stops_after_one_page() {
        let connector = MockConnector::new()
            .with_signing_page(vec![mock::signing_info("a", 5)], None)
            // Must never be requested.
            .with_signing_page(vec![mock::signing_info("z", 9)], Some(&b""[..]));

        let infos = fetch_signing_infos(&connector).await.unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].consensus_address, "a");
        assert_eq!(connector.requested_keys(mock::Endpoint::SigningInfos).len(), 1);
    }

    #[tokio::test]
    async fn validators_are_resolved_across_pages() {
        let connector = MockConnector::new()
            .with_validator_page(vec![mock::validator("op1", "Node1", [1; 32], 3)], Some(&b"next"[..]))
            .with_validator_page(vec![mock::validator("op2", "Node2", [2; 32], 2)], None);

        let vals = fetch_validators(&connector).await.unwrap();
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0].moniker, "Node1");
        assert_eq!(vals[0].consensus_key, ConsensusKey::Ed25519(vec![1; 32]));
        assert_eq!(vals[1].bond_status, BondStatus::Unbonding);
        assert_eq!(connector.closed_connections(), 1);
    }

    #[tokio::test]
    async fn undecodable_validator_fails_the_fetch() {
        let mut bad = mock::validator("op1", "Node1", [1; 32], 3);
        bad.consensus_pubkey = Some(crate::registry::pack_key("/unknown.PubKey", &[0; 32]));
        let connector = MockConnector::new().with_validator_page(vec![bad], None);

        let err = fetch_validators(&connector).await.unwrap_err();
        assert!(matches!(err, GrpcError::Decode { endpoint: "validators", .. }));
        assert_eq!(connector.closed_connections(), 1);
    }

    #[tokio::test]
    async fn page_error_aborts_and_still_closes() {
        let connector = MockConnector::new()
            .with_signing_page(vec![mock::signing_info("a", 1)], Some(&b"k2"[..]))
            .with_signing_error(Status::unavailable("node down"));

        let err = fetch_signing_infos(&connector).await.unwrap_err();
        assert!(matches!(err, GrpcError::Query { endpoint: "signing infos", .. }));
        assert_eq!(connector.open_connections(), 1);
        assert_eq!(connector.closed_connections(), 1);
    }

    #[tokio::test]
    async fn close_failure_after_success_is_an_error() {
        let connector = MockConnector::new()
            .with_signing_page(vec![mock::signing_info("a", 1)], None)
            .failing_close("connection reset");

        let err = fetch_signing_infos(&connector).await.unwrap_err();
        assert!(matches!(err, GrpcError::Close { .. }));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn close_failure_is_chained_after_query_error() {
        let connector = MockConnector::new()
            .with_signing_error(Status::internal("boom"))
            .failing_close("connection reset");

        let err = fetch_signing_infos(&connector).await.unwrap_err();
        match &err {
            GrpcError::Chained { source, close } => {
                assert!(matches!(**source, GrpcError::Query { .. }));
                assert!(matches!(**close, GrpcError::Close { .. }));
            }
            other => panic!("expected chained error, got {other:?}"),
        }
        assert!(err.to_string().contains("boom"));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn connect_failure_opens_nothing() {
        let connector = MockConnector::new().failing_connect();

        let err = fetch_latest_block_height(&connector).await.unwrap_err();
        assert!(matches!(err, GrpcError::Connection { .. }));
        assert_eq!(connector.closed_connections(), 0);
    }

    #[tokio::test]
    async fn latest_block_prefers_sdk_block() {
        let connector = MockConnector::new().with_latest_block(proto::GetLatestBlockResponse {
            block: Some(mock::block(10, "old")),
            sdk_block: Some(mock::block(11, "constantine-3")),
        });

        let block = fetch_latest_block(&connector).await.unwrap();
        assert_eq!(
            block,
            LatestBlock {
                height: 11,
                chain_id: "constantine-3".to_string()
            }
        );
    }

    #[tokio::test]
    async fn latest_block_falls_back_to_legacy_block() {
        let connector = MockConnector::new().with_latest_block(proto::GetLatestBlockResponse {
            block: Some(mock::block(42, "archway-1")),
            sdk_block: None,
        });

        assert_eq!(fetch_latest_block_height(&connector).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn latest_block_without_header_is_empty_response() {
        let connector = MockConnector::new().with_latest_block(proto::GetLatestBlockResponse {
            block: Some(proto::Block { header: None }),
            sdk_block: None,
        });

        let err = fetch_latest_block_height(&connector).await.unwrap_err();
        assert!(matches!(err, GrpcError::EmptyResponse { endpoint: "latest block" }));
    }

    #[tokio::test]
    async fn signing_state_uses_one_connection() {
        let connector = MockConnector::new()
            .with_signing_page(vec![mock::signing_info("a", 1)], None)
            .with_validator_page(vec![mock::validator("op1", "Node1", [1; 32], 3)], None);

        let state = fetch_signing_state(&connector).await.unwrap();
        assert_eq!(state.signing_infos.len(), 1);
        assert_eq!(state.validators.len(), 1);
        assert_eq!(connector.open_connections(), 1);
        assert_eq!(connector.closed_connections(), 1);
    }

    #[tokio::test]
    async fn signing_state_stops_before_validators_on_error() {
        let connector = MockConnector::new()
            .with_signing_error(Status::deadline_exceeded("slow"))
            .with_validator_page(vec![mock::validator("op1", "Node1", [1; 32], 3)], None);

        assert!(fetch_signing_state(&connector).await.is_err());
        assert!(connector.requested_keys(mock::Endpoint::Validators).is_empty());
        assert_eq!(connector.closed_connections(), 1);
    }

    #[test]
    fn pack_key_uses_ed25519_url() {
        let v = mock::validator("op", "m", [0; 32], 3);
        assert_eq!(v.consensus_pubkey.unwrap().type_url, ED25519_PUBKEY_TYPE_URL);
    }
}
