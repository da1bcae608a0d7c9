//! In-memory connector that replays queued responses.
//!
//! Every connection opened from one `MockConnector` shares the same queues,
//! so a test queues the pages up front and then inspects which cursor keys
//! were requested and how many connections were opened and closed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use tonic::Status;

use crate::client::{Connector, QueryConnection};
use crate::error::{GrpcError, GrpcResult};
use crate::proto;
use crate::registry::{pack_key, ED25519_PUBKEY_TYPE_URL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    SigningInfos,
    Validators,
    LatestBlock,
}

#[derive(Default)]
struct MockState {
    signing_pages: VecDeque<Result<proto::QuerySigningInfosResponse, Status>>,
    validator_pages: VecDeque<Result<proto::QueryValidatorsResponse, Status>>,
    latest_block: Option<Result<proto::GetLatestBlockResponse, Status>>,
    requests: Vec<(Endpoint, Vec<u8>)>,
    fail_connect: bool,
    close_error: Option<String>,
    opened: usize,
    closed: usize,
}

#[derive(Clone, Default)]
pub struct MockConnector {
    state: Arc<Mutex<MockState>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a signing-infos page. `None` sends no pagination metadata.
    pub fn with_signing_page(self, infos: Vec<proto::ValidatorSigningInfo>, next_key: Option<&[u8]>) -> Self {
        self.state().signing_pages.push_back(Ok(proto::QuerySigningInfosResponse {
            info: infos,
            pagination: page_response(next_key),
        }));
        self
    }

    pub fn with_signing_error(self, status: Status) -> Self {
        self.state().signing_pages.push_back(Err(status));
        self
    }

    /// Queue a validators page. `None` sends no pagination metadata.
    pub fn with_validator_page(self, validators: Vec<proto::Validator>, next_key: Option<&[u8]>) -> Self {
        self.state().validator_pages.push_back(Ok(proto::QueryValidatorsResponse {
            validators,
            pagination: page_response(next_key),
        }));
        self
    }

    pub fn with_validator_error(self, status: Status) -> Self {
        self.state().validator_pages.push_back(Err(status));
        self
    }

    pub fn with_latest_block(self, response: proto::GetLatestBlockResponse) -> Self {
        self.state().latest_block = Some(Ok(response));
        self
    }

    pub fn with_latest_block_error(self, status: Status) -> Self {
        self.state().latest_block = Some(Err(status));
        self
    }

    /// Make every `connect()` fail.
    pub fn failing_connect(self) -> Self {
        self.state().fail_connect = true;
        self
    }

    /// Make every `close()` fail with `reason`.
    pub fn failing_close(self, reason: &str) -> Self {
        self.state().close_error = Some(reason.to_string());
        self
    }

    /// Cursor keys sent to `endpoint`, in request order.
    pub fn requested_keys(&self, endpoint: Endpoint) -> Vec<Vec<u8>> {
        self.state()
            .requests
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, key)| key.clone())
            .collect()
    }

    pub fn open_connections(&self) -> usize {
        self.state().opened
    }

    pub fn closed_connections(&self) -> usize {
        self.state().closed
    }
}

fn page_response(next_key: Option<&[u8]>) -> Option<proto::PageResponse> {
    next_key.map(|key| proto::PageResponse {
        next_key: key.to_vec(),
        total: 0,
    })
}

fn exhausted(endpoint: Endpoint) -> Status {
    Status::out_of_range(format!("mock: no {endpoint:?} response queued"))
}

fn request_key(pagination: Option<proto::PageRequest>) -> Vec<u8> {
    pagination.map(|p| p.key).unwrap_or_default()
}

#[tonic::async_trait]
impl Connector for MockConnector {
    type Connection = MockConnection;

    async fn connect(&self) -> GrpcResult<MockConnection> {
        let mut state = self.state();
        if state.fail_connect {
            return Err(GrpcError::Connection {
                addr: "mock".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        state.opened += 1;
        Ok(MockConnection {
            state: Arc::clone(&self.state),
        })
    }
}

pub struct MockConnection {
    state: Arc<Mutex<MockState>>,
}

impl MockConnection {
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[tonic::async_trait]
impl QueryConnection for MockConnection {
    async fn signing_infos(
        &mut self,
        request: proto::QuerySigningInfosRequest,
    ) -> Result<proto::QuerySigningInfosResponse, Status> {
        let mut state = self.state();
        state.requests.push((Endpoint::SigningInfos, request_key(request.pagination)));
        state
            .signing_pages
            .pop_front()
            .unwrap_or_else(|| Err(exhausted(Endpoint::SigningInfos)))
    }

    async fn validators(
        &mut self,
        request: proto::QueryValidatorsRequest,
    ) -> Result<proto::QueryValidatorsResponse, Status> {
        let mut state = self.state();
        state.requests.push((Endpoint::Validators, request_key(request.pagination)));
        state
            .validator_pages
            .pop_front()
            .unwrap_or_else(|| Err(exhausted(Endpoint::Validators)))
    }

    async fn latest_block(
        &mut self,
        _request: proto::GetLatestBlockRequest,
    ) -> Result<proto::GetLatestBlockResponse, Status> {
        let mut state = self.state();
        state.requests.push((Endpoint::LatestBlock, Vec::new()));
        state
            .latest_block
            .clone()
            .unwrap_or_else(|| Err(exhausted(Endpoint::LatestBlock)))
    }

    async fn close(self) -> GrpcResult<()> {
        let mut state = self.state();
        state.closed += 1;
        match &state.close_error {
            Some(reason) => Err(GrpcError::Close {
                addr: "mock".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

pub fn signing_info(address: &str, missed_blocks: i64) -> proto::ValidatorSigningInfo {
    proto::ValidatorSigningInfo {
        address: address.to_string(),
        missed_blocks_counter: missed_blocks,
        ..Default::default()
    }
}

/// A staking validator with an ed25519 consensus key.
pub fn validator(operator: &str, moniker: &str, key: [u8; 32], status: i32) -> proto::Validator {
    proto::Validator {
        operator_address: operator.to_string(),
        consensus_pubkey: Some(pack_key(ED25519_PUBKEY_TYPE_URL, &key)),
        jailed: false,
        status,
        tokens: String::new(),
        description: Some(proto::Description {
            moniker: moniker.to_string(),
            ..Default::default()
        }),
    }
}

pub fn block(height: i64, chain_id: &str) -> proto::Block {
    proto::Block {
        header: Some(proto::Header {
            chain_id: chain_id.to_string(),
            height,
        }),
    }
}
