//! valex-grpc — upstream query client for the validator exporter.
//!
//! Talks to a Cosmos SDK node over gRPC and returns the slashing and
//! staking records the joiner merges into one validator view.
//!
//! # Architecture
//!
//! ```text
//! Connector (GrpcConnector | MockConnector)
//!   └── connect() → QueryConnection
//!         ├── signing_infos()  ← paginated, cursor loop in query.rs
//!         ├── validators()     ← paginated, keys resolved via KeyRegistry
//!         ├── latest_block()   ← unpaginated startup probe
//!         └── close()          ← failures chained into the operation error
//! ```

pub mod client;
pub mod error;
pub mod pagination;
pub mod proto;
pub mod query;
pub mod registry;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::{Connector, GrpcConnection, GrpcConnector, QueryConnection};
pub use error::{GrpcError, GrpcResult};
pub use query::{
    fetch_latest_block, fetch_latest_block_height, fetch_signing_infos, fetch_signing_state,
    fetch_validators, LatestBlock, SigningState,
};
pub use registry::KeyRegistry;
