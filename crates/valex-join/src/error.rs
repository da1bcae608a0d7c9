//! Joiner error types.

use thiserror::Error;
use valex_grpc::GrpcError;

/// Result type alias for fetch-and-join operations.
pub type JoinResult<T> = Result<T, JoinError>;

#[derive(Debug, Error)]
pub enum JoinError {
    #[error("derive consensus address with prefix {hrp}: {reason}")]
    Address { hrp: String, reason: String },

    #[error(transparent)]
    Upstream(#[from] GrpcError),
}
