//! Upstream client error types.

use thiserror::Error;
use valex_core::DecodeError;

/// Result type alias for upstream operations.
pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors produced while talking to the upstream node.
///
/// Every variant names the stage that failed. Callers on the scrape path do
/// not branch on the variant: any error means "no data for this scrape".
#[derive(Debug, Error)]
pub enum GrpcError {
    #[error("connect to {addr}: {reason}")]
    Connection { addr: String, reason: String },

    #[error("{endpoint} query failed: {}", .status.message())]
    Query {
        endpoint: &'static str,
        #[source]
        status: tonic::Status,
    },

    #[error("got empty response from {endpoint} endpoint")]
    EmptyResponse { endpoint: &'static str },

    #[error("{endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: DecodeError,
    },

    #[error("close connection to {addr}: {reason}")]
    Close { addr: String, reason: String },

    #[error("{source}; {close}")]
    Chained {
        #[source]
        source: Box<GrpcError>,
        close: Box<GrpcError>,
    },
}

impl GrpcError {
    pub(crate) fn query(endpoint: &'static str, status: tonic::Status) -> Self {
        GrpcError::Query { endpoint, status }
    }

    /// Fold a close failure in after this error.
    pub fn chain(self, close: GrpcError) -> Self {
        GrpcError::Chained {
            source: Box::new(self),
            close: Box::new(close),
        }
    }

    /// True if a connection close failed somewhere in this error.
    pub fn involves_close(&self) -> bool {
        match self {
            GrpcError::Close { .. } => true,
            GrpcError::Chained { source, close } => {
                source.involves_close() || close.involves_close()
            }
            _ => false,
        }
    }
}

/// Render an error together with its `source()` chain.
pub(crate) fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut next = err.source();
    while let Some(cause) = next {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        next = cause.source();
    }
    out
}
