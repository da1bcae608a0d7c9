//! Metrics adapter error types.

use std::time::Duration;

use thiserror::Error;
use valex_join::JoinError;

pub type MetricsResult<T> = Result<T, MetricsError>;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("fetch-and-join timed out after {0:?}")]
    Timeout(Duration),

    #[error("error getting signing validators: {0}")]
    Fetch(#[from] JoinError),

    #[error("prometheus: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("exposition is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
