//! HTTP routes for the scrape endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use valex_grpc::Connector;

use crate::collector::MissedBlocksCollector;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Build the exporter router: `/metrics` plus a `/healthz` liveness probe.
pub fn build_router<K: Connector + 'static>(collector: Arc<MissedBlocksCollector<K>>) -> Router {
    Router::new()
        .route("/metrics", get(prometheus_metrics::<K>))
        .route("/healthz", get(healthz))
        .with_state(collector)
}

/// GET /metrics — always 200; a failed scrape just has no samples.
pub async fn prometheus_metrics<K: Connector + 'static>(
    State(collector): State<Arc<MissedBlocksCollector<K>>>,
) -> impl IntoResponse {
    let body = collector.scrape().await;
    (StatusCode::OK, [("content-type", CONTENT_TYPE)], body)
}

/// GET /healthz
pub async fn healthz() -> &'static str {
    "ok"
}
