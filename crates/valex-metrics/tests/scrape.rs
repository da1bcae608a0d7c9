//! `/metrics` scrapes through the axum router.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tonic::Status;
use tower::ServiceExt;

use valex_grpc::mock::{self, MockConnection, MockConnector};
use valex_grpc::{Connector, GrpcResult};
use valex_metrics::{build_router, ChainLabels, MissedBlocksCollector, MissedBlocksDesc};

const ADDR_A: &str = "archwayvalcons1wtxkappzcsrlkmgfs6g0zyct0hkhashhu9yvxx";
const ADDR_B: &str = "archwayvalcons1wkrhhdqa8ya4lwz9tnnqanvdmgqp6p33pzy66z";

fn collector<K: Connector>(connector: K, timeout: Duration) -> Arc<MissedBlocksCollector<K>> {
    Arc::new(MissedBlocksCollector::new(
        connector,
        MissedBlocksDesc::new(),
        ChainLabels {
            chain_name: "archway".to_string(),
            chain_id: "constantine-3".to_string(),
        },
        "archway",
        timeout,
    ))
}

async fn get(router: axum::Router, path: &str) -> (StatusCode, String, String) {
    let resp = router
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn scrape_exposes_joined_validators() {
    let connector = MockConnector::new()
        .with_signing_page(
            vec![mock::signing_info(ADDR_A, 3), mock::signing_info(ADDR_B, 0)],
            None,
        )
        .with_validator_page(vec![mock::validator("archwayvaloper1a", "Node1", [1; 32], 3)], None);

    let router = build_router(collector(connector, Duration::from_secs(5)));
    let (status, content_type, body) = get(router, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));

    let samples: Vec<&str> = body
        .lines()
        .filter(|l| l.starts_with("cosmos_validator_missed_blocks{"))
        .collect();
    assert_eq!(samples.len(), 2);

    let a = samples.iter().find(|l| l.contains(ADDR_A)).unwrap();
    assert!(a.contains("moniker=\"Node1\""));
    assert!(a.contains("valoper=\"archwayvaloper1a\""));
    assert!(a.contains("bond_status=\"bonded\""));
    assert!(a.ends_with(" 3"));

    let b = samples.iter().find(|l| l.contains(ADDR_B)).unwrap();
    assert!(b.contains("moniker=\"\""));
    assert!(b.contains("bond_status=\"\""));
    assert!(b.ends_with(" 0"));
}

#[tokio::test]
async fn repeated_signing_info_yields_one_sample() {
    let connector = MockConnector::new()
        .with_signing_page(
            vec![mock::signing_info(ADDR_B, 1), mock::signing_info(ADDR_B, 5)],
            None,
        )
        .with_validator_page(vec![], None);

    let router = build_router(collector(connector, Duration::from_secs(5)));
    let (status, _, body) = get(router, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    let samples: Vec<&str> = body
        .lines()
        .filter(|l| l.starts_with("cosmos_validator_missed_blocks{"))
        .collect();
    assert_eq!(samples.len(), 1);
    assert!(samples[0].ends_with(" 5"));
}

#[tokio::test]
async fn upstream_failure_still_answers_ok() {
    let connector = MockConnector::new().with_signing_error(Status::unavailable("node down"));

    let router = build_router(collector(connector, Duration::from_secs(5)));
    let (status, _, body) = get(router, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("cosmos_validator_missed_blocks{"));
}

#[tokio::test]
async fn each_scrape_opens_its_own_connection() {
    let connector = MockConnector::new()
        .with_signing_page(vec![mock::signing_info(ADDR_A, 1)], None)
        .with_validator_page(vec![], None)
        .with_signing_page(vec![mock::signing_info(ADDR_A, 2)], None)
        .with_validator_page(vec![], None);

    let router = build_router(collector(connector.clone(), Duration::from_secs(5)));
    let (_, _, first) = get(router.clone(), "/metrics").await;
    let (_, _, second) = get(router, "/metrics").await;

    assert!(first.lines().any(|l| l.contains(ADDR_A) && l.ends_with(" 1")));
    assert!(second.lines().any(|l| l.contains(ADDR_A) && l.ends_with(" 2")));
    assert_eq!(connector.open_connections(), 2);
    assert_eq!(connector.closed_connections(), 2);
}

/// A node that accepts the connection and never answers.
struct StalledConnector;

#[tonic::async_trait]
impl Connector for StalledConnector {
    type Connection = MockConnection;

    async fn connect(&self) -> GrpcResult<MockConnection> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn timeout_yields_empty_scrape() {
    let router = build_router(collector(StalledConnector, Duration::from_millis(50)));
    let (status, _, body) = get(router, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn fetch_reports_timeout() {
    let c = collector(StalledConnector, Duration::from_millis(20));
    let err = c.fetch().await.unwrap_err();
    assert!(matches!(err, valex_metrics::MetricsError::Timeout(_)));
}

#[tokio::test]
async fn healthz_does_not_touch_upstream() {
    let connector = MockConnector::new().failing_connect();
    let router = build_router(collector(connector.clone(), Duration::from_secs(5)));

    let (status, _, body) = get(router, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    assert_eq!(connector.open_connections(), 0);
}
