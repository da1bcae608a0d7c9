//! Connection seam and the tonic-backed implementation.
//!
//! A [`Connector`] opens one [`QueryConnection`] per operation. The query
//! logic in [`crate::query`] only sees these traits, so it runs unchanged
//! against a real node or the in-memory mock.

use std::time::Duration;

use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::Status;
use tracing::{debug, warn};

use valex_core::ExporterConfig;

use crate::error::{describe, GrpcError, GrpcResult};
use crate::proto;

/// One open connection able to issue the three upstream queries.
#[tonic::async_trait]
pub trait QueryConnection: Send {
    async fn signing_infos(
        &mut self,
        request: proto::QuerySigningInfosRequest,
    ) -> Result<proto::QuerySigningInfosResponse, Status>;

    async fn validators(
        &mut self,
        request: proto::QueryValidatorsRequest,
    ) -> Result<proto::QueryValidatorsResponse, Status>;

    async fn latest_block(
        &mut self,
        request: proto::GetLatestBlockRequest,
    ) -> Result<proto::GetLatestBlockResponse, Status>;

    /// Release the connection.
    async fn close(self) -> GrpcResult<()>;
}

/// Opens connections to the upstream node.
#[tonic::async_trait]
pub trait Connector: Send + Sync {
    type Connection: QueryConnection;

    async fn connect(&self) -> GrpcResult<Self::Connection>;
}

/// Dials the upstream node over HTTP/2, with or without TLS.
#[derive(Debug, Clone)]
pub struct GrpcConnector {
    addr: String,
    tls: bool,
    timeout: Duration,
}

impl GrpcConnector {
    pub fn new(addr: impl Into<String>, tls: bool, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            tls,
            timeout,
        }
    }

    pub fn from_config(config: &ExporterConfig) -> Self {
        Self::new(config.grpc_addr.clone(), config.tls, config.timeout())
    }

    /// The URI dialed for the configured address.
    ///
    /// A bare `host:port` gets `https://` or `http://` depending on the TLS
    /// flag. An address that already carries a scheme is used as is.
    pub fn uri(&self) -> String {
        if self.addr.contains("://") {
            self.addr.clone()
        } else if self.tls {
            format!("https://{}", self.addr)
        } else {
            format!("http://{}", self.addr)
        }
    }

    fn endpoint(&self) -> GrpcResult<Endpoint> {
        let endpoint = Endpoint::from_shared(self.uri())
            .map_err(|e| self.connection_error(&e))?
            .connect_timeout(self.timeout)
            .timeout(self.timeout);

        if !self.tls {
            return Ok(endpoint);
        }

        endpoint
            .tls_config(ClientTlsConfig::new().with_native_roots())
            .map_err(|e| self.connection_error(&e))
    }

    fn connection_error(&self, err: &(dyn std::error::Error + 'static)) -> GrpcError {
        GrpcError::Connection {
            addr: self.addr.clone(),
            reason: describe(err),
        }
    }
}

#[tonic::async_trait]
impl Connector for GrpcConnector {
    type Connection = GrpcConnection;

    async fn connect(&self) -> GrpcResult<GrpcConnection> {
        let channel = self.endpoint()?.connect().await.map_err(|e| {
            warn!(addr = %self.addr, tls = self.tls, error = %describe(&e), "failed to connect");
            self.connection_error(&e)
        })?;

        debug!(addr = %self.addr, tls = self.tls, "connected to upstream");
        Ok(GrpcConnection {
            addr: self.addr.clone(),
            inner: tonic::client::Grpc::new(channel),
        })
    }
}

/// A live tonic channel to the upstream node.
pub struct GrpcConnection {
    addr: String,
    inner: tonic::client::Grpc<Channel>,
}

impl GrpcConnection {
    async fn unary<Req, Resp>(&mut self, request: Req, path: &'static str) -> Result<Resp, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("service was not ready: {}", describe(&e))))?;

        let codec = tonic::codec::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static(path);
        let response = self
            .inner
            .unary(tonic::Request::new(request), path, codec)
            .await?;
        Ok(response.into_inner())
    }
}

#[tonic::async_trait]
impl QueryConnection for GrpcConnection {
    async fn signing_infos(
        &mut self,
        request: proto::QuerySigningInfosRequest,
    ) -> Result<proto::QuerySigningInfosResponse, Status> {
        self.unary(request, proto::path::SIGNING_INFOS).await
    }

    async fn validators(
        &mut self,
        request: proto::QueryValidatorsRequest,
    ) -> Result<proto::QueryValidatorsResponse, Status> {
        self.unary(request, proto::path::VALIDATORS).await
    }

    async fn latest_block(
        &mut self,
        request: proto::GetLatestBlockRequest,
    ) -> Result<proto::GetLatestBlockResponse, Status> {
        self.unary(request, proto::path::GET_LATEST_BLOCK).await
    }

    async fn close(self) -> GrpcResult<()> {
        // Dropping the last handle tears the HTTP/2 connection down; tonic
        // reports nothing back, so this cannot fail.
        drop(self.inner);
        debug!(addr = %self.addr, "closed upstream connection");
        Ok(())
    }
}
