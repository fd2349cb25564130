//! The seam between the playground and the execution service.

use crate::config::Config;
use crate::error::{self, Error, TransportError};
use crate::wire::{ExecuteRequest, ExecuteResponse};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

/// A remote service that can run code and answer health checks.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Run one job. Any failure to obtain a decodable answer is a `TransportError`.
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, TransportError>;

    /// `Ok` only if the service answered with a 2xx status.
    async fn health(&self) -> Result<(), TransportError>;
}

/// `RemoteService` over HTTP: `POST {base}/execute` and `GET {base}/health`.
#[derive(Clone, Debug)]
pub struct HttpService {
    client: Client,
    execute_url: Url,
    health_url: Url,
    health_timeout: Duration,
}

impl HttpService {
    pub fn new(server_url: &str, health_timeout: Duration) -> error::Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            execute_url: endpoint(server_url, "execute")?,
            health_url: endpoint(server_url, "health")?,
            health_timeout,
        })
    }

    pub fn from_config(config: &Config) -> error::Result<Self> {
        Self::new(&config.server_url, config.health_timeout())
    }
}

// Url::join would replace the last path segment of e.g. `/api`.
fn endpoint(server_url: &str, path: &str) -> error::Result<Url> {
    let joined = format!("{}/{}", server_url.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| Error::InvalidUrl {
        url: server_url.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl RemoteService for HttpService {
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, TransportError> {
        let response = self
            .client
            .post(self.execute_url.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        // the service reports failures in the body, so decode whatever the status
        let body = response.bytes().await?;
        ExecuteResponse::decode(&body).map_err(|e| {
            debug!(%status, len = body.len(), "undecodable execute response");
            TransportError::Decode(e)
        })
    }

    async fn health(&self) -> Result<(), TransportError> {
        let response = self
            .client
            .get(self.health_url.clone())
            .timeout(self.health_timeout)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TransportError::Status(status.as_u16()))
        }
    }
}
