//! HTTP transport seam between the gateway and the network stack.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Raw response as seen by the gateway before envelope decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Http failure response for {path}: 0 Unknown Error ({detail})")]
    Network { path: String, detail: String },
    #[error("Http request to {path} timed out ({detail})")]
    Timeout { path: String, detail: String },
    #[error("invalid request url for {path}: {detail}")]
    InvalidUrl { path: String, detail: String },
    #[error("failed to build http client: {0}")]
    Client(String),
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<HttpReply, TransportError>;
    async fn post(&self, path: &str, body: &serde_json::Value)
        -> Result<HttpReply, TransportError>;
}

pub struct ReqwestTransport {
    http: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        let raw = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|err| TransportError::InvalidUrl {
            path: path.to_string(),
            detail: err.to_string(),
        })
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        path: &str,
    ) -> Result<HttpReply, TransportError> {
        debug!(method, path, "sending chart api request");
        let response = request.send().await.map_err(|err| map_send_error(path, &err))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| map_send_error(path, &err))?;
        debug!(method, path, status, body_len = body.len(), "chart api responded");
        Ok(HttpReply { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<HttpReply, TransportError> {
        let url = self.endpoint(path)?;
        self.execute(self.http.get(url), "GET", path).await
    }

    async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<HttpReply, TransportError> {
        let url = self.endpoint(path)?;
        self.execute(self.http.post(url).json(body), "POST", path)
            .await
    }
}

fn map_send_error(path: &str, err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            path: path.to_string(),
            detail: err.to_string(),
        }
    } else {
        TransportError::Network {
            path: path.to_string(),
            detail: err.to_string(),
        }
    }
}
