//! reqwest-based `Transport`

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::{Transport, TransportResponse};

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already configured `reqwest::Client`.
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    /// Build a client honoring the optional timeout in `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let inner = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Response = ReqwestResponse;

    async fn execute(&self, request: HttpRequest) -> Result<Self::Response, TransportError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };
        let mut builder = self.inner.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        debug!(status = response.status().as_u16(), url = %request.url, "received response");
        Ok(ReqwestResponse { inner: response })
    }
}

/// Unread `reqwest::Response`.
#[derive(Debug)]
pub struct ReqwestResponse {
    inner: reqwest::Response,
}

#[async_trait]
impl TransportResponse for ReqwestResponse {
    fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    async fn text(self) -> Result<String, TransportError> {
        self.inner.text().await.map_err(TransportError::from)
    }
}
