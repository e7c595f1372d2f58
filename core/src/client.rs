//! Async JSON client over a pluggable transport.
//!
//! `HttpClient` pairs a `JsonCodec` with a `Transport`. It adds no state of
//! its own, performs no retries and emits no logs; every call is one
//! independent exchange, so a single instance can serve concurrent callers.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{check_status, decode_body, JsonCodec};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::query::QueryParams;
use crate::transport::{Transport, TransportResponse};

#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    codec: JsonCodec,
    transport: T,
}

impl<T> HttpClient<T> {
    pub fn new(base_url: &str, transport: T) -> Result<Self, ApiError> {
        Ok(Self {
            codec: JsonCodec::new(base_url)?,
            transport,
        })
    }

    pub fn from_config(config: &ClientConfig, transport: T) -> Result<Self, ApiError> {
        Self::new(&config.base_url, transport)
    }

    pub fn codec(&self) -> &JsonCodec {
        &self.codec
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(feature = "reqwest")]
impl HttpClient<crate::backends::ReqwestTransport> {
    /// Client on a reqwest transport configured from `config`.
    pub fn with_reqwest(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = crate::backends::ReqwestTransport::from_config(config)?;
        Self::from_config(config, transport)
    }
}

impl<T: Transport> HttpClient<T> {
    /// GET `endpoint`, appending `query` when it is present and non-empty.
    pub async fn get<R>(&self, endpoint: &str, query: Option<&QueryParams>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let request = self.codec.build_get(endpoint, query)?;
        let response = self.transport.execute(request).await?;
        handle_response(response).await
    }

    /// POST `body` as JSON to `endpoint`.
    pub async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.codec.build_post(endpoint, body)?;
        let response = self.transport.execute(request).await?;
        handle_response(response).await
    }
}

/// Status check first, body second: a rejected response is never read.
pub async fn handle_response<R, S>(response: S) -> Result<R, ApiError>
where
    R: DeserializeOwned,
    S: TransportResponse,
{
    check_status(response.status())?;
    let body = response.text().await?;
    decode_body(&body)
}
