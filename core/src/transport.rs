//! The seam between `HttpClient` and whatever performs network I/O.
//!
//! A transport only has to send a request and hand back something that
//! exposes a status code and, on demand, the body text. Keeping the body
//! read separate from `execute` lets the client reject non-2xx responses
//! without ever touching their bodies.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    type Response: TransportResponse;

    async fn execute(&self, request: HttpRequest) -> Result<Self::Response, TransportError>;
}

/// A response whose body has not necessarily been read yet.
#[async_trait]
pub trait TransportResponse: Send {
    fn status(&self) -> u16;

    /// Consume the response and read its body as text.
    async fn text(self) -> Result<String, TransportError>;
}

#[async_trait]
impl TransportResponse for HttpResponse {
    fn status(&self) -> u16 {
        self.status
    }

    async fn text(self) -> Result<String, TransportError> {
        Ok(self.body)
    }
}

#[async_trait]
impl<T: Transport> Transport for std::sync::Arc<T> {
    type Response = T::Response;

    async fn execute(&self, request: HttpRequest) -> Result<Self::Response, TransportError> {
        (**self).execute(request).await
    }
}
