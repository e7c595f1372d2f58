//! Async JSON API client core.
//!
//! # Overview
//! A thin request/response layer: resolve an endpoint against a fixed base
//! URL, issue a GET (with optional query parameters) or a JSON POST, and
//! fold the outcome into one result contract. Non-2xx responses become
//! `ApiError::Status`, unparsable bodies become `ApiError::Parse`, and
//! transport failures pass through as `ApiError::Transport`.
//!
//! # Design
//! - `JsonCodec` is the stateless half: it builds `HttpRequest` values and
//!   parses `HttpResponse` values without touching the network, so a foreign
//!   host can perform the I/O (see the FFI crate).
//! - `HttpClient<T>` pairs a codec with a `Transport` and exposes async
//!   `get` / `post`. It holds no mutable state; clients are injected, never
//!   global.
//! - `ReqwestTransport` (feature `reqwest`) is the bundled transport.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! # Example
//!
//! ```no_run
//! use api_client::{ClientConfig, HttpClient, PageRequest, PostsApi, PostsPage};
//!
//! async fn first_page() -> Result<PostsPage, api_client::ApiError> {
//!     let client = HttpClient::with_reqwest(&ClientConfig::new("https://api.example.com"))?;
//!     PostsApi::new(client).list(PageRequest::page(0, 10)).await
//! }
//! ```

pub mod backends;
pub mod client;
pub mod codec;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod posts;
pub mod query;
pub mod transport;
pub mod types;

#[cfg(feature = "reqwest")]
pub use backends::{ReqwestResponse, ReqwestTransport};
pub use client::{handle_response, HttpClient};
pub use codec::JsonCodec;
pub use config::ClientConfig;
pub use endpoint::BaseUrl;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use posts::PostsApi;
pub use query::{QueryParams, QueryValue};
pub use transport::{Transport, TransportResponse};
pub use types::{NewPost, PageRequest, Post, PostsPage};
