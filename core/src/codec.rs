//! Stateless request builder and response parser.
//!
//! # Design
//! `JsonCodec` holds only a validated base URL and carries no mutable state
//! between calls. `build_get` / `build_post` produce an `HttpRequest`;
//! `parse_response` consumes an `HttpResponse`. Whoever sits in between
//! performs the round-trip, which keeps this half deterministic and lets a
//! foreign host drive it through the FFI crate. `HttpClient` layers an async
//! `Transport` on top of the same routines.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::endpoint::BaseUrl;
use crate::error::ApiError;
use crate::http::{is_success, HttpMethod, HttpRequest, HttpResponse, APPLICATION_JSON, CONTENT_TYPE};
use crate::query::QueryParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonCodec {
    base_url: BaseUrl,
}

impl JsonCodec {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: BaseUrl::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn build_get(&self, endpoint: &str, query: Option<&QueryParams>) -> Result<HttpRequest, ApiError> {
        let url = self.base_url.resolve(endpoint, query)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.into(),
            headers: json_headers(),
            body: None,
        })
    }

    pub fn build_post<B>(&self, endpoint: &str, body: &B) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.base_url.resolve(endpoint, None)?;
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: url.into(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        check_status(response.status)?;
        decode_body(&response.body)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())]
}

/// Reject anything outside the 2xx class.
pub(crate) fn check_status(status: u16) -> Result<(), ApiError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(ApiError::Status { status })
    }
}

pub(crate) fn decode_body<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}
