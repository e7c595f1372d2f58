//! HTTP exchange types shared by the codec and the transports.
//!
//! # Design
//! Requests and responses are plain data. `JsonCodec` builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; a
//! `Transport` (or a foreign host through the FFI crate) performs the actual
//! I/O. All fields are owned so values can cross an FFI boundary.

/// Header name sent with every request.
pub const CONTENT_TYPE: &str = "Content-Type";

/// The only wire format the client speaks.
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value, ignoring ASCII case in the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A buffered HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Response with no headers, handy for hosts that only track status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }
}

/// `true` for the 2xx class.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
