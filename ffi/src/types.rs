//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use api_client::error::ApiError;
use api_client::http::HttpMethod;

/// Opaque handle to a `JsonCodec`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiApiClient {
    pub(crate) inner: api_client::JsonCodec,
}

/// Copy `s` into a heap C string. Interior NULs are dropped rather than
/// failing, since JSON and URLs produced by the core never contain them.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c) => c.into_raw(),
        Err(e) => {
            let mut bytes = e.into_vec();
            bytes.retain(|b| *b != 0);
            CString::new(bytes).unwrap_or_default().into_raw()
        }
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `api_build_*` functions. The C caller executes the request
/// and passes the response back through `api_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: api_client::HttpRequest) -> *mut Self {
        let url = to_c_string(req.url);
        let body = match req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request,
/// then passes a pointer to `api_parse_response`. The FFI layer reads but
/// does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiApiResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Status = 1,
    Parse = 2,
    Serialization = 3,
    InvalidUrl = 4,
    InvalidQuery = 5,
    Transport = 6,
    Config = 7,
    Panic = 8,
    NullArg = 9,
}

/// Result envelope for parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `json`
/// holds the decoded body re-serialized as compact JSON.
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, `http_status` is set for `Status` errors, and
/// `json` is null.
#[repr(C)]
pub struct FfiApiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub json: *mut c_char,
}

impl FfiApiResult {
    pub(crate) fn ok_json(value: serde_json::Value) -> *mut Self {
        Box::into_raw(Box::new(FfiApiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            json: to_c_string(value.to_string()),
        }))
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::Status { status } => (FfiErrorCode::Status, *status),
            ApiError::Parse(_) => (FfiErrorCode::Parse, 0),
            ApiError::Serialization(_) => (FfiErrorCode::Serialization, 0),
            ApiError::InvalidUrl(_) => (FfiErrorCode::InvalidUrl, 0),
            ApiError::InvalidQuery(_) => (FfiErrorCode::InvalidQuery, 0),
            ApiError::Config(_) => (FfiErrorCode::Config, 0),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
        };
        Self::error(error_code, http_status, err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, 0, msg.to_string())
    }

    fn error(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiApiResult {
            error_code,
            error_message: to_c_string(msg),
            http_status,
            json: std::ptr::null_mut(),
        }))
    }
}
