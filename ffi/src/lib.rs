//! C-ABI wrapper around `api-client-core`.
//!
//! # Overview
//! Exposes the stateless half of the client (`JsonCodec`) through
//! `extern "C"` functions so any language with a C FFI can build requests
//! and interpret responses while performing the HTTP I/O itself.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Query parameters and POST bodies travel as JSON text; decoded response
//!   bodies come back as JSON text inside an `FfiApiResult` envelope.
//! - The C caller owns all returned pointers and must call the matching
//!   `api_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use api_client::{HttpResponse, QueryParams};

use types::*;

/// Borrow a C string as `&str`. Null and non-UTF-8 input yield `None`.
fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `base_url`.
///
/// Returns null if `base_url` is null, not a valid absolute http(s) URL, or
/// if an internal panic occurs.
/// The caller must free the returned pointer with `api_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn api_client_new(base_url: *const c_char) -> *mut FfiApiClient {
    catch_unwind(|| {
        let Some(url) = c_str(base_url) else {
            return std::ptr::null_mut();
        };
        match api_client::JsonCodec::new(url) {
            Ok(codec) => Box::into_raw(Box::new(FfiApiClient { inner: codec })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `api_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn api_client_free(client: *mut FfiApiClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build a GET request for `endpoint`.
///
/// `query_json` may be null (no query string) or a JSON object whose values
/// are strings or numbers. Returns null if `client` or `endpoint` is null,
/// or if the endpoint or query is invalid.
/// The caller must free the returned pointer with `api_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn api_build_get(
    client: *const FfiApiClient,
    endpoint: *const c_char,
    query_json: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(endpoint) = c_str(endpoint) else {
            return std::ptr::null_mut();
        };
        let query = if query_json.is_null() {
            None
        } else {
            let parsed = c_str(query_json).map(QueryParams::from_json_str);
            match parsed {
                Some(Ok(q)) => Some(q),
                _ => return std::ptr::null_mut(),
            }
        };
        match client.inner.build_get(endpoint, query.as_ref()) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a POST request sending `body_json` to `endpoint`.
///
/// `body_json` must be valid JSON; it is re-encoded compactly. Returns null
/// if any argument is null or invalid.
#[unsafe(no_mangle)]
pub extern "C" fn api_build_post(
    client: *const FfiApiClient,
    endpoint: *const c_char,
    body_json: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(endpoint), Some(body)) = (c_str(endpoint), c_str(body_json)) else {
            return std::ptr::null_mut();
        };
        let Ok(body) = serde_json::from_str::<serde_json::Value>(body) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_post(endpoint, &body) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response function
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_string_lossy().into_owned()
    };
    HttpResponse::new(resp.status, body)
}

/// Interpret the response to a request built by `api_build_*`.
///
/// Non-2xx statuses yield `error_code = Status` with `http_status` set;
/// a body that is not JSON yields `error_code = Parse`.
#[unsafe(no_mangle)]
pub extern "C" fn api_parse_response(
    client: *const FfiApiClient,
    response: *const FfiHttpResponse,
) -> *mut FfiApiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiApiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiApiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let core_resp = ffi_response_to_core(resp);
        match client.inner.parse_response::<serde_json::Value>(core_resp) {
            Ok(value) => FfiApiResult::ok_json(value),
            Err(e) => FfiApiResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiApiResult::panic("panic in api_parse_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `api_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn api_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize);
            let headers: Box<[FfiHeader]> = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiApiResult` returned by `api_parse_response`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn api_free_result(result: *mut FfiApiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.json);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn api_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
