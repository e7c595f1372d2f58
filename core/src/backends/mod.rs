//! Concrete `Transport` implementations.

#[cfg(feature = "reqwest")]
pub mod reqwest_backend;

#[cfg(feature = "reqwest")]
pub use reqwest_backend::{ReqwestResponse, ReqwestTransport};
