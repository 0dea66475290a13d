//! Transport seam
//!
//! A [`Transport`] issues exactly one HTTP attempt and reports what came
//! back; retry, envelope decoding, and pagination all live above it. The
//! crate ships a reqwest-backed default, and anything implementing the
//! trait (a recorded mock, a middleware stack) can stand in for it.

mod client;

pub use client::ReqwestTransport;

#[cfg(test)]
pub(crate) mod mock;

use crate::error::Result;
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// One outgoing attempt
#[derive(Debug, Clone)]
pub struct TransportRequest<'a> {
    pub method: Method,
    /// Fully resolved URL, query string excluded
    pub url: &'a str,
    /// Ordered query parameters
    pub query: &'a [(String, String)],
    pub headers: &'a HashMap<String, String>,
    /// JSON body, serialized by the transport
    pub body: Option<&'a JsonValue>,
    /// Wall-clock budget for this single attempt
    pub timeout: Duration,
}

/// What one attempt produced, success or not
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single request attempt.
///
/// Implementations return `Err` only for transport-level failures
/// (connect error, timeout); any received response, whatever its
/// status, is an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn issue(&self, request: TransportRequest<'_>) -> Result<TransportResponse>;
}
