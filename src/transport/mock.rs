//! Recording mock transport for deterministic retry and wave accounting
//!
//! Wiremock exercises the real socket path; this mock exists for the
//! assertions a real server cannot make cheap: exact attempt counts,
//! dispatch order, and scripted transport failures.

use super::{Transport, TransportRequest, TransportResponse};
use crate::error::Result;
use crate::types::Method;
use async_trait::async_trait;
use std::sync::Mutex;

/// One recorded attempt
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl CallRecord {
    /// Value of a query parameter on this attempt
    pub fn query_get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Handler = dyn Fn(&TransportRequest<'_>) -> Result<TransportResponse> + Send + Sync;

/// A [`Transport`] that records every attempt and answers from a
/// scripted handler
pub struct MockTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<CallRecord>>,
}

impl MockTransport {
    pub fn new(
        handler: impl Fn(&TransportRequest<'_>) -> Result<TransportResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every attempt issued so far, in dispatch order
    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn count_method(&self, method: Method) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.method == method)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn issue(&self, request: TransportRequest<'_>) -> Result<TransportResponse> {
        self.calls.lock().unwrap().push(CallRecord {
            method: request.method,
            url: request.url.to_string(),
            query: request.query.to_vec(),
        });
        (self.handler)(&request)
    }
}

/// Shorthand for a 200 response with the given body
pub fn ok(body: impl Into<String>) -> Result<TransportResponse> {
    Ok(TransportResponse {
        status: 200,
        status_text: "OK".to_string(),
        body: body.into(),
    })
}

/// Shorthand for an empty 204 response
pub fn no_content() -> Result<TransportResponse> {
    Ok(TransportResponse {
        status: 204,
        status_text: "No Content".to_string(),
        body: String::new(),
    })
}

/// Shorthand for an arbitrary status response
pub fn status(status: u16, status_text: &str, body: &str) -> Result<TransportResponse> {
    Ok(TransportResponse {
        status,
        status_text: status_text.to_string(),
        body: body.to_string(),
    })
}
