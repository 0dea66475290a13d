//! Default reqwest-backed transport

use super::{Transport, TransportRequest, TransportResponse};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// [`Transport`] implementation on top of a shared [`reqwest::Client`].
///
/// Timeouts are applied per attempt from the request, not on the
/// underlying client, so one transport can serve callers with
/// different budgets.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh connection pool
    pub fn new(user_agent: &str) -> Self {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn issue(&self, request: TransportRequest<'_>) -> Result<TransportResponse> {
        let mut req = self
            .client
            .request(request.method.into(), request.url)
            .timeout(request.timeout);

        for (key, value) in request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            req = req.query(request.query);
        }

        if let Some(body) = request.body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        debug!(
            method = %request.method,
            url = request.url,
            status = status.as_u16(),
            "attempt completed"
        );

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

/// Map a reqwest failure to the transport error taxonomy
fn classify(error: reqwest::Error, timeout: Duration) -> Error {
    if error.is_timeout() {
        Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        Error::transport(error.to_string())
    }
}
