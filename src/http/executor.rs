//! One logical request with bounded retry

use crate::envelope::{decode_body, Fetched};
use crate::error::{is_retryable_status, Error, Result};
use crate::transport::{Transport, TransportRequest};
use crate::types::{JsonValue, Method, Query};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry behavior for one logical request.
///
/// Server errors and transport failures spend separate budgets: a 5xx
/// is re-attempted immediately, a failure that never produced a
/// response is re-attempted after exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Re-attempts allowed on a 5xx response
    pub max_attempts: u32,
    /// Re-attempts allowed on a transport failure
    pub transport_attempts: u32,
    /// Wall-clock budget per attempt
    pub timeout: Duration,
    /// First backoff delay after a transport failure
    pub initial_backoff: Duration,
    /// Backoff ceiling
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            transport_attempts: 3,
            timeout: Duration::from_millis(15_000),
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    /// Backoff delay before transport re-attempt number `attempt`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        std::cmp::min(self.initial_backoff * factor, self.max_backoff)
    }
}

/// Executes logical requests against one remote API.
///
/// Owns the base URL, the headers sent with every request, and the
/// retry budgets. Pagination metadata is returned with each call, never
/// held between calls.
pub struct Executor {
    transport: Arc<dyn Transport>,
    base_url: String,
    headers: HashMap<String, String>,
    retry: RetryConfig,
}

impl Executor {
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        headers: HashMap<String, String>,
        retry: RetryConfig,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            headers,
            retry,
        }
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Execute one logical request and decode the response envelope.
    ///
    /// Retries 5xx responses up to `max_attempts` extra attempts with no
    /// delay, and transport failures up to `transport_attempts` extra
    /// attempts with exponential backoff. A 4xx is fatal on the first
    /// response. The surfaced status error reads
    /// `"<status> - <statusText>: <bodyText>"`.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        query: &Query,
        body: Option<&JsonValue>,
    ) -> Result<Fetched> {
        let url = self.build_url(endpoint);
        let mut server_attempts = 0u32;
        let mut transport_attempts = 0u32;

        loop {
            let request = TransportRequest {
                method,
                url: &url,
                query,
                headers: &self.headers,
                body,
                timeout: self.retry.timeout,
            };

            let response = match self.transport.issue(request).await {
                Ok(response) => response,
                Err(e) if e.is_transport_failure() => {
                    if transport_attempts >= self.retry.transport_attempts {
                        warn!(method = %method, url = %url, error = %e, "transport budget spent");
                        return Err(Error::TransportExhausted {
                            attempts: transport_attempts + 1,
                        });
                    }
                    let delay = self.retry.backoff(transport_attempts);
                    warn!(
                        method = %method,
                        url = %url,
                        error = %e,
                        attempt = transport_attempts + 1,
                        "transport failure, retrying in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                    transport_attempts += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            if response.is_success() {
                debug!(method = %method, url = %url, status = response.status, "request succeeded");
                return decode_body(response.status, &response.body);
            }

            if is_retryable_status(response.status) && server_attempts < self.retry.max_attempts {
                warn!(
                    method = %method,
                    url = %url,
                    status = response.status,
                    attempt = server_attempts + 1,
                    "server error, retrying"
                );
                server_attempts += 1;
                continue;
            }

            return Err(Error::status(
                response.status,
                response.status_text,
                response.body,
            ));
        }
    }

    /// Resolve an endpoint path against the base URL
    fn build_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        format!("{base}/{endpoint}")
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
