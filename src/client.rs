//! Client facade
//!
//! Ties the transport, executor, pagination, and bulk modules together
//! behind one configured entry point.

use crate::bulk;
use crate::envelope::Fetched;
use crate::error::Result;
use crate::http::{Executor, RetryConfig};
use crate::pagination::{self, Page};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{JsonValue, Method, Query};
use futures::Stream;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Configuration for a [`Client`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL all endpoint paths resolve against
    pub base_url: String,
    /// Headers sent with every request (auth token, content type)
    pub default_headers: HashMap<String, String>,
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
    /// Wave size for pagination runs
    pub concurrency: usize,
    /// Page/batch size for drain deletion
    pub delete_limit: usize,
    /// User agent string
    pub user_agent: String,
}

impl ClientConfig {
    /// Config with defaults for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: HashMap::new(),
            max_attempts: 3,
            transport_attempts: 3,
            timeout: Duration::from_millis(15_000),
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            concurrency: 3,
            delete_limit: 3,
            user_agent: format!("pagewave/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a new config builder
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(base_url),
        }
    }

    fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_attempts: self.max_attempts,
            transport_attempts: self.transport_attempts,
            timeout: self.timeout,
            initial_backoff: self.initial_backoff,
            max_backoff: self.max_backoff,
        }
    }
}

/// Builder for client config
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the 5xx retry budget
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    /// Set the transport-failure retry budget
    pub fn transport_attempts(mut self, attempts: u32) -> Self {
        self.config.transport_attempts = attempts;
        self
    }

    /// Set the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the transport backoff range
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set the pagination wave size
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    /// Set the drain-deletion page/batch size
    pub fn delete_limit(mut self, limit: usize) -> Self {
        self.config.delete_limit = limit;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Async client for a paginated envelope REST API
pub struct Client {
    executor: Executor,
    concurrency: usize,
    delete_limit: usize,
}

impl Client {
    /// Create a client on the default reqwest transport.
    ///
    /// Fails if the base URL does not parse.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;
        let transport = Arc::new(ReqwestTransport::new(&config.user_agent));
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client over any transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let retry = config.retry();
        Self {
            executor: Executor::new(
                transport,
                config.base_url,
                config.default_headers,
                retry,
            ),
            concurrency: config.concurrency.max(1),
            delete_limit: config.delete_limit.max(1),
        }
    }

    /// The executor behind this client
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    // ========================================================================
    // Resource verbs
    // ========================================================================

    /// GET a listing page or a single resource
    pub async fn get(&self, endpoint: &str, query: &Query) -> Result<Fetched> {
        self.executor.execute(Method::GET, endpoint, query, None).await
    }

    /// POST a JSON body, creating a resource
    pub async fn post(&self, endpoint: &str, body: &JsonValue) -> Result<Fetched> {
        self.executor
            .execute(Method::POST, endpoint, &Query::new(), Some(body))
            .await
    }

    /// PUT a JSON body, updating a resource
    pub async fn put(&self, endpoint: &str, body: &JsonValue) -> Result<Fetched> {
        self.executor
            .execute(Method::PUT, endpoint, &Query::new(), Some(body))
            .await
    }

    /// DELETE a resource; an empty response body yields the
    /// status-code sentinel payload
    pub async fn delete(&self, endpoint: &str, query: &Query) -> Result<Fetched> {
        self.executor
            .execute(Method::DELETE, endpoint, query, None)
            .await
    }

    // ========================================================================
    // Pagination & bulk operations
    // ========================================================================

    /// Lazily paginate a listing endpoint in waves of the configured
    /// concurrency; see [`pagination::paginate`]
    pub fn paginate<'a>(
        &'a self,
        endpoint: &'a str,
        query: Query,
    ) -> impl Stream<Item = Result<Page>> + 'a {
        pagination::paginate(&self.executor, endpoint, query, self.concurrency)
    }

    /// Fetch every page of a listing into one ordered collection
    pub async fn get_all(&self, endpoint: &str, query: Query) -> Result<Vec<JsonValue>> {
        pagination::get_all(&self.executor, endpoint, query, self.concurrency).await
    }

    /// Delete every resource matching `query`, assuming a compacting
    /// backend; see [`bulk::delete_all`]
    pub async fn delete_all(&self, endpoint: &str, query: Query) -> Result<()> {
        bulk::delete_all(&self.executor, endpoint, query, self.delete_limit).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("executor", &self.executor)
            .field("concurrency", &self.concurrency)
            .field("delete_limit", &self.delete_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Payload;
    use crate::error::Error;
    use crate::transport::mock::{self, MockTransport};
    use serde_json::json;

    fn mock_client(transport: Arc<MockTransport>) -> Client {
        let config = ClientConfig::builder("https://api.test/v3")
            .backoff(Duration::from_millis(1), Duration::from_millis(2))
            .build();
        Client::with_transport(config, transport)
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("https://api.test/v3");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.transport_attempts, 3);
        assert_eq!(config.timeout, Duration::from_millis(15_000));
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.delete_limit, 3);
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder("https://api.test/v3")
            .header("X-Auth-Token", "secret")
            .max_attempts(5)
            .transport_attempts(1)
            .timeout(Duration::from_secs(30))
            .backoff(Duration::from_millis(50), Duration::from_secs(5))
            .concurrency(8)
            .delete_limit(10)
            .user_agent("shop-sync/2.0")
            .build();

        assert_eq!(
            config.default_headers.get("X-Auth-Token"),
            Some(&"secret".to_string())
        );
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.transport_attempts, 1);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.initial_backoff, Duration::from_millis(50));
        assert_eq!(config.max_backoff, Duration::from_secs(5));
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.delete_limit, 10);
        assert_eq!(config.user_agent, "shop-sync/2.0");
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let err = Client::new(ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_verbs_hit_the_right_method_and_url() {
        let transport = Arc::new(MockTransport::new(|request| match request.method {
            Method::GET => mock::ok(json!({"data": []}).to_string()),
            Method::POST | Method::PUT => {
                mock::ok(json!({"data": {"id": 7, "name": "widget"}}).to_string())
            }
            Method::DELETE => mock::no_content(),
        }));
        let client = mock_client(transport.clone());

        client.get("customers", &Query::new()).await.unwrap();
        let created = client
            .post("catalog/products", &json!({"name": "widget"}))
            .await
            .unwrap()
            .into_value()
            .unwrap();
        assert_eq!(created["id"], 7);
        client
            .put("catalog/products/7", &json!({"price": 909.99}))
            .await
            .unwrap();
        let deleted = client
            .delete("catalog/products/7", &Query::new())
            .await
            .unwrap();
        assert_eq!(deleted.payload, Payload::Empty(204));

        let calls = transport.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].method, Method::GET);
        assert_eq!(calls[0].url, "https://api.test/v3/customers");
        assert_eq!(calls[1].method, Method::POST);
        assert_eq!(calls[2].method, Method::PUT);
        assert_eq!(calls[2].url, "https://api.test/v3/catalog/products/7");
        assert_eq!(calls[3].method, Method::DELETE);
    }

    #[tokio::test]
    async fn test_get_all_uses_configured_concurrency() {
        let transport = Arc::new(MockTransport::new(|request| {
            let page: u32 = request
                .query
                .iter()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or(1);
            mock::ok(
                json!({
                    "data": [{"id": page}],
                    "meta": {"pagination": {
                        "total": 3, "count": 1, "per_page": 1,
                        "current_page": page, "total_pages": 3
                    }}
                })
                .to_string(),
            )
        }));

        let config = ClientConfig::builder("https://api.test/v3")
            .concurrency(2)
            .build();
        let client = Client::with_transport(config, transport.clone());

        let all = client.get_all("customers", Query::new()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(transport.call_count(), 3);
    }
}
