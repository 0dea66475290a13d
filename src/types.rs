//! Common types used throughout pagewave
//!
//! Shared type definitions, type aliases, and query helpers used
//! across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Ordered query parameters sent with a request.
///
/// Order is preserved on the wire. The keys `page` and `limit` are
/// reserved: they steer pagination and deletion batch size.
pub type Query = Vec<(String, String)>;

/// Reserved query key selecting the page of a listing.
pub const PAGE_PARAM: &str = "page";

/// Reserved query key bounding the page size of a listing.
pub const LIMIT_PARAM: &str = "limit";

/// Get the value of a query parameter
pub fn query_get<'a>(query: &'a Query, key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Set a query parameter, replacing an existing value for the same key
/// in place (order of other parameters is untouched)
pub fn query_set(query: &mut Query, key: &str, value: impl Into<String>) {
    let value = value.into();
    match query.iter_mut().find(|(k, _)| k == key) {
        Some(pair) => pair.1 = value,
        None => query.push((key.to_string(), value)),
    }
}

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl Method {
    /// Wire name of the method
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}
