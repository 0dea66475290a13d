//! Response envelope wire format
//!
//! Listing endpoints wrap their results in a `{ data, meta }` envelope
//! where `meta.pagination` describes the position of the returned page
//! within the whole collection. Non-listing endpoints may return a bare
//! object, or nothing at all.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Links to neighboring pages, as reported by the remote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub previous: Option<String>,
    pub current: Option<String>,
    pub next: Option<String>,
}

/// Pagination metadata from `meta.pagination`.
///
/// Invariant (remote-guaranteed): `1 <= current_page <= total_pages`
/// whenever `total_pages >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of items in the result set
    pub total: u64,
    /// Number of items in this response
    pub count: u64,
    /// Page size, controlled by the `limit` parameter
    pub per_page: u32,
    /// Page this response covers
    pub current_page: u32,
    /// Total number of pages in the collection
    pub total_pages: u32,
    #[serde(default)]
    pub links: PageLinks,
}

/// The `meta` block of an envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub pagination: Option<Pagination>,
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A listing: the envelope's `data` array
    Items(Vec<JsonValue>),
    /// A single resource: the envelope's `data` object, or the whole
    /// body when no envelope was present
    Value(JsonValue),
    /// Empty response body; carries the HTTP status code
    Empty(u16),
}

impl Payload {
    /// Unwrap a listing payload.
    ///
    /// An empty body counts as an empty listing; a single resource does
    /// not and is an envelope error.
    pub fn into_items(self) -> Result<Vec<JsonValue>> {
        match self {
            Payload::Items(items) => Ok(items),
            Payload::Empty(_) => Ok(Vec::new()),
            Payload::Value(value) => Err(Error::envelope(format!(
                "expected a listing response, got {}",
                kind_of(&value)
            ))),
        }
    }

    /// Unwrap a single-resource payload
    pub fn into_value(self) -> Result<JsonValue> {
        match self {
            Payload::Value(value) => Ok(value),
            Payload::Items(items) => Ok(JsonValue::Array(items)),
            Payload::Empty(status) => Err(Error::envelope(format!(
                "expected a response body, got an empty {status} response"
            ))),
        }
    }

    /// Check if this payload is the empty-body sentinel
    pub fn is_empty_body(&self) -> bool {
        matches!(self, Payload::Empty(_))
    }
}

/// One decoded response: payload plus the pagination metadata that
/// arrived with it. Pagination travels with the call that produced it
/// and is never stored anywhere shared.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub payload: Payload,
    pub pagination: Option<Pagination>,
}

impl Fetched {
    /// Unwrap a listing response
    pub fn into_items(self) -> Result<Vec<JsonValue>> {
        self.payload.into_items()
    }

    /// Unwrap a single-resource response
    pub fn into_value(self) -> Result<JsonValue> {
        self.payload.into_value()
    }
}

/// Decode a response body into payload and pagination metadata.
///
/// An empty body becomes the `Empty` sentinel. A JSON object carrying
/// `data` or `meta` is treated as an envelope: the `data` array (or
/// object) is the payload and `meta.pagination` rides along. Any other
/// JSON body is the payload itself.
pub fn decode_body(status: u16, body: &str) -> Result<Fetched> {
    if body.trim().is_empty() {
        return Ok(Fetched {
            payload: Payload::Empty(status),
            pagination: None,
        });
    }

    let value: JsonValue = serde_json::from_str(body)
        .map_err(|e| Error::envelope(format!("response body is not valid JSON: {e}")))?;

    let (payload, pagination) = match value {
        JsonValue::Object(map) if map.contains_key("data") || map.contains_key("meta") => {
            decode_envelope(map)?
        }
        other => (Payload::Value(other), None),
    };

    Ok(Fetched {
        payload,
        pagination,
    })
}

fn decode_envelope(mut map: JsonObject) -> Result<(Payload, Option<Pagination>)> {
    let pagination = match map.remove("meta") {
        Some(meta) => {
            let meta: Meta = serde_json::from_value(meta)
                .map_err(|e| Error::envelope(format!("invalid meta block: {e}")))?;
            meta.pagination
        }
        None => None,
    };

    let payload = match map.remove("data") {
        Some(JsonValue::Array(items)) => Payload::Items(items),
        Some(other) => Payload::Value(other),
        // data absent: the rest of the body is the result
        None => Payload::Value(JsonValue::Object(map)),
    };

    Ok((payload, pagination))
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
