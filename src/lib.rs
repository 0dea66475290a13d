//! # pagewave
//!
//! Async client for paginated, envelope-based REST resource APIs.
//!
//! ## Features
//!
//! - **Envelope decoding**: `{ data, meta.pagination }` responses with
//!   listing, single-resource, and empty-body shapes
//! - **Bounded retry**: immediate re-attempts for 5xx responses, backed-off
//!   re-attempts for transport failures, separate budgets for each
//! - **Wave pagination**: lazy ordered page stream with bounded concurrency;
//!   page order never depends on network completion order
//! - **Drain deletion**: bulk-delete a compacting collection with
//!   non-progress detection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use pagewave::{Client, ClientConfig, Query};
//!
//! #[tokio::main]
//! async fn main() -> pagewave::Result<()> {
//!     let config = ClientConfig::builder("https://api.example.com/stores/gha3w9n1at")
//!         .header("X-Auth-Token", "...")
//!         .concurrency(3)
//!         .build();
//!     let client = Client::new(config)?;
//!
//!     // every customer, all pages, in order
//!     let customers = client.get_all("v3/customers", Query::new()).await?;
//!
//!     // or page by page
//!     let mut pages = Box::pin(client.paginate("v3/catalog/products", Query::new()));
//!     while let Some(page) = pages.try_next().await? {
//!         println!("page {}/{}: {} items", page.number, page.total_pages, page.items.len());
//!     }
//!
//!     // drain a compacting collection
//!     client.delete_all("v3/catalog/products", Query::new()).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and query helpers
pub mod types;

/// Response envelope wire format
pub mod envelope;

/// Transport seam and the reqwest default
pub mod transport;

/// Request execution with bounded retry
pub mod http;

/// Wave-based concurrent pagination
pub mod pagination;

/// Bulk mutation (drain deletion)
pub mod bulk;

/// Client facade and configuration
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{Client, ClientConfig, ClientConfigBuilder};
pub use envelope::{Fetched, Meta, PageLinks, Pagination, Payload};
pub use error::{Error, Result};
pub use http::{Executor, RetryConfig};
pub use pagination::{Cursor, Page};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
pub use types::{JsonObject, JsonValue, Method, Query};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
