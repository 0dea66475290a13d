//! Drain deletion of a compacting collection

use crate::error::{Error, Result};
use crate::http::Executor;
use crate::types::{query_set, JsonValue, Method, Query, LIMIT_PARAM};
use futures::future::try_join_all;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Delete every resource matching `query` under `endpoint`.
///
/// Precondition: the backend compacts its collection after each
/// deletion, so survivors shift into page one. The loop fetches page
/// one with `limit` as the page size, deletes each returned item by id
/// (`DELETE endpoint/{id}`), and re-fetches until the page comes back
/// empty. Each deletion batch is at most `limit` requests, dispatched
/// together and jointly awaited; one failed deletion aborts the whole
/// operation with the others of its batch already applied. There is no
/// rollback.
///
/// If a fetched page contains only ids that were already issued a
/// deletion, the backend is not compacting (or deletions are not taking
/// effect) and the loop fails with [`Error::NoProgress`] rather than
/// spinning forever.
pub async fn delete_all(
    executor: &Executor,
    endpoint: &str,
    query: Query,
    limit: usize,
) -> Result<()> {
    let mut query = query;
    query_set(&mut query, LIMIT_PARAM, limit.max(1).to_string());

    let mut issued: HashSet<String> = HashSet::new();

    loop {
        let fetched = executor.execute(Method::GET, endpoint, &query, None).await?;
        let items = fetched.into_items()?;
        if items.is_empty() {
            debug!(endpoint, deleted = issued.len(), "collection drained");
            return Ok(());
        }

        let ids = items.iter().map(item_id).collect::<Result<Vec<_>>>()?;
        if ids.iter().all(|id| issued.contains(id)) {
            warn!(endpoint, remaining = ids.len(), "drain round made no progress");
            return Err(Error::NoProgress {
                remaining: ids.len() as u64,
            });
        }

        debug!(endpoint, batch = ids.len(), "deleting batch");
        try_join_all(ids.iter().map(|id| {
            let path = format!("{endpoint}/{id}");
            async move {
                executor
                    .execute(Method::DELETE, &path, &Query::new(), None)
                    .await
            }
        }))
        .await?;

        issued.extend(ids);
    }
}

/// Extract the `id` of a listing item as a path segment
fn item_id(item: &JsonValue) -> Result<String> {
    match item.get("id") {
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        _ => Err(Error::envelope("listing item has no usable `id` field")),
    }
}
