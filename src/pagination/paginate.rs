//! The wave-based pagination stream

use super::cursor::{Cursor, Page};
use crate::envelope::Fetched;
use crate::error::Result;
use crate::http::Executor;
use crate::types::{query_get, query_set, JsonValue, Method, Query, PAGE_PARAM};
use futures::future::try_join_all;
use futures::stream::{self, Stream};
use futures::TryStreamExt;
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum RunState {
    /// No request issued yet
    Start,
    /// First page yielded; advancing in waves toward the pinned bound
    Waves { next: u32, total: u32 },
    Done,
}

struct Run<'a> {
    executor: &'a Executor,
    endpoint: &'a str,
    query: Query,
    concurrency: usize,
    state: RunState,
    /// Pages of the current wave not yet pulled by the consumer
    buffered: VecDeque<Page>,
}

impl Run<'_> {
    async fn fetch_page(&self, number: u32) -> Result<Fetched> {
        let mut query = self.query.clone();
        query_set(&mut query, PAGE_PARAM, number.to_string());
        self.executor
            .execute(Method::GET, self.endpoint, &query, None)
            .await
    }
}

/// Lazily paginate a listing endpoint.
///
/// The first fetch is sequential and pins `(current_page, total_pages)`
/// for the whole run; the starting page comes from the caller's `page`
/// parameter (default 1). Remaining pages are fetched in waves of up to
/// `concurrency` requests; a wave is jointly awaited before any of its
/// pages is yielded, so pages arrive in ascending number order. The
/// stream is finite and not restartable.
///
/// If the remote collection is mutated mid-run so that `total_pages`
/// changes, behavior past the pinned bound is whatever the server
/// answers for those page numbers.
pub fn paginate<'a>(
    executor: &'a Executor,
    endpoint: &'a str,
    query: Query,
    concurrency: usize,
) -> impl Stream<Item = Result<Page>> + 'a {
    let run = Run {
        executor,
        endpoint,
        query,
        concurrency: concurrency.max(1),
        state: RunState::Start,
        buffered: VecDeque::new(),
    };

    stream::try_unfold(run, |mut run| async move {
        if let Some(page) = run.buffered.pop_front() {
            return Ok(Some((page, run)));
        }

        match run.state {
            RunState::Start => {
                let first = query_get(&run.query, PAGE_PARAM)
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(1);
                let fetched = run.fetch_page(first).await?;
                let cursor = match fetched.pagination.as_ref() {
                    Some(pagination) => Cursor::from_pagination(pagination),
                    None => Cursor::single(first),
                };
                debug!(
                    endpoint = run.endpoint,
                    current_page = cursor.current_page,
                    total_pages = cursor.total_pages,
                    "pagination run pinned"
                );

                run.state = if cursor.is_last() {
                    RunState::Done
                } else {
                    RunState::Waves {
                        next: cursor.current_page + 1,
                        total: cursor.total_pages,
                    }
                };

                let page = Page {
                    items: fetched.into_items()?,
                    number: cursor.current_page,
                    total_pages: cursor.total_pages,
                };
                Ok(Some((page, run)))
            }

            RunState::Waves { next, total } => {
                let wave: Vec<u32> = (next..=total).take(run.concurrency).collect();
                let Some(&last) = wave.last() else {
                    run.state = RunState::Done;
                    return Ok(None);
                };

                debug!(endpoint = run.endpoint, ?wave, "dispatching wave");
                let fetches = try_join_all(wave.iter().map(|&n| run.fetch_page(n))).await?;
                for (&number, fetched) in wave.iter().zip(fetches) {
                    run.buffered.push_back(Page {
                        items: fetched.into_items()?,
                        number,
                        total_pages: total,
                    });
                }

                run.state = if last >= total {
                    RunState::Done
                } else {
                    RunState::Waves {
                        next: last + 1,
                        total,
                    }
                };

                match run.buffered.pop_front() {
                    Some(page) => Ok(Some((page, run))),
                    None => Ok(None),
                }
            }

            RunState::Done => Ok(None),
        }
    })
}

/// Drain a full pagination run into one ordered collection.
///
/// The result is the concatenation, in page order, of every page
/// [`paginate`] yields for the same endpoint and query. The first error
/// aborts the drain; no partial result is returned.
pub async fn get_all(
    executor: &Executor,
    endpoint: &str,
    query: Query,
    concurrency: usize,
) -> Result<Vec<JsonValue>> {
    let stream = paginate(executor, endpoint, query, concurrency);
    futures::pin_mut!(stream);

    let mut all = Vec::new();
    while let Some(page) = stream.try_next().await? {
        all.extend(page.items);
    }
    Ok(all)
}
