//! Search paginator
//!
//! Drives one query through the cursor protocol and exposes the records as a
//! lazy stream. A page's records are yielded before the next page is
//! requested; dropping the stream stops further fetches.

use super::types::{PaginationState, StopReason};
use crate::config::SearchConfig;
use crate::decode::{PostRecord, RecordExtractor};
use crate::error::{Error, Result};
use crate::http::SearchFetcher;
use crate::types::{SearchParams, DEFAULT_PAGE_SIZE};
use futures::stream::{self, Stream, TryStreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

/// Stream of records produced by one pagination run
pub type RecordStream = Pin<Box<dyn Stream<Item = Result<PostRecord>> + Send>>;

/// Paginates search queries
#[derive(Debug, Clone)]
pub struct Paginator {
    fetcher: SearchFetcher,
    extractor: RecordExtractor,
    base_params: SearchParams,
    page_size: usize,
    dedupe: bool,
}

impl Paginator {
    /// Create a paginator over `base_params`
    pub fn new(fetcher: SearchFetcher, base_params: SearchParams) -> Self {
        Self {
            fetcher,
            extractor: RecordExtractor::new(),
            base_params,
            page_size: DEFAULT_PAGE_SIZE,
            dedupe: false,
        }
    }

    /// Create a paginator from a search config
    pub fn from_config(fetcher: SearchFetcher, config: &SearchConfig) -> Self {
        Self::new(fetcher, config.params.clone())
            .with_page_size(config.pagination.page_size)
            .with_dedupe(config.pagination.dedupe)
    }

    /// Pages with fewer tweets than this end the run
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Drop records whose id was already seen on an earlier page
    #[must_use]
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Fresh state for a run of `query`
    pub fn start(&self, query: &str, limit: Option<usize>) -> PaginationState {
        PaginationState::new(&self.base_params, query, limit)
    }

    /// Fetch the next page of a run and advance its state.
    ///
    /// Must not be called once `state.is_done()`.
    pub async fn next_page(&self, state: &mut PaginationState) -> Result<Vec<PostRecord>> {
        state.apply_cursor();

        let fetched = self.fetcher.fetch(&state.params).await?;
        state.pages += 1;

        let mut records = self.extractor.extract(&fetched.page)?;
        if self.dedupe {
            records.retain(|record| !state.has_seen(&record.id));
        }

        let new_ids = state.record_ids(fetched.page.tweet_ids());
        let tweet_count = fetched.page.tweet_count();

        if state.limit_reached() {
            state.finish(StopReason::LimitReached);
        } else if tweet_count < self.page_size {
            state.finish(StopReason::ShortPage);
        } else if fetched.cursor.is_none() {
            state.finish(StopReason::NoCursor);
        } else {
            state.cursor.advance(fetched.cursor);
        }

        debug!(
            query = state.query(),
            page = state.pages,
            tweets = tweet_count,
            new_ids,
            seen = state.seen_ids.len(),
            stop = ?state.stop_reason,
            "page processed"
        );

        Ok(records)
    }

    /// Stream every record of `query`, stopping once `limit` distinct ids
    /// were seen. The last page is emitted in full, so more than `limit`
    /// records may be yielded.
    pub fn paginate(&self, query: &str, limit: Option<usize>) -> RecordStream {
        let paginator = Arc::new(self.clone());
        let state = self.start(query, limit);

        let pages = stream::try_unfold(state, move |mut state| {
            let paginator = Arc::clone(&paginator);
            async move {
                if state.is_done() {
                    return Ok::<_, Error>(None);
                }
                let records = paginator.next_page(&mut state).await?;
                Ok(Some((records, state)))
            }
        });

        Box::pin(
            pages
                .map_ok(|records| stream::iter(records.into_iter().map(Ok::<_, Error>)))
                .try_flatten(),
        )
    }
}
