//! Pagination types
//!
//! Cursor token and per-run state for the search paginator.

use crate::types::{SearchParams, CURSOR_PARAM, QUERY_PARAM};
use std::collections::HashSet;

/// Position in the cursor protocol
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CursorToken {
    /// No page fetched yet
    #[default]
    Begin,
    /// Token for the next page
    Next(String),
    /// No more pages; never leaves this state
    Exhausted,
}

impl CursorToken {
    /// Move to the token returned by the last page.
    ///
    /// `None` exhausts the cursor. An exhausted cursor ignores further input.
    pub fn advance(&mut self, next: Option<String>) {
        if self.is_exhausted() {
            return;
        }
        *self = match next {
            Some(token) => Self::Next(token),
            None => Self::Exhausted,
        };
    }

    /// Exhaust the cursor regardless of what the API returned
    pub fn exhaust(&mut self) {
        *self = Self::Exhausted;
    }

    /// Check if pagination is over
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The concrete token, if any
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Next(token) => Some(token),
            Self::Begin | Self::Exhausted => None,
        }
    }
}

/// Why a pagination run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Enough distinct ids were seen
    LimitReached,
    /// The page was smaller than a full page
    ShortPage,
    /// The page carried no bottom cursor
    NoCursor,
}

/// State of one pagination run
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Request parameters, owned by this run
    pub params: SearchParams,
    /// Cursor position
    pub cursor: CursorToken,
    /// Tweet ids seen so far
    pub seen_ids: HashSet<String>,
    /// Stop once this many distinct ids were seen
    pub limit: Option<usize>,
    /// Pages fetched so far
    pub pages: u32,
    /// Set when the run is over
    pub stop_reason: Option<StopReason>,
}

impl PaginationState {
    /// Start a run for `query` from a copy of the base params.
    ///
    /// Any `cursor` in the base params is dropped. A limit of zero means no
    /// limit.
    pub fn new(base: &SearchParams, query: &str, limit: Option<usize>) -> Self {
        let mut params = base.clone();
        params.insert(QUERY_PARAM.to_string(), query.to_string());
        params.remove(CURSOR_PARAM);

        Self {
            params,
            cursor: CursorToken::Begin,
            seen_ids: HashSet::new(),
            limit: limit.filter(|&n| n > 0),
            pages: 0,
            stop_reason: None,
        }
    }

    /// The query text of this run
    pub fn query(&self) -> &str {
        self.params.get(QUERY_PARAM).map_or("", String::as_str)
    }

    /// Check if the run is over
    pub fn is_done(&self) -> bool {
        self.cursor.is_exhausted()
    }

    /// Copy the current token into the request params
    pub fn apply_cursor(&mut self) {
        if let Some(token) = self.cursor.token() {
            self.params
                .insert(CURSOR_PARAM.to_string(), token.to_string());
        }
    }

    /// Check if `id` was seen on an earlier page
    pub fn has_seen(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    /// Add a page's ids; returns how many were new
    pub fn record_ids<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        let before = self.seen_ids.len();
        self.seen_ids.extend(ids.into_iter().map(String::from));
        self.seen_ids.len() - before
    }

    /// Check if the limit is reached
    pub fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.seen_ids.len() >= limit)
    }

    /// End the run
    pub fn finish(&mut self, reason: StopReason) {
        self.cursor.exhaust();
        self.stop_reason = Some(reason);
    }
}
