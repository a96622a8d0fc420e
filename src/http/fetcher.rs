//! Resilient page fetcher
//!
//! One call to [`SearchFetcher::fetch`] is one logical page fetch: the URL is
//! built once, then GET attempts are repeated under the retry policy until a
//! page with tweets comes back or the budget is spent.

use super::client::HttpClient;
use super::query::set_query;
use super::retry::RetryPolicy;
use crate::config::SearchConfig;
use crate::decode::Page;
use crate::error::{Error, Result};
use crate::pagination::extract_cursor;
use crate::types::{SearchParams, SEARCH_ENDPOINT};
use reqwest::StatusCode;
use tracing::{debug, Span};

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Response status
    pub status: StatusCode,
    /// Requested URL
    pub url: String,
    /// Decoded body
    pub page: Page,
    /// Bottom cursor, `None` on the last page
    pub cursor: Option<String>,
}

/// Fetches search pages with bounded retry
#[derive(Debug, Clone)]
pub struct SearchFetcher {
    client: HttpClient,
    endpoint: String,
    safe_chars: String,
    retry: RetryPolicy,
    span: Span,
}

impl SearchFetcher {
    /// Create a fetcher for the default endpoint
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            endpoint: SEARCH_ENDPOINT.to_string(),
            safe_chars: "()".to_string(),
            retry: RetryPolicy::default(),
            span: Span::none(),
        }
    }

    /// Create a fetcher from a search config
    pub fn from_config(client: HttpClient, config: &SearchConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            safe_chars: config.safe_chars.clone(),
            retry: RetryPolicy::from(&config.retry),
            span: Span::none(),
        }
    }

    /// Set the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the span that retry and page events are logged under
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Build the request URL for `params`
    pub fn build_url(&self, params: &SearchParams) -> Result<String> {
        set_query(&self.endpoint, params, &self.safe_chars)
    }

    /// Fetch one page, retrying failed attempts
    pub async fn fetch(&self, params: &SearchParams) -> Result<FetchedPage> {
        let url = self.build_url(params)?;
        self.retry
            .run(&self.span, |attempt| self.fetch_once(&url, attempt))
            .await
    }

    async fn fetch_once(&self, url: &str, attempt: u32) -> Result<FetchedPage> {
        let response = self.client.get(url).await?;
        let status = response.status();
        let body = response.text().await?;
        let page = Page::parse(&body)?;

        // Cursor is read before judging the page; dropped if the page is empty
        let cursor = extract_cursor(&page)?;
        if !page.has_tweets() {
            return Err(Error::EmptyPage);
        }

        debug!(
            parent: &self.span,
            attempt,
            tweets = page.tweet_count(),
            has_cursor = cursor.is_some(),
            "fetched page"
        );

        Ok(FetchedPage {
            status,
            url: url.to_string(),
            page,
            cursor,
        })
    }
}
