//! Search entry points
//!
//! [`Search`] owns the shared HTTP session and hands each query its own
//! paginator run. Single queries stream; batches are collected per query.

use crate::auth::{AuthConfig, Authenticator};
use crate::config::SearchConfig;
use crate::decode::PostRecord;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, SearchFetcher};
use crate::pagination::{Paginator, RecordStream};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{info, info_span};

/// Search client sharing one HTTP session across queries
#[derive(Debug, Clone)]
pub struct Search {
    config: SearchConfig,
    client: HttpClient,
}

impl Search {
    /// Validate `config` and open a session authenticated with `auth`
    pub fn new(config: SearchConfig, auth: AuthConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_config(HttpClientConfig::from(&config.http))?;
        let authenticator = Authenticator::with_client(auth, client.inner().clone());
        Ok(Self::with_client(
            config,
            client.with_header_provider(Arc::new(authenticator)),
        ))
    }

    /// Use an existing HTTP client
    pub fn with_client(config: SearchConfig, client: HttpClient) -> Self {
        Self { config, client }
    }

    fn paginator(&self, query: &str) -> Paginator {
        let span = info_span!("search", query = %query);
        let fetcher = SearchFetcher::from_config(self.client.clone(), &self.config).with_span(span);
        Paginator::from_config(fetcher, &self.config)
    }

    /// Stream the records of `query`.
    ///
    /// Stops once `limit` distinct tweet ids were seen; the page that crossed
    /// the limit is still yielded in full.
    pub fn run(&self, query: &str, limit: Option<usize>) -> RecordStream {
        info!(query, ?limit, "starting search");
        self.paginator(query).paginate(query, limit)
    }

    /// Run several queries and collect each one's records.
    ///
    /// Results are in input order. Up to `batch_concurrency` queries are in
    /// flight at once.
    pub async fn run_batch<S: AsRef<str>>(
        &self,
        queries: &[S],
        limit: Option<usize>,
    ) -> Result<Vec<Vec<PostRecord>>> {
        let concurrency = self.config.batch_concurrency.max(1);

        stream::iter(queries.iter().map(AsRef::as_ref))
            .map(|query| async move {
                let records: Vec<PostRecord> = self.run(query, limit).try_collect().await?;
                info!(query, records = records.len(), "search finished");
                Ok::<_, Error>(records)
            })
            .buffered(concurrency)
            .try_collect()
            .await
    }
}
