//! HTTP module
//!
//! Provides the shared HTTP session and the resilient page fetcher.
//!
//! # Features
//!
//! - **Session headers**: authenticated headers from a [`crate::auth::HeaderProvider`]
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Retry**: Bounded exponential backoff around each page fetch
//! - **Query strings**: Encoding that keeps search operator characters intact

mod client;
mod fetcher;
mod query;
mod rate_limit;
mod retry;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use fetcher::{FetchedPage, SearchFetcher};
pub use query::{encode, set_query};
pub use rate_limit::RateLimiter;
pub use retry::RetryPolicy;
