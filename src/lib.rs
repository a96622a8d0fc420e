// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tweet-search
//!
//! Paginated client for the adaptive tweet search API.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Follows the bottom cursor until the results run out
//! - **Resilient Fetching**: Every page fetch is retried with bounded backoff
//! - **Flat Records**: Tweets are joined with their authors into [`PostRecord`]s
//! - **Lazy Streams**: Pages are fetched only as records are consumed
//! - **Sessions**: Bearer, guest token, and logged-in session auth
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use tweet_search::{AuthConfig, Search, SearchConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let search = Search::new(SearchConfig::default(), AuthConfig::guest("AAAA..."))?;
//!
//!     let mut records = search.run("(from:nasa)", Some(100));
//!     while let Some(record) = records.try_next().await? {
//!         println!("{} {}", record.local_time, record.text);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            Search: run(query) / run_batch(queries)          │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴───────────┬───────────────────┐
//! │  Paginator   │      SearchFetcher       │  RecordExtractor  │
//! ├──────────────┼──────────────────────────┼───────────────────┤
//! │ Cursor token │ Query string (safe "()") │ Tweet + author    │
//! │ Limit        │ Retry with backoff       │ Dates, media      │
//! │ Short page   │ Rate limit, auth headers │ Profile images    │
//! └──────────────┴──────────────────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Session authentication
pub mod auth;

/// HTTP client, retry, and page fetching
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Response decoding and record extraction
pub mod decode;

/// Search configuration
pub mod config;

/// Search entry points
pub mod search;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use config::SearchConfig;
pub use decode::{Author, Media, PostRecord};
pub use pagination::RecordStream;
pub use search::Search;
