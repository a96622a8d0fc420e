//! Search configuration
//!
//! Everything the search core needs to know up front: the endpoint, the base
//! query parameters copied into every pagination run, HTTP client settings,
//! the retry policy, and pagination behavior. Loadable from YAML.

use crate::error::{Error, Result};
use crate::types::{BackoffType, SearchParams, DEFAULT_PAGE_SIZE, SEARCH_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Top-Level Search Config
// ============================================================================

/// Complete search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Base query parameters; `q` and `cursor` are filled in per run
    #[serde(default = "default_params")]
    pub params: SearchParams,

    /// Characters left unescaped when building the query string
    #[serde(default = "default_safe_chars")]
    pub safe_chars: String,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Retry configuration for page fetches
    #[serde(default)]
    pub retry: RetryConfig,

    /// Pagination behavior
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Maximum number of batch queries paginated at once
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            params: default_params(),
            safe_chars: default_safe_chars(),
            http: HttpConfig::default(),
            retry: RetryConfig::default(),
            pagination: PaginationConfig::default(),
            batch_concurrency: default_batch_concurrency(),
        }
    }
}

impl SearchConfig {
    /// Parse and validate a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.endpoint)?;

        if self.retry.max_attempts == 0 {
            return Err(Error::invalid_value(
                "retry.max_attempts",
                "must be at least 1",
            ));
        }
        if self.retry.min_delay_ms > self.retry.max_delay_ms {
            return Err(Error::invalid_value(
                "retry.min_delay_ms",
                format!(
                    "{} exceeds max_delay_ms {}",
                    self.retry.min_delay_ms, self.retry.max_delay_ms
                ),
            ));
        }
        if self.pagination.page_size == 0 {
            return Err(Error::invalid_value(
                "pagination.page_size",
                "must be at least 1",
            ));
        }
        if self.batch_concurrency == 0 {
            return Err(Error::invalid_value(
                "batch_concurrency",
                "must be at least 1",
            ));
        }
        if let Some(rate_limit) = &self.http.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "http.rate_limit.requests_per_second",
                    "must be at least 1",
                ));
            }
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    SEARCH_ENDPOINT.to_string()
}

fn default_safe_chars() -> String {
    "()".to_string()
}

fn default_batch_concurrency() -> usize {
    1
}

/// Parameters the web client sends with every adaptive search request
fn default_params() -> SearchParams {
    [
        ("include_profile_interstitial_type", "1"),
        ("include_blocking", "1"),
        ("include_blocked_by", "1"),
        ("include_followed_by", "1"),
        ("include_want_retweets", "1"),
        ("include_mute_edge", "1"),
        ("include_can_dm", "1"),
        ("include_can_media_tag", "1"),
        ("skip_status", "1"),
        ("cards_platform", "Web-12"),
        ("include_cards", "1"),
        ("include_ext_alt_text", "true"),
        ("include_quote_count", "true"),
        ("include_reply_count", "1"),
        ("tweet_mode", "extended"),
        ("include_entities", "true"),
        ("include_user_entities", "true"),
        ("include_ext_media_color", "true"),
        ("include_ext_media_availability", "true"),
        ("send_error_codes", "true"),
        ("simple_quoted_tweet", "true"),
        ("tweet_search_mode", "live"),
        ("count", "20"),
        ("query_source", "typed_query"),
        ("pc", "1"),
        ("spelling_corrections", "1"),
        ("ext", "mediaStats,highlightedLabel,views"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Optional client-side request pacing
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("tweet-search/{}", env!("CARGO_PKG_VERSION"))
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second limit
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_rps(),
            burst_size: default_burst(),
        }
    }
}

fn default_rps() -> u32 {
    1
}

fn default_burst() -> u32 {
    1
}

// ============================================================================
// Retry Config
// ============================================================================

/// Retry configuration for page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per fetch, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Type of backoff
    #[serde(default)]
    pub backoff: BackoffType,

    /// Scale applied to the backoff curve, in milliseconds
    #[serde(default = "default_multiplier_ms")]
    pub multiplier_ms: u64,

    /// Lower bound on any wait, in milliseconds
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound on any wait, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Randomize each wait between the lower bound and the computed delay
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff: BackoffType::Exponential,
            multiplier_ms: default_multiplier_ms(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            jitter: false,
        }
    }
}

fn default_max_attempts() -> u32 {
    12
}

fn default_multiplier_ms() -> u64 {
    1000
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    60_000
}

// ============================================================================
// Pagination Config
// ============================================================================

/// Pagination behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Pages with fewer tweets than this end the run
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Drop tweets already emitted earlier in the same run
    #[serde(default)]
    pub dedupe: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            dedupe: false,
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
