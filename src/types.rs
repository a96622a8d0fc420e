//! Common types used throughout tweet-search
//!
//! Shared type aliases, endpoint constants, and small enums used across
//! multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query parameters sent with every search request, ordered by name
pub type SearchParams = BTreeMap<String, String>;

// ============================================================================
// Endpoint Constants
// ============================================================================

/// Adaptive search endpoint
pub const SEARCH_ENDPOINT: &str = "https://api.twitter.com/2/search/adaptive.json";

/// Guest token activation endpoint
pub const GUEST_ACTIVATE_ENDPOINT: &str = "https://api.twitter.com/1.1/guest/activate.json";

/// Query parameter carrying the search text
pub const QUERY_PARAM: &str = "q";

/// Query parameter carrying the pagination cursor
pub const CURSOR_PARAM: &str = "cursor";

/// A page holding fewer tweets than this is the last one
pub const DEFAULT_PAGE_SIZE: usize = 20;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_type_serde() {
        let backoff: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(backoff, BackoffType::Linear);

        let json = serde_json::to_string(&BackoffType::Exponential).unwrap();
        assert_eq!(json, "\"exponential\"");
    }

    #[test]
    fn test_backoff_type_default() {
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }
}
