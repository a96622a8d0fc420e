//! Raw search response page
//!
//! Keeps the decoded JSON as-is (object order preserved) and exposes the
//! three parts the core reads: `globalObjects.tweets`, `globalObjects.users`
//! and `timeline.instructions`.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// One decoded search response
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    body: JsonValue,
}

impl Page {
    /// Wrap a decoded response body
    pub fn new(body: JsonValue) -> Self {
        Self { body }
    }

    /// Decode a response body
    pub fn parse(body: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(body)?))
    }

    /// Tweets keyed by id, if the page carries a tweets mapping
    pub fn tweets(&self) -> Option<&JsonObject> {
        self.body
            .get("globalObjects")?
            .get("tweets")?
            .as_object()
    }

    /// True when the tweets mapping exists and is non-empty
    pub fn has_tweets(&self) -> bool {
        self.tweets().is_some_and(|tweets| !tweets.is_empty())
    }

    /// Number of tweets on the page
    pub fn tweet_count(&self) -> usize {
        self.tweets().map_or(0, JsonObject::len)
    }

    /// Tweet ids in response order
    pub fn tweet_ids(&self) -> impl Iterator<Item = &str> {
        self.tweets()
            .into_iter()
            .flat_map(|tweets| tweets.keys().map(String::as_str))
    }

    /// Tweets keyed by id; missing mapping is a decode error
    pub fn require_tweets(&self) -> Result<&JsonObject> {
        self.tweets()
            .ok_or_else(|| Error::missing_key("globalObjects.tweets"))
    }

    /// Users keyed by id; missing mapping is a decode error
    pub fn require_users(&self) -> Result<&JsonObject> {
        self.body
            .get("globalObjects")
            .and_then(|g| g.get("users"))
            .and_then(JsonValue::as_object)
            .ok_or_else(|| Error::missing_key("globalObjects.users"))
    }

    /// Timeline instructions; missing list is a decode error
    pub fn instructions(&self) -> Result<&[JsonValue]> {
        self.body
            .get("timeline")
            .and_then(|t| t.get("instructions"))
            .and_then(JsonValue::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::missing_key("timeline.instructions"))
    }
}

impl From<JsonValue> for Page {
    fn from(body: JsonValue) -> Self {
        Self::new(body)
    }
}
