//! Record extraction
//!
//! Turns one page into flat [`PostRecord`]s: authors are indexed first, then
//! every tweet in the page's tweets mapping is normalized and joined with its
//! author. Missing keys are decode errors; nothing is skipped.

use super::page::Page;
use super::types::{Author, Media, PostRecord};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::collections::HashMap;

/// Format of `created_at` in API responses
const API_TIME_FORMAT: &str = "%a %b %d %H:%M:%S +0000 %Y";

/// Format of `local_time` in records
const RECORD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Extracts post records from search pages
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordExtractor;

impl RecordExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract records, stamping them with the current time
    pub fn extract(&self, page: &Page) -> Result<Vec<PostRecord>> {
        self.extract_at(page, Utc::now())
    }

    /// Extract records with a fixed collection time
    pub fn extract_at(&self, page: &Page, collected_at: DateTime<Utc>) -> Result<Vec<PostRecord>> {
        let authors = index_authors(page)?;
        let tweets = page.require_tweets()?;

        tweets
            .iter()
            .map(|(tweet_id, raw)| {
                let tweet = RawTweet::deserialize(raw)
                    .map_err(|e| Error::decode(format!("tweet {tweet_id}: {e}")))?;

                let author = authors
                    .get(tweet.user_id_str.as_str())
                    .ok_or_else(|| Error::UnknownAuthor {
                        tweet_id: tweet_id.clone(),
                        user_id: tweet.user_id_str.clone(),
                    })?
                    .clone();

                tweet.into_record(author, collected_at)
            })
            .collect()
    }
}

/// Extract records from a page with the default extractor
pub fn extract_records(page: &Page) -> Result<Vec<PostRecord>> {
    RecordExtractor::new().extract(page)
}

/// Reformat an API timestamp (`Mon Jan 02 15:04:05 +0000 2023`) as
/// `2023-01-02 15:04:05`. No time zone conversion is applied.
pub fn parse_date(created_at: &str) -> Result<String> {
    NaiveDateTime::parse_from_str(created_at, API_TIME_FORMAT)
        .map(|dt| dt.format(RECORD_TIME_FORMAT).to_string())
        .map_err(|e| Error::InvalidTimestamp {
            value: created_at.to_string(),
            message: e.to_string(),
        })
}

/// Swap the `_normal` thumbnail suffix for the 400x400 variant
pub fn upgrade_profile_image(url: &str) -> String {
    url.replace("_normal", "400x400")
}

fn index_authors(page: &Page) -> Result<HashMap<&str, Author>> {
    page.require_users()?
        .iter()
        .map(|(user_id, raw)| {
            let user = RawUser::deserialize(raw)
                .map_err(|e| Error::decode(format!("user {user_id}: {e}")))?;
            Ok((user_id.as_str(), user.into_author()))
        })
        .collect()
}

// ============================================================================
// Raw API shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawUser {
    screen_name: String,
    name: String,
    followers_count: u64,
    profile_image_url_https: String,
}

impl RawUser {
    fn into_author(self) -> Author {
        Author {
            screen_name: self.screen_name,
            name: self.name,
            followers: self.followers_count,
            profile_image_url: upgrade_profile_image(&self.profile_image_url_https),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTweet {
    id_str: String,
    ext_views: RawViews,
    favorite_count: u64,
    reply_count: u64,
    created_at: String,
    full_text: String,
    entities: RawEntities,
    user_id_str: String,
    #[serde(default)]
    in_reply_to_status_id_str: Option<String>,
    #[serde(default)]
    quoted_status_id_str: Option<String>,
}

impl RawTweet {
    fn into_record(self, author: Author, collected_at: DateTime<Utc>) -> Result<PostRecord> {
        Ok(PostRecord {
            local_time: parse_date(&self.created_at)?,
            id: self.id_str,
            collection_time: collected_at,
            impression_count: self.ext_views.count,
            like_count: self.favorite_count,
            reply_count: self.reply_count,
            text: self.full_text,
            media: self.entities.media.map(|media| {
                media
                    .into_iter()
                    .map(|m| Media {
                        media_type: m.media_type,
                        url: m.media_url_https,
                    })
                    .collect()
            }),
            to_tweetid: self.in_reply_to_status_id_str,
            quoted_id: self.quoted_status_id_str,
            author,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawViews {
    #[serde(deserialize_with = "count_from_number_or_string")]
    count: u64,
}

#[derive(Debug, Deserialize)]
struct RawEntities {
    #[serde(default)]
    media: Option<Vec<RawMedia>>,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    #[serde(rename = "type")]
    media_type: String,
    media_url_https: String,
}

/// View counts arrive as strings, other counts as numbers
fn count_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Number(n) => n
            .as_u64()
            .ok_or_else(|| de::Error::custom(format!("count {n} is not a non-negative integer"))),
        JsonValue::String(s) => s
            .parse()
            .map_err(|_| de::Error::custom(format!("count '{s}' is not a number"))),
        other => Err(de::Error::custom(format!("unexpected count {other}"))),
    }
}
