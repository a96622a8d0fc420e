//! Output record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized post with its author folded in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Tweet id
    pub id: String,
    /// When the record was extracted
    pub collection_time: DateTime<Utc>,
    /// View count
    pub impression_count: u64,
    /// Like count
    pub like_count: u64,
    /// Reply count
    pub reply_count: u64,
    /// Creation time as `YYYY-MM-DD HH:MM:SS`, still in UTC
    pub local_time: String,
    /// Full text
    pub text: String,
    /// Attached media; `None` when the tweet has no media entity at all
    pub media: Option<Vec<Media>>,
    /// Id of the tweet this one replies to
    pub to_tweetid: Option<String>,
    /// Id of the quoted tweet
    pub quoted_id: Option<String>,
    /// Author fields
    #[serde(flatten)]
    pub author: Author,
}

/// Media attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Media type (`photo`, `video`, `animated_gif`)
    #[serde(rename = "type")]
    pub media_type: String,
    /// HTTPS media URL
    pub url: String,
}

/// Denormalized author fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "user_screen_name")]
    pub screen_name: String,
    #[serde(rename = "user_name")]
    pub name: String,
    #[serde(rename = "user_followers")]
    pub followers: u64,
    /// Profile image, upgraded to the 400x400 variant
    #[serde(rename = "user_profile_image_url")]
    pub profile_image_url: String,
}
