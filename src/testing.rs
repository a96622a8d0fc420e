//! Page fixtures shared by unit tests

use crate::types::JsonValue;
use serde_json::{json, Map};

/// A raw tweet authored by `user_id`
pub(crate) fn tweet(id: &str, user_id: &str) -> JsonValue {
    json!({
        "id_str": id,
        "created_at": "Mon Jan 02 15:04:05 +0000 2023",
        "full_text": format!("tweet number {id}"),
        "favorite_count": 3,
        "reply_count": 1,
        "ext_views": {"state": "EnabledWithCount", "count": "120"},
        "entities": {"hashtags": []},
        "user_id_str": user_id,
    })
}

/// A raw user with a `_normal` profile image
pub(crate) fn user(id: &str) -> JsonValue {
    json!({
        "id_str": id,
        "screen_name": format!("user{id}"),
        "name": format!("User {id}"),
        "followers_count": 1000,
        "profile_image_url_https": format!("https://pbs.twimg.com/profile_images/{id}/photo_normal.jpg"),
    })
}

/// An `addEntries` instruction whose bottom cursor carries `value`
pub(crate) fn add_entries(value: &str) -> JsonValue {
    json!({
        "addEntries": {
            "entries": [
                {"entryId": "sq-I-t-1", "sortIndex": "2", "content": {"item": {}}},
                {"entryId": "sq-cursor-top", "sortIndex": "1",
                 "content": {"operation": {"cursor": {"value": "TOP", "cursorType": "Top"}}}},
                {"entryId": "sq-cursor-bottom", "sortIndex": "0",
                 "content": {"operation": {"cursor": {"value": value, "cursorType": "Bottom"}}}},
            ]
        }
    })
}

/// A `replaceEntry` instruction carrying a cursor of `cursor_type`
pub(crate) fn replace_entry(value: &str, cursor_type: &str) -> JsonValue {
    json!({
        "replaceEntry": {
            "entryIdToReplace": format!("sq-cursor-{}", cursor_type.to_lowercase()),
            "entry": {
                "entryId": format!("sq-cursor-{}", cursor_type.to_lowercase()),
                "sortIndex": "0",
                "content": {"operation": {"cursor": {"value": value, "cursorType": cursor_type}}},
            }
        }
    })
}

/// A page with tweets `start..start + count`, all by user "1"
pub(crate) fn page_body(start: usize, count: usize, instructions: Vec<JsonValue>) -> JsonValue {
    let mut tweets = Map::new();
    for n in start..start + count {
        let id = n.to_string();
        tweets.insert(id.clone(), tweet(&id, "1"));
    }

    json!({
        "globalObjects": {
            "tweets": tweets,
            "users": {"1": user("1")},
        },
        "timeline": {"id": "search-6882", "instructions": instructions},
    })
}
