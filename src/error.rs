//! Error types for tweet-search
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for tweet-search
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Invalid header '{name}': {message}")]
    InvalidHeader { name: String, message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Response contained no tweets")]
    EmptyPage,

    #[error("Gave up after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        attempts: u32,
        #[source]
        last_error: Box<Error>,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Tweet {tweet_id} references unknown author {user_id}")]
    UnknownAuthor { tweet_id: String, user_id: String },

    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a decode error for a missing key path
    pub fn missing_key(path: &str) -> Self {
        Self::Decode {
            message: format!("missing key '{path}'"),
        }
    }
}

/// Result type alias for tweet-search
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::UnknownAuthor {
            tweet_id: "1".to_string(),
            user_id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Tweet 1 references unknown author 42");
    }

    #[test]
    fn test_missing_key_message() {
        let err = Error::missing_key("globalObjects.users");
        assert_eq!(
            err.to_string(),
            "Failed to decode response: missing key 'globalObjects.users'"
        );
    }

    #[test]
    fn test_max_retries_wraps_last_error() {
        let err = Error::MaxRetriesExceeded {
            attempts: 12,
            last_error: Box::new(Error::EmptyPage),
        };
        assert_eq!(
            err.to_string(),
            "Gave up after 12 attempts: Response contained no tweets"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
