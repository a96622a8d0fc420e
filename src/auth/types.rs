//! Auth configuration types

use crate::types::GUEST_ACTIVATE_ENDPOINT;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// How requests to the search endpoint are authenticated
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication headers
    #[default]
    None,

    /// App-only bearer token
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Bearer token plus a guest token activated on first use
    Guest {
        /// The bearer token used for activation and requests
        bearer: String,
        /// Guest token activation endpoint
        activate_url: String,
    },

    /// Logged-in browser session
    Session {
        /// The bearer token of the web client
        bearer: String,
        /// Value of the `auth_token` cookie
        auth_token: String,
        /// Value of the `ct0` cookie, echoed as the CSRF header
        csrf_token: String,
    },

    /// Custom headers
    CustomHeaders {
        /// Headers to add to each request
        headers: HashMap<String, String>,
    },
}

impl AuthConfig {
    /// Bearer token auth
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Guest auth against the default activation endpoint
    pub fn guest(bearer: impl Into<String>) -> Self {
        Self::Guest {
            bearer: bearer.into(),
            activate_url: GUEST_ACTIVATE_ENDPOINT.to_string(),
        }
    }

    /// Logged-in session auth
    pub fn session(
        bearer: impl Into<String>,
        auth_token: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self::Session {
            bearer: bearer.into(),
            auth_token: auth_token.into(),
            csrf_token: csrf_token.into(),
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The token value
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}
