//! Authenticator implementation
//!
//! Produces the authenticated header set for the search session and caches
//! guest tokens between requests.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, COOKIE};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Guest tokens are honored for a few hours after activation
const GUEST_TOKEN_LIFETIME_SECS: i64 = 3 * 60 * 60;

/// Source of authenticated headers for search requests
#[async_trait]
pub trait HeaderProvider: Send + Sync {
    /// Headers to attach to the next request
    async fn headers(&self) -> Result<HeaderMap>;

    /// Called when the server rejected the session's credentials
    async fn invalidate(&self) {}
}

/// Authenticator turns an [`AuthConfig`] into request headers
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached guest token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token activation
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Get a valid guest token, activating a new one if necessary
    async fn guest_token(&self, bearer: &str, activate_url: &str) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have activated while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.activate_guest(bearer, activate_url).await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Activate a new guest token
    async fn activate_guest(&self, bearer: &str, activate_url: &str) -> Result<CachedToken> {
        debug!(url = activate_url, "activating guest token");

        let response = self
            .http_client
            .post(activate_url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "Guest activation failed with status {status}: {body}"
            )));
        }

        let body: GuestActivation = response.json().await.map_err(Error::Http)?;
        Ok(CachedToken::expires_in(
            body.guest_token,
            GUEST_TOKEN_LIFETIME_SECS,
        ))
    }
}

#[async_trait]
impl HeaderProvider for Authenticator {
    async fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        match &self.config {
            AuthConfig::None => {}

            AuthConfig::Bearer { token } => {
                insert(&mut headers, AUTHORIZATION, &format!("Bearer {token}"))?;
            }

            AuthConfig::Guest {
                bearer,
                activate_url,
            } => {
                let guest = self.guest_token(bearer, activate_url).await?;
                insert(&mut headers, AUTHORIZATION, &format!("Bearer {bearer}"))?;
                insert_named(&mut headers, "x-guest-token", &guest)?;
            }

            AuthConfig::Session {
                bearer,
                auth_token,
                csrf_token,
            } => {
                insert(&mut headers, AUTHORIZATION, &format!("Bearer {bearer}"))?;
                insert(
                    &mut headers,
                    COOKIE,
                    &format!("auth_token={auth_token}; ct0={csrf_token}"),
                )?;
                insert_named(&mut headers, "x-csrf-token", csrf_token)?;
                insert_named(&mut headers, "x-twitter-auth-type", "OAuth2Session")?;
            }

            AuthConfig::CustomHeaders { headers: custom } => {
                for (key, value) in custom {
                    insert_named(&mut headers, key, value)?;
                }
            }
        }

        if !headers.is_empty() {
            insert_named(&mut headers, "x-twitter-active-user", "yes")?;
        }

        Ok(headers)
    }

    /// Drop the cached guest token so the next request activates a new one
    async fn invalidate(&self) {
        if self.cached_token.write().await.take().is_some() {
            debug!("guest token invalidated");
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.config {
            AuthConfig::None => "none",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::Guest { .. } => "guest",
            AuthConfig::Session { .. } => "session",
            AuthConfig::CustomHeaders { .. } => "custom_headers",
        };
        f.debug_struct("Authenticator")
            .field("kind", &kind)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct GuestActivation {
    guest_token: String,
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    headers.insert(name, value);
    Ok(())
}

fn insert_named(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let header = HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    insert(headers, header, value)
}
