//! Authentication module
//!
//! Supports: Bearer, Guest token, logged-in Session, Custom Headers
//!
//! The `Authenticator` implements [`HeaderProvider`], the capability the HTTP
//! client calls before every request to obtain the session's headers.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, HeaderProvider};
pub use types::{AuthConfig, CachedToken};
