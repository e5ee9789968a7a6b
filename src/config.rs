//! Configuration for the authentication flow.
//!
//! Everything configurable lives in one explicit [`AuthConfig`] struct that is
//! constructed at startup and passed into [`AuthFlow`](crate::AuthFlow); there
//! are no module-level singletons.
//!
//! # Example
//!
//! ```rust
//! use doorman::{AuthConfig, CookieConfig, SecretString};
//! use chrono::Duration;
//!
//! let config = AuthConfig {
//!     session_lifetime: Duration::days(7),
//!     cookies: CookieConfig {
//!         signing_key: SecretString::new("a-signing-key-at-least-32-bytes-long"),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use chrono::Duration;

use crate::SecretString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    None,
    Lax,
    #[default]
    Strict,
}

/// Main configuration struct for the authentication flow.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// How long issued sessions remain valid.
    ///
    /// Default: 14 days
    pub session_lifetime: Duration,

    /// Upper bound on any single storage round-trip. Operations exceeding it
    /// surface as `AuthError::StoreTimeout` rather than hanging the request.
    ///
    /// Default: 5 seconds
    pub store_timeout: std::time::Duration,

    /// Session cookie attributes and signing key.
    pub cookies: CookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime: Duration::days(14),
            store_timeout: std::time::Duration::from_secs(5),
            cookies: CookieConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Creates a new configuration with default values.
    ///
    /// A cookie signing key must still be set before the config passes
    /// [`validate`](Self::validate).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration suitable for development and testing.
    ///
    /// Short sessions, generous timeouts, no `Secure` cookie requirement.
    #[must_use]
    pub fn development(signing_key: SecretString) -> Self {
        Self {
            session_lifetime: Duration::hours(24),
            store_timeout: std::time::Duration::from_secs(30),
            cookies: CookieConfig {
                secure: false,
                signing_key,
                ..Default::default()
            },
        }
    }

    /// Checks the configuration for values that would weaken the scheme.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.cookies.signing_key.is_empty() {
            return Err("cookie signing_key must not be empty");
        }
        if self.cookies.signing_key.len() < 32 {
            return Err("cookie signing_key should be at least 32 bytes");
        }
        if self.session_lifetime <= Duration::zero() {
            return Err("session_lifetime must be positive");
        }
        Ok(())
    }
}

/// Attributes applied to the session cookie.
///
/// The session and flash cookie *names* are fixed (see
/// [`response::SESSION_COOKIE`](crate::response::SESSION_COOKIE) and
/// [`flash::FLASH_COOKIE`](crate::flash::FLASH_COOKIE)); both are scoped to
/// the whole site path.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub secure: bool,
    pub same_site: SameSite,
    /// HMAC key used to sign the session cookie so tampered values fail
    /// closed. Must be at least 32 bytes.
    pub signing_key: SecretString,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Lax,
            signing_key: SecretString::new(""),
        }
    }
}
