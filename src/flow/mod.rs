//! The auth flow controller.
//!
//! [`AuthFlow`] orchestrates the credential store, session store, password
//! hasher, validation pipeline, and flash channel into the sign-up, sign-in,
//! sign-out, and authenticated-access transitions. Each transition is
//! terminal per request; the next state is established by the client's next
//! request carrying the new cookie state.
//!
//! No error escapes to the caller as a raw error: every failure path
//! terminates in a redirect plus an optional flash message. Store failures
//! are logged and collapsed into a generic message.

mod current_user;
mod signin;
mod signout;
mod signup;

use std::sync::Arc;

pub use current_user::Gate;

use crate::config::AuthConfig;
use crate::crypto::PasswordHasher;
use crate::repository::{SessionRepository, UserRepository};
use crate::response::{CookieOp, Response, COOKIE_PATH, SESSION_COOKIE};
use crate::validate::{EmailPolicy, PasswordPolicy};
use crate::{cookie, flash, AuthError, SecretString};

/// User-facing flash text for each rejection outcome.
///
/// Absent account and wrong password share [`messages::AUTH_REJECTED`] so the
/// response does not leak which emails have accounts.
pub mod messages {
    pub const TERMS_REQUIRED: &str = "You must agree to the terms of service";
    pub const DUPLICATE_EMAIL: &str = "An account with that email already exists";
    pub const AUTH_REJECTED: &str = "Invalid email or password";
    pub const SIGNIN_REQUIRED: &str = "Please sign in";
    pub const SESSION_EXPIRED: &str = "Your session has expired, please sign in again";
    pub const GENERIC_FAILURE: &str = "Something went wrong, please try again";
}

/// Outcome of a form POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// 422-style: the body failed its shape or consent check. The web layer
    /// re-renders the form with these errors instead of redirecting.
    Rejected {
        errors: Vec<String>,
        cookies: Vec<CookieOp>,
    },
    /// A terminal redirect with cookie instructions.
    Redirect(Response),
}

impl FormOutcome {
    fn rejected(errors: Vec<String>) -> Self {
        // Even a re-render clears any stale flash.
        FormOutcome::Rejected {
            errors,
            cookies: vec![flash::clear_op()],
        }
    }
}

/// The application context for the auth flow, constructed once at startup.
///
/// Holds the two stores, the hasher, and the config; handlers share it by
/// reference (or clone it, both repositories being pool-backed handles).
pub struct AuthFlow<U, S> {
    users: U,
    sessions: S,
    hasher: Arc<dyn PasswordHasher>,
    config: AuthConfig,
    email_policy: EmailPolicy,
    password_policy: PasswordPolicy,
}

impl<U, S> AuthFlow<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Builds the flow context, checking the configuration up front.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfig` when the configuration fails
    /// [`AuthConfig::validate`], so a flow can never be constructed with a
    /// missing or weak cookie signing key.
    pub fn new(
        users: U,
        sessions: S,
        hasher: Arc<dyn PasswordHasher>,
        config: AuthConfig,
    ) -> Result<Self, AuthError> {
        config.validate().map_err(AuthError::InvalidConfig)?;

        Ok(Self {
            users,
            sessions,
            hasher,
            config,
            email_policy: EmailPolicy::default(),
            password_policy: PasswordPolicy::default(),
        })
    }

    /// Replaces the email validation policy.
    #[must_use]
    pub fn with_email_policy(mut self, policy: EmailPolicy) -> Self {
        self.email_policy = policy;
        self
    }

    /// Replaces the password validation policy.
    #[must_use]
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    pub(crate) fn email_policy(&self) -> &EmailPolicy {
        &self.email_policy
    }

    pub(crate) fn password_policy(&self) -> &PasswordPolicy {
        &self.password_policy
    }

    pub(crate) fn users(&self) -> &U {
        &self.users
    }

    pub(crate) fn sessions(&self) -> &S {
        &self.sessions
    }

    pub(crate) fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub(crate) fn signing_key(&self) -> &SecretString {
        &self.config.cookies.signing_key
    }

    pub(crate) fn cookies_secure(&self) -> bool {
        self.config.cookies.secure
    }

    /// Bounds a store round-trip by the configured timeout so a wedged store
    /// surfaces as a distinguishable error instead of a hung request.
    pub(crate) async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, AuthError>>,
    ) -> Result<T, AuthError> {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AuthError::StoreTimeout),
        }
    }

    /// Hashing is CPU-bound by design; run it on the blocking pool so it does
    /// not stall the request threads serving other connections.
    pub(crate) async fn hash_blocking(&self, password: SecretString) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
            .await
            .map_err(|_| AuthError::PasswordHashError)?
    }

    pub(crate) async fn verify_blocking(
        &self,
        password: SecretString,
        hash: String,
    ) -> Result<bool, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(password.expose_secret(), &hash))
            .await
            .map_err(|_| AuthError::PasswordHashError)?
    }

    /// The signed session cookie carrying `token`.
    pub(crate) fn session_cookie_op(&self, token: &str) -> CookieOp {
        CookieOp::Set {
            name: SESSION_COOKIE,
            value: cookie::sign_session_token(token, self.signing_key()),
            path: COOKIE_PATH,
            http_only: true,
            secure: self.config.cookies.secure,
            same_site: self.config.cookies.same_site,
        }
    }

    pub(crate) fn clear_session_op() -> CookieOp {
        CookieOp::Clear {
            name: SESSION_COOKIE,
            path: COOKIE_PATH,
        }
    }

    /// The generic failure terminal: redirect with a message that exposes no
    /// detail. The detail goes to the log at the failure site.
    pub(crate) fn failure(&self, target: &'static str) -> Response {
        Response::redirect(target).with_flash(messages::GENERIC_FAILURE, self.cookies_secure())
    }
}
