//! Session storage: opaque tokens mapped to user ids.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{User, UserRepository};
use crate::AuthError;

/// A persisted session row.
///
/// The token is the identity: an unguessable string acting as a capability.
/// Many sessions may reference one user; there is no uniqueness constraint on
/// `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Repository for session storage.
///
/// Sessions are created on successful sign-in or sign-up, read on every
/// authenticated request, never updated, and removed on sign-out, expiry
/// pruning, or cascade when the owning user is deleted.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Generates a fresh cryptographically random token, persists the
    /// (token, user id) pair, and returns the token.
    ///
    /// Concurrent issuance for the same user is allowed and produces
    /// independent valid sessions.
    async fn create(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AuthError>;

    /// Finds a session row by its token.
    async fn find(&self, token: &str) -> Result<Option<SessionRecord>, AuthError>;

    /// Destroys a session (explicit sign-out). Destroying an absent token is
    /// not an error.
    async fn destroy(&self, token: &str) -> Result<(), AuthError>;

    /// Removes expired sessions.
    ///
    /// Returns the number of sessions pruned.
    async fn prune_expired(&self) -> Result<u64, AuthError>;
}

/// Resolves a session token to its owning user.
///
/// An absent token, an expired session, and a dangling session left behind by
/// user deletion all yield `Ok(None)`, never an error.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
pub async fn resolve_session<S, U>(
    sessions: &S,
    users: &U,
    token: &str,
) -> Result<Option<User>, AuthError>
where
    S: SessionRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    let Some(session) = sessions.find(token).await? else {
        return Ok(None);
    };

    if session.is_expired() {
        return Ok(None);
    }

    users.find_user_by_id(session.user_id).await
}
