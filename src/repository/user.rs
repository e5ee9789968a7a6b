use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// A persisted account record.
///
/// The password exists here only as the opaque output of the password hasher;
/// the plaintext is never stored and the hash is never serialized outward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub agreed_to_terms: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(any(test, feature = "mocks"))]
impl User {
    pub fn mock() -> Self {
        User {
            id: 1,
            email: "test@example.com".to_owned(),
            hashed_password: "fakehashedpassword".to_owned(),
            agreed_to_terms: true,
            created_at: Utc::now(),
        }
    }

    pub fn mock_from_credentials(email: &str, hashed_password: &str) -> Self {
        User {
            id: 1,
            email: email.to_owned(),
            hashed_password: hashed_password.to_owned(),
            agreed_to_terms: true,
            created_at: Utc::now(),
        }
    }
}

/// The credential store.
///
/// Every operation is a single round-trip to persistent storage; there is no
/// in-memory cache. Email comparison is exact-match as stored. If a caller
/// normalizes emails (case-folding), it must do so consistently before both
/// `create_user` and `find_user_by_email`, or accounts differing only by case
/// will slip past the uniqueness constraint.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateEmail` when the email is already taken.
    /// The store's own uniqueness constraint decides races between concurrent
    /// sign-ups; the winner gets the row, the loser gets this error.
    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
        agreed_to_terms: bool,
    ) -> Result<User, AuthError>;

    /// Removes a user. Sessions referencing it are cascade-deleted by the
    /// store. This is the administrative path; nothing in the sign-up/sign-in
    /// flow updates or deletes users.
    async fn delete_user(&self, user_id: i64) -> Result<(), AuthError>;
}
