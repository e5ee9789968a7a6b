pub mod config;
pub mod cookie;
pub mod crypto;
pub mod flash;
pub mod flow;
pub mod forms;
pub mod repository;
pub mod response;
mod secret;
#[cfg(feature = "sqlx_sqlite")]
pub mod sqlite;
pub mod validate;

pub use config::{AuthConfig, CookieConfig, SameSite};
pub use crypto::{Argon2Hasher, PasswordHasher};
pub use flow::AuthFlow;
pub use repository::resolve_session;
pub use repository::SessionRecord;
pub use repository::SessionRepository;
pub use repository::User;
pub use repository::UserRepository;
pub use secret::SecretString;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockSessionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use repository::MockUserRepository;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    DuplicateEmail,
    UserNotFound,
    InvalidCredentials,
    SessionInvalid,
    PasswordHashError,
    StoreTimeout,
    DatabaseError(String),
    InvalidConfig(&'static str),
}

impl std::error::Error for AuthError {}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The user-visible variants display the exact flash text so the
            // two never drift apart.
            AuthError::DuplicateEmail => f.write_str(flow::messages::DUPLICATE_EMAIL),
            AuthError::InvalidCredentials => f.write_str(flow::messages::AUTH_REJECTED),
            AuthError::UserNotFound => write!(f, "User not found"),
            AuthError::SessionInvalid => write!(f, "Session is missing, expired, or invalid"),
            AuthError::PasswordHashError => write!(f, "Failed to hash password"),
            AuthError::StoreTimeout => write!(f, "Storage operation timed out"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}
