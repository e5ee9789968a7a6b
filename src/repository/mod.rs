//! Repository traits and data types.
//!
//! This module defines the storage abstractions used throughout doorman.
//! Implement these traits to use your own database or storage backend.
//!
//! # Traits
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`UserRepository`] | Credential store: users keyed by unique email |
//! | [`SessionRepository`] | Opaque session tokens mapped to user ids |
//!
//! # Mock Implementations
//!
//! Enable the `mocks` feature for in-memory implementations useful for testing:
//!
//! - [`MockUserRepository`]
//! - [`MockSessionRepository`]

mod session;
mod user;

#[cfg(any(test, feature = "mocks"))]
mod session_mock;
#[cfg(any(test, feature = "mocks"))]
mod user_mock;

pub use session::resolve_session;
pub use session::SessionRecord;
pub use session::SessionRepository;
pub use user::User;
pub use user::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use session_mock::MockSessionRepository;
#[cfg(any(test, feature = "mocks"))]
pub use user_mock::MockUserRepository;
