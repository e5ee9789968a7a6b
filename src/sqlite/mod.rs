//! `SQLite` database backend implementations.
//!
//! This module provides `SQLite`-backed implementations of the repository
//! traits. Enable the `sqlx_sqlite` feature to use them.

pub mod migrations;
mod session;
mod user;

use std::str::FromStr;
use std::time::Duration;

pub use session::SqliteSessionRepository;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
pub use user::SqliteUserRepository;

/// Opens a `SQLite` pool suitable for the auth store.
///
/// Foreign-key enforcement is switched on for every connection; without it
/// `SQLite` ignores the `ON DELETE CASCADE` clause and deleting a user would
/// leave its sessions behind. Pool acquisition is bounded by
/// `acquire_timeout` so a wedged store surfaces as an error instead of a
/// hung request.
pub async fn connect(url: &str, acquire_timeout: Duration) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
}

/// Creates all `SQLite` repository instances from a connection pool.
pub fn create_repositories(pool: SqlitePool) -> (SqliteUserRepository, SqliteSessionRepository) {
    (
        SqliteUserRepository::new(pool.clone()),
        SqliteSessionRepository::new(pool),
    )
}
