//! Embedded database migrations for `SQLite`.
//!
//! Migrations are embedded at compile time and run programmatically.
//!
//! # Example
//!
//! ```rust,ignore
//! use doorman::sqlite::migrations;
//! use sqlx::SqlitePool;
//!
//! async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
//!     migrations::run(pool).await?;
//!     Ok(())
//! }
//! ```

use sqlx::{Executor, SqlitePool};

const CORE_MIGRATIONS: &[(&str, &str)] = &[
    (
        "20260810000001_create_users_table",
        include_str!("../../migrations_sqlite/core/20260810000001_create_users_table.sql"),
    ),
    (
        "20260810000002_create_sessions_table",
        include_str!("../../migrations_sqlite/core/20260810000002_create_sessions_table.sql"),
    ),
];

/// Runs all database migrations.
///
/// Migrations are executed in order and tracked in the `_doorman_migrations`
/// table; already-applied migrations are skipped.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(
        r"
        CREATE TABLE IF NOT EXISTS _doorman_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        ",
    )
    .await?;

    run_migrations(pool, CORE_MIGRATIONS).await
}

async fn run_migrations(pool: &SqlitePool, migrations: &[(&str, &str)]) -> Result<(), sqlx::Error> {
    for (name, sql) in migrations {
        let applied: Option<(String,)> =
            sqlx::query_as("SELECT name FROM _doorman_migrations WHERE name = ?")
                .bind(name)
                .fetch_optional(pool)
                .await?;

        if applied.is_some() {
            continue;
        }

        pool.execute(*sql).await?;

        sqlx::query("INSERT INTO _doorman_migrations (name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await?;

        log::info!(target: "doorman::sqlite", "msg=\"migration applied\", name=\"{name}\"");
    }

    Ok(())
}
