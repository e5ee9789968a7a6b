use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{AuthError, User, UserRepository};

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    hashed_password: String,
    agreed_to_terms: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(row: UserRecord) -> Self {
        User {
            id: row.id,
            email: row.email,
            hashed_password: row.hashed_password,
            agreed_to_terms: row.agreed_to_terms,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let row: Option<UserRecord> = sqlx::query_as(
            "SELECT id, email, hashed_password, agreed_to_terms, created_at FROM users WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "doorman::sqlite", "msg=\"database error\", operation=\"find_user_by_id\", error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, email), err))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row: Option<UserRecord> = sqlx::query_as(
            "SELECT id, email, hashed_password, agreed_to_terms, created_at FROM users WHERE email = ?"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::error!(target: "doorman::sqlite", "msg=\"database error\", operation=\"find_user_by_email\", error=\"{e}\"");
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(Into::into))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, email, hashed_password), err)
    )]
    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
        agreed_to_terms: bool,
    ) -> Result<User, AuthError> {
        let now = Utc::now();
        let row: UserRecord = sqlx::query_as(
            "INSERT INTO users (email, hashed_password, agreed_to_terms, created_at) VALUES (?, ?, ?, ?) RETURNING id, email, hashed_password, agreed_to_terms, created_at"
        )
        .bind(email)
        .bind(hashed_password)
        .bind(agreed_to_terms)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // The unique email column arbitrates concurrent sign-up races.
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::DuplicateEmail,
            _ => {
                log::error!(target: "doorman::sqlite", "msg=\"database error\", operation=\"create_user\", error=\"{e}\"");
                AuthError::DatabaseError(e.to_string())
            }
        })?;

        Ok(row.into())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete_user(&self, user_id: i64) -> Result<(), AuthError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!(target: "doorman::sqlite", "msg=\"database error\", operation=\"delete_user\", error=\"{e}\"");
                AuthError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}
