#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use crate::AuthError;

use super::user::{User, UserRepository};

#[derive(Clone)]
pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(vec![])),
            next_id: Arc::new(Mutex::new(1)),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(
        &self,
        email: &str,
        hashed_password: &str,
        agreed_to_terms: bool,
    ) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();

        // Same behavior as the real store's unique column
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::DuplicateEmail);
        }

        let mut next_id = self.next_id.lock().unwrap();
        let user = User {
            id: *next_id,
            email: email.to_owned(),
            hashed_password: hashed_password.to_owned(),
            agreed_to_terms,
            created_at: Utc::now(),
        };
        *next_id += 1;

        users.push(user.clone());
        Ok(user)
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        let len_before = users.len();
        users.retain(|u| u.id != user_id);
        if users.len() < len_before {
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MockUserRepository::new();
        let a = repo.create_user("a@x.com", "h", true).await.unwrap();
        let b = repo.create_user("b@x.com", "h", true).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repo = MockUserRepository::new();
        repo.create_user("a@x.com", "h", true).await.unwrap();
        let err = repo.create_user("a@x.com", "h2", true).await.unwrap_err();
        assert_eq!(err, AuthError::DuplicateEmail);
    }

    #[tokio::test]
    async fn test_email_is_exact_match() {
        let repo = MockUserRepository::new();
        repo.create_user("a@x.com", "h", true).await.unwrap();
        assert!(repo.find_user_by_email("A@x.com").await.unwrap().is_none());
    }
}
