#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::crypto::{generate_token, DEFAULT_TOKEN_LENGTH};
use crate::AuthError;

use super::session::{SessionRecord, SessionRepository};

#[derive(Clone)]
pub struct MockSessionRepository {
    pub sessions: Arc<Mutex<HashMap<String, SessionRecord>>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MockSessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(
        &self,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let token = generate_token(DEFAULT_TOKEN_LENGTH);
        let record = SessionRecord {
            token: token.clone(),
            user_id,
            created_at: Utc::now(),
            expires_at,
        };

        self.sessions.lock().unwrap().insert(token.clone(), record);
        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<SessionRecord>, AuthError> {
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }

    async fn destroy(&self, token: &str) -> Result<(), AuthError> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }

    async fn prune_expired(&self) -> Result<u64, AuthError> {
        let mut sessions = self.sessions.lock().unwrap();
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, record| record.expires_at > now);
        let pruned = before.saturating_sub(sessions.len());
        drop(sessions);

        Ok(u64::try_from(pruned).unwrap_or(u64::MAX))
    }
}
