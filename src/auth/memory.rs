use std::sync::Mutex;

use async_trait::async_trait;

use crate::auth::repo::{SessionStore, UserStore};
use crate::auth::repo_types::{Session, User};
use crate::error::StoreError;

/// In-process stand-in for the `users` table, unique on email.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: rows.len() as i64 + 1,
            email: email.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|u| u.email == email && u.password_hash == password_hash)
            .cloned())
    }
}

/// In-process stand-in for `users_sessions`.
#[derive(Default)]
pub struct MemorySessionStore {
    rows: Mutex<Vec<Session>>,
}

impl MemorySessionStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(
        &self,
        user_id: i64,
        token: &str,
        expires_at: i64,
    ) -> Result<Session, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let session = Session {
            id: rows.len() as i64 + 1,
            user_id,
            token: token.to_string(),
            expires_at,
        };
        rows.push(session.clone());
        Ok(session)
    }

    async fn find_valid_by_token(
        &self,
        token: &str,
        now: i64,
    ) -> Result<Option<Session>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|s| s.token == token && s.expires_at > now)
            .cloned())
    }
}

/// Session store whose inserts never come back with a row.
pub struct NoRowSessionStore;

#[async_trait]
impl SessionStore for NoRowSessionStore {
    async fn create(&self, _: i64, _: &str, _: i64) -> Result<Session, StoreError> {
        Err(StoreError::NoRowReturned)
    }

    async fn find_valid_by_token(&self, _: &str, _: i64) -> Result<Option<Session>, StoreError> {
        Ok(None)
    }
}
