use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::{Session, User};
use crate::error::StoreError;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. A taken email yields [`StoreError::DuplicateEmail`].
    async fn create(&self, email: &str, name: &str, password_hash: &str)
        -> Result<User, StoreError>;

    /// Exact match on both email and password hash.
    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, user_id: i64, token: &str, expires_at: i64)
        -> Result<Session, StoreError>;

    /// Session with this exact token that is still alive at `now`.
    /// Expired rows are indistinguishable from unknown tokens.
    async fn find_valid_by_token(&self, token: &str, now: i64)
        -> Result<Option<Session>, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, password)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, password AS password_hash
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateEmail
            }
            other => StoreError::Database(other),
        })?;
        Ok(user)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, password AS password_hash
            FROM users
            WHERE email = $1 AND password = $2
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}

#[derive(Clone)]
pub struct PgSessionStore {
    db: PgPool,
}

impl PgSessionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(
        &self,
        user_id: i64,
        token: &str,
        expires_at: i64,
    ) -> Result<Session, StoreError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO users_sessions (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token, expires_at
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_optional(&self.db)
        .await?;
        session.ok_or(StoreError::NoRowReturned)
    }

    async fn find_valid_by_token(
        &self,
        token: &str,
        now: i64,
    ) -> Result<Option<Session>, StoreError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token, expires_at
            FROM users_sessions
            WHERE token = $1 AND expires_at > $2
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.db)
        .await?;
        Ok(session)
    }
}
