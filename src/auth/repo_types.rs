use serde::Serialize;
use sqlx::FromRow;

/// User record in the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // salted SHA-256, never exposed
}

/// Row of `users_sessions`. `expires_at` is milliseconds since the epoch.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: i64,
}
