use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PublicUser {
    pub email: String,
    pub name: String,
}

/// Issued bearer token and its expiry (ms since epoch).
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: i64,
}

#[derive(Debug, Serialize)]
pub struct RegisterResult {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct LoginResult {
    pub session: SessionToken,
}

/// Request-scoped identity attached by the session middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: i64,
}
