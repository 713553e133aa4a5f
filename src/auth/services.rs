use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::dto::{LoginRequest, PublicUser, RegisterRequest, SessionContext, SessionToken};
use crate::auth::password::PasswordHasher;
use crate::auth::repo::{SessionStore, UserStore};
use crate::error::{AuthError, StoreError};

/// Lifetime of a login session: seven days in milliseconds.
pub const SESSION_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

const PASSWORD_MIN_CHARS: usize = 8;
const PASSWORD_MAX_CHARS: usize = 16;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if !is_valid_email(email) {
        return Err(AuthError::Validation("Invalid email".into()));
    }
    let len = password.chars().count();
    if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&len) {
        return Err(AuthError::Validation(format!(
            "Password must be between {} and {} characters",
            PASSWORD_MIN_CHARS, PASSWORD_MAX_CHARS
        )));
    }
    Ok(())
}

/// Current wall-clock time in milliseconds since the epoch.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Token carried by an `Authorization` header value.
///
/// Only the first six bytes are checked against the literal `Bearer`; the
/// rest is trimmed and must be non-empty.
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Registration, login and session verification over the user and session
/// stores. Holds no per-request state.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            users,
            sessions,
            hasher,
        }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<PublicUser, AuthError> {
        validate_credentials(&req.email, &req.password)?;

        let password_hash = self.hasher.hash(&req.password);
        let user = self
            .users
            .create(&req.email, &req.name, &password_hash)
            .await
            .map_err(|e| match e {
                StoreError::DuplicateEmail => {
                    warn!(email = %req.email, "email already registered");
                    AuthError::DuplicateEmail
                }
                other => AuthError::Storage(other),
            })?;

        info!(user_id = user.id, email = %user.email, "user registered");
        Ok(PublicUser {
            email: user.email,
            name: user.name,
        })
    }

    pub async fn login(&self, req: LoginRequest, now: i64) -> Result<SessionToken, AuthError> {
        validate_credentials(&req.email, &req.password)?;

        let password_hash = self.hasher.hash(&req.password);
        let user = self
            .users
            .find_by_credentials(&req.email, &password_hash)
            .await
            .map_err(AuthError::Storage)?
            .ok_or_else(|| {
                warn!(email = %req.email, "login rejected");
                AuthError::UnknownUser
            })?;

        let expires_at = now + SESSION_TTL_MS;
        let token = self.hasher.generate_token();
        let session = self
            .sessions
            .create(user.id, &token, expires_at)
            .await
            .map_err(|e| match e {
                StoreError::NoRowReturned => AuthError::SessionNotCreated,
                other => AuthError::Storage(other),
            })?;

        info!(user_id = user.id, session_id = session.id, "user logged in");
        Ok(SessionToken {
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    /// Resolves an `Authorization` header value to the owning user.
    pub async fn verify(
        &self,
        authorization: Option<&str>,
        now: i64,
    ) -> Result<SessionContext, AuthError> {
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        let session = self
            .sessions
            .find_valid_by_token(token, now)
            .await
            .map_err(AuthError::Storage)?
            .ok_or(AuthError::InvalidSession)?;

        debug!(user_id = session.user_id, "session verified");
        Ok(SessionContext {
            user_id: session.user_id,
        })
    }
}
