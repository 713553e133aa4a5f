use axum::{
    body::Bytes,
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::response::ErrorBody;

const JSON_UTF8: &str = "application/json;charset=UTF-8";

/// Persistence failures surfaced by the user and session stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("insert returned no row")]
    NoRowReturned,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Outcomes of the registration, login and verification flows.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("User with that email already exists")]
    DuplicateEmail,
    #[error("Unknown user")]
    UnknownUser,
    #[error("No Authorization token received")]
    MissingToken,
    #[error("Authentication error")]
    InvalidSession,
    #[error("Unable to create user session")]
    SessionNotCreated,
    #[error("storage failure: {0}")]
    Storage(StoreError),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("upstream responded with status {status}")]
    Upstream {
        status: u16,
        content_type: Option<String>,
        body: Bytes,
    },
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Everything a handler can fail with, mapped onto an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
        Json(ErrorBody::new(message)),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
            ApiError::Auth(err) => match err {
                AuthError::Validation(_) | AuthError::DuplicateEmail | AuthError::UnknownUser => {
                    json_error(StatusCode::BAD_REQUEST, err.to_string())
                }
                AuthError::MissingToken | AuthError::InvalidSession => {
                    json_error(StatusCode::UNAUTHORIZED, err.to_string())
                }
                AuthError::SessionNotCreated => {
                    error!("session insert returned no row");
                    json_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
                AuthError::Storage(e) => {
                    error!(error = %e, "storage failure");
                    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            ApiError::Search(SearchError::Upstream {
                content_type, body, ..
            }) => {
                let content_type = content_type
                    .and_then(|ct| HeaderValue::from_str(&ct).ok())
                    .unwrap_or_else(|| HeaderValue::from_static("text/plain;charset=UTF-8"));
                (
                    StatusCode::BAD_REQUEST,
                    [(header::CONTENT_TYPE, content_type)],
                    body,
                )
                    .into_response()
            }
            ApiError::Search(SearchError::Transport(e)) => {
                error!(error = %e, "search upstream unreachable");
                json_error(StatusCode::BAD_GATEWAY, "Search service unavailable")
            }
        }
    }
}
