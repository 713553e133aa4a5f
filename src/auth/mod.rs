use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub mod middleware;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

/// Public routes: registration and login.
pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
