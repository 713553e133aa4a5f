use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginRequest, LoginResult, RegisterRequest, RegisterResult},
        middleware::gated_not_found,
        services::now_millis,
    },
    error::ApiError,
    response::ApiResponse,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register).fallback(gated_not_found))
        .route("/api/auth/login", post(login).fallback(gated_not_found))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RegisterResult>>, ApiError> {
    let Json(payload) = payload?;
    let user = state.auth.register(payload).await?;
    Ok(Json(ApiResponse::ok(RegisterResult { user })))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    let Json(payload) = payload?;
    let session = state.auth.login(payload, now_millis()).await?;
    Ok(Json(ApiResponse::ok(LoginResult { session })))
}
