use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{
    app::not_found,
    auth::{dto::SessionContext, services::now_millis},
    error::ApiError,
    state::AppState,
};

async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    path: &str,
) -> Result<SessionContext, ApiError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let ctx = state
        .auth
        .verify(authorization.as_deref(), now_millis())
        .await
        .map_err(|e| {
            warn!(path, reason = %e, "request not authenticated");
            e
        })?;
    Ok(ctx)
}

/// Gatekeeper for protected routes. Resolves the bearer token to a
/// [`SessionContext`] and stores it in the request extensions; on failure
/// the inner handler never runs.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_owned();
    let ctx = authenticate(&state, req.headers(), &path).await?;

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

/// Method fallback for the public auth routes: any verb other than the
/// registered one is treated like an unknown `/api` path.
pub async fn gated_not_found(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, &'static str), ApiError> {
    authenticate(&state, req.headers(), req.uri().path()).await?;
    Ok(not_found().await)
}
