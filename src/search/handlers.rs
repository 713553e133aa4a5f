use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Extension, Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::dto::SessionContext,
    error::ApiError,
    response::ApiResponse,
    search::dto::{Repository, SearchParams},
    state::AppState,
};

/// Routes mounted behind the session middleware.
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search))
}

#[instrument(skip(state, params))]
pub async fn search(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Repository>>>, ApiError> {
    let Query(params) = params?;
    let repos = state.search.search(&params.q).await?;
    info!(user_id = session.user_id, count = repos.len(), "search completed");
    Ok(Json(ApiResponse::ok(repos)))
}
