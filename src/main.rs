mod app;
mod auth;
mod config;
mod db;
mod error;
mod response;
mod search;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "reposearch=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let db = db::connect(&config).await?;
    db::run_migrations(&db).await;

    let app_state = AppState::init(&config, db)?;

    app::serve(app::build_app(app_state), &config.host, config.port).await
}
