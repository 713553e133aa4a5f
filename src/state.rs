use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::password::PasswordHasher;
use crate::auth::repo::{PgSessionStore, PgUserStore, SessionStore, UserStore};
use crate::auth::services::AuthService;
use crate::config::AppConfig;
use crate::search::services::SearchProxy;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub search: Arc<SearchProxy>,
}

impl AppState {
    /// Production wiring: PostgreSQL-backed stores and the configured
    /// search upstream.
    pub fn init(config: &AppConfig, db: PgPool) -> anyhow::Result<Self> {
        let users = Arc::new(PgUserStore::new(db.clone())) as Arc<dyn UserStore>;
        let sessions = Arc::new(PgSessionStore::new(db)) as Arc<dyn SessionStore>;
        Self::from_parts(config, users, sessions)
    }

    pub fn from_parts(
        config: &AppConfig,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::new(config.salt_token.clone());
        let auth = Arc::new(AuthService::new(users, sessions, hasher));
        let search = Arc::new(SearchProxy::new(&config.search)?);
        Ok(Self { auth, search })
    }
}
