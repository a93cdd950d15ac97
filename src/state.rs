//! Shared application state handed to every handler and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    pub fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}
