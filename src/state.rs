//! Shared application state
//!
//! Cloned into every handler through axum's `State` extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::services::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub jwt: Arc<JwtService>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let jwt = Arc::new(JwtService::from_config(&config));
        Self { pool, config, jwt }
    }
}
