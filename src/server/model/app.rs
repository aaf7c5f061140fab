use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{config::Config, notify::Notifier, service::auth::rate_limit::RateLimiter};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub notifier: Arc<Notifier>,
    pub rate_limiter: Arc<RateLimiter>,
}
