//! Application state for the Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::SecurityConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Designed to be used with Axum's State extractor. Cloning is cheap since
/// both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool (health checks)
    pub db_pool: AsyncDbPool,
    /// Security gate policy for the request pipeline
    pub security: SecurityConfig,
}

impl AppState {
    /// Creates a new AppState from a database connection pool and the
    /// security settings, initializing all repositories and services.
    pub fn new(pool: AsyncDbPool, security: SecurityConfig) -> Self {
        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos);
        Self {
            services,
            db_pool: pool,
            security,
        }
    }
}
