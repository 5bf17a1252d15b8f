//! Async database connection pool implementation.
//!
//! Uses the bb8 connection pool manager with diesel_async for PostgreSQL
//! connections, configured from the `[database]` settings section.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Embedded Diesel migrations, applied by the `migrate` CLI command and by
/// `serve` when `database.auto_migrate` is enabled.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count
/// increment). Structures holding AsyncDbPool can derive Clone without
/// additional Arc wrapping.
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Creates an async database connection pool from the database settings.
pub async fn establish_async_connection_pool(
    config: &DatabaseConfig,
) -> Result<AsyncDbPool, AppError> {
    if config.url.is_empty() {
        return Err(AppError::Configuration {
            key: "database.url".to_string(),
            source: anyhow::anyhow!("database URL is not configured"),
        });
    }

    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.clone());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

    Ok(pool)
}
