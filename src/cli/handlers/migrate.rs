//! Migrate command handler.
//!
//! Applies or inspects the embedded Diesel migrations. The migration
//! harness is synchronous, so it runs on a blocking thread with a plain
//! diesel connection.

use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::MigrationHarness;

use crate::config::settings::Settings;
use crate::db::MIGRATIONS;

/// Executes the migrate command.
pub async fn execute(settings: &Settings, dry_run: bool) -> anyhow::Result<()> {
    settings.database.validate()?;

    if dry_run {
        let pending = pending_migrations(settings.database.url.clone()).await?;
        if pending.is_empty() {
            println!("No pending migrations");
        } else {
            println!("Pending migrations:");
            for name in &pending {
                println!("  {}", name);
            }
        }
        return Ok(());
    }

    run_migrations(settings.database.url.clone()).await
}

/// Applies all pending migrations.
pub async fn run_migrations(database_url: String) -> anyhow::Result<()> {
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|e| anyhow::anyhow!("Failed to connect for migrations: {}", e))?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

        Ok::<_, anyhow::Error>(applied.iter().map(|m| m.to_string()).collect::<Vec<_>>())
    })
    .await??;

    if applied.is_empty() {
        tracing::info!("No pending migrations");
    } else {
        for name in &applied {
            tracing::info!(migration = %name, "Applied migration");
        }
    }

    Ok(())
}

/// Lists pending migrations without applying them.
async fn pending_migrations(database_url: String) -> anyhow::Result<Vec<String>> {
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|e| anyhow::anyhow!("Failed to connect for migration check: {}", e))?;

        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Migration check failed: {}", e))?;

        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await?
}
