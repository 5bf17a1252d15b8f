//! Serve command handler: dry-run configuration validation.

use crate::config::settings::Settings;

/// Validates the configuration without starting the server.
pub fn validate_only(settings: &Settings) -> anyhow::Result<()> {
    settings.validate()?;
    settings.database.validate()?;
    settings.logger.clone().into_logger_config()?;

    println!("Configuration is valid");
    println!("Server would bind to: {}", settings.server.address());
    println!(
        "Security gate: {}",
        if settings.security.permit_all {
            "permit all (no authentication)"
        } else {
            "reject unauthenticated requests"
        }
    );
    println!("Dry run completed successfully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[test]
    fn test_validate_only_requires_database_url() {
        let settings = Settings::default();
        assert!(validate_only(&settings).is_err());
    }

    #[test]
    fn test_validate_only_accepts_complete_settings() {
        let settings = Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/catalog".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_only(&settings).is_ok());
    }
}
