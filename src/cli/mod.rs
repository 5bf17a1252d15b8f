//! Command-line interface: argument parsing and command dispatch.

pub mod handlers;
mod parser;

pub use parser::{Cli, Commands};

use crate::config::ConfigLoader;
use crate::config::settings::Settings;
use crate::server::Server;

/// Runs the parsed CLI command to completion.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;

    let logger_config = settings.logger.clone().into_logger_config()?;
    crate::logger::init_logger(logger_config)?;

    match cli.command {
        Some(Commands::Migrate { dry_run }) => handlers::migrate::execute(&settings, dry_run).await,
        Some(Commands::Serve {
            host,
            port,
            dry_run,
        }) => {
            let settings = apply_serve_overrides(settings, host, port);
            if dry_run {
                return handlers::serve::validate_only(&settings);
            }
            serve(settings).await
        }
        // No subcommand: serve with the loaded settings
        None => serve(settings).await,
    }
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    settings.database.validate()?;

    if settings.database.auto_migrate {
        handlers::migrate::run_migrations(settings.database.url.clone()).await?;
    }

    Server::new(settings).run().await
}

/// Loads settings from the layered sources, honoring the CLI's config file,
/// environment, and verbosity flags.
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut loader = ConfigLoader::new();
    if let Some(environment) = cli.env {
        loader = loader.with_environment(environment);
    }
    if let Some(config_file) = &cli.config {
        loader = loader.with_config_file(config_file.clone());
    }

    let mut settings = loader.load()?;

    // Verbosity flags beat the configured level
    if cli.verbose {
        settings.logger.level = "debug".to_string();
    } else if cli.quiet {
        settings.logger.level = "error".to_string();
    }

    Ok(settings)
}

fn apply_serve_overrides(
    mut settings: Settings,
    host: Option<String>,
    port: Option<u16>,
) -> Settings {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_serve_overrides() {
        let settings = apply_serve_overrides(
            Settings::default(),
            Some("0.0.0.0".to_string()),
            Some(8080),
        );
        assert_eq!(settings.server.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides_keep_defaults_when_absent() {
        let settings = apply_serve_overrides(Settings::default(), None, None);
        assert_eq!(settings.server.address(), "127.0.0.1:3000");
    }
}
