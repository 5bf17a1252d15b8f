//! CLI argument parsing with clap
//!
//! Defines the command-line interface structure: the `serve` and `migrate`
//! subcommands plus the global configuration and verbosity flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Environment;

/// A REST catalog service with database integration
#[derive(Parser, Debug)]
#[command(name = "catalog-rs")]
#[command(about = "A REST catalog service for products, categories, and users")]
#[command(long_about = "
Catalog-rs serves a product/category/user catalog over a RESTful API,
backed by PostgreSQL, with layered configuration management and database
migrations.

EXAMPLES:
    # Start the server with default configuration
    catalog-rs serve

    # Start the server on a custom host and port
    catalog-rs serve --host 0.0.0.0 --port 8080

    # Use a specific configuration file
    catalog-rs --config /path/to/config.toml serve

    # Validate configuration without starting the server
    catalog-rs serve --dry-run

    # Apply pending database migrations
    catalog-rs migrate

    # Show pending migrations without applying them
    catalog-rs migrate --dry-run
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// A single TOML file used instead of the layered config directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Available values: development (dev), test, staging, production (prod)
    #[arg(short, long, value_parser = parse_environment)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS")]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Validate configuration and exit without starting the server
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    Migrate {
        /// Show pending migrations without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_environment(s: &str) -> Result<Environment, String> {
    s.parse::<Environment>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["catalog-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli =
            Cli::try_parse_from(["catalog-rs", "serve", "--host", "0.0.0.0", "--port", "8080"])
                .unwrap();
        match cli.command {
            Some(Commands::Serve { host, port, dry_run }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
                assert!(!dry_run);
            }
            _ => panic!("Expected serve command"),
        }
    }

    #[test]
    fn test_parse_env_flag() {
        let cli = Cli::try_parse_from(["catalog-rs", "--env", "prod"]).unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["catalog-rs", "-v", "-q"]).is_err());
    }
}
