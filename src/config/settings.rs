//! Configuration settings structures for catalog-rs
//!
//! Defines all configuration structures that can be loaded from TOML files
//! and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "catalog-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/app.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to automatically run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

impl DatabaseConfig {
    /// Validates the database configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "database.url".to_string(),
                message: "Database URL cannot be empty".to_string(),
            });
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database".to_string(),
                message: "min_connections cannot exceed max_connections".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Security Configuration
// ============================================================================

/// Security gate configuration.
///
/// The shipped configuration permits all requests unauthenticated; the
/// gate is a deployment-time policy placeholder, not an authorization
/// system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Whether every request passes the gate without authentication
    #[serde(default = "default_true")]
    pub permit_all: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            permit_all: default_true(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to an existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings into the runtime LoggerConfig used by the
    /// logger module.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let format = self
            .file
            .format
            .parse()
            .map_err(|e: String| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e,
            })?;
        let file = FileConfig::new(
            self.file.enabled,
            self.file.path.into(),
            self.file.append,
            format,
        );

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::ValidationError {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings, loadable from TOML files and environment
/// variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Security gate configuration
    #[serde(default)]
    pub security: SecurityConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

impl Settings {
    /// Validates the loaded settings.
    ///
    /// The database URL is intentionally not checked here: it is required
    /// only by commands that actually open a connection, which validate it
    /// themselves.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_greater_than_max() {
            return Err(ConfigError::ValidationError {
                field: "database".to_string(),
                message: "min_connections cannot exceed max_connections".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError {
                field: "server.port".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        Ok(())
    }

    fn min_greater_than_max(&self) -> bool {
        self.database.min_connections > self.database.max_connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "catalog-rs");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.max_connections, 10);
        assert!(settings.security.permit_all);
        assert_eq!(settings.logger.level, "info");
        assert!(settings.logger.console.enabled);
        assert!(!settings.logger.file.enabled);
    }

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_database_config_validate_empty_url() {
        let config = DatabaseConfig::default();
        let result = config.validate();
        assert!(result.is_err());
        if let Err(ConfigError::ValidationError { field, .. }) = result {
            assert_eq!(field, "database.url");
        }
    }

    #[test]
    fn test_settings_validate_rejects_inverted_pool_bounds() {
        let settings = Settings {
            database: DatabaseConfig {
                url: "postgres://localhost/catalog".to_string(),
                max_connections: 2,
                min_connections: 5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_validate_rejects_port_zero() {
        let settings = Settings {
            server: ServerConfig {
                port: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
            [application]
            name = "my-catalog"

            [server]
            port = 8080

            [security]
            permit_all = false
        "#;

        let settings: Settings = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(settings.application.name, "my-catalog");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1"); // default
        assert!(!settings.security.permit_all);
        assert_eq!(settings.logger.level, "info"); // default
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings::default(),
        };
        let config = settings.into_logger_config().expect("Should convert");
        assert_eq!(config.level, "debug");
        assert!(config.console.enabled);
        assert!(!config.console.colored);
        assert!(!config.file.enabled);
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "yaml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = settings.into_logger_config();
        assert!(result.is_err());
        if let Err(ConfigError::ValidationError { field, .. }) = result {
            assert_eq!(field, "logger.file.format");
        }
    }

    #[test]
    fn test_logger_settings_both_outputs_disabled() {
        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            file: FileSettings {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.into_logger_config().is_err());
    }

    // ========================================================================
    // Property-based tests
    // ========================================================================

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            "[a-z][a-z0-9-]{0,20}",
            1u16..=65535u16,
            1u32..=10u32,
            10u32..=100u32,
            any::<bool>(),
            prop_oneof![
                Just("trace".to_string()),
                Just("debug".to_string()),
                Just("info".to_string()),
                Just("warn".to_string()),
                Just("error".to_string()),
            ],
        )
            .prop_map(
                |(name, port, min_connections, max_connections, permit_all, level)| Settings {
                    application: ApplicationConfig {
                        name,
                        version: "1.0.0".to_string(),
                    },
                    server: ServerConfig {
                        host: "127.0.0.1".to_string(),
                        port,
                    },
                    database: DatabaseConfig {
                        url: "postgres://localhost/catalog".to_string(),
                        max_connections,
                        min_connections,
                        connection_timeout: 30,
                        auto_migrate: false,
                    },
                    security: SecurityConfig { permit_all },
                    logger: LoggerSettings {
                        level,
                        ..Default::default()
                    },
                },
            )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Serializing any valid Settings to TOML and deserializing it back
        /// produces an equivalent Settings instance.
        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings)
                .expect("Settings should serialize to TOML");

            let deserialized: Settings = toml::from_str(&toml_str)
                .expect("TOML should deserialize back to Settings");

            prop_assert_eq!(settings, deserialized);
        }
    }
}
