//! Configuration loader for catalog-rs
//!
//! Provides the `ConfigLoader` struct that handles loading configuration
//! from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment as EnvSource, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for the configuration directory
const CONFIG_DIR_ENV: &str = "CATALOG_CONFIG_DIR";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "CATALOG";

/// Separator for nested configuration keys in environment variables,
/// e.g. CATALOG_SERVER__PORT -> server.port
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading.
///
/// Sources in order of priority:
/// 1. `default.toml` - base defaults (optional; built-in defaults apply)
/// 2. `{environment}.toml` - environment-specific configuration (optional)
/// 3. `local.toml` - local development overrides (optional)
/// 4. `CATALOG_*` environment variables (highest priority)
///
/// An explicit config file (`--config`) replaces the layered files but is
/// still overridden by environment variables.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader, reading `CATALOG_CONFIG_DIR` and
    /// `CATALOG_APP_ENV` from the environment.
    pub fn new() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        Self {
            config_dir,
            config_file: None,
            environment: AppEnvironment::from_env(),
        }
    }

    /// Use a single explicit configuration file instead of layered loading.
    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_file = Some(path);
        self
    }

    /// Override the detected environment.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources and validate it.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            // Single file mode: the file must exist
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // Environment variables always win
        let builder = builder.add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, false)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        Ok(builder.add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(required),
        ))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_layered_files_fall_back_to_defaults() {
        let loader = ConfigLoader {
            config_dir: PathBuf::from("/nonexistent/config/dir"),
            config_file: None,
            environment: AppEnvironment::Test,
        };

        let settings = loader.load().expect("defaults should load");
        assert_eq!(settings.server.port, 3000);
        assert!(settings.security.permit_all);
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let loader = ConfigLoader {
            config_dir: PathBuf::from("config"),
            config_file: Some(PathBuf::from("/nonexistent/catalog.toml")),
            environment: AppEnvironment::Test,
        };

        let result = loader.load();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_with_environment_override() {
        let loader = ConfigLoader::new().with_environment(AppEnvironment::Production);
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }
}
