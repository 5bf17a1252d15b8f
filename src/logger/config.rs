//! Logger configuration types.

use std::path::PathBuf;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Output format for file logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Default human-readable format
    Full,
    /// Shorter single-line format
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                other
            )),
        }
    }
}

/// Console output configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

/// File output configuration.
#[derive(Debug, Clone)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
}

impl FileConfig {
    pub fn new(enabled: bool, path: PathBuf, append: bool, format: LogFormat) -> Self {
        Self {
            enabled,
            path,
            append,
            format,
        }
    }
}

/// Complete logger configuration.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: String,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl LoggerConfig {
    /// Creates a validated logger configuration.
    pub fn new(console: ConsoleConfig, file: FileConfig, level: String) -> anyhow::Result<Self> {
        let config = Self {
            level,
            console,
            file,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that at least one output is enabled and the level parses as
    /// a tracing filter directive.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.console.enabled && !self.file.enabled {
            anyhow::bail!("At least one output (console or file) must be enabled");
        }

        EnvFilter::try_new(&self.level)
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", self.level, e))?;

        Ok(())
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: ConsoleConfig::new(true, true),
            file: FileConfig::new(false, PathBuf::from("logs/app.log"), true, LogFormat::Json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("FULL".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert_eq!("Compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_config_rejects_all_outputs_disabled() {
        let result = LoggerConfig::new(
            ConsoleConfig::new(false, false),
            FileConfig::new(false, PathBuf::from("logs/app.log"), true, LogFormat::Json),
            "info".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_invalid_level() {
        let result = LoggerConfig::new(
            ConsoleConfig::new(true, true),
            FileConfig::new(false, PathBuf::from("logs/app.log"), true, LogFormat::Json),
            "not-a-level=".to_string(),
        );
        assert!(result.is_err());
    }
}
