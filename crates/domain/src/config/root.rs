use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::observer::ObserverConfig;
use super::records::RecordsConfig;
use super::server::ServerConfig;

/// Main configuration structure for rrdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening interface, port and zone suffix
    #[serde(default)]
    pub server: ServerConfig,

    /// Records file and reload cadence
    #[serde(default)]
    pub records: RecordsConfig,

    /// Query-name observer queue
    #[serde(default)]
    pub observer: ObserverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. rrdns.toml in current directory
    /// 3. /etc/rrdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(interface) = overrides.interface {
            self.server.interface = Some(interface);
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(suffix) = overrides.suffix {
            self.server.suffix = suffix;
        }
        if let Some(path) = overrides.records_path {
            self.records.path = Some(path);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.suffix.trim().trim_matches('.').is_empty() {
            return Err(ConfigError::Validation(
                "A zone suffix is required".to_string(),
            ));
        }

        if let Some(ref interface) = self.server.interface {
            if interface.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Interface name cannot be blank".to_string(),
                ));
            }
        }

        if self.observer.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "Observer queue capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("rrdns.toml").exists() {
            Some("rrdns.toml".to_string())
        } else if std::path::Path::new("/etc/rrdns/config.toml").exists() {
            Some("/etc/rrdns/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub interface: Option<String>,
    pub port: Option<u16>,
    pub suffix: Option<String>,
    pub records_path: Option<String>,
    pub log_level: Option<String>,
}
