//! Configuration loading for the book engine.
//!
//! Configuration comes from an optional YAML file with environment
//! overrides on top. A missing default file is not an error; every
//! setting has a usable default.
//!
//! # Usage
//!
//! ```rust,ignore
//! use book_engine::config::load_config;
//!
//! // Load from CONFIG_PATH or ./config.yaml, falling back to defaults.
//! let config = load_config(None)?;
//!
//! // Load from an explicit path (must exist).
//! let config = load_config(Some("custom/config.yaml"))?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server port for the REST endpoints.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Bind address.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            bind_address: default_bind_address(),
        }
    }
}

const fn default_http_port() -> u16 {
    8080
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level directive, `RUST_LOG` syntax.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from a YAML file with environment overrides.
///
/// With an explicit `path` the file must exist. Without one, the file
/// named by `CONFIG_PATH` (default `config.yaml`) is used when present
/// and defaults apply otherwise. `HTTP_PORT` and `BIND_ADDRESS`
/// override the file in either case.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or
/// validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => {
            let path =
                std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
            if std::path::Path::new(&path).exists() {
                parse_file(&path)?
            } else {
                Config::default()
            }
        }
    };

    apply_overrides(
        &mut config,
        std::env::var("HTTP_PORT").ok(),
        std::env::var("BIND_ADDRESS").ok(),
    )?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml_bw::from_str(yaml)?;
    validate_config(&config)?;
    Ok(config)
}

fn parse_file(path: &str) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;
    Ok(serde_yaml_bw::from_str(&contents)?)
}

fn apply_overrides(
    config: &mut Config,
    http_port: Option<String>,
    bind_address: Option<String>,
) -> Result<(), ConfigError> {
    if let Some(port) = http_port {
        config.server.http_port = port.parse().map_err(|_| {
            ConfigError::ValidationError(format!("HTTP_PORT must be a port number, got '{port}'"))
        })?;
    }
    if let Some(addr) = bind_address {
        config.server.bind_address = addr;
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }
    if config.server.bind_address.is_empty() {
        return Err(ConfigError::ValidationError(
            "server.bind_address must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn yaml_overrides_defaults() {
        let yaml = r"
server:
  http_port: 9090
logging:
  level: debug
";
        let config = load_config_from_string(yaml).unwrap();

        assert_eq!(config.server.http_port, 9090);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn zero_port_fails_validation() {
        let yaml = r"
server:
  http_port: 0
";
        let result = load_config_from_string(yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = Config::default();

        apply_overrides(
            &mut config,
            Some("9191".to_string()),
            Some("127.0.0.1".to_string()),
        )
        .unwrap();

        assert_eq!(config.server.http_port, 9191);
        assert_eq!(config.server.bind_address, "127.0.0.1");
    }

    #[test]
    fn non_numeric_port_override_is_rejected() {
        let mut config = Config::default();

        let result = apply_overrides(&mut config, Some("not-a-port".to_string()), None);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_config(Some("definitely/not/here.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
