//! Configuration management for the FM admin console

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Local web server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Background polling configuration
    #[serde(default)]
    pub polling: PollingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Local web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address every request path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the credential token
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,

    /// Clear the session and return to login when the server answers 401
    #[serde(default = "default_logout_on_unauthorized")]
    pub logout_on_unauthorized: bool,
}

/// Background polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Interval between unseen-booking checks, in seconds
    #[serde(default = "default_unseen_interval")]
    pub unseen_interval_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "https://fm-backend-099e.onrender.com/api".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

fn default_token_file() -> PathBuf {
    PathBuf::from("./data/token")
}

const fn default_logout_on_unauthorized() -> bool {
    true
}

const fn default_unseen_interval() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            logout_on_unauthorized: default_logout_on_unauthorized(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            unseen_interval_seconds: default_unseen_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl PollingConfig {
    /// Unseen-booking polling interval as a [`Duration`]
    #[must_use]
    pub const fn unseen_interval(&self) -> Duration {
        Duration::from_secs(self.unseen_interval_seconds)
    }
}

impl Config {
    /// Load configuration from `config.toml` (if present) and `FM_ADMIN_*` variables
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default `config` file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or any source fails to parse.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("FM_ADMIN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| crate::Error::Configuration {
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the console cannot run with
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(crate::Error::Configuration {
                message: "api.base_url must not be empty".to_string(),
            });
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(crate::Error::Configuration {
                message: format!("api.base_url must be an http(s) address: {}", self.api.base_url),
            });
        }
        if self.polling.unseen_interval_seconds == 0 {
            return Err(crate::Error::Configuration {
                message: "polling.unseen_interval_seconds must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
