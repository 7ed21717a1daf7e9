//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dispatch::ComparativeScope;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Analytics data service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,

    pub api_key: Option<String>,

    /// No timeout unless set
    pub request_timeout_secs: Option<u64>,

    pub health_url: Option<String>,

    /// Serve responses from this JSON file instead of calling `url`
    pub fixture: Option<PathBuf>,
}

fn default_source_url() -> String {
    "http://localhost:7860/analytics".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            api_key: None,
            request_timeout_secs: None,
            health_url: None,
            fixture: None,
        }
    }
}

/// Page configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub comparative_scope: ComparativeScope,

    #[serde(default = "default_footer")]
    pub footer: String,
}

fn default_title() -> String {
    "Social Media Performance Dashboard".to_string()
}

fn default_footer() -> String {
    "Made with ❤️ by 🎀 Barbie Girls in a Barbie World 🎀".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            comparative_scope: ComparativeScope::default(),
            footer: default_footer(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Result of searching the default config locations
#[derive(Debug)]
pub struct DefaultLoad {
    pub config: Config,
    /// File the config came from; `None` means defaults plus environment
    pub path: Option<PathBuf>,
    /// Files that exist but failed to load, in search order
    pub skipped: Vec<ConfigError>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is set up, so files that fail to load are
    /// handed back in [`DefaultLoad::skipped`] for the caller to report.
    pub fn load_default() -> DefaultLoad {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("pulseboard").join("config.toml")),
            Some(PathBuf::from("/etc/pulseboard/config.toml")),
            Some(PathBuf::from("./pulseboard.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file in `paths` that parses
    pub fn load_first(paths: &[PathBuf]) -> DefaultLoad {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    return DefaultLoad {
                        config,
                        path: Some(path.clone()),
                        skipped,
                    }
                }
                Err(e) => skipped.push(e),
            }
        }

        DefaultLoad {
            config: Self::from_env(),
            path: None,
            skipped,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = var("PULSEBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PULSEBOARD_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid PULSEBOARD_PORT {:?}", port),
            }
        }

        // Source overrides
        if let Some(url) = var("PULSEBOARD_SOURCE_URL") {
            self.source.url = url;
        }
        if let Some(key) = var("PULSEBOARD_SOURCE_API_KEY") {
            self.source.api_key = Some(key);
        }
        if let Some(fixture) = var("PULSEBOARD_FIXTURE") {
            self.source.fixture = Some(PathBuf::from(fixture));
        }

        // Logging overrides
        if let Some(level) = var("PULSEBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PULSEBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Pulseboard Configuration
#
# Environment variables override these settings:
# - PULSEBOARD_HOST
# - PULSEBOARD_PORT
# - PULSEBOARD_SOURCE_URL
# - PULSEBOARD_SOURCE_API_KEY
# - PULSEBOARD_FIXTURE
# - PULSEBOARD_LOG_LEVEL
# - PULSEBOARD_LOG_FORMAT

[server]
# Dashboard host
host = "127.0.0.1"

# Dashboard port
port = 8501

[source]
# Analytics data service endpoint (receives {"content_types": [...]})
url = "http://localhost:7860/analytics"

# Optional bearer token for the data service
# api_key = ""

# Optional request timeout in seconds (unset waits indefinitely)
# request_timeout_secs = 120

# Optional URL checked by /health/ready
# health_url = "http://localhost:7860/health"

# Serve a canned JSON response instead of calling the service
# fixture = "./fixtures/response.json"

[dashboard]
# Page title
title = "Social Media Performance Dashboard"

# Comparative analysis entries to show: "selected" or "all"
comparative_scope = "selected"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
