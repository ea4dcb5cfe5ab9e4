//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::source::GraphQlConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub pulse: PulseConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upper bound on handling one request, upstream calls included
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Upstream service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_openbeta_url")]
    pub openbeta_url: String,

    pub openbeta_api_key: Option<String>,

    #[serde(default = "default_opencollective_url")]
    pub opencollective_url: String,

    #[serde(default = "default_opencollective_slug")]
    pub opencollective_slug: String,

    #[serde(default = "default_source_timeout")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u32,

    /// Serve JSON fixtures from this directory instead of calling upstream
    pub fixtures_dir: Option<String>,
}

fn default_openbeta_url() -> String {
    "https://api.openbeta.io/".to_string()
}

fn default_opencollective_url() -> String {
    "https://api.opencollective.com/graphql/v2".to_string()
}

fn default_opencollective_slug() -> String {
    "openbeta".to_string()
}

fn default_source_timeout() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_leaderboard_limit() -> u32 {
    30
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            openbeta_url: default_openbeta_url(),
            openbeta_api_key: None,
            opencollective_url: default_opencollective_url(),
            opencollective_slug: default_opencollective_slug(),
            request_timeout_ms: default_source_timeout(),
            max_retries: default_max_retries(),
            leaderboard_limit: default_leaderboard_limit(),
            fixtures_dir: None,
        }
    }
}

impl SourcesConfig {
    /// Client settings for the route database API
    pub fn openbeta(&self) -> GraphQlConfig {
        GraphQlConfig {
            endpoint: self.openbeta_url.clone(),
            api_key: self.openbeta_api_key.clone(),
            request_timeout_ms: self.request_timeout_ms,
            max_retries: self.max_retries,
        }
    }

    /// Client settings for the donation platform API
    pub fn opencollective(&self) -> GraphQlConfig {
        GraphQlConfig {
            endpoint: self.opencollective_url.clone(),
            api_key: None,
            request_timeout_ms: self.request_timeout_ms,
            max_retries: self.max_retries,
        }
    }
}

/// Pulse page configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PulseConfig {
    #[serde(default = "default_revalidate")]
    pub revalidate_secs: u64,
}

fn default_revalidate() -> u64 {
    60
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            revalidate_secs: default_revalidate(),
        }
    }
}

impl PulseConfig {
    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }
}

/// Media preview configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_media_base_url")]
    pub base_url: String,

    #[serde(default = "default_media_quality")]
    pub quality: u8,
}

fn default_media_base_url() -> String {
    "https://media.openbeta.io".to_string()
}

fn default_media_quality() -> u8 {
    90
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_media_base_url(),
            quality: default_media_quality(),
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

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
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
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("cragpulse").join("config.toml")),
            Some(PathBuf::from("/etc/cragpulse/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(host) = var("CRAGPULSE_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("CRAGPULSE_PORT").and_then(|p| p.parse().ok()) {
            self.api.port = port;
        }

        // Source overrides
        if let Some(url) = var("CRAGPULSE_OPENBETA_URL") {
            self.sources.openbeta_url = url;
        }
        if let Some(key) = var("CRAGPULSE_OPENBETA_API_KEY") {
            self.sources.openbeta_api_key = Some(key);
        }
        if let Some(url) = var("CRAGPULSE_OPENCOLLECTIVE_URL") {
            self.sources.opencollective_url = url;
        }
        if let Some(slug) = var("CRAGPULSE_OPENCOLLECTIVE_SLUG") {
            self.sources.opencollective_slug = slug;
        }
        if let Some(dir) = var("CRAGPULSE_FIXTURES_DIR") {
            self.sources.fixtures_dir = Some(dir);
        }

        // Pulse overrides
        if let Some(secs) = var("CRAGPULSE_REVALIDATE_SECS").and_then(|s| s.parse().ok()) {
            self.pulse.revalidate_secs = secs;
        }

        // Logging overrides
        if let Some(level) = var("CRAGPULSE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CRAGPULSE_LOG_FORMAT") {
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
    r#"# Cragpulse Configuration
#
# Environment variables override these settings:
# - CRAGPULSE_HOST
# - CRAGPULSE_PORT
# - CRAGPULSE_OPENBETA_URL
# - CRAGPULSE_OPENBETA_API_KEY
# - CRAGPULSE_OPENCOLLECTIVE_URL
# - CRAGPULSE_OPENCOLLECTIVE_SLUG
# - CRAGPULSE_FIXTURES_DIR
# - CRAGPULSE_REVALIDATE_SECS
# - CRAGPULSE_LOG_LEVEL
# - CRAGPULSE_LOG_FORMAT

[api]
# HTTP server host
host = "0.0.0.0"

# HTTP server port
port = 8090

# Allowed CORS origins
cors_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]

# Request timeout in seconds
request_timeout_secs = 30

[sources]
# Route database GraphQL endpoint
openbeta_url = "https://api.openbeta.io/"

# Donation platform GraphQL endpoint and collective
opencollective_url = "https://api.opencollective.com/graphql/v2"
opencollective_slug = "openbeta"

# Upstream request timeout (ms) and attempts
request_timeout_ms = 10000
max_retries = 3

# Number of contributors on the tags leaderboard
leaderboard_limit = 30

# Serve JSON fixtures instead of calling upstream
# fixtures_dir = "./fixtures"

[pulse]
# Seconds before the pulse snapshot is revalidated
revalidate_secs = 60

[media]
# Image CDN for photo previews
base_url = "https://media.openbeta.io"
quality = 90

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
