use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Minimum length of the session signing secret. The secret is used verbatim
/// as cookie signing key material, which requires at least 64 bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// User database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session cookie settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Upstream GitHub API settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Log settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// User database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite user database
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    "gh-console.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Session cookie settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie signing secret, at least 64 bytes. The default is for
    /// development only; set SESSION_SECRET in production.
    #[serde(default = "default_session_secret")]
    pub secret: String,

    /// Session lifetime in days (default: 7)
    #[serde(default = "default_session_ttl_days")]
    pub ttl_days: u64,
}

fn default_session_secret() -> String {
    "thisshouldbeabettersecret!thisshouldbeabettersecret!thisshouldbeabettersecret!".to_string()
}

fn default_session_ttl_days() -> u64 {
    7
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: default_session_secret(),
            ttl_days: default_session_ttl_days(),
        }
    }
}

/// Upstream GitHub API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// API base URL (default: https://api.github.com)
    #[serde(default = "default_github_api_url")]
    pub api_base_url: String,

    /// Per-call timeout in seconds (default: 30)
    #[serde(default = "default_github_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_github_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_github_api_url(),
            timeout_secs: default_github_timeout_secs(),
        }
    }
}

/// Log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (default: info)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path; stderr when unset
    #[serde(default)]
    pub file_path: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
        }
    }
}

/// Default configuration file location
pub fn get_config_path() -> PathBuf {
    let mut config_path = dirs::config_dir()
        .unwrap_or_else(|| std::env::current_dir().expect("Current directory not accessible"));
    config_path.push("gh-console");
    config_path.push("config.toml");
    config_path
}

/// Load configuration from the given path (or the default location) and
/// apply environment overrides. Missing file means all defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

    let mut config = if path.exists() {
        let contents = fs::read_to_string(&path)?;
        toml::from_str(&contents)?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Environment overrides: PORT, DATABASE_PATH, SESSION_SECRET
fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
    if let Ok(port) = env::var("PORT") {
        config.server.port = port.parse().map_err(|_| ConfigError::Validation {
            reason: format!("invalid PORT value: {port}"),
        })?;
    }
    if let Ok(path) = env::var("DATABASE_PATH") {
        config.database.path = path;
    }
    if let Ok(secret) = env::var("SESSION_SECRET") {
        config.session.secret = secret;
    }
    Ok(())
}

impl Config {
    /// Reject settings the server cannot safely start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Validation {
                reason: format!(
                    "session secret must be at least {MIN_SESSION_SECRET_LEN} bytes"
                ),
            });
        }
        if self.session.ttl_days == 0 {
            return Err(ConfigError::Validation {
                reason: "session ttl_days must be at least 1".to_string(),
            });
        }
        if self.github.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                reason: "github timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
