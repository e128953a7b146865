use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Authentication / credential errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// GitHub API errors
    #[error("GitHub API error: {0}")]
    GitHub(#[from] GitHubError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// User storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors (server bind, shutdown)
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Catch-all
    #[error("{message}")]
    Generic { message: String },
}

/// Errors from the upstream GitHub REST API
#[derive(Error, Debug)]
pub enum GitHubError {
    /// HTTP transport failure
    #[error("Network error: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    /// Response body did not match the expected shape
    #[error("Response parsing failed: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// Bad or missing credentials
    #[error("Authentication failed. Please check your GitHub token.")]
    Authentication,

    /// Requested resource does not exist (or is private)
    #[error("Resource not found: {resource_type} {resource_id}")]
    NotFound {
        resource_type: String,
        resource_id: String,
    },

    /// API rate limit exhausted
    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    /// Non-success response with a readable body
    #[error("API response error: {message}")]
    Api { message: String },

    /// Any other non-success response
    #[error("GitHub server error: {status} {message}")]
    Server { status: u16, message: String },
}

/// Local credential verification errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Password hashing or hash parsing failure
    #[error("Password hashing failed: {reason}")]
    Hash { reason: String },

    /// Username/password pair did not verify
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to load config file: {source}")]
    Load {
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed
    #[error("Failed to parse config file: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },

    /// A setting failed validation
    #[error("Configuration validation failed: {reason}")]
    Validation { reason: String },
}

/// User storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite failure
    #[error("Database error: {source}")]
    Database {
        #[source]
        source: rusqlite::Error,
    },
}

impl StorageError {
    /// True when the underlying failure is a uniqueness violation,
    /// e.g. registering a username that already exists.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StorageError::Database {
                source: rusqlite::Error::SqliteFailure(err, _),
            } => err.code == rusqlite::ErrorCode::ConstraintViolation,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(error: reqwest::Error) -> Self {
        GitHubError::Network { source: error }
    }
}

impl From<serde_json::Error> for GitHubError {
    fn from(error: serde_json::Error) -> Self {
        GitHubError::Parse { source: error }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::GitHub(GitHubError::Network { source: error })
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::Load { source: error }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        ConfigError::Parse { source: error }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(error: rusqlite::Error) -> Self {
        StorageError::Database { source: error }
    }
}
