pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod forms;
pub mod github;
pub mod handlers;
pub mod logger;
pub mod server;
pub mod session;
pub mod storage;
pub mod views;

pub use errors::{AppError, AuthError, ConfigError, GitHubError, StorageError};
pub use github::GitHubClient;
pub use server::WebServer;
pub use storage::UserStorage;
