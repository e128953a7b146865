use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::LoggingConfig;

/// Set up application logging based on configuration
pub fn setup_logging(config: &LoggingConfig) -> WorkerGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match &config.file_path {
        None => {
            // No file path configured: log to stderr only
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .expect("Failed to set global tracing subscriber");

            // Return a dummy guard - the caller holds a guard either way
            let (_dummy_writer, guard) = tracing_appender::non_blocking(
                tracing_appender::rolling::never(std::env::temp_dir(), "unused.log"),
            );
            guard
        }
        Some(path) => {
            let (file_writer, guard) = create_file_logger(path);

            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(file_writer)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .expect("Failed to set global tracing subscriber");

            guard
        }
    }
}

// Create a non-rotating file appender for the given path
fn create_file_logger(path: &str) -> (NonBlocking, WorkerGuard) {
    let log_path = std::path::PathBuf::from(path);
    let log_dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().expect("Current directory not accessible"),
    };

    std::fs::create_dir_all(&log_dir).expect("Failed to create log directory");

    let log_file_name = log_path
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("gh-console.log"));

    let file_appender = tracing_appender::rolling::never(&log_dir, log_file_name);
    tracing_appender::non_blocking(file_appender)
}
