use clap::Parser;
use std::path::Path;

use gh_console::cli::Cli;
use gh_console::config::load_config;
use gh_console::{AppError, UserStorage, WebServer, logger};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // Load config first to get the log settings
    let mut config = load_config(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}", e);
        std::process::exit(1);
    });
    cli.apply(&mut config);
    config.validate()?;

    // Keep the guard alive so log messages are flushed
    let _guard = logger::setup_logging(&config.logging);

    tracing::info!(
        "gh-console starting on {}:{}",
        config.server.host,
        config.server.port
    );

    // Failing to open the user database at startup is fatal
    let storage = UserStorage::new(Path::new(&config.database.path))?;
    tracing::info!("user database ready at {}", config.database.path);

    let server = WebServer::new(config, storage);
    server.start().await?;

    tracing::info!("gh-console stopped");
    Ok(())
}
