use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Command line options
#[derive(Parser, Debug)]
#[command(
    name = "gh-console",
    version,
    about = "Sign in locally and manage GitHub repositories from the browser"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the listening port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the user database path
    #[arg(short, long)]
    pub database: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = &self.database {
            config.database.path = database.display().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = Cli {
            config: None,
            port: Some(8080),
            database: Some(PathBuf::from("/tmp/users.db")),
        };
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "/tmp/users.db");
    }

    #[test]
    fn no_flags_leave_config_untouched() {
        let cli = Cli {
            config: None,
            port: None,
            database: None,
        };
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.server.port, 3000);
    }
}
