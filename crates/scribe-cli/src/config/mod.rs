//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # Host, port, shutdown
//! ├── middleware: MiddlewareConfig # Request timeout
//! ├── service: ServiceConfig       # Postgres, session keys, hash cost
//! └── command: Command             # serve (default) | seed [--force]
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
pub use middleware::MiddlewareConfig;
use scribe_server::service::ServiceConfig;
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "scribe")]
#[command(about = "Scribe authentication and blogging API")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration.
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Database, session token and hashing configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Subcommand to run; serves the API when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serves the HTTP API.
    Serve,
    /// Inserts the demo accounts.
    Seed(SeedArgs),
}

/// Arguments of the `seed` subcommand.
#[derive(Debug, Clone, Args)]
pub struct SeedArgs {
    /// Deletes every existing account before seeding.
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Loads the `.env` file (if enabled) and parses CLI arguments.
    ///
    /// The `.env` file is read first so clap's `env` lookups see its values.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with `RUST_LOG` filtering, defaulting to `info`.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates everything needed to serve requests.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }

    /// Logs configuration without secrets.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            dotenv = cfg!(feature = "dotenv"),
            "build information"
        );

        self.server.log();
        self.middleware.log();

        let postgres = &self.service.postgres;
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            postgres_url = %postgres.database_url_masked(),
            postgres_max_connections = postgres.postgres_max_connections,
            postgres_connection_timeout_secs = ?postgres.postgres_connection_timeout_secs,
            postgres_idle_timeout_secs = ?postgres.postgres_idle_timeout_secs,
            "database configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            auth_secret_set = self.service.session_keys.has_secret(),
            auth_token_lifetime_secs = self.service.session_keys.auth_token_lifetime_secs,
            password_hash_cost = self.service.password_hash_cost,
            "authentication configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_seed_subcommand() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "scribe",
            "--postgres-url",
            "postgresql://localhost/scribe",
            "seed",
            "--force",
        ])?;
        assert!(matches!(
            cli.command,
            Some(Command::Seed(SeedArgs { force: true }))
        ));
        Ok(())
    }

    #[test]
    fn defaults_to_serving() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "scribe",
            "--postgres-url",
            "postgresql://localhost/scribe",
            "--port",
            "8080",
        ])?;
        assert!(cli.command.is_none());
        assert_eq!(cli.server.port, 8080);
        Ok(())
    }
}
