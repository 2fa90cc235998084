//! Development data seeding.

use std::sync::Arc;

use anyhow::Context;
use scribe_server::service::{AccountStore, PgStore, SeedOutcome, Seeder, ServiceConfig};

use crate::TRACING_TARGET_SEED;
use crate::config::SeedArgs;

/// Inserts the seed accounts into the configured database.
pub async fn run(config: &ServiceConfig, args: &SeedArgs) -> anyhow::Result<()> {
    config.validate_for_seeding()?;

    let store: Arc<dyn AccountStore> = Arc::new(PgStore::new(config.connect_postgres()?));
    let hasher = config.password_hasher()?;

    tracing::info!(
        target: TRACING_TARGET_SEED,
        force = args.force,
        "seeding database"
    );

    let outcome = Seeder::new(store, hasher)
        .seed(args.force)
        .await
        .context("failed to seed database")?;

    match outcome {
        SeedOutcome::Seeded { created, purged } => tracing::info!(
            target: TRACING_TARGET_SEED,
            created,
            purged,
            "database seeded"
        ),
        SeedOutcome::Skipped { existing } => tracing::info!(
            target: TRACING_TARGET_SEED,
            existing,
            "database already holds accounts, use --force to reseed"
        ),
    }

    Ok(())
}
