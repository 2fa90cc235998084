//! Development data seeder.

use std::fmt;
use std::sync::Arc;

use scribe_postgres::model::NewAccount;

use crate::service::security::PasswordHasher;
use crate::service::store::AccountStore;
use crate::{Error, Result};

/// Tracing target for seeding operations.
const TRACING_TARGET: &str = "scribe_server::service::seeder";

/// An account created by the seeder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAccount {
    pub username: &'static str,
    pub email_address: &'static str,
    pub password: &'static str,
}

/// Accounts inserted into an empty store.
pub const SEED_ACCOUNTS: [SeedAccount; 3] = [
    SeedAccount {
        username: "admin",
        email_address: "admin@example.com",
        password: "admin123",
    },
    SeedAccount {
        username: "user1",
        email_address: "user1@example.com",
        password: "user123",
    },
    SeedAccount {
        username: "user2",
        email_address: "user2@example.com",
        password: "user123",
    },
];

/// Result of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Accounts were inserted.
    Seeded { created: usize, purged: usize },
    /// The store already held accounts; nothing was changed.
    Skipped { existing: i64 },
}

/// Populates an empty account store with [`SEED_ACCOUNTS`].
#[derive(Clone)]
pub struct Seeder {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
}

impl Seeder {
    /// Creates a new seeder.
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Seeds the store.
    ///
    /// With `force`, every existing account is purged first. Otherwise a
    /// non-empty store is left untouched. A hashing failure aborts the process.
    pub async fn seed(&self, force: bool) -> Result<SeedOutcome> {
        let purged = if force {
            let purged = self.store.purge_accounts().await?;
            tracing::warn!(target: TRACING_TARGET, purged, "existing accounts purged");
            purged
        } else {
            0
        };

        let existing = self.store.count_accounts().await?;
        if existing > 0 {
            tracing::info!(
                target: TRACING_TARGET,
                existing,
                "accounts already present, skipping seed"
            );
            return Ok(SeedOutcome::Skipped { existing });
        }

        for seed in SEED_ACCOUNTS {
            let hasher = self.hasher.clone();
            let password_hash =
                tokio::task::spawn_blocking(move || hasher.hash_or_abort(seed.password))
                    .await
                    .map_err(|e| {
                        Error::internal("password_hasher", "hashing task failed").with_source(e)
                    })?;

            let new_account = NewAccount::new(seed.username, seed.email_address, password_hash);
            let account = self.store.create_account(new_account).await?;

            tracing::info!(
                target: TRACING_TARGET,
                account_id = %account.id,
                username = %account.username,
                "seed account created"
            );
        }

        Ok(SeedOutcome::Seeded {
            created: SEED_ACCOUNTS.len(),
            purged,
        })
    }
}

impl fmt::Debug for Seeder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seeder")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}
