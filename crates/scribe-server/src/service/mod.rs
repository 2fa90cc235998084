//! Application state and dependency injection.

mod account;
mod config;
mod post;
mod security;
mod seeder;
mod store;

use std::sync::Arc;

pub use crate::service::account::AccountService;
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::post::PostService;
pub use crate::service::security::{
    Clock, PasswordHasher, SessionClaims, SessionKeys, SessionKeysConfig, SystemClock,
};
pub use crate::service::seeder::{SEED_ACCOUNTS, SeedAccount, SeedOutcome, Seeder};
#[cfg(test)]
pub(crate) use crate::service::security::FixedClock;
#[cfg(test)]
pub(crate) use crate::service::store::MemoryStore;
pub use crate::service::store::{AccountStore, PgStore, PostStore};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // Domain services:
    pub account_service: AccountService,
    pub post_service: PostService,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Validates the configuration and creates the Postgres pool; connections
    /// are opened on first use.
    pub fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        service_config.validate()?;

        let store = Arc::new(PgStore::new(service_config.connect_postgres()?));
        let password_hasher = service_config.password_hasher()?;
        let session_keys = service_config.session_keys()?;

        Ok(Self::with_stores(
            store.clone(),
            store,
            password_hasher,
            session_keys,
        ))
    }

    /// Assembles application state over arbitrary stores.
    pub fn with_stores(
        account_store: Arc<dyn AccountStore>,
        post_store: Arc<dyn PostStore>,
        password_hasher: PasswordHasher,
        session_keys: SessionKeys,
    ) -> Self {
        Self {
            account_service: AccountService::new(
                account_store,
                password_hasher.clone(),
                session_keys.clone(),
            ),
            post_service: PostService::new(post_store),
            password_hasher,
            session_keys,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// Domain services:
impl_di!(account_service: AccountService);
impl_di!(post_service: PostService);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
