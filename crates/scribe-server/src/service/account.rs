//! Account registration and login.

use std::fmt;
use std::sync::Arc;

use scribe_postgres::model::{Account, NewAccount};
use scribe_postgres::query::Pagination;

use crate::service::security::{PasswordHasher, SessionKeys};
use crate::service::store::AccountStore;
use crate::{Error, ErrorKind, Result};

/// Tracing target for account operations.
const TRACING_TARGET: &str = "scribe_server::service::account";

/// Orchestrates the credential hasher, the session keys and the account store.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
    keys: SessionKeys,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher, keys: SessionKeys) -> Self {
        Self {
            store,
            hasher,
            keys,
        }
    }

    /// Registers a new account.
    ///
    /// The password is hashed on the blocking pool before it reaches the store;
    /// neither the plaintext nor the hash is ever logged.
    ///
    /// # Errors
    ///
    /// `Hashing` if the digest fails, `DuplicateAccount` if the username or
    /// email is taken, `Persistence` for any other store failure.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Account> {
        let password_hash = self.hash_blocking(password).await?;
        let new_account = NewAccount::new(username, email, password_hash);

        let account = self
            .store
            .create_account(new_account)
            .await
            .inspect_err(|error| {
                if error.kind() == ErrorKind::DuplicateAccount {
                    tracing::info!(
                        target: TRACING_TARGET,
                        username = %username.trim(),
                        "registration rejected: account already exists"
                    );
                } else {
                    tracing::error!(
                        target: TRACING_TARGET,
                        error = %error,
                        "failed to persist new account"
                    );
                }
            })?;

        tracing::info!(
            target: TRACING_TARGET,
            account_id = %account.id,
            username = %account.username,
            "account registered"
        );

        Ok(account)
    }

    /// Authenticates by email and password and issues a session token.
    ///
    /// Unknown email, wrong password and a failed lookup all produce the same
    /// `InvalidCredentials` error after the same amount of hashing work.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let account = match self.store.find_account_by_email(email).await {
            Ok(account) => account,
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "account lookup failed during login"
                );
                None
            }
        };

        let Some(account) = account else {
            self.verify_dummy_blocking(password).await;
            tracing::debug!(target: TRACING_TARGET, "login failed: no matching account");
            return Err(Error::invalid_credentials());
        };

        if !self
            .verify_blocking(password, &account.password_hash)
            .await
        {
            tracing::debug!(
                target: TRACING_TARGET,
                account_id = %account.id,
                "login failed: password mismatch"
            );
            return Err(Error::invalid_credentials());
        }

        let token = self.keys.issue(&account.username).map_err(|error| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                account_id = %account.id,
                "failed to issue session token"
            );
            Error::internal("session_keys", "failed to issue session token").with_source(error)
        })?;

        tracing::info!(
            target: TRACING_TARGET,
            account_id = %account.id,
            "login succeeded"
        );

        Ok(token)
    }

    /// Lists active accounts.
    pub async fn list_accounts(&self, pagination: Pagination) -> Result<Vec<Account>> {
        self.store.list_accounts(pagination).await
    }

    async fn hash_blocking(&self, password: &str) -> Result<String> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| Error::internal("password_hasher", "hashing task failed").with_source(e))?
    }

    async fn verify_blocking(&self, password: &str, stored_hash: &str) -> bool {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &stored_hash))
            .await
            .unwrap_or_else(|error| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "verification task failed"
                );
                false
            })
    }

    async fn verify_dummy_blocking(&self, password: &str) {
        let hasher = self.hasher.clone();
        let password = password.to_owned();

        if let Err(error) =
            tokio::task::spawn_blocking(move || hasher.verify_dummy_password(&password)).await
        {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                "dummy verification task failed"
            );
        }
    }
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService")
            .field("hasher", &self.hasher)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::security::SessionKeysConfig;
    use crate::service::store::MemoryStore;

    fn service_with(store: Arc<MemoryStore>) -> (AccountService, SessionKeys) {
        let hasher = PasswordHasher::new(8).unwrap();
        let keys = SessionKeys::from_config(&SessionKeysConfig::new("test-secret")).unwrap();
        (AccountService::new(store, hasher, keys.clone()), keys)
    }

    fn service() -> AccountService {
        service_with(Arc::new(MemoryStore::new())).0
    }

    #[tokio::test]
    async fn register_stores_a_hash() -> anyhow::Result<()> {
        let service = service();
        let account = service
            .register("alice", "Alice@Example.com", "wonderland")
            .await?;

        assert_eq!(account.username, "alice");
        assert_eq!(account.email_address, "alice@example.com");
        assert_ne!(account.password_hash, "wonderland");
        assert!(account.password_hash.starts_with("$argon2id$"));
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() -> anyhow::Result<()> {
        let service = service();
        service.register("alice", "alice@example.com", "pw1").await?;

        let error = service
            .register("alice2", "ALICE@example.com", "pw2")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DuplicateAccount);
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() -> anyhow::Result<()> {
        let service = service();
        service.register("alice", "alice@example.com", "pw1").await?;

        let error = service
            .register("alice", "other@example.com", "pw2")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DuplicateAccount);
        Ok(())
    }

    #[tokio::test]
    async fn login_issues_token_for_username() -> anyhow::Result<()> {
        let (service, keys) = service_with(Arc::new(MemoryStore::new()));
        service
            .register("alice", "alice@example.com", "wonderland")
            .await?;

        let token = service.login("alice@example.com", "wonderland").await?;
        assert_eq!(keys.validate(&token)?.subject, "alice");
        Ok(())
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() -> anyhow::Result<()> {
        let service = service();
        service
            .register("alice", "alice@example.com", "wonderland")
            .await?;

        let wrong_password = service
            .login("alice@example.com", "looking-glass")
            .await
            .unwrap_err();
        let unknown_email = service
            .login("nobody@example.com", "wonderland")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.kind(), ErrorKind::InvalidCredentials);
        assert_eq!(unknown_email.kind(), ErrorKind::InvalidCredentials);
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn every_failed_login_runs_one_verification() -> anyhow::Result<()> {
        let store = Arc::new(MemoryStore::new());
        let hasher = PasswordHasher::new(8)?;
        let keys = SessionKeys::from_config(&SessionKeysConfig::new("test-secret"))?;
        let service = AccountService::new(store.clone(), hasher.clone(), keys);
        service
            .register("alice", "alice@example.com", "wonderland")
            .await?;

        let before = hasher.verifications();
        service.login("alice@example.com", "looking-glass").await.unwrap_err();
        assert_eq!(hasher.verifications(), before + 1, "wrong password");

        let before = hasher.verifications();
        service.login("nobody@example.com", "wonderland").await.unwrap_err();
        assert_eq!(hasher.verifications(), before + 1, "unknown email");

        store.fail_lookups();
        let before = hasher.verifications();
        service.login("alice@example.com", "wonderland").await.unwrap_err();
        assert_eq!(hasher.verifications(), before + 1, "lookup failure");
        Ok(())
    }

    #[tokio::test]
    async fn lookup_failure_is_invalid_credentials() -> anyhow::Result<()> {
        let store = Arc::new(MemoryStore::new());
        let (service, _) = service_with(store.clone());
        service
            .register("alice", "alice@example.com", "wonderland")
            .await?;

        store.fail_lookups();
        let error = service
            .login("alice@example.com", "wonderland")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidCredentials);
        Ok(())
    }

    #[tokio::test]
    async fn login_without_secret_is_internal() -> anyhow::Result<()> {
        let store: Arc<dyn AccountStore> = Arc::new(MemoryStore::new());
        let hasher = PasswordHasher::new(8)?;
        let keys = SessionKeys::from_config(&SessionKeysConfig::new(""))?;
        let service = AccountService::new(store, hasher, keys);
        service
            .register("alice", "alice@example.com", "wonderland")
            .await?;

        let error = service
            .login("alice@example.com", "wonderland")
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Internal);
        Ok(())
    }
}
