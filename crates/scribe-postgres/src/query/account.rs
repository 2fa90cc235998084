//! Account repository for managing user accounts.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::Pagination;
use crate::model::{Account, NewAccount, normalize_email};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for account database operations.
pub trait AccountRepository {
    /// Creates a new account.
    ///
    /// Fails with a unique constraint violation when the username or email
    /// address is already taken.
    fn create_account(
        &mut self,
        new_account: NewAccount,
    ) -> impl Future<Output = PgResult<Account>> + Send;

    /// Finds an active account by email address.
    ///
    /// Email comparison is case-insensitive.
    fn find_account_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Lists active accounts, most recent first.
    fn list_accounts(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;

    /// Counts active accounts.
    fn count_accounts(&mut self) -> impl Future<Output = PgResult<i64>> + Send;

    /// Permanently removes every account. Returns the number of rows deleted.
    fn purge_accounts(&mut self) -> impl Future<Output = PgResult<usize>> + Send;
}

impl AccountRepository for PgConnection {
    async fn create_account(&mut self, new_account: NewAccount) -> PgResult<Account> {
        use schema::accounts;

        diesel::insert_into(accounts::table)
            .values(&new_account)
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_account_by_email(&mut self, email: &str) -> PgResult<Option<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::email_address.eq(normalize_email(email)))
            .filter(dsl::deleted_at.is_null())
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_accounts(&mut self, pagination: Pagination) -> PgResult<Vec<Account>> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::deleted_at.is_null())
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Account::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn count_accounts(&mut self) -> PgResult<i64> {
        use schema::accounts::{self, dsl};

        accounts::table
            .filter(dsl::deleted_at.is_null())
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn purge_accounts(&mut self) -> PgResult<usize> {
        use schema::accounts;

        let deleted = diesel::delete(accounts::table)
            .execute(self)
            .await
            .map_err(PgError::from)?;

        tracing::warn!(target: TRACING_TARGET_QUERY, deleted, "Purged all accounts");
        Ok(deleted)
    }
}
