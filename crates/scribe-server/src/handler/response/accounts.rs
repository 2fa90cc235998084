//! Account response types.

use jiff::Timestamp;
use scribe_postgres::model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an account.
///
/// The stored password hash is never part of this type.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier of the account.
    pub id: Uuid,
    /// Unique username.
    pub username: String,
    /// Email address associated with the account.
    pub email_address: String,

    /// Timestamp when the account was created.
    pub created_at: Timestamp,
    /// Timestamp when the account was last updated.
    pub updated_at: Timestamp,
}

impl Account {
    pub fn from_model(account: model::Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email_address: account.email_address,
            created_at: account.created_at.into(),
            updated_at: account.updated_at.into(),
        }
    }
}

impl From<model::Account> for Account {
    #[inline]
    fn from(account: model::Account) -> Self {
        Self::from_model(account)
    }
}

/// Response returned after a successful registration.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountCreated {
    /// The newly created account.
    pub user: Account,
}

/// List of accounts.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct Accounts {
    pub users: Vec<Account>,
}

impl Accounts {
    pub fn from_models(accounts: Vec<model::Account>) -> Self {
        Self {
            users: accounts.into_iter().map(Account::from_model).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_never_serializes_hash() -> anyhow::Result<()> {
        let now = Timestamp::now();
        let model = model::Account {
            id: Uuid::now_v7(),
            username: "alice".to_owned(),
            email_address: "alice@example.com".to_owned(),
            password_hash: "$argon2id$v=19$secret".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        };

        let json = serde_json::to_value(Account::from_model(model))?;
        assert_eq!(json["username"], "alice");
        assert_eq!(json["emailAddress"], "alice@example.com");
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
        Ok(())
    }
}
