//! Database constraint violations organized by table.

mod accounts;
mod posts;

use std::fmt;

pub use accounts::AccountConstraints;
pub use posts::PostConstraints;
use serde::{Deserialize, Serialize};

/// Any known database constraint, tagged by table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Account(AccountConstraints),
    Post(PostConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// ```
    /// use scribe_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("accounts_email_address_unique_idx");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        if constraint.starts_with("accounts_") {
            AccountConstraints::new(constraint).map(ConstraintViolation::Account)
        } else if constraint.starts_with("posts_") {
            PostConstraints::new(constraint).map(ConstraintViolation::Post)
        } else {
            None
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Account(_) => "accounts",
            ConstraintViolation::Post(_) => "posts",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Account(c) => c.categorize(),
            ConstraintViolation::Post(c) => c.categorize(),
        }
    }

    /// Returns whether this is a uniqueness violation.
    #[inline]
    pub fn is_uniqueness(&self) -> bool {
        self.categorize() == ConstraintCategory::Uniqueness
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Account(c) => write!(f, "{c}"),
            ConstraintViolation::Post(c) => write!(f, "{c}"),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ConstraintViolation::new(&value).ok_or_else(|| format!("unknown constraint: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_constraint_parsing() {
        assert_eq!(
            ConstraintViolation::new("accounts_username_unique_idx"),
            Some(ConstraintViolation::Account(AccountConstraints::UsernameUnique))
        );
        assert_eq!(
            ConstraintViolation::new("posts_title_length"),
            Some(ConstraintViolation::Post(PostConstraints::TitleLength))
        );
        assert_eq!(ConstraintViolation::new("posts_unknown"), None);
    }

    #[test]
    fn test_table_name() {
        let violation = ConstraintViolation::Account(AccountConstraints::EmailAddressUnique);
        assert_eq!(violation.table_name(), "accounts");
        assert_eq!(violation.to_string(), "accounts_email_address_unique_idx");
    }

    #[test]
    fn test_account_constraints_are_uniqueness() {
        for constraint in AccountConstraints::iter() {
            assert!(ConstraintViolation::Account(constraint).is_uniqueness());
        }
    }

    #[test]
    fn test_round_trip_every_constraint_name() {
        let names = AccountConstraints::iter()
            .map(ConstraintViolation::Account)
            .chain(PostConstraints::iter().map(ConstraintViolation::Post));

        for violation in names {
            assert_eq!(ConstraintViolation::new(&violation.to_string()), Some(violation));
        }
    }
}
