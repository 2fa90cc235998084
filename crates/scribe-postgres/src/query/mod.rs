//! Database query repositories.
//!
//! Repository traits are implemented for [`PgConnection`] and, through `Deref`,
//! for every pooled [`PgConn`].
//!
//! [`PgConnection`]: crate::PgConnection
//! [`PgConn`]: crate::PgConn

mod account;
mod post;

pub use account::AccountRepository;
pub use post::PostRepository;
use serde::{Deserialize, Serialize};

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            // Ensure limit is between 1 and 1000
            limit: limit.clamp(1, 1000),
            // Ensure offset is non-negative
            offset: offset.max(0),
        }
    }

    /// Returns the offset as an index, for in-memory slicing.
    #[inline]
    pub fn skip(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(0)
    }

    /// Returns the limit as a count, for in-memory slicing.
    #[inline]
    pub fn take(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(0)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(50, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_new() {
        let pagination = Pagination::new(25, 100);
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.offset, 100);
    }

    #[test]
    fn pagination_bounds_checking() {
        assert_eq!(Pagination::new(0, 10).limit, 1);
        assert_eq!(Pagination::new(1500, 10).limit, 1000);
        assert_eq!(Pagination::new(10, -5).offset, 0);
    }

    #[test]
    fn pagination_slice_helpers() {
        let pagination = Pagination::default();
        assert_eq!(pagination.skip(), 0);
        assert_eq!(pagination.take(), 50);
    }
}
