//! Pagination query parameters.

use scribe_postgres::query::Pagination as QueryPagination;
use serde::{Deserialize, Serialize};

/// Offset pagination taken from `?limit=&offset=`.
///
/// Missing values fall back to the defaults. Out of range values are
/// clamped by [`QueryPagination::new`].
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of records to skip.
    pub offset: Option<u32>,
    /// Maximum number of records to return.
    pub limit: Option<u32>,
}

impl Pagination {
    const DEFAULT_LIMIT: u32 = 50;
    const DEFAULT_OFFSET: u32 = 0;

    /// Returns the pagination offset.
    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(Self::DEFAULT_OFFSET)
    }

    /// Returns the pagination limit.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

impl From<Pagination> for QueryPagination {
    fn from(pagination: Pagination) -> Self {
        Self::new(i64::from(pagination.limit()), i64::from(pagination.offset()))
    }
}
