//! Commonly used types and traits, importable with a single `use`.

pub use diesel::prelude::*;
pub use diesel_async::RunQueryDsl;

pub use crate::model::{Account, NewAccount, NewPost, Post, UpdatePost};
pub use crate::query::{AccountRepository, Pagination, PostRepository};
pub use crate::{PgClient, PgConfig, PgConn, PgConnection, PgError, PgResult};
