//! Database models for all tables.
//!
//! Each table has a queryable model, an insertable `New*` struct, and (where rows
//! can change) an `Update*` changeset.

mod account;
mod post;

pub(crate) use account::normalize_email;
pub use account::{Account, NewAccount};
pub use post::{NewPost, Post, UpdatePost};
