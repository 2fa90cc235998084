//! Request types for HTTP handlers.

mod authentications;
mod paginations;
mod paths;
mod posts;
mod validations;

pub use authentications::*;
pub use paginations::*;
pub use paths::*;
pub use posts::*;
