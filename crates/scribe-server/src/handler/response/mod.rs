//! Response types for HTTP handlers.

mod accounts;
mod authentications;
mod errors;
mod monitors;
mod posts;

pub use accounts::*;
pub use authentications::*;
pub use errors::*;
pub use monitors::*;
pub use posts::*;
