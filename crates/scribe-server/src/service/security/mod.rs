//! Credential hashing, session tokens and the time source they share.

mod clock;
mod password_hasher;
mod session_keys;

pub use self::clock::{Clock, SystemClock};
#[cfg(test)]
pub(crate) use self::clock::FixedClock;
pub use self::password_hasher::PasswordHasher;
pub use self::session_keys::{SessionClaims, SessionKeys, SessionKeysConfig};
