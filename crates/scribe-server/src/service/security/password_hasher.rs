//! Secure password hashing and verification using Argon2id.
//!
//! The hasher is deliberately slow. Its single tuning knob, the cost factor,
//! selects the Argon2 memory cost as `2^cost` KiB; iterations and parallelism
//! stay fixed at 2 and 1. Hashes are PHC strings that embed the algorithm,
//! parameters and salt, so verification never depends on the current cost.
//!
//! ```rust
//! use scribe_server::service::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(8)?;
//! let hash = hasher.hash_password("correct horse")?;
//!
//! assert!(hasher.verify_password("correct horse", &hash));
//! assert!(!hasher.verify_password("battery staple", &hash));
//! # Ok::<(), scribe_server::Error>(())
//! ```

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
};
use rand::rngs::OsRng;

use crate::{Error, Result};

/// Target identifier for password hashing service logging and error reporting.
const TRACING_TARGET: &str = "scribe_server::service::password_hasher";

/// Plaintext hashed once at construction; only ever verified against.
const DUMMY_PASSWORD: &str = "scribe-dummy-password";

/// Secure password hashing and verification service using Argon2id.
///
/// Cheap to clone; clones share the precomputed dummy hash.
#[derive(Clone)]
pub struct PasswordHasher {
    inner: Arc<PasswordHasherInner>,
}

struct PasswordHasherInner {
    argon2: Argon2<'static>,
    cost: u32,
    dummy_hash: String,
    #[cfg(test)]
    verifications: AtomicUsize,
}

impl PasswordHasher {
    /// Cost factor used when none is configured.
    pub const DEFAULT_COST: u32 = 14;
    /// Accepted cost factors.
    pub const COST_RANGE: RangeInclusive<u32> = 8..=20;

    /// Creates a new password hashing service with the given cost factor.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the cost lies outside [`Self::COST_RANGE`],
    /// or a hashing error if the dummy hash cannot be computed.
    pub fn new(cost: u32) -> Result<Self> {
        if !Self::COST_RANGE.contains(&cost) {
            return Err(Error::config(format!(
                "password hash cost must be between {} and {}, got {}",
                Self::COST_RANGE.start(),
                Self::COST_RANGE.end(),
                cost
            )));
        }

        let params = Params::new(1 << cost, 2, 1, None).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                cost,
                "failed to create Argon2 parameters"
            );

            Error::config("Invalid password hashing configuration")
        })?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, DUMMY_PASSWORD)?;

        tracing::debug!(
            target: TRACING_TARGET,
            cost,
            memory_kib = 1u32 << cost,
            "password hasher initialized"
        );

        let inner = PasswordHasherInner {
            argon2,
            cost,
            dummy_hash,
            #[cfg(test)]
            verifications: AtomicUsize::new(0),
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns the configured cost factor.
    #[inline]
    pub fn cost(&self) -> u32 {
        self.inner.cost
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// Two calls with the same input produce different outputs.
    ///
    /// # Errors
    ///
    /// Returns a hashing error if salt generation or the digest fails.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        hash_with(&self.inner.argon2, password)
    }

    /// Hashes a password, aborting the process on failure.
    ///
    /// Reserved for offline tooling such as the seeder, where there is no
    /// caller able to recover.
    pub fn hash_or_abort(&self, password: &str) -> String {
        match self.hash_password(password) {
            Ok(hash) => hash,
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "password hashing failed, aborting"
                );
                std::process::abort()
            }
        }
    }

    /// Verifies a password against a stored PHC hash string.
    ///
    /// Returns `false` on mismatch and on malformed hash strings; never errors.
    /// The comparison itself is constant-time.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %e,
                    "stored password hash is malformed"
                );
                return false;
            }
        };

        #[cfg(test)]
        self.inner.verifications.fetch_add(1, Ordering::SeqCst);

        match self
            .inner
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => true,
            Err(ArgonError::Password) => false,
            Err(e) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification failed"
                );
                false
            }
        }
    }

    /// Number of Argon2 verifications run by this hasher and its clones.
    #[cfg(test)]
    pub(crate) fn verifications(&self) -> usize {
        self.inner.verifications.load(Ordering::SeqCst)
    }

    /// Runs a full verification against the precomputed dummy hash.
    ///
    /// Spends the same time as a real verification so that a missing account
    /// cannot be told apart from a wrong password by latency.
    pub fn verify_dummy_password(&self, password: &str) {
        let _ = self.verify_password(password, &self.inner.dummy_hash);
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("algorithm", &"argon2id")
            .field("cost", &self.inner.cost)
            .finish()
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String> {
    let salt = SaltString::try_from_rng(&mut OsRng).map_err(|e| {
        tracing::error!(
            target: TRACING_TARGET,
            error = %e,
            "failed to generate cryptographically secure salt"
        );
        Error::hashing("Salt generation failed")
    })?;

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "password hashing operation failed"
            );
            Error::hashing("Hash generation failed")
        })?;

    Ok(password_hash.to_string())
}
