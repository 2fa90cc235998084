//! Service information response types.

use serde::{Deserialize, Serialize};

/// Body returned by the API root.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct Welcome {
    pub message: String,
    /// Application version.
    pub version: String,
}

impl Default for Welcome {
    fn default() -> Self {
        Self {
            message: "Welcome to the Scribe API".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}
