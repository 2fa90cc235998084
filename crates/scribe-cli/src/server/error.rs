//! Server error types.

use std::io;

use thiserror::Error;

/// Result type for server operations.
pub type Result<T, E = ServerError> = std::result::Result<T, E>;

/// Errors raised while starting or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Server configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to bind to the specified address.
    #[error("failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The server failed while running.
    #[error("runtime error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Returns a stable code for this error type.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "E001",
            Self::BindError { .. } => "E002",
            Self::Runtime(_) => "E003",
        }
    }

    /// Provides a human-readable hint for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig(_) => Some("Check the command-line flags and environment variables"),
            Self::BindError { source, .. } => match source.kind() {
                io::ErrorKind::PermissionDenied => {
                    Some("Try using a port above 1024 or run with appropriate privileges")
                }
                io::ErrorKind::AddrInUse => Some(
                    "The port is already in use. Try a different port or stop the conflicting service",
                ),
                io::ErrorKind::AddrNotAvailable => {
                    Some("The address is not available. Check network interface configuration")
                }
                _ => None,
            },
            Self::Runtime(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_unique() {
        let errors = [
            ServerError::InvalidConfig("test".to_owned()),
            ServerError::BindError {
                address: "127.0.0.1:80".to_owned(),
                source: io::Error::other("test"),
            },
            ServerError::Runtime(io::Error::other("test")),
        ];

        let codes: Vec<_> = errors.iter().map(ServerError::error_code).collect();
        assert_eq!(codes, ["E001", "E002", "E003"]);
    }

    #[test]
    fn addr_in_use_has_suggestion() {
        let error = ServerError::BindError {
            address: "127.0.0.1:3000".to_owned(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        assert!(error.suggestion().is_some_and(|s| s.contains("already in use")));
    }
}
