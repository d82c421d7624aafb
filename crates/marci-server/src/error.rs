//! Transport errors.

use std::net::SocketAddr;

use thiserror::Error;

/// Result alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors raised while configuring or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured host/port is not a socket address.
    #[error("invalid address '{addr}': {reason}")]
    InvalidAddress {
        /// The offending `host:port` string.
        addr: String,
        /// Parser message.
        reason: String,
    },

    /// Binding the listener failed.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        /// Address we tried to bind.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ServerError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServerError::InvalidAddress {
            addr: "nope".into(),
            reason: "invalid socket address syntax".into(),
        };
        assert!(err.to_string().starts_with("invalid address 'nope'"));

        let err = ServerError::config("missing file");
        assert_eq!(err.to_string(), "configuration error: missing file");
    }
}
