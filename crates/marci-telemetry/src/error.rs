//! Telemetry errors.

use thiserror::Error;

/// Raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter did not parse or a subscriber was already installed.
    #[error("cannot install logging: {0}")]
    LoggingInit(String),

    /// A setting had a value outside its allowed set.
    #[error("bad logging setting: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = TelemetryError::LoggingInit("subscriber already set".to_string());
        assert_eq!(err.to_string(), "cannot install logging: subscriber already set");

        let err = TelemetryError::InvalidConfig("format `xml`".to_string());
        assert!(err.to_string().starts_with("bad logging setting"));
    }
}
