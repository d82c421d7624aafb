//! Logging for Marci services.
//!
//! Structured logs go through `tracing`; this crate installs the global
//! subscriber in JSON (production) or human-readable (development) form.
//!
//! ```rust,ignore
//! use marci_telemetry::{init_logging, LogConfig, LogFormat};
//!
//! let config = LogConfig::production().with_format(LogFormat::Compact);
//! init_logging(&config)?;
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
