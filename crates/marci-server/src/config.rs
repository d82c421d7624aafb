//! Server configuration.
//!
//! Built in code with [`ServerConfig::builder()`], or loaded from a TOML or
//! JSON file and then patched from `MARCI_*` environment variables.
//!
//! ```rust
//! use marci_server::ServerConfig;
//! use std::time::Duration;
//!
//! let config = ServerConfig::builder()
//!     .port(3000)
//!     .request_timeout(Duration::from_secs(10))
//!     .build();
//!
//! assert_eq!(config.addr(), "0.0.0.0:3000");
//! ```

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{ServerError, ServerResult};

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3000;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Server configuration.
///
/// File keys are `host`, `port`, `request_timeout_secs` and
/// `shutdown_timeout_secs`; every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    host: String,
    port: u16,
    #[serde(rename = "request_timeout_secs", deserialize_with = "secs")]
    request_timeout: Duration,
    #[serde(rename = "shutdown_timeout_secs", deserialize_with = "secs")]
    shutdown_timeout: Duration,
}

fn secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_secs)
}

impl ServerConfig {
    /// Creates a builder with default values.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Loads configuration from a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServerError::config(format!("failed to read {}: {e}", path.display())))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        match extension {
            "toml" => toml::from_str(&content)
                .map_err(|e| ServerError::config(format!("invalid TOML: {e}"))),
            "json" => serde_json::from_str(&content)
                .map_err(|e| ServerError::config(format!("invalid JSON: {e}"))),
            _ => Err(ServerError::config(format!(
                "unsupported config format: {extension}"
            ))),
        }
    }

    /// Applies `MARCI_HOST`, `MARCI_PORT`, `MARCI_REQUEST_TIMEOUT_SECS` and
    /// `MARCI_SHUTDOWN_TIMEOUT_SECS` from the process environment.
    ///
    /// Values that do not parse are ignored.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Same as [`with_env_overrides`](Self::with_env_overrides) with a custom
    /// variable source.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("MARCI_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("MARCI_PORT").and_then(|v| v.parse().ok()) {
            self.port = port;
        }
        if let Some(secs) = lookup("MARCI_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = lookup("MARCI_SHUTDOWN_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.shutdown_timeout = Duration::from_secs(secs);
        }
        self
    }

    /// Returns a copy bound to another port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Bind host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Bind port. `0` asks the OS for a free port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses [`addr`](Self::addr) as a socket address.
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        let addr = self.addr();
        addr.parse().map_err(|e: std::net::AddrParseError| ServerError::InvalidAddress {
            addr,
            reason: e.to_string(),
        })
    }

    /// Upper bound on reading the body plus running the endpoint.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// How long shutdown waits for open connections.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    host: String,
    port: u16,
    request_timeout: Duration,
    shutdown_timeout: Duration,
}

impl ServerConfigBuilder {
    /// Creates a builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        }
    }

    /// Sets the bind host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the bind port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the graceful shutdown timeout.
    #[must_use]
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            request_timeout: self.request_timeout,
            shutdown_timeout: self.shutdown_timeout,
        }
    }
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host(), DEFAULT_HOST);
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_chaining() {
        let config = ServerConfig::builder()
            .host("127.0.0.1")
            .port(8081)
            .request_timeout(Duration::from_millis(250))
            .shutdown_timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.addr(), "127.0.0.1:8081");
        assert_eq!(config.request_timeout(), Duration::from_millis(250));
        let addr = config.socket_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8081);
    }

    #[test]
    fn test_socket_addr_invalid() {
        let config = ServerConfig::builder().host("not a host").build();
        assert!(matches!(
            config.socket_addr(),
            Err(ServerError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "port = 4000\nrequest_timeout_secs = 5").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port(), 4000);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.host(), DEFAULT_HOST);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"host":"127.0.0.1","shutdown_timeout_secs":1}}"#).unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_from_file_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(ServerConfig::from_file("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MARCI_PORT", "9999"),
            ("MARCI_REQUEST_TIMEOUT_SECS", "oops"),
            ("MARCI_SHUTDOWN_TIMEOUT_SECS", "2"),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::default()
            .with_overrides(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.port(), 9999);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(2));
        assert_eq!(config.host(), DEFAULT_HOST);
        assert_eq!(config.with_port(1234).port(), 1234);
    }
}
