//! Service settings: a TOML file, then `MARCI_*` environment overrides.
//!
//! ```toml
//! prefix = "/api"
//!
//! [server]
//! port = 3000
//!
//! [logging]
//! format = "pretty"
//! ```

use std::path::Path;

use marci::ServerConfig;
use marci_telemetry::LogConfig;
use serde::Deserialize;
use thiserror::Error;

/// Default mount point of the users plugin.
pub const DEFAULT_PREFIX: &str = "/api";

/// Errors loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path.
        path: String,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Settings`].
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Everything the binary needs to start.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the users plugin is mounted.
    pub prefix: String,
    /// Transport settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LogConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            server: ServerConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads `path` if given, otherwise starts from defaults, then applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let settings = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };
        Ok(settings.with_env_overrides())
    }

    /// Applies `MARCI_PREFIX` and the server's `MARCI_*` variables.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(prefix) = std::env::var("MARCI_PREFIX") {
            self.prefix = prefix;
        }
        self.server = self.server.with_env_overrides();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marci_telemetry::LogFormat;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.prefix, DEFAULT_PREFIX);
        assert_eq!(settings.server.port(), 3000);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_sections() {
        let settings = Settings::from_toml(
            r#"
            prefix = "/v2"

            [server]
            host = "127.0.0.1"
            port = 8088

            [logging]
            level = "debug"
            format = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(settings.prefix, "/v2");
        assert_eq!(settings.server.addr(), "127.0.0.1:8088");
        assert_eq!(settings.logging.format, LogFormat::Compact);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 4321").unwrap();
        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.prefix, DEFAULT_PREFIX);
        assert_eq!(settings.server.port(), 4321);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Some(Path::new("/no/such/settings.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Settings::from_toml("prefix = ["),
            Err(SettingsError::Parse(_))
        ));
    }
}
