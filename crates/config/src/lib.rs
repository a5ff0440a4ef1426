//! Sift Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty file is a valid configuration.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use sift_config::{Config, FormatKind};
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[format]\nkind = \"binary\"").unwrap();
//! assert_eq!(config.format.kind, FormatKind::Binary);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "warn"
//!
//! [session]
//! app_name = "billing"
//! level = "verbose"
//!
//! [format]
//! kind = "text"
//! pattern = "%timestamp% %level,-8% %title%"
//! indent = true
//! ```

mod error;
mod format;
mod logging;
mod session;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use format::{FormatConfig, FormatKind};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use session::{DEFAULT_APP_NAME, DEFAULT_SESSION_NAME, SessionConfig};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Internal logging configuration
    pub log: LogConfig,

    /// Packet-producing session
    pub session: SessionConfig,

    /// Packet formatter
    pub format: FormatConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.session.name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "session",
                "name",
                "must not be empty",
            ));
        }
        self.format.validate()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_protocol::{ClockResolution, Level};
    use std::io::Write;
    use std::str::FromStr;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.log.level, LogLevel::Info);
        assert_eq!(config.session.name, DEFAULT_SESSION_NAME);
        assert_eq!(config.format.kind, FormatKind::Text);
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[log]
level = "debug"
format = "json"

[session]
name = "Worker"
app_name = "billing"
level = "message"
resolution = "high"

[format]
kind = "text"
pattern = "%level%: %title%"
indent = true
"#;
        let config = Config::from_str(toml).unwrap();

        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.session.name, "Worker");
        assert_eq!(config.session.level, Level::Message);
        assert_eq!(config.session.resolution, ClockResolution::High);
        assert_eq!(config.format.pattern.as_deref(), Some("%level%: %title%"));
        assert!(config.format.indent);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_unknown_formatter_kind() {
        let result = Config::from_str("[format]\nkind = \"html\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unsupported formatter kind 'html'"));
    }

    #[test]
    fn test_empty_pattern_fails_validation() {
        let result = Config::from_str("[format]\npattern = \"\"");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                section: "format",
                field: "pattern",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_session_name_fails_validation() {
        let result = Config::from_str("[session]\nname = \" \"");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                section: "session",
                ..
            })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session]\napp_name = \"from-file\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.session.app_name, "from-file");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
