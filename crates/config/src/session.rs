//! Session configuration
//!
//! Identity and gating of the packet-producing session.

use serde::{Deserialize, Deserializer, de};
use sift_protocol::{ClockResolution, Level};

/// Default session name
pub const DEFAULT_SESSION_NAME: &str = "Main";

/// Default application name
pub const DEFAULT_APP_NAME: &str = "sift";

/// Session configuration
///
/// # Example
///
/// ```toml
/// [session]
/// name = "Main"
/// app_name = "billing"
/// host_name = "web-01"
/// level = "verbose"
/// enabled = true
/// resolution = "high"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session name stamped on every log entry
    pub name: String,

    /// Application name stamped on every log entry
    pub app_name: String,

    /// Host name stamped on every packet; unset leaves the field empty
    pub host_name: Option<String>,

    /// Lowest level that is logged
    /// Default: debug (everything)
    #[serde(deserialize_with = "deserialize_level")]
    pub level: Level,

    /// Master switch; a disabled session drops everything
    pub enabled: bool,

    /// Timestamp clock (standard, high)
    #[serde(deserialize_with = "deserialize_resolution")]
    pub resolution: ClockResolution,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SESSION_NAME.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            host_name: None,
            level: Level::Debug,
            enabled: true,
            resolution: ClockResolution::Standard,
        }
    }
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Level::parse(&s).ok_or_else(|| de::Error::custom(format!("unknown level '{s}'")))
}

fn deserialize_resolution<'de, D>(deserializer: D) -> Result<ClockResolution, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ClockResolution::parse(&s)
        .ok_or_else(|| de::Error::custom(format!("unknown clock resolution '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.name, "Main");
        assert_eq!(config.app_name, "sift");
        assert_eq!(config.host_name, None);
        assert_eq!(config.level, Level::Debug);
        assert!(config.enabled);
        assert_eq!(config.resolution, ClockResolution::Standard);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
name = "Worker"
app_name = "billing"
host_name = "web-01"
level = "Warning"
enabled = false
resolution = "high"
"#;
        let config: SessionConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.name, "Worker");
        assert_eq!(config.app_name, "billing");
        assert_eq!(config.host_name.as_deref(), Some("web-01"));
        assert_eq!(config.level, Level::Warning);
        assert!(!config.enabled);
        assert_eq!(config.resolution, ClockResolution::High);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let result: Result<SessionConfig, _> = toml::from_str("level = \"loud\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unknown level 'loud'"));
    }

    #[test]
    fn test_unknown_resolution_rejected() {
        let result: Result<SessionConfig, _> = toml::from_str("resolution = \"atomic\"");
        assert!(result.is_err());
    }
}
