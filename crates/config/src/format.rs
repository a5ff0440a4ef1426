//! Formatter configuration

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Which formatter renders packets
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String")]
pub enum FormatKind {
    /// Pattern-driven text lines (default)
    #[default]
    Text,
    /// Length-prefixed binary frames
    Binary,
}

impl FormatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Binary => "binary",
        }
    }
}

impl FromStr for FormatKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "binary" => Ok(Self::Binary),
            _ => Err(ConfigError::unsupported_formatter(s)),
        }
    }
}

impl TryFrom<String> for FormatKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formatter configuration
///
/// # Example
///
/// ```toml
/// [format]
/// kind = "text"
/// pattern = "[%timestamp%] %level,8%: %title%"
/// indent = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Formatter kind (text, binary)
    /// Default: text
    pub kind: FormatKind,

    /// Text pattern; unset uses the formatter's default pattern
    pub pattern: Option<String>,

    /// Indent titles between method enter/leave pairs (text only)
    pub indent: bool,
}

impl FormatConfig {
    pub(crate) fn validate(&self) -> crate::Result<()> {
        if self.kind == FormatKind::Text
            && let Some(pattern) = &self.pattern
            && pattern.trim().is_empty()
        {
            return Err(ConfigError::invalid_value(
                "format",
                "pattern",
                "must not be empty for the text formatter",
            ));
        }
        Ok(())
    }
}
