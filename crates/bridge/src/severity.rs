//! Inbound severities and level mapping
//!
//! Generic log events carry a [`Severity`] from the host logging API. The
//! adapter maps it onto a packet [`Level`] through [`LEVEL_TABLE`]; anything
//! not in the table maps to [`DEFAULT_LEVEL`].

use std::fmt;

use serde::Deserialize;
use sift_protocol::Level;

/// Severity of an inbound log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "SeverityRepr")]
pub enum Severity {
    /// Very fine tracing detail
    Finest,
    /// Fine tracing detail
    Finer,
    /// Tracing detail
    Fine,
    /// Configuration messages
    Config,
    /// Normal messages
    #[default]
    Info,
    /// Potential problems
    Warning,
    /// Serious failures
    Severe,
    /// Any other numeric severity
    Other(i32),
}

/// Mapping from inbound severity to packet level
///
/// Total over the named severities; [`Severity::Other`] is absent and falls
/// back to [`DEFAULT_LEVEL`].
pub const LEVEL_TABLE: [(Severity, Level); 7] = [
    (Severity::Finest, Level::Debug),
    (Severity::Finer, Level::Debug),
    (Severity::Fine, Level::Verbose),
    (Severity::Config, Level::Verbose),
    (Severity::Info, Level::Message),
    (Severity::Warning, Level::Warning),
    (Severity::Severe, Level::Error),
];

/// Level for severities missing from [`LEVEL_TABLE`]
pub const DEFAULT_LEVEL: Level = Level::Message;

/// Map an inbound severity to a packet level; never fails
pub fn map_level(severity: Severity) -> Level {
    LEVEL_TABLE
        .iter()
        .find(|(s, _)| *s == severity)
        .map_or(DEFAULT_LEVEL, |(_, level)| *level)
}

impl Severity {
    /// Classify a numeric severity
    pub const fn from_value(value: i32) -> Self {
        match value {
            300 => Self::Finest,
            400 => Self::Finer,
            500 => Self::Fine,
            700 => Self::Config,
            800 => Self::Info,
            900 => Self::Warning,
            1000 => Self::Severe,
            other => Self::Other(other),
        }
    }

    /// Numeric value of this severity
    pub const fn value(self) -> i32 {
        match self {
            Self::Finest => 300,
            Self::Finer => 400,
            Self::Fine => 500,
            Self::Config => 700,
            Self::Info => 800,
            Self::Warning => 900,
            Self::Severe => 1000,
            Self::Other(value) => value,
        }
    }

    /// Parse a severity name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "finest" => Some(Self::Finest),
            "finer" => Some(Self::Finer),
            "fine" => Some(Self::Fine),
            "config" => Some(Self::Config),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "severe" => Some(Self::Severe),
            _ => None,
        }
    }

    /// Packet level this severity maps to
    #[inline]
    pub fn level(self) -> Level {
        map_level(self)
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Self::Finest,
            tracing::Level::DEBUG => Self::Fine,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warning,
            tracing::Level::ERROR => Self::Severe,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finest => f.write_str("FINEST"),
            Self::Finer => f.write_str("FINER"),
            Self::Fine => f.write_str("FINE"),
            Self::Config => f.write_str("CONFIG"),
            Self::Info => f.write_str("INFO"),
            Self::Warning => f.write_str("WARNING"),
            Self::Severe => f.write_str("SEVERE"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Wire form accepted when deserializing: a name or a number
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Value(i32),
    Name(String),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = String;

    fn try_from(repr: SeverityRepr) -> Result<Self, Self::Error> {
        match repr {
            SeverityRepr::Value(value) => Ok(Self::from_value(value)),
            SeverityRepr::Name(name) => {
                Self::parse(&name).ok_or_else(|| format!("unknown severity '{name}'"))
            }
        }
    }
}
