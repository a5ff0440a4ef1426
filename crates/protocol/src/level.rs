//! Packet severity levels

use crate::error::ProtocolError;

/// Severity a packet was logged at
///
/// Levels are ordered: a session configured at `Warning` lets `Warning`,
/// `Error` and `Fatal` through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(i32)]
pub enum Level {
    /// Debug-level messages
    Debug = 0,
    /// Verbose diagnostic messages
    Verbose = 1,
    /// Normal messages
    #[default]
    Message = 2,
    /// Warning conditions
    Warning = 3,
    /// Error conditions
    Error = 4,
    /// Unrecoverable conditions
    Fatal = 5,
    /// Viewer control traffic
    Control = 6,
}

impl Level {
    /// Convert to raw value
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the display name of this level
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Verbose => "Verbose",
            Self::Message => "Message",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Fatal => "Fatal",
            Self::Control => "Control",
        }
    }

    /// Parse a level name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "verbose" => Some(Self::Verbose),
            "message" => Some(Self::Message),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "fatal" => Some(Self::Fatal),
            "control" => Some(Self::Control),
            _ => None,
        }
    }
}

impl TryFrom<i32> for Level {
    type Error = ProtocolError;

    fn try_from(value: i32) -> Result<Self, ProtocolError> {
        match value {
            0 => Ok(Level::Debug),
            1 => Ok(Level::Verbose),
            2 => Ok(Level::Message),
            3 => Ok(Level::Warning),
            4 => Ok(Level::Error),
            5 => Ok(Level::Fatal),
            6 => Ok(Level::Control),
            other => Err(ProtocolError::invalid_discriminant("Level", other)),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
