//! Packet kinds
//!
//! The discriminant shared by every packet variant. Values are written on the
//! wire by the binary formatter and must stay stable.

use crate::error::ProtocolError;

/// Kind of a packet (wire discriminant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PacketKind {
    /// Viewer control command (clear log, clear watches, ...)
    ControlCommand = 1,
    /// Log entry (message, warning, method enter/leave, ...)
    LogEntry = 4,
    /// Watch variable update
    Watch = 5,
    /// Process/thread/method lifecycle marker
    ProcessFlow = 6,
    /// Key/value header written at the start of a log
    LogHeader = 7,
}

impl PacketKind {
    /// All packet kinds, in wire-value order
    pub const ALL: [PacketKind; 5] = [
        Self::ControlCommand,
        Self::LogEntry,
        Self::Watch,
        Self::ProcessFlow,
        Self::LogHeader,
    ];

    /// Convert to raw wire value
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Get the string name of this packet kind
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ControlCommand => "control_command",
            Self::LogEntry => "log_entry",
            Self::Watch => "watch",
            Self::ProcessFlow => "process_flow",
            Self::LogHeader => "log_header",
        }
    }
}

impl TryFrom<u16> for PacketKind {
    type Error = ProtocolError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::ControlCommand),
            4 => Ok(Self::LogEntry),
            5 => Ok(Self::Watch),
            6 => Ok(Self::ProcessFlow),
            7 => Ok(Self::LogHeader),
            other => Err(ProtocolError::invalid_discriminant(
                "PacketKind",
                i32::from(other),
            )),
        }
    }
}

impl std::fmt::Display for PacketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
