//! Packet container and size accounting
//!
//! Every packet reports a `size()` used by queueing layers for memory and
//! backpressure accounting. The size is a pure function of the packet's
//! fields: a fixed per-kind header cost plus the cost of each variable-length
//! field.

use crate::clock::{self, ClockResolution};
use crate::command::ControlCommand;
use crate::entry::LogEntry;
use crate::flow::ProcessFlow;
use crate::header::LogHeader;
use crate::kind::PacketKind;
use crate::level::Level;
use crate::origin;
use crate::watch::Watch;

/// Framing cost of a serialized packet (u16 kind + u32 body length)
pub const PACKET_HEADER: usize = 6;

/// Per-string overhead (length prefix) in size accounting
pub const STRING_OVERHEAD: usize = 4;

/// Size cost of an optional string field
///
/// Unset and empty strings cost nothing; anything else costs its UTF-8 byte
/// length plus [`STRING_OVERHEAD`].
#[inline]
pub fn string_size(s: Option<&str>) -> usize {
    match s {
        Some(s) if !s.is_empty() => s.len() + STRING_OVERHEAD,
        _ => 0,
    }
}

/// Size cost of an optional binary field
#[inline]
pub fn data_size(data: Option<&[u8]>) -> usize {
    data.map_or(0, <[u8]>::len)
}

/// Fields shared by every packet kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Severity the packet was logged at
    pub level: Level,
    /// Creation time, microseconds since the Unix epoch
    pub timestamp: i64,
    /// Originating thread
    pub thread_id: i32,
    /// Originating process
    pub process_id: i32,
}

impl PacketHeader {
    /// Header for a packet created now on the calling thread
    pub fn now(level: Level, resolution: ClockResolution) -> Self {
        Self {
            level,
            timestamp: clock::now(resolution),
            thread_id: origin::thread_id(),
            process_id: origin::process_id(),
        }
    }
}

impl Default for PacketHeader {
    /// Header owned by the calling thread and process, timestamp unset
    fn default() -> Self {
        Self {
            level: Level::default(),
            timestamp: 0,
            thread_id: origin::thread_id(),
            process_id: origin::process_id(),
        }
    }
}

/// A typed, serializable unit of log or process-flow data
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    LogEntry(LogEntry),
    ProcessFlow(ProcessFlow),
    Watch(Watch),
    ControlCommand(ControlCommand),
    LogHeader(LogHeader),
}

impl Packet {
    /// Discriminant of this packet
    #[inline]
    pub fn kind(&self) -> PacketKind {
        match self {
            Self::LogEntry(_) => PacketKind::LogEntry,
            Self::ProcessFlow(_) => PacketKind::ProcessFlow,
            Self::Watch(_) => PacketKind::Watch,
            Self::ControlCommand(_) => PacketKind::ControlCommand,
            Self::LogHeader(_) => PacketKind::LogHeader,
        }
    }

    /// Memory cost of this packet
    pub fn size(&self) -> usize {
        match self {
            Self::LogEntry(p) => p.size(),
            Self::ProcessFlow(p) => p.size(),
            Self::Watch(p) => p.size(),
            Self::ControlCommand(p) => p.size(),
            Self::LogHeader(p) => p.size(),
        }
    }

    /// Shared header fields
    pub fn header(&self) -> &PacketHeader {
        match self {
            Self::LogEntry(p) => &p.header,
            Self::ProcessFlow(p) => &p.header,
            Self::Watch(p) => &p.header,
            Self::ControlCommand(p) => &p.header,
            Self::LogHeader(p) => &p.header,
        }
    }

    /// Severity the packet was logged at
    #[inline]
    pub fn level(&self) -> Level {
        self.header().level
    }

    /// The log entry, if this packet is one
    pub fn as_log_entry(&self) -> Option<&LogEntry> {
        match self {
            Self::LogEntry(entry) => Some(entry),
            _ => None,
        }
    }
}

impl From<LogEntry> for Packet {
    fn from(p: LogEntry) -> Self {
        Self::LogEntry(p)
    }
}

impl From<ProcessFlow> for Packet {
    fn from(p: ProcessFlow) -> Self {
        Self::ProcessFlow(p)
    }
}

impl From<Watch> for Packet {
    fn from(p: Watch) -> Self {
        Self::Watch(p)
    }
}

impl From<ControlCommand> for Packet {
    fn from(p: ControlCommand) -> Self {
        Self::ControlCommand(p)
    }
}

impl From<LogHeader> for Packet {
    fn from(p: LogHeader) -> Self {
        Self::LogHeader(p)
    }
}
