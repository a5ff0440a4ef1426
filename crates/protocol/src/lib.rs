//! Sift Protocol - packet model for the sift logging bridge
//!
//! This crate provides the typed records that flow from the record adapter
//! to formatters and transports:
//! - `Packet` - Enum over every packet variant, with `kind()` and `size()`
//! - `LogEntry` - Messages, warnings, errors, method enter/leave
//! - `ProcessFlow` - Method, thread and process lifecycle markers
//! - `Watch`, `ControlCommand`, `LogHeader` - Viewer auxiliaries
//! - `Level` - Packet severity
//!
//! # Size Accounting
//!
//! `Packet::size()` is a pure function of the packet's fields: a fixed
//! per-kind header cost plus byte length + 4 for every non-empty string and
//! the byte length of every binary payload. Queueing layers use it for
//! backpressure; it never changes unless the packet is mutated.
//!
//! # Ownership
//!
//! Packets are plain values. The producer hands them to exactly one consumer
//! (a formatter or transport sink); nothing holds a shared mutable reference.

mod clock;
mod command;
mod entry;
mod error;
mod flow;
mod header;
mod kind;
mod level;
mod origin;
mod packet;
mod watch;

pub use clock::{ClockResolution, now};
pub use command::{ControlCommand, ControlCommandType};
pub use entry::{Color, LogEntry, LogEntryBuilder, LogEntryType, ViewerId};
pub use error::ProtocolError;
pub use flow::{ProcessFlow, ProcessFlowBuilder, ProcessFlowType};
pub use header::LogHeader;
pub use kind::PacketKind;
pub use level::Level;
pub use origin::{process_id, thread_id};
pub use packet::{PACKET_HEADER, Packet, PacketHeader, STRING_OVERHEAD, data_size, string_size};
pub use watch::{Watch, WatchType};

// Re-export bytes for convenience
pub use bytes::Bytes;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
