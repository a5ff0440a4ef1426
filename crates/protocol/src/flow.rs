//! Process flow packets
//!
//! Lifecycle markers for methods, threads and processes. The flow kind is a
//! required discriminant: there is no default, and builders refuse to
//! produce a packet without one.

use crate::clock::ClockResolution;
use crate::error::ProtocolError;
use crate::level::Level;
use crate::packet::{PacketHeader, string_size};

/// Fixed cost of a process flow packet in size accounting
const HEADER_SIZE: usize = 28;

/// Lifecycle transition described by a process flow packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ProcessFlowType {
    EnterMethod = 0,
    LeaveMethod = 1,
    EnterThread = 2,
    LeaveThread = 3,
    EnterProcess = 4,
    LeaveProcess = 5,
}

impl ProcessFlowType {
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnterMethod => "EnterMethod",
            Self::LeaveMethod => "LeaveMethod",
            Self::EnterThread => "EnterThread",
            Self::LeaveThread => "LeaveThread",
            Self::EnterProcess => "EnterProcess",
            Self::LeaveProcess => "LeaveProcess",
        }
    }

    /// True for the three "enter" transitions
    #[inline]
    pub const fn is_enter(self) -> bool {
        matches!(
            self,
            Self::EnterMethod | Self::EnterThread | Self::EnterProcess
        )
    }
}

impl TryFrom<i32> for ProcessFlowType {
    type Error = ProtocolError;

    fn try_from(value: i32) -> Result<Self, ProtocolError> {
        match value {
            0 => Ok(Self::EnterMethod),
            1 => Ok(Self::LeaveMethod),
            2 => Ok(Self::EnterThread),
            3 => Ok(Self::LeaveThread),
            4 => Ok(Self::EnterProcess),
            5 => Ok(Self::LeaveProcess),
            other => Err(ProtocolError::invalid_discriminant(
                "ProcessFlowType",
                other,
            )),
        }
    }
}

impl std::fmt::Display for ProcessFlowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A process flow packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFlow {
    pub(crate) header: PacketHeader,
    process_flow_type: ProcessFlowType,
    title: Option<String>,
    host_name: Option<String>,
}

impl ProcessFlow {
    /// Create a flow packet owned by the calling thread and process
    pub fn new(process_flow_type: ProcessFlowType) -> Self {
        Self {
            header: PacketHeader::default(),
            process_flow_type,
            title: None,
            host_name: None,
        }
    }

    /// Memory cost of this packet
    pub fn size(&self) -> usize {
        HEADER_SIZE + string_size(self.title()) + string_size(self.host_name())
    }

    pub fn header(&self) -> &PacketHeader {
        &self.header
    }

    pub fn process_flow_type(&self) -> ProcessFlowType {
        self.process_flow_type
    }

    pub fn set_process_flow_type(&mut self, process_flow_type: ProcessFlowType) {
        self.process_flow_type = process_flow_type;
    }

    /// Set the flow kind from a raw value
    ///
    /// # Errors
    ///
    /// Returns `InvalidDiscriminant` if `value` names no flow kind; the
    /// packet is left unchanged.
    pub fn set_process_flow_type_raw(&mut self, value: i32) -> Result<(), ProtocolError> {
        self.process_flow_type = ProcessFlowType::try_from(value)?;
        Ok(())
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    pub fn set_host_name(&mut self, host_name: impl Into<String>) {
        self.host_name = Some(host_name.into());
    }

    pub fn level(&self) -> Level {
        self.header.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.header.level = level;
    }

    pub fn timestamp(&self) -> i64 {
        self.header.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.header.timestamp = timestamp;
    }

    pub fn thread_id(&self) -> i32 {
        self.header.thread_id
    }

    pub fn set_thread_id(&mut self, thread_id: i32) {
        self.header.thread_id = thread_id;
    }

    pub fn process_id(&self) -> i32 {
        self.header.process_id
    }

    pub fn set_process_id(&mut self, process_id: i32) {
        self.header.process_id = process_id;
    }
}

/// Builder for constructing a [`ProcessFlow`]
#[derive(Debug, Clone, Default)]
pub struct ProcessFlowBuilder {
    process_flow_type: Option<ProcessFlowType>,
    level: Level,
    timestamp: Option<i64>,
    resolution: ClockResolution,
    title: Option<String>,
    host_name: Option<String>,
    process_id: Option<i32>,
}

impl ProcessFlowBuilder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn process_flow_type(mut self, process_flow_type: ProcessFlowType) -> Self {
        self.process_flow_type = Some(process_flow_type);
        self
    }

    #[inline]
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the timestamp (microseconds since the Unix epoch)
    ///
    /// When unset the packet is stamped with the current time.
    #[inline]
    #[must_use]
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[inline]
    #[must_use]
    pub fn resolution(mut self, resolution: ClockResolution) -> Self {
        self.resolution = resolution;
        self
    }

    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = Some(host_name.into());
        self
    }

    /// Override the process id shared by the rest of the process
    #[inline]
    #[must_use]
    pub fn process_id(mut self, process_id: i32) -> Self {
        self.process_id = Some(process_id);
        self
    }

    /// Build the packet
    ///
    /// # Errors
    ///
    /// Returns `MissingField` if the flow kind was never set.
    pub fn build(self) -> Result<ProcessFlow, ProtocolError> {
        let process_flow_type = self
            .process_flow_type
            .ok_or(ProtocolError::missing_field("process_flow_type"))?;

        let mut header = PacketHeader::now(self.level, self.resolution);
        if let Some(timestamp) = self.timestamp {
            header.timestamp = timestamp;
        }
        if let Some(process_id) = self.process_id {
            header.process_id = process_id;
        }

        Ok(ProcessFlow {
            header,
            process_flow_type,
            title: self.title,
            host_name: self.host_name,
        })
    }
}
