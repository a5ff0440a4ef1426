//! Control command packets - instructions for the receiving viewer

use bytes::Bytes;

use crate::error::ProtocolError;
use crate::level::Level;
use crate::packet::{PacketHeader, data_size};

const HEADER_SIZE: usize = 8;

/// Viewer instruction carried by a control command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ControlCommandType {
    ClearLog = 0,
    ClearWatches = 1,
    ClearAutoViews = 2,
    ClearAll = 3,
    ClearProcessFlow = 4,
}

impl ControlCommandType {
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for ControlCommandType {
    type Error = ProtocolError;

    fn try_from(value: i32) -> Result<Self, ProtocolError> {
        match value {
            0 => Ok(Self::ClearLog),
            1 => Ok(Self::ClearWatches),
            2 => Ok(Self::ClearAutoViews),
            3 => Ok(Self::ClearAll),
            4 => Ok(Self::ClearProcessFlow),
            other => Err(ProtocolError::invalid_discriminant(
                "ControlCommandType",
                other,
            )),
        }
    }
}

/// A control command packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCommand {
    pub(crate) header: PacketHeader,
    command_type: ControlCommandType,
    data: Option<Bytes>,
}

impl ControlCommand {
    /// Create a command at `Level::Control`
    pub fn new(command_type: ControlCommandType) -> Self {
        Self {
            header: PacketHeader {
                level: Level::Control,
                ..PacketHeader::default()
            },
            command_type,
            data: None,
        }
    }

    pub fn size(&self) -> usize {
        HEADER_SIZE + data_size(self.data())
    }

    pub fn command_type(&self) -> ControlCommandType {
        self.command_type
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn set_data(&mut self, data: impl Into<Bytes>) {
        self.data = Some(data.into());
    }
}
