//! Watch packets - named variable values tracked by the viewer

use crate::error::ProtocolError;
use crate::level::Level;
use crate::packet::{PacketHeader, string_size};

const HEADER_SIZE: usize = 20;

/// Type of a watched value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum WatchType {
    Char = 0,
    String = 1,
    Integer = 2,
    Float = 3,
    Boolean = 4,
    Address = 5,
    Timestamp = 6,
    Object = 7,
}

impl WatchType {
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for WatchType {
    type Error = ProtocolError;

    fn try_from(value: i32) -> Result<Self, ProtocolError> {
        match value {
            0 => Ok(Self::Char),
            1 => Ok(Self::String),
            2 => Ok(Self::Integer),
            3 => Ok(Self::Float),
            4 => Ok(Self::Boolean),
            5 => Ok(Self::Address),
            6 => Ok(Self::Timestamp),
            7 => Ok(Self::Object),
            other => Err(ProtocolError::invalid_discriminant("WatchType", other)),
        }
    }
}

/// A watch packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watch {
    pub(crate) header: PacketHeader,
    watch_type: WatchType,
    name: Option<String>,
    value: Option<String>,
}

impl Watch {
    pub fn new(watch_type: WatchType, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header: PacketHeader::default(),
            watch_type,
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }

    pub fn size(&self) -> usize {
        HEADER_SIZE + string_size(self.name()) + string_size(self.value())
    }

    pub fn watch_type(&self) -> WatchType {
        self.watch_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
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
}
