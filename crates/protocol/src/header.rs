//! Log header packets
//!
//! Key/value metadata written once at the start of a log (host name,
//! application name, ...). Rendered as `key=value\r\n` lines.

use crate::error::ProtocolError;
use crate::packet::{PacketHeader, string_size};

const HEADER_SIZE: usize = 4;

/// A log header packet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogHeader {
    pub(crate) header: PacketHeader,
    values: Vec<(String, String)>,
}

impl LogHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        HEADER_SIZE + string_size(Some(&self.content()))
    }

    /// Add or replace a value
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeaderKey` if the key is empty or contains `=`, `\r`
    /// or `\n`, since it could not be read back from the rendered content.
    pub fn add_value(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ProtocolError> {
        let key = key.into();
        if key.is_empty() || key.contains(['=', '\r', '\n']) {
            return Err(ProtocolError::invalid_header_key(key));
        }

        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
        Ok(())
    }

    /// Values in insertion order
    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    /// Rendered `key=value\r\n` content
    pub fn content(&self) -> String {
        let mut content = String::new();
        for (key, value) in &self.values {
            content.push_str(key);
            content.push('=');
            content.push_str(value);
            content.push_str("\r\n");
        }
        content
    }
}
