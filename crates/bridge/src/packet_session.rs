//! Packet-producing session
//!
//! Turns session operations into packets stamped with the session's
//! identity and hands them to a [`PacketSink`]. Calls below the session
//! level, or on an inactive session, are dropped without touching the sink.

use std::sync::atomic::{AtomicBool, Ordering};

use sift_config::SessionConfig;
use sift_protocol::{
    ClockResolution, Color, Level, LogEntry, LogEntryType, LogHeader, Packet, ProcessFlow,
    ProcessFlowType, ViewerId, now,
};

use crate::error::Result;
use crate::event::EventError;
use crate::session::Session;
use crate::sink::PacketSink;

/// UTF-8 byte order mark prefixed to text viewer data
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Session emitting packets into a sink
pub struct PacketSession<K> {
    name: String,
    app_name: Option<String>,
    host_name: Option<String>,
    level: Level,
    resolution: ClockResolution,
    color: Option<Color>,
    active: AtomicBool,
    sink: K,
}

impl<K: PacketSink> PacketSession<K> {
    /// Active session logging everything
    pub fn new(name: impl Into<String>, sink: K) -> Self {
        Self {
            name: name.into(),
            app_name: None,
            host_name: None,
            level: Level::Debug,
            resolution: ClockResolution::Standard,
            color: None,
            active: AtomicBool::new(true),
            sink,
        }
    }

    /// Session configured from the `[session]` section
    pub fn from_config(config: &SessionConfig, sink: K) -> Self {
        let mut session = Self::new(config.name.clone(), sink)
            .app_name(config.app_name.clone())
            .level(config.level)
            .resolution(config.resolution);
        session.host_name = config.host_name.clone();
        session.set_active(config.enabled);
        session
    }

    #[inline]
    #[must_use]
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = Some(host_name.into());
        self
    }

    /// Lowest level that is logged
    #[inline]
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[inline]
    #[must_use]
    pub fn resolution(mut self, resolution: ClockResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Background color of emitted log entries
    #[inline]
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Send a log header describing this session's host and application
    ///
    /// Viewers use it to label the stream; it is sent regardless of level.
    pub fn send_log_header(&self) -> Result<()> {
        let mut header = LogHeader::new();
        if let Some(host_name) = &self.host_name {
            header.add_value("hostname", host_name)?;
        }
        if let Some(app_name) = &self.app_name {
            header.add_value("appname", app_name)?;
        }
        self.sink.send(header.into())
    }

    fn send_log_entry(
        &self,
        level: Level,
        title: &str,
        entry_type: LogEntryType,
        viewer_id: ViewerId,
        data: Option<Vec<u8>>,
    ) -> Result<()> {
        let mut entry = LogEntry::new(entry_type, viewer_id);
        entry.set_timestamp(now(self.resolution));
        entry.set_level(level);
        entry.set_title(title);
        entry.set_session_name(self.name.as_str());
        entry.set_color(self.color);
        if let Some(app_name) = &self.app_name {
            entry.set_app_name(app_name.as_str());
        }
        if let Some(host_name) = &self.host_name {
            entry.set_host_name(host_name.as_str());
        }
        if let Some(data) = data {
            entry.set_data(data);
        }
        self.sink.send(Packet::from(entry))
    }

    fn send_process_flow(
        &self,
        level: Level,
        title: &str,
        flow_type: ProcessFlowType,
    ) -> Result<()> {
        let mut flow = ProcessFlow::new(flow_type);
        flow.set_timestamp(now(self.resolution));
        flow.set_level(level);
        flow.set_title(title);
        if let Some(host_name) = &self.host_name {
            flow.set_host_name(host_name.as_str());
        }
        self.sink.send(Packet::from(flow))
    }

    fn log_plain(&self, level: Level, entry_type: LogEntryType, title: &str) -> Result<()> {
        if !self.is_on(level) {
            return Ok(());
        }
        self.send_log_entry(level, title, entry_type, ViewerId::Title, None)
    }
}

impl<K: PacketSink> Session for PacketSession<K> {
    fn is_on(&self, level: Level) -> bool {
        self.is_active() && level >= self.level
    }

    fn log_debug(&self, title: &str) -> Result<()> {
        self.log_plain(Level::Debug, LogEntryType::Debug, title)
    }

    fn log_verbose(&self, title: &str) -> Result<()> {
        self.log_plain(Level::Verbose, LogEntryType::Verbose, title)
    }

    fn log_message(&self, title: &str) -> Result<()> {
        self.log_plain(Level::Message, LogEntryType::Message, title)
    }

    fn log_warning(&self, title: &str) -> Result<()> {
        self.log_plain(Level::Warning, LogEntryType::Warning, title)
    }

    fn log_error(&self, title: &str) -> Result<()> {
        self.log_plain(Level::Error, LogEntryType::Error, title)
    }

    fn log_exception(&self, title: &str, error: &EventError) -> Result<()> {
        if !self.is_on(Level::Error) {
            return Ok(());
        }

        let report = error.report();
        let mut data = Vec::with_capacity(UTF8_BOM.len() + report.len());
        data.extend_from_slice(&UTF8_BOM);
        data.extend_from_slice(report.as_bytes());

        self.send_log_entry(
            Level::Error,
            title,
            LogEntryType::Error,
            ViewerId::Data,
            Some(data),
        )
    }

    fn enter_method(&self, level: Level, title: &str) -> Result<()> {
        if !self.is_on(level) {
            return Ok(());
        }
        self.send_log_entry(level, title, LogEntryType::EnterMethod, ViewerId::Title, None)?;
        self.send_process_flow(level, title, ProcessFlowType::EnterMethod)
    }

    fn leave_method(&self, level: Level, title: &str) -> Result<()> {
        if !self.is_on(level) {
            return Ok(());
        }
        self.send_log_entry(level, title, LogEntryType::LeaveMethod, ViewerId::Title, None)?;
        self.send_process_flow(level, title, ProcessFlowType::LeaveMethod)
    }
}

#[cfg(test)]
#[path = "packet_session_test.rs"]
mod packet_session_test;
