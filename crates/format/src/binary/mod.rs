//! Binary formatter
//!
//! Encodes every packet kind into the viewer's binary framing:
//!
//! ```text
//! +-----------+--------------+------------------+
//! | kind: u16 | body_len: u32| body (LE fields) |
//! +-----------+--------------+------------------+
//! ```
//!
//! All integers are little-endian. Strings are UTF-8; their lengths are
//! written in a block before the string bytes, with absent strings encoded
//! as length 0. Timestamps are OLE automation dates (`f64` days since
//! 1899-12-30).

use std::io::{self, Write};

use bytes::{BufMut, BytesMut};
use sift_protocol::{
    Color, ControlCommand, LogEntry, LogHeader, PACKET_HEADER, Packet, PacketKind, ProcessFlow,
    Watch,
};

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Days between 1899-12-30 and the Unix epoch
const DAY_OFFSET: i64 = 25_569;

/// Buffers grown past this are released instead of reused
const MAX_RETAINED_CAPACITY: usize = 1024 * 1024;

/// Encoded in place of an absent color
const DEFAULT_COLOR: u32 = 0xff00_0005;

/// Formatter producing the binary packet framing
#[derive(Debug, Default)]
pub struct BinaryFormatter {
    body: BytesMut,
    kind: Option<PacketKind>,
}

impl BinaryFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body bytes of the last compiled packet, without framing
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    fn reset(&mut self) {
        if self.body.capacity() > MAX_RETAINED_CAPACITY {
            self.body = BytesMut::new();
        } else {
            self.body.clear();
        }
    }

    fn compile_log_entry(&mut self, entry: &LogEntry) {
        let app_name = entry.app_name().unwrap_or_default().as_bytes();
        let session_name = entry.session_name().unwrap_or_default().as_bytes();
        let title = entry.title().unwrap_or_default().as_bytes();
        let host_name = entry.host_name().unwrap_or_default().as_bytes();
        let data = entry.data().unwrap_or_default();

        let buf = &mut self.body;
        buf.put_i32_le(entry.log_entry_type().as_i32());
        buf.put_i32_le(entry.viewer_id().as_i32());
        put_len(buf, app_name);
        put_len(buf, session_name);
        put_len(buf, title);
        put_len(buf, host_name);
        put_len(buf, data);
        buf.put_i32_le(entry.process_id());
        buf.put_i32_le(entry.thread_id());
        buf.put_f64_le(ole_timestamp(entry.timestamp()));
        buf.put_u32_le(color_value(entry.color()));
        buf.put_slice(app_name);
        buf.put_slice(session_name);
        buf.put_slice(title);
        buf.put_slice(host_name);
        buf.put_slice(data);
    }

    fn compile_process_flow(&mut self, flow: &ProcessFlow) {
        let title = flow.title().unwrap_or_default().as_bytes();
        let host_name = flow.host_name().unwrap_or_default().as_bytes();

        let buf = &mut self.body;
        buf.put_i32_le(flow.process_flow_type().as_i32());
        put_len(buf, title);
        put_len(buf, host_name);
        buf.put_i32_le(flow.process_id());
        buf.put_i32_le(flow.thread_id());
        buf.put_f64_le(ole_timestamp(flow.timestamp()));
        buf.put_slice(title);
        buf.put_slice(host_name);
    }

    fn compile_watch(&mut self, watch: &Watch) {
        let name = watch.name().unwrap_or_default().as_bytes();
        let value = watch.value().unwrap_or_default().as_bytes();

        let buf = &mut self.body;
        put_len(buf, name);
        put_len(buf, value);
        buf.put_i32_le(watch.watch_type().as_i32());
        buf.put_f64_le(ole_timestamp(watch.timestamp()));
        buf.put_slice(name);
        buf.put_slice(value);
    }

    fn compile_control_command(&mut self, command: &ControlCommand) {
        let data = command.data().unwrap_or_default();

        let buf = &mut self.body;
        buf.put_i32_le(command.command_type().as_i32());
        put_len(buf, data);
        buf.put_slice(data);
    }

    fn compile_log_header(&mut self, header: &LogHeader) {
        let content = header.content();

        let buf = &mut self.body;
        put_len(buf, content.as_bytes());
        buf.put_slice(content.as_bytes());
    }
}

impl crate::Formatter for BinaryFormatter {
    fn compile(&mut self, packet: &Packet) -> usize {
        self.reset();

        match packet {
            Packet::LogEntry(entry) => self.compile_log_entry(entry),
            Packet::ProcessFlow(flow) => self.compile_process_flow(flow),
            Packet::Watch(watch) => self.compile_watch(watch),
            Packet::ControlCommand(command) => self.compile_control_command(command),
            Packet::LogHeader(header) => self.compile_log_header(header),
        }

        self.kind = Some(packet.kind());
        self.body.len() + PACKET_HEADER
    }

    fn write(&self, sink: &mut dyn Write) -> io::Result<()> {
        let Some(kind) = self.kind else {
            return Ok(());
        };

        let mut header = [0u8; PACKET_HEADER];
        header[..2].copy_from_slice(&kind.as_u16().to_le_bytes());
        header[2..].copy_from_slice(&(self.body.len() as u32).to_le_bytes());

        sink.write_all(&header)?;
        sink.write_all(&self.body)
    }
}

/// Convert microseconds since the Unix epoch to an OLE automation date
pub fn ole_timestamp(micros: i64) -> f64 {
    let days = (micros / MICROS_PER_DAY + DAY_OFFSET) as f64;
    days + (micros % MICROS_PER_DAY) as f64 / MICROS_PER_DAY as f64
}

#[inline]
fn put_len(buf: &mut BytesMut, value: &[u8]) {
    buf.put_u32_le(value.len() as u32);
}

#[inline]
fn color_value(color: Option<Color>) -> u32 {
    color.map_or(DEFAULT_COLOR, Color::to_rgba_u32)
}
