//! Packet sinks
//!
//! A [`PacketSink`] receives the packets a session produces.
//! [`FormatterSink`] formats each packet into an `io::Write` and holds one
//! lock around every compile/write pair, so concurrent producers never tear
//! a frame or advance the text indentation out of order.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use sift_config::{FormatConfig, FormatKind};
use sift_format::{BinaryFormatter, Formatter, TextFormatter};
use sift_protocol::Packet;

use crate::error::{BridgeError, Result};

/// Destination for packets
pub trait PacketSink {
    fn send(&self, packet: Packet) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

impl<K: PacketSink + ?Sized> PacketSink for Arc<K> {
    fn send(&self, packet: Packet) -> Result<()> {
        (**self).send(packet)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

/// Build the formatter described by `config`
pub fn formatter_from_config(config: &FormatConfig) -> Box<dyn Formatter + Send> {
    match config.kind {
        FormatKind::Text => {
            let formatter = match &config.pattern {
                Some(pattern) => TextFormatter::with_pattern(pattern),
                None => TextFormatter::new(),
            };
            Box::new(formatter.indent(config.indent))
        }
        FormatKind::Binary => Box::new(BinaryFormatter::new()),
    }
}

/// Point-in-time sink counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    /// Packets written
    pub packets: u64,
    /// Bytes written
    pub bytes: u64,
    /// Packets the formatter does not render
    pub skipped: u64,
}

struct Output<W> {
    formatter: Box<dyn Formatter + Send>,
    writer: W,
    closed: bool,
}

/// Sink formatting packets into a writer
pub struct FormatterSink<W> {
    output: Mutex<Output<W>>,
    packets: AtomicU64,
    bytes: AtomicU64,
    skipped: AtomicU64,
}

impl<W: Write> FormatterSink<W> {
    pub fn new(formatter: Box<dyn Formatter + Send>, writer: W) -> Self {
        Self {
            output: Mutex::new(Output {
                formatter,
                writer,
                closed: false,
            }),
            packets: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    /// Flush and refuse further packets
    pub fn close(&self) -> Result<()> {
        let mut output = self.output.lock();
        if output.closed {
            return Ok(());
        }
        output.closed = true;
        output.writer.flush().map_err(BridgeError::Flush)
    }

    pub fn is_closed(&self) -> bool {
        self.output.lock().closed
    }

    pub fn stats(&self) -> SinkStats {
        SinkStats {
            packets: self.packets.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }

    /// Consume the sink, returning the writer
    pub fn into_writer(self) -> W {
        self.output.into_inner().writer
    }
}

impl FormatterSink<BufWriter<File>> {
    /// Sink appending to the file at `path`, creating it if needed
    pub fn append_to(path: &Path, formatter: Box<dyn Formatter + Send>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| BridgeError::open(path.display().to_string(), e))?;

        Ok(Self::new(formatter, BufWriter::new(file)))
    }
}

impl<W: Write> PacketSink for FormatterSink<W> {
    fn send(&self, packet: Packet) -> Result<()> {
        let mut guard = self.output.lock();
        if guard.closed {
            return Err(BridgeError::Closed);
        }

        let Output {
            formatter, writer, ..
        } = &mut *guard;

        let len = formatter.compile(&packet);
        if len == 0 {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            return Ok(());
        }

        formatter.write(writer).map_err(BridgeError::Write)?;

        self.packets.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(len as u64, Ordering::Relaxed);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.output.lock().writer.flush().map_err(BridgeError::Flush)
    }
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod sink_test;
