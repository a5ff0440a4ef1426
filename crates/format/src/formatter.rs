//! Two-phase formatter contract
//!
//! A formatter first compiles a packet into an internal buffer, reporting
//! how many bytes the next `write` will emit, and then writes that buffer to
//! a sink. Splitting the phases lets a transport size its frames or check
//! quotas before any byte leaves the process.
//!
//! # Concurrency
//!
//! The compiled buffer is mutated in place and shared between `compile` and
//! `write`, so one compile/write pair is a single unit of work. Callers that
//! share a formatter across threads must hold one lock around the pair (see
//! `sift_bridge::FormatterSink`).

use std::io::{self, Write};

use sift_protocol::Packet;

/// Converts packets into bytes for a sink
pub trait Formatter {
    /// Compile `packet` into the internal buffer
    ///
    /// Returns the number of bytes the next [`write`](Self::write) will
    /// emit, or 0 for packet kinds this formatter does not support (in which
    /// case `write` emits nothing).
    fn compile(&mut self, packet: &Packet) -> usize;

    /// Write the most recently compiled buffer to `sink`
    ///
    /// Calling `write` again without an intervening `compile` re-emits the
    /// same bytes.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error unchanged.
    fn write(&self, sink: &mut dyn Write) -> io::Result<()>;

    /// Compile `packet` and write it to `sink`
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error unchanged.
    fn format(&mut self, packet: &Packet, sink: &mut dyn Write) -> io::Result<()> {
        self.compile(packet);
        self.write(sink)
    }
}

impl<F: Formatter + ?Sized> Formatter for Box<F> {
    fn compile(&mut self, packet: &Packet) -> usize {
        (**self).compile(packet)
    }

    fn write(&self, sink: &mut dyn Write) -> io::Result<()> {
        (**self).write(sink)
    }
}
