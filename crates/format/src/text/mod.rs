//! Text formatter
//!
//! Renders log entry packets as CRLF-terminated UTF-8 lines through a
//! [`PatternRenderer`]. Every other packet kind compiles to zero bytes.
//!
//! The formatter owns its renderer, so the indentation level advances once
//! per compiled entry across the whole stream passing through this instance.

use std::io::{self, Write};

use sift_protocol::Packet;

use crate::formatter::Formatter;
use crate::pattern::{PatternParser, PatternRenderer};

/// Pattern used by [`TextFormatter::new`]
pub const DEFAULT_PATTERN: &str = "[%timestamp%] %level,8%: %title%";

/// Line terminator, fixed regardless of host platform
pub const LINE_ENDING: &str = "\r\n";

/// Formatter producing human-readable text lines
#[derive(Debug, Clone)]
pub struct TextFormatter<R = PatternParser> {
    renderer: R,
    line: Option<Vec<u8>>,
}

impl TextFormatter<PatternParser> {
    /// Formatter using [`DEFAULT_PATTERN`] without indentation
    pub fn new() -> Self {
        Self::with_renderer(PatternParser::new(DEFAULT_PATTERN))
    }

    /// Formatter using `pattern` without indentation
    pub fn with_pattern(pattern: &str) -> Self {
        Self::with_renderer(PatternParser::new(pattern))
    }
}

impl Default for TextFormatter<PatternParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PatternRenderer> TextFormatter<R> {
    /// Formatter rendering through a custom renderer
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            line: None,
        }
    }

    /// Enable or disable indentation
    #[inline]
    #[must_use]
    pub fn indent(mut self, indent: bool) -> Self {
        self.renderer.set_indent(indent);
        self
    }

    pub fn pattern(&self) -> &str {
        self.renderer.pattern()
    }

    pub fn set_pattern(&mut self, pattern: &str) {
        self.renderer.set_pattern(pattern);
    }

    pub fn is_indent(&self) -> bool {
        self.renderer.indent()
    }

    pub fn set_indent(&mut self, indent: bool) {
        self.renderer.set_indent(indent);
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<R: PatternRenderer> Formatter for TextFormatter<R> {
    fn compile(&mut self, packet: &Packet) -> usize {
        let Some(entry) = packet.as_log_entry() else {
            self.line = None;
            return 0;
        };

        let mut line = self.renderer.expand(entry);
        line.push_str(LINE_ENDING);

        let bytes = line.into_bytes();
        let len = bytes.len();
        self.line = Some(bytes);
        len
    }

    fn write(&self, sink: &mut dyn Write) -> io::Result<()> {
        match &self.line {
            Some(line) => sink.write_all(line),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;
