//! Text formatter tests

use std::io::{self, Write};

use sift_protocol::{
    ControlCommand, ControlCommandType, LogEntry, LogEntryType, LogHeader, Packet, ProcessFlow,
    ProcessFlowType, ViewerId, Watch, WatchType,
};

use super::{DEFAULT_PATTERN, TextFormatter};
use crate::formatter::Formatter;
use crate::pattern::PatternRenderer;

fn entry_packet(entry_type: LogEntryType, title: &str) -> Packet {
    let mut entry = LogEntry::new(entry_type, ViewerId::Title);
    entry.set_title(title);
    entry.into()
}

/// Sink that fails every write
struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Renderer that echoes the title and counts calls
#[derive(Default)]
struct EchoRenderer {
    calls: usize,
    indent: bool,
}

impl PatternRenderer for EchoRenderer {
    fn expand(&mut self, entry: &LogEntry) -> String {
        self.calls += 1;
        entry.title().unwrap_or_default().to_string()
    }

    fn pattern(&self) -> &str {
        "echo"
    }

    fn set_pattern(&mut self, _pattern: &str) {}

    fn indent(&self) -> bool {
        self.indent
    }

    fn set_indent(&mut self, indent: bool) {
        self.indent = indent;
    }
}

// ============================================================================
// Supported and unsupported kinds
// ============================================================================

#[test]
fn test_other_kinds_compile_to_zero() {
    let mut formatter = TextFormatter::with_pattern("%title%");
    let packets: Vec<Packet> = vec![
        ProcessFlow::new(ProcessFlowType::EnterThread).into(),
        Watch::new(WatchType::Integer, "n", "1").into(),
        ControlCommand::new(ControlCommandType::ClearAll).into(),
        LogHeader::new().into(),
    ];

    for packet in &packets {
        assert_eq!(formatter.compile(packet), 0, "{:?}", packet.kind());

        let mut out = Vec::new();
        formatter.write(&mut out).unwrap();
        assert!(out.is_empty());
    }
}

#[test]
fn test_unsupported_kind_clears_previous_line() {
    let mut formatter = TextFormatter::with_pattern("%title%");
    formatter.compile(&entry_packet(LogEntryType::Message, "first"));
    formatter.compile(&ProcessFlow::new(ProcessFlowType::LeaveThread).into());

    let mut out = Vec::new();
    formatter.write(&mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_log_entry_line_has_crlf() {
    let mut formatter = TextFormatter::with_pattern("%title%");
    let len = formatter.compile(&entry_packet(LogEntryType::Message, "hello"));
    assert_eq!(len, 7);

    let mut out = Vec::new();
    formatter.write(&mut out).unwrap();
    assert_eq!(out, b"hello\r\n");
}

#[test]
fn test_length_counts_utf8_bytes() {
    let mut formatter = TextFormatter::with_pattern("%title%");
    // "héllo" is 6 bytes, plus CRLF
    assert_eq!(
        formatter.compile(&entry_packet(LogEntryType::Message, "héllo")),
        8
    );
}

// ============================================================================
// Compile/write contract
// ============================================================================

#[test]
fn test_compile_is_deterministic() {
    let mut formatter = TextFormatter::new();
    let packet = entry_packet(LogEntryType::Message, "same");

    let first = formatter.compile(&packet);
    let second = formatter.compile(&packet);
    assert_eq!(first, second);
}

#[test]
fn test_write_without_compile_reemits() {
    let mut formatter = TextFormatter::with_pattern("%title%");
    formatter.compile(&entry_packet(LogEntryType::Message, "again"));

    let mut out = Vec::new();
    formatter.write(&mut out).unwrap();
    formatter.write(&mut out).unwrap();
    assert_eq!(out, b"again\r\nagain\r\n");
}

#[test]
fn test_write_before_any_compile_is_empty() {
    let formatter = TextFormatter::new();
    let mut out = Vec::new();
    formatter.write(&mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_format_composes_compile_and_write() {
    let mut formatter = TextFormatter::with_pattern("%title%");
    let mut out = Vec::new();
    formatter
        .format(&entry_packet(LogEntryType::Message, "x"), &mut out)
        .unwrap();
    assert_eq!(out, b"x\r\n");
}

#[test]
fn test_write_length_matches_compile() {
    let mut formatter = TextFormatter::new().indent(true);
    let packet = entry_packet(LogEntryType::Warning, "disk low");

    let len = formatter.compile(&packet);
    let mut out = Vec::new();
    formatter.write(&mut out).unwrap();
    assert_eq!(out.len(), len);
}

#[test]
fn test_sink_error_propagates() {
    let mut formatter = TextFormatter::with_pattern("%title%");
    formatter.compile(&entry_packet(LogEntryType::Message, "lost"));

    let err = formatter.write(&mut BrokenSink).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_default_pattern() {
    let formatter = TextFormatter::default();
    assert_eq!(formatter.pattern(), DEFAULT_PATTERN);
    assert!(!formatter.is_indent());
}

#[test]
fn test_pattern_and_indent_delegate() {
    let mut formatter = TextFormatter::new();
    formatter.set_pattern(" %level% ");
    formatter.set_indent(true);

    assert_eq!(formatter.pattern(), "%level%");
    assert!(formatter.is_indent());
    assert!(formatter.renderer().indent());
}

#[test]
fn test_indentation_spans_packets() {
    let mut formatter = TextFormatter::with_pattern("%title%").indent(true);
    let mut out = Vec::new();

    for packet in [
        entry_packet(LogEntryType::EnterMethod, "f"),
        entry_packet(LogEntryType::Message, "inside"),
        // Non-entry packets leave the level alone
        ProcessFlow::new(ProcessFlowType::EnterMethod).into(),
        entry_packet(LogEntryType::LeaveMethod, "f"),
        entry_packet(LogEntryType::LeaveMethod, "extra"),
        entry_packet(LogEntryType::Message, "after"),
    ] {
        formatter.format(&packet, &mut out).unwrap();
    }

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "f\r\n   inside\r\nf\r\nextra\r\nafter\r\n"
    );
    assert_eq!(formatter.renderer().indent_level(), 0);
}

#[test]
fn test_custom_renderer() {
    let mut formatter = TextFormatter::with_renderer(EchoRenderer::default());
    assert_eq!(formatter.pattern(), "echo");

    formatter.compile(&entry_packet(LogEntryType::Message, "a"));
    formatter.compile(&ProcessFlow::new(ProcessFlowType::EnterThread).into());
    formatter.compile(&entry_packet(LogEntryType::Message, "b"));

    assert_eq!(formatter.renderer().calls, 2);

    let mut out = Vec::new();
    formatter.write(&mut out).unwrap();
    assert_eq!(out, b"b\r\n");
}
