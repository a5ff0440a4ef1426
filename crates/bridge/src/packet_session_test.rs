//! Packet session tests

use std::sync::Arc;

use parking_lot::Mutex;
use sift_config::SessionConfig;
use sift_format::TextFormatter;
use sift_protocol::{Color, Level, LogEntryType, Packet, PacketKind, ProcessFlowType, ViewerId};

use super::PacketSession;
use crate::error::{BridgeError, Result};
use crate::event::EventError;
use crate::session::Session;
use crate::sink::{FormatterSink, PacketSink};

#[derive(Default)]
struct CollectingSink {
    packets: Mutex<Vec<Packet>>,
}

impl CollectingSink {
    fn take(&self) -> Vec<Packet> {
        std::mem::take(&mut *self.packets.lock())
    }
}

impl PacketSink for CollectingSink {
    fn send(&self, packet: Packet) -> Result<()> {
        self.packets.lock().push(packet);
        Ok(())
    }
}

struct RefusingSink;

impl PacketSink for RefusingSink {
    fn send(&self, _packet: Packet) -> Result<()> {
        Err(BridgeError::Closed)
    }
}

fn session() -> PacketSession<Arc<CollectingSink>> {
    PacketSession::new("Main", Arc::new(CollectingSink::default()))
        .app_name("billing")
        .host_name("web-01")
}

// ============================================================================
// Log entries
// ============================================================================

#[test]
fn test_plain_operations_emit_one_entry_each() {
    let session = session();
    session.log_debug("d").unwrap();
    session.log_verbose("v").unwrap();
    session.log_message("m").unwrap();
    session.log_warning("w").unwrap();
    session.log_error("e").unwrap();

    let packets = session.sink().take();
    let kinds: Vec<_> = packets
        .iter()
        .map(|p| {
            let entry = p.as_log_entry().unwrap();
            (entry.log_entry_type(), entry.level(), entry.title().unwrap().to_string())
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            (LogEntryType::Debug, Level::Debug, "d".to_string()),
            (LogEntryType::Verbose, Level::Verbose, "v".to_string()),
            (LogEntryType::Message, Level::Message, "m".to_string()),
            (LogEntryType::Warning, Level::Warning, "w".to_string()),
            (LogEntryType::Error, Level::Error, "e".to_string()),
        ]
    );
}

#[test]
fn test_entry_carries_session_identity() {
    let session = session().color(Color::rgb(1, 2, 3));
    session.log_message("hello").unwrap();

    let packets = session.sink().take();
    let entry = packets[0].as_log_entry().unwrap();
    assert_eq!(entry.session_name(), Some("Main"));
    assert_eq!(entry.app_name(), Some("billing"));
    assert_eq!(entry.host_name(), Some("web-01"));
    assert_eq!(entry.color(), Some(Color::rgb(1, 2, 3)));
    assert_eq!(entry.viewer_id(), ViewerId::Title);
    assert!(entry.timestamp() > 0);
    assert!(entry.data().is_none());
}

#[test]
fn test_exception_entry_carries_report() {
    let session = session();
    let error = EventError::new("boom").caused_by("disk full");
    session.log_exception("Job.run: boom", &error).unwrap();

    let packets = session.sink().take();
    assert_eq!(packets.len(), 1);
    let entry = packets[0].as_log_entry().unwrap();
    assert_eq!(entry.log_entry_type(), LogEntryType::Error);
    assert_eq!(entry.viewer_id(), ViewerId::Data);
    assert_eq!(entry.level(), Level::Error);

    let data = entry.data().unwrap();
    assert_eq!(&data[..3], &[0xEF, 0xBB, 0xBF]);
    assert_eq!(&data[3..], error.report().as_bytes());
}

// ============================================================================
// Method flow
// ============================================================================

#[test]
fn test_enter_and_leave_emit_entry_then_flow() {
    let session = session();
    session.enter_method(Level::Verbose, "Foo.bar").unwrap();
    session.leave_method(Level::Verbose, "Foo.bar").unwrap();

    let packets = session.sink().take();
    let kinds: Vec<_> = packets.iter().map(Packet::kind).collect();
    assert_eq!(
        kinds,
        vec![
            PacketKind::LogEntry,
            PacketKind::ProcessFlow,
            PacketKind::LogEntry,
            PacketKind::ProcessFlow,
        ]
    );

    let enter = packets[0].as_log_entry().unwrap();
    assert_eq!(enter.log_entry_type(), LogEntryType::EnterMethod);
    assert_eq!(enter.level(), Level::Verbose);

    let Packet::ProcessFlow(flow) = &packets[1] else {
        panic!("expected process flow, got {:?}", packets[1].kind());
    };
    assert_eq!(flow.process_flow_type(), ProcessFlowType::EnterMethod);
    assert_eq!(flow.title(), Some("Foo.bar"));
    assert_eq!(flow.host_name(), Some("web-01"));

    let Packet::ProcessFlow(flow) = &packets[3] else {
        panic!("expected process flow, got {:?}", packets[3].kind());
    };
    assert_eq!(flow.process_flow_type(), ProcessFlowType::LeaveMethod);
}

// ============================================================================
// Gating
// ============================================================================

#[test]
fn test_level_threshold() {
    let session = session().level(Level::Warning);
    assert!(!session.is_on(Level::Message));
    assert!(session.is_on(Level::Warning));
    assert!(session.is_on(Level::Error));

    session.log_message("dropped").unwrap();
    session.enter_method(Level::Debug, "dropped").unwrap();
    session.log_warning("kept").unwrap();

    let packets = session.sink().take();
    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].as_log_entry().unwrap().title(), Some("kept"));
}

#[test]
fn test_inactive_session_drops_everything() {
    let session = session();
    session.set_active(false);
    assert!(!session.is_on(Level::Fatal));

    session.log_error("x").unwrap();
    session.log_exception("x", &EventError::new("e")).unwrap();
    assert!(session.sink().take().is_empty());

    session.set_active(true);
    session.log_error("x").unwrap();
    assert_eq!(session.sink().take().len(), 1);
}

#[test]
fn test_exception_gated_at_error() {
    let session = session().level(Level::Fatal);
    session.log_exception("x", &EventError::new("e")).unwrap();
    assert!(session.sink().take().is_empty());
}

#[test]
fn test_sink_failure_is_returned() {
    let session = PacketSession::new("Main", RefusingSink);
    let err = session.log_message("x").unwrap_err();
    assert!(matches!(err, BridgeError::Closed));

    let err = session.enter_method(Level::Debug, "x").unwrap_err();
    assert!(matches!(err, BridgeError::Closed));
}

// ============================================================================
// Header and configuration
// ============================================================================

#[test]
fn test_log_header() {
    let session = session();
    session.send_log_header().unwrap();

    let packets = session.sink().take();
    let Packet::LogHeader(header) = &packets[0] else {
        panic!("expected log header, got {:?}", packets[0].kind());
    };
    assert_eq!(header.content(), "hostname=web-01\r\nappname=billing\r\n");
}

#[test]
fn test_from_config() {
    let config = SessionConfig {
        name: "Worker".to_string(),
        level: Level::Error,
        enabled: false,
        host_name: Some("db-02".to_string()),
        ..SessionConfig::default()
    };
    let session = PacketSession::from_config(&config, CollectingSink::default());

    assert_eq!(session.name(), "Worker");
    assert!(!session.is_active());

    session.set_active(true);
    assert!(!session.is_on(Level::Warning));
    session.log_error("e").unwrap();

    let packets = session.sink().take();
    let entry = packets[0].as_log_entry().unwrap();
    assert_eq!(entry.session_name(), Some("Worker"));
    assert_eq!(entry.app_name(), Some("sift"));
    assert_eq!(entry.host_name(), Some("db-02"));
}

#[test]
fn test_text_output_end_to_end() {
    let sink = FormatterSink::new(
        Box::new(TextFormatter::with_pattern("%level%|%title%").indent(true)),
        Vec::new(),
    );
    let session = PacketSession::new("Main", sink);

    session.enter_method(Level::Debug, "outer").unwrap();
    session.log_message("inside").unwrap();
    session.leave_method(Level::Debug, "outer").unwrap();

    let output = String::from_utf8(session.into_sink().into_writer()).unwrap();
    assert_eq!(output, "Debug|outer\r\nMessage|   inside\r\nDebug|outer\r\n");
}
