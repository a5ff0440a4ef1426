//! `tracing` integration
//!
//! [`SessionLayer`] turns every `tracing` event into a [`LogEvent`] and
//! publishes it through a [`Handler`], so applications instrumented with
//! `tracing` log into a session without calling it directly.
//!
//! Field mapping:
//!
//! - `message` becomes the raw message
//! - `operation` becomes the source operation
//! - `error` becomes the attached error (with its source chain when
//!   recorded as `&dyn Error`)
//! - any other field is appended to the message as ` key=value`
//!
//! The event's module path is the source unit and its target the logger
//! name. Events targeting this crate are ignored so failures reported by
//! the error hook never loop back into the session.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::adapter::Handler;
use crate::event::{EventError, LogEvent};
use crate::hook::{ErrorHook, TracingErrorHook};
use crate::session::Session;
use crate::severity::Severity;
use crate::title::{DefaultTitleFormatter, TitleFormatter};

/// Target prefix of events emitted by this crate
const INTERNAL_TARGET: &str = "sift_bridge";

/// Layer publishing `tracing` events into a session
pub struct SessionLayer<S, T = DefaultTitleFormatter, H = TracingErrorHook> {
    handler: Arc<Handler<S, T, H>>,
}

impl<S, T, H> SessionLayer<S, T, H> {
    pub fn new(handler: Handler<S, T, H>) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Layer sharing an existing handler
    pub fn shared(handler: Arc<Handler<S, T, H>>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<Handler<S, T, H>> {
        &self.handler
    }
}

impl<S, T, H> Clone for SessionLayer<S, T, H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<S, T, H, R> Layer<R> for SessionLayer<S, T, H>
where
    S: Session + Send + Sync + 'static,
    T: TitleFormatter + Send + Sync + 'static,
    H: ErrorHook + Send + Sync + 'static,
    R: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, R>) {
        let metadata = event.metadata();
        if metadata.target().starts_with(INTERNAL_TARGET) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        visitor.message.push_str(&visitor.fields);

        let mut log_event = LogEvent::new(Severity::from(*metadata.level()), visitor.message)
            .with_logger(metadata.target());
        if let Some(unit) = metadata.module_path() {
            log_event = log_event.with_source(unit, visitor.operation.as_deref());
        }
        log_event.error = visitor.error;

        self.handler.publish(&log_event);
    }
}

/// Collects the fields of one event
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
    operation: Option<String>,
    error: Option<EventError>,
}

impl EventVisitor {
    fn push_field(&mut self, name: &str, value: impl fmt::Display) {
        let _ = write!(self.fields, " {name}={value}");
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "operation" => self.operation = Some(format!("{value:?}")),
            "error" => self.error = Some(EventError::new(format!("{value:?}"))),
            name => self.push_field(name, format_args!("{value:?}")),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "operation" => self.operation = Some(value.to_string()),
            "error" => self.error = Some(EventError::new(value)),
            name => self.push_field(name, value),
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        if field.name() == "error" {
            self.error = Some(EventError::capture(value));
        } else {
            self.push_field(field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use parking_lot::Mutex;
    use sift_protocol::{Level, LogEntryType, Packet, ProcessFlowType, ViewerId};
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::error::Result;
    use crate::packet_session::PacketSession;
    use crate::sink::PacketSink;

    #[derive(Default)]
    struct CollectingSink {
        packets: Mutex<Vec<Packet>>,
    }

    impl PacketSink for CollectingSink {
        fn send(&self, packet: Packet) -> Result<()> {
            self.packets.lock().push(packet);
            Ok(())
        }
    }

    fn capture(level: Level, f: impl FnOnce()) -> Vec<Packet> {
        let sink = Arc::new(CollectingSink::default());
        let session = PacketSession::new("Main", Arc::clone(&sink)).level(level);
        let layer = SessionLayer::new(Handler::new(session));

        tracing::subscriber::with_default(Registry::default().with(layer), f);

        std::mem::take(&mut *sink.packets.lock())
    }

    fn titles(packets: &[Packet]) -> Vec<(LogEntryType, String)> {
        packets
            .iter()
            .filter_map(Packet::as_log_entry)
            .map(|e| (e.log_entry_type(), e.title().unwrap_or_default().to_string()))
            .collect()
    }

    const UNIT: &str = "sift_bridge::layer::tests";

    #[test]
    fn test_levels_route_to_operations() {
        let packets = capture(Level::Debug, || {
            tracing::trace!(target: "app", "t");
            tracing::debug!(target: "app", "d");
            tracing::info!(target: "app", "i");
            tracing::warn!(target: "app", "w");
            tracing::error!(target: "app", "e");
        });

        assert_eq!(
            titles(&packets),
            vec![
                (LogEntryType::Debug, format!("{UNIT}: t")),
                (LogEntryType::Verbose, format!("{UNIT}: d")),
                (LogEntryType::Message, format!("{UNIT}: i")),
                (LogEntryType::Warning, format!("{UNIT}: w")),
                (LogEntryType::Error, format!("{UNIT}: e")),
            ]
        );
    }

    #[test]
    fn test_fields_and_operation() {
        let packets = capture(Level::Debug, || {
            tracing::info!(target: "app", operation = "charge", user = 42, "paid {}", 10);
        });

        assert_eq!(
            titles(&packets),
            vec![(LogEntryType::Message, format!("{UNIT}.charge: paid 10 user=42"))]
        );
    }

    #[test]
    fn test_entry_token_opens_method() {
        let packets = capture(Level::Debug, || {
            tracing::debug!(target: "app", operation = "run", "ENTRY");
            tracing::debug!(target: "app", operation = "run", "RETURN");
        });

        assert_eq!(packets.len(), 4);
        let Packet::ProcessFlow(flow) = &packets[1] else {
            panic!("expected process flow");
        };
        assert_eq!(flow.process_flow_type(), ProcessFlowType::EnterMethod);
        assert_eq!(flow.title(), Some(format!("{UNIT}.run").as_str()));
        assert_eq!(flow.level(), Level::Verbose);
    }

    #[test]
    fn test_error_field_becomes_exception() {
        let packets = capture(Level::Debug, || {
            let err = io::Error::new(io::ErrorKind::NotFound, "config.toml missing");
            tracing::error!(
                target: "app",
                error = &err as &(dyn std::error::Error + 'static),
                "load failed"
            );
        });

        let entry = packets[0].as_log_entry().unwrap();
        assert_eq!(entry.viewer_id(), ViewerId::Data);
        assert_eq!(entry.title(), Some(format!("{UNIT}: config.toml missing").as_str()));
    }

    #[test]
    fn test_gated_and_internal_events_are_dropped() {
        let packets = capture(Level::Warning, || {
            tracing::info!(target: "app", "quiet");
            tracing::error!(target: "sift_bridge::hook", "internal");
            tracing::warn!(target: "app", "loud");
        });

        assert_eq!(
            titles(&packets),
            vec![(LogEntryType::Warning, format!("{UNIT}: loud"))]
        );
    }

    #[test]
    fn test_cloned_layer_shares_handler() {
        let session = PacketSession::new("Main", CollectingSink::default());
        let layer = SessionLayer::new(Handler::new(session));
        let clone = layer.clone();
        assert!(Arc::ptr_eq(layer.handler(), clone.handler()));
    }
}
