//! Sift Bridge - routes generic log events into sift packets
//!
//! The bridge sits between a host logging API and a packet session:
//!
//! ```text
//! LogEvent / tracing::Event
//!        │
//!        ▼
//!     Handler ── classify ── title ── Session ── PacketSink ── Formatter ── io::Write
//!        │
//!        └── ErrorHook (failures never reach the caller)
//! ```
//!
//! - [`LogEvent`] - loosely-typed record with [`Severity`], message,
//!   parameters, optional error and source
//! - [`Handler`] - the record adapter: gating, routing, title rendering
//! - [`Session`] / [`PacketSession`] - operations that become packets
//! - [`PacketSink`] / [`FormatterSink`] - packet destinations
//! - [`SessionLayer`] - `tracing` layer publishing through a handler
//!
//! # Example
//!
//! ```
//! use sift_bridge::{FormatterSink, Handler, LogEvent, PacketSession, Severity};
//! use sift_format::TextFormatter;
//!
//! let sink = FormatterSink::new(Box::new(TextFormatter::with_pattern("%title%")), Vec::new());
//! let handler = Handler::new(PacketSession::new("Main", sink));
//!
//! handler.publish(&LogEvent::new(Severity::Info, "started").with_logger("app"));
//! ```

mod adapter;
mod error;
mod event;
mod hook;
mod layer;
mod packet_session;
mod session;
mod severity;
mod sink;
mod title;

pub use adapter::{Handler, Route, classify, publish};
pub use error::{BridgeError, Result};
pub use event::{EventError, LogEvent};
pub use hook::{DEFAULT_REPORT_INTERVAL, ErrorHook, FailureCode, TracingErrorHook};
pub use layer::SessionLayer;
pub use packet_session::PacketSession;
pub use session::Session;
pub use severity::{DEFAULT_LEVEL, LEVEL_TABLE, Severity, map_level};
pub use sink::{FormatterSink, PacketSink, SinkStats, formatter_from_config};
pub use title::{DefaultTitleFormatter, ENTRY_TOKEN, RETURN_TOKEN, TitleFormatter};
