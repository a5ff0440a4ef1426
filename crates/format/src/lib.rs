//! Sift Format - packet formatters
//!
//! Turns packets into bytes using a two-phase protocol: `compile` renders a
//! packet into an internal buffer and reports its length, `write` emits that
//! buffer to any `io::Write`.
//!
//! - [`TextFormatter`] - CRLF-terminated text lines for log entries only
//! - [`BinaryFormatter`] - length-prefixed binary frames for every packet kind
//! - [`PatternParser`] - default `%variable%` renderer used by the text formatter
//!
//! # Example
//!
//! ```
//! use sift_format::{Formatter, TextFormatter};
//! use sift_protocol::{LogEntry, LogEntryType, Packet, ViewerId};
//!
//! let mut entry = LogEntry::new(LogEntryType::Message, ViewerId::Title);
//! entry.set_title("ready");
//!
//! let mut formatter = TextFormatter::with_pattern("%level%: %title%");
//! let mut out = Vec::new();
//! formatter.format(&Packet::from(entry), &mut out).unwrap();
//!
//! assert_eq!(out, b"Message: ready\r\n");
//! ```

mod binary;
mod formatter;
mod pattern;
mod text;

pub use binary::{BinaryFormatter, ole_timestamp};
pub use formatter::Formatter;
pub use pattern::{DEFAULT_TIMESTAMP_FORMAT, INDENT_WIDTH, PatternParser, PatternRenderer};
pub use text::{DEFAULT_PATTERN, LINE_ENDING, TextFormatter};
