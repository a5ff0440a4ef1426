//! Title rendering
//!
//! The title is the single line a viewer shows for an event: the source
//! identifier (or logger name), then the message.

use crate::event::LogEvent;

/// Leading message token marking a method entry
pub const ENTRY_TOKEN: &str = "ENTRY";

/// Leading message token marking a method return
pub const RETURN_TOKEN: &str = "RETURN";

const RESERVED_TOKENS: [&str; 2] = [ENTRY_TOKEN, RETURN_TOKEN];

/// Renders the title of a log event
pub trait TitleFormatter {
    fn format(&self, event: &LogEvent) -> String;
}

/// Default title layout
///
/// - Prefix: `unit.operation`, `unit`, or the logger name, in that order
/// - Text: the attached error's message if any, otherwise the formatted
///   message trimmed and stripped of one leading `ENTRY`/`RETURN` token
/// - Prefix and text are joined with `": "`, or `":"` when the text already
///   starts with a space; empty text is omitted together with the colon
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTitleFormatter;

impl TitleFormatter for DefaultTitleFormatter {
    fn format(&self, event: &LogEvent) -> String {
        let mut title = String::new();

        if let Some(unit) = &event.source_unit {
            title.push_str(unit);
            if let Some(operation) = &event.source_operation {
                title.push('.');
                title.push_str(operation);
            }
        } else if let Some(logger) = &event.logger {
            title.push_str(logger);
        }

        let formatted;
        let text = match &event.error {
            Some(error) => error.message.as_str(),
            None => {
                formatted = event.formatted_message();
                strip_reserved_token(formatted.trim())
            }
        };

        if text.trim().is_empty() {
            return title;
        }

        if !title.is_empty() {
            title.push(':');
            if !text.starts_with(' ') {
                title.push(' ');
            }
        }
        title.push_str(text);
        title
    }
}

/// Remove one leading reserved token, leaving the remainder untouched
fn strip_reserved_token(message: &str) -> &str {
    RESERVED_TOKENS
        .iter()
        .find_map(|token| message.strip_prefix(token))
        .unwrap_or(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventError;
    use crate::severity::Severity;

    fn format(event: &LogEvent) -> String {
        DefaultTitleFormatter.format(event)
    }

    #[test]
    fn test_unit_and_operation_prefix() {
        let event = LogEvent::new(Severity::Info, " hello").with_source("Foo", Some("bar"));
        assert_eq!(format(&event), "Foo.bar: hello");
    }

    #[test]
    fn test_unit_without_operation() {
        let event = LogEvent::new(Severity::Info, "hello").with_source("Foo", None);
        assert_eq!(format(&event), "Foo: hello");
    }

    #[test]
    fn test_logger_fallback() {
        let event = LogEvent::new(Severity::Info, "hi").with_logger("root");
        assert_eq!(format(&event), "root: hi");
    }

    #[test]
    fn test_unit_wins_over_logger() {
        let event = LogEvent::new(Severity::Info, "hi")
            .with_logger("root")
            .with_source("Foo", None);
        assert_eq!(format(&event), "Foo: hi");
    }

    #[test]
    fn test_no_source_empty_message() {
        let event = LogEvent::new(Severity::Info, "");
        assert_eq!(format(&event), "");
    }

    #[test]
    fn test_source_with_blank_message_has_no_colon() {
        let event = LogEvent::new(Severity::Info, "   ").with_logger("root");
        assert_eq!(format(&event), "root");
    }

    #[test]
    fn test_message_without_source() {
        let event = LogEvent::new(Severity::Info, "  plain  ");
        assert_eq!(format(&event), "plain");
    }

    #[test]
    fn test_entry_token_stripped() {
        let event = LogEvent::new(Severity::Fine, "ENTRYfoo");
        assert_eq!(format(&event), "foo");
    }

    #[test]
    fn test_token_remainder_keeps_leading_space() {
        let event = LogEvent::new(Severity::Fine, "ENTRY {0}")
            .with_params(["7"])
            .with_source("Foo", Some("bar"));
        assert_eq!(format(&event), "Foo.bar: 7");
    }

    #[test]
    fn test_return_token_alone_leaves_prefix_only() {
        let event = LogEvent::new(Severity::Fine, "RETURN").with_source("Foo", Some("bar"));
        assert_eq!(format(&event), "Foo.bar");
    }

    #[test]
    fn test_only_one_token_stripped() {
        let event = LogEvent::new(Severity::Fine, "RETURNENTRY");
        assert_eq!(format(&event), "ENTRY");
    }

    #[test]
    fn test_error_message_replaces_text() {
        let event = LogEvent::new(Severity::Severe, "ENTRY ignored")
            .with_logger("db")
            .with_error(EventError::new("connection refused"));
        assert_eq!(format(&event), "db: connection refused");
    }
}
