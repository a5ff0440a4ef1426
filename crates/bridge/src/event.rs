//! Generic log events
//!
//! [`LogEvent`] is the plain record the adapter consumes: a severity, a
//! message with optional `{N}` placeholders, an optional attached error and
//! optional source identifiers. It deserializes from JSON so recorded
//! events can be replayed.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::Deserialize;

use crate::severity::Severity;

/// An error captured from the logging call site
///
/// Holds the error's message and the messages of its source chain, so the
/// event can outlive the original error value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventError {
    /// Message of the error itself
    pub message: String,
    /// Messages of its sources, outermost first
    pub chain: Vec<String>,
}

impl EventError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            chain: Vec::new(),
        }
    }

    /// Capture an error and its source chain
    pub fn capture(error: &(dyn Error + 'static)) -> Self {
        let mut chain = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            chain,
        }
    }

    /// Add a cause to the end of the chain
    #[inline]
    #[must_use]
    pub fn caused_by(mut self, cause: impl Into<String>) -> Self {
        self.chain.push(cause.into());
        self
    }

    /// Multi-line report: the message, then one `Caused by:` line per source
    pub fn report(&self) -> String {
        let mut out = String::with_capacity(self.message.len() + 32);
        out.push_str(&self.message);
        out.push_str("\r\n");
        for cause in &self.chain {
            out.push_str("Caused by: ");
            out.push_str(cause);
            out.push_str("\r\n");
        }
        out
    }
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A generic, loosely-typed log record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogEvent {
    /// Severity reported by the host logging API
    pub severity: Severity,
    /// Raw message, possibly with `{N}` placeholders
    pub message: String,
    /// Positional parameters for the placeholders
    pub params: Vec<String>,
    /// Error attached to the call
    pub error: Option<EventError>,
    /// Originating unit (type, module)
    pub source_unit: Option<String>,
    /// Originating operation within the unit (method, function)
    pub source_operation: Option<String>,
    /// Logger or channel name
    pub logger: Option<String>,
}

impl LogEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_error(mut self, error: EventError) -> Self {
        self.error = Some(error);
        self
    }

    /// Set the originating unit and, optionally, operation
    #[inline]
    #[must_use]
    pub fn with_source(mut self, unit: impl Into<String>, operation: Option<&str>) -> Self {
        self.source_unit = Some(unit.into());
        self.source_operation = operation.map(str::to_string);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_params<I, P>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Message with `{N}` placeholders replaced by positional parameters
    ///
    /// Placeholders without a matching parameter are left as written.
    pub fn formatted_message(&self) -> Cow<'_, str> {
        if self.params.is_empty() || !self.message.contains('{') {
            return Cow::Borrowed(&self.message);
        }

        let mut out = String::with_capacity(self.message.len() + 16);
        let mut rest = self.message.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let substituted = after.find('}').and_then(|close| {
                let index: usize = after[..close].parse().ok()?;
                let param = self.params.get(index)?;
                Some((param, close))
            });

            match substituted {
                Some((param, close)) => {
                    out.push_str(param);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_formatted_message_substitutes() {
        let event =
            LogEvent::new(Severity::Info, "user {0} bought {1}").with_params(["ann", "tea"]);
        assert_eq!(event.formatted_message(), "user ann bought tea");
    }

    #[test]
    fn test_formatted_message_keeps_unknown_placeholders() {
        let event = LogEvent::new(Severity::Info, "{0} {2} {x} {").with_params(["a"]);
        assert_eq!(event.formatted_message(), "a {2} {x} {");
    }

    #[test]
    fn test_formatted_message_without_params_borrows() {
        let event = LogEvent::new(Severity::Info, "literal {0}");
        assert!(matches!(event.formatted_message(), Cow::Borrowed("literal {0}")));
    }

    #[test]
    fn test_capture_error_chain() {
        let err = Outer(std::io::Error::other("connection reset"));
        let captured = EventError::capture(&err);

        assert_eq!(captured.message, "request failed");
        assert_eq!(captured.chain, vec!["connection reset".to_string()]);
        assert_eq!(
            captured.report(),
            "request failed\r\nCaused by: connection reset\r\n"
        );
    }

    #[test]
    fn test_deserialize_json() {
        let json = r#"{
            "severity": "warning",
            "message": "disk {0} low",
            "params": ["/var"],
            "source_unit": "Disk",
            "source_operation": "check",
            "error": {"message": "quota", "chain": ["io"]}
        }"#;
        let event: LogEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.severity, Severity::Warning);
        assert_eq!(event.formatted_message(), "disk /var low");
        assert_eq!(event.source_unit.as_deref(), Some("Disk"));
        assert_eq!(event.error, Some(EventError::new("quota").caused_by("io")));
    }

    #[test]
    fn test_deserialize_numeric_severity_and_defaults() {
        let event: LogEvent = serde_json::from_str(r#"{"severity": 1000}"#).unwrap();
        assert_eq!(event.severity, Severity::Severe);
        assert!(event.message.is_empty());
        assert!(event.error.is_none());

        let event: LogEvent = serde_json::from_str(r#"{"severity": 650}"#).unwrap();
        assert_eq!(event.severity, Severity::Other(650));
    }

    #[test]
    fn test_deserialize_unknown_severity_name_fails() {
        let result: Result<LogEvent, _> = serde_json::from_str(r#"{"severity": "loud"}"#);
        assert!(result.is_err());
    }
}
