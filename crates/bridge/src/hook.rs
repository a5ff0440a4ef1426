//! Error reporting hook
//!
//! Failures while producing or forwarding a packet never reach the code that
//! logged the event. They are handed to an [`ErrorHook`] instead.
//! [`TracingErrorHook`] is the default: it emits `tracing::error!` at most
//! once per interval and counts what it suppressed, so a dead transport
//! cannot flood the diagnostics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::error::BridgeError;

/// Default interval between reported failures
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Category of a reported failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FailureCode {
    /// Anything not covered below
    Generic = 0,
    /// Writing to the output failed
    Write = 1,
    /// Flushing the output failed
    Flush = 2,
    /// Closing the output failed, or it was already closed
    Close = 3,
    /// Opening the output failed
    Open = 4,
    /// A packet could not be built or formatted
    Format = 5,
}

impl FailureCode {
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Write => "write",
            Self::Flush => "flush",
            Self::Close => "close",
            Self::Open => "open",
            Self::Format => "format",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side channel for failures the adapter must not raise
pub trait ErrorHook {
    fn report_failure(&self, message: &str, error: &BridgeError, code: FailureCode);
}

impl<F> ErrorHook for F
where
    F: Fn(&str, &BridgeError, FailureCode),
{
    fn report_failure(&self, message: &str, error: &BridgeError, code: FailureCode) {
        self(message, error, code)
    }
}

/// Rate-limited hook reporting through `tracing`
///
/// Thread-safe: atomic counters plus a mutex around the last report time.
pub struct TracingErrorHook {
    /// Minimum interval between reports
    min_interval: Duration,

    /// Last time we reported
    last_report: Mutex<Option<Instant>>,

    /// Failures since the last report
    pending: AtomicU64,

    /// Failures ever recorded
    total: AtomicU64,
}

impl TracingErrorHook {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_report: Mutex::new(None),
            pending: AtomicU64::new(0),
            total: AtomicU64::new(0),
        }
    }

    /// Record a failure and report it if the interval has elapsed
    ///
    /// Returns true if the failure was reported, false if suppressed.
    pub fn record(&self, message: &str, error: &BridgeError, code: FailureCode) -> bool {
        self.pending.fetch_add(1, Ordering::Relaxed);
        self.total.fetch_add(1, Ordering::Relaxed);

        let should_report = {
            let mut last = self.last_report.lock();
            let now = Instant::now();

            match *last {
                Some(at) if now.duration_since(at) < self.min_interval => false,
                _ => {
                    *last = Some(now);
                    true
                }
            }
        };

        if !should_report {
            return false;
        }

        let count = self.pending.swap(0, Ordering::Relaxed);
        let total = self.total.load(Ordering::Relaxed);

        if count > 1 {
            tracing::error!(
                message = %message,
                error = %error,
                code = %code,
                suppressed_count = count - 1,
                total_failures = total,
                "log forwarding failed (rate-limited)"
            );
        } else {
            tracing::error!(
                message = %message,
                error = %error,
                code = %code,
                total_failures = total,
                "log forwarding failed"
            );
        }
        true
    }

    /// Failures recorded since the last report
    pub fn pending_count(&self) -> u64 {
        self.pending.load(Ordering::Relaxed)
    }

    /// Failures ever recorded
    pub fn total_count(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

impl Default for TracingErrorHook {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_INTERVAL)
    }
}

impl ErrorHook for TracingErrorHook {
    fn report_failure(&self, message: &str, error: &BridgeError, code: FailureCode) {
        self.record(message, error, code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn write_error() -> BridgeError {
        BridgeError::Write(std::io::Error::other("disk full"))
    }

    #[test]
    fn test_failure_code_values() {
        assert_eq!(FailureCode::Generic.as_u8(), 0);
        assert_eq!(FailureCode::Write.as_u8(), 1);
        assert_eq!(FailureCode::Flush.as_u8(), 2);
        assert_eq!(FailureCode::Close.as_u8(), 3);
        assert_eq!(FailureCode::Open.as_u8(), 4);
        assert_eq!(FailureCode::Format.as_u8(), 5);
        assert_eq!(FailureCode::Format.to_string(), "format");
    }

    #[test]
    fn test_first_failure_always_reported() {
        let hook = TracingErrorHook::new(Duration::from_secs(10));
        assert!(hook.record("write", &write_error(), FailureCode::Write));
        assert_eq!(hook.total_count(), 1);
        assert_eq!(hook.pending_count(), 0);
    }

    #[test]
    fn test_rapid_failures_suppressed() {
        let hook = TracingErrorHook::new(Duration::from_secs(10));
        let err = write_error();

        assert!(hook.record("write", &err, FailureCode::Write));
        for _ in 0..10 {
            assert!(!hook.record("write", &err, FailureCode::Write));
        }

        assert_eq!(hook.total_count(), 11);
        assert_eq!(hook.pending_count(), 10);
    }

    #[test]
    fn test_zero_interval_reports_everything() {
        let hook = TracingErrorHook::new(Duration::ZERO);
        let err = write_error();

        for _ in 0..3 {
            assert!(hook.record("write", &err, FailureCode::Write));
        }
    }

    #[test]
    fn test_closure_hook() {
        let seen = RefCell::new(Vec::new());
        let hook = |message: &str, _error: &BridgeError, code: FailureCode| {
            seen.borrow_mut().push((message.to_string(), code));
        };

        hook.report_failure("m", &BridgeError::Closed, FailureCode::Close);
        assert_eq!(seen.into_inner(), vec![("m".to_string(), FailureCode::Close)]);
    }
}
