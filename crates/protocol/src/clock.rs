//! Packet timestamps
//!
//! Timestamps are microseconds since the Unix epoch. `Standard` resolution
//! reads the wall clock on every call. `High` resolution anchors a monotonic
//! counter to the wall clock once and derives every later timestamp from it,
//! so consecutive packets never appear to travel back in time.

use std::sync::OnceLock;
use std::time::Instant;

use chrono::Utc;

/// Clock resolution used when stamping packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockResolution {
    /// Wall clock (millisecond precision on most platforms)
    #[default]
    Standard,
    /// Monotonic counter anchored to the wall clock (microsecond precision)
    High,
}

impl ClockResolution {
    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Wall-clock anchor for the high resolution clock
struct Anchor {
    wall_micros: i64,
    instant: Instant,
}

static ANCHOR: OnceLock<Anchor> = OnceLock::new();

fn anchor() -> &'static Anchor {
    ANCHOR.get_or_init(|| Anchor {
        wall_micros: Utc::now().timestamp_micros(),
        instant: Instant::now(),
    })
}

/// Current time in microseconds since the Unix epoch
pub fn now(resolution: ClockResolution) -> i64 {
    match resolution {
        ClockResolution::Standard => Utc::now().timestamp_micros(),
        ClockResolution::High => {
            let anchor = anchor();
            let elapsed = i64::try_from(anchor.instant.elapsed().as_micros()).unwrap_or(i64::MAX);
            anchor.wall_micros.saturating_add(elapsed)
        }
    }
}
