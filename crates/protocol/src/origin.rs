//! Process and thread identifiers stamped on packets

use std::sync::OnceLock;
use std::sync::atomic::{AtomicI32, Ordering};

static PROCESS_ID: OnceLock<i32> = OnceLock::new();

static NEXT_THREAD_ID: AtomicI32 = AtomicI32::new(1);

thread_local! {
    static THREAD_ID: i32 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Identifier of the current process
///
/// Derived once per process lifetime and shared by every packet.
pub fn process_id() -> i32 {
    *PROCESS_ID.get_or_init(|| std::process::id() as i32)
}

/// Identifier of the calling thread
///
/// Assigned on first use in each thread and stable for the thread's lifetime.
pub fn thread_id() -> i32 {
    THREAD_ID.with(|id| *id)
}
