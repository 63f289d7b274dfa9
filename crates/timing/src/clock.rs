//! Monotonic microsecond clock and thread identity.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;
use std::time::Instant;

/// Reference point for every tick handed out by [`now_micros`].
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Microseconds elapsed since the process-wide monotonic epoch.
///
/// The epoch is fixed on first call, so all values share one timeline and
/// never run backward.
#[inline]
pub fn now_micros() -> u64 {
    let epoch = *EPOCH.get_or_init(Instant::now);
    Instant::now().saturating_duration_since(epoch).as_micros() as u64
}

/// Numeric identifier of the calling thread.
///
/// `ThreadId` has no stable integer form, so its hash is used instead. The
/// value is stable for the lifetime of the thread.
pub fn current_thread_id() -> u64 {
    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    hasher.finish()
}
