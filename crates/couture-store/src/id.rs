//! Record id generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond-timestamp id source.
///
/// Ids are decimal strings of the current Unix time in milliseconds. Within
/// one generator they strictly increase, so two records created in the same
/// millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    /// Create a new generator.
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Next id, strictly greater than any id this generator returned before.
    pub fn next(&self) -> String {
        let now = now_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }

    /// Next id for which `taken` returns false.
    ///
    /// Guards against ids written by another process or an earlier run.
    pub fn next_unused(&self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.next();
            if !taken(&id) {
                return id;
            }
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
