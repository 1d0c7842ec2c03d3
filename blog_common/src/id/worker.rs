use std::thread;
use std::time::Duration;
use time::OffsetDateTime;

use crate::id::Id;

/// Generator for IDs with a specific worker ID.
///
/// Ids from one generator are strictly increasing, so records keyed by them keep their
/// insertion order.
#[derive(Debug, Clone, Copy)]
pub struct WorkerIdGenerator {
    worker: u16,
    next: u16,
    last_ms: i128,
}

/// Duration to sleep after overflowing the sequence number.
const SLEEP_DURATION: Duration = Duration::from_millis(1);

impl WorkerIdGenerator {
    /// Creates a new worker ID generator.
    #[must_use]
    pub const fn new(worker: u16) -> Self {
        Self {
            worker,
            next: 0,
            last_ms: 0,
        }
    }

    /// Generates a new id.
    ///
    /// # Examples
    ///
    /// ```
    /// use blog_common::id::worker::WorkerIdGenerator;
    ///
    /// let mut g = WorkerIdGenerator::new(1);
    /// let a = g.generate();
    /// let b = g.generate();
    /// assert!(a < b);
    /// ```
    pub fn generate(&mut self) -> Id {
        let mut now = OffsetDateTime::now_utc();
        let now_ms = now.unix_timestamp_nanos() / 1_000_000;
        if now_ms > self.last_ms {
            self.last_ms = now_ms;
            self.next = 0;
        } else if self.next == u16::MAX {
            thread::sleep(SLEEP_DURATION);
            return self.generate();
        } else {
            // Clock did not advance; keep the previous millisecond so ordering holds.
            now = OffsetDateTime::UNIX_EPOCH + time::Duration::milliseconds(self.last_ms as i64);
        }

        let id = Id::from_worker_parts(now, self.worker, self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}
