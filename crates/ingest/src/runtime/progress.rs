use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::types::{DrainStatus, Ticket};

/// Counts issued and completed tickets of a FIFO queue.
///
/// Tickets are issued in submission order and a single worker completes
/// them in the same order, so "ticket `t` is done" is equivalent to
/// "at least `t` tasks are done".
#[derive(Default)]
pub struct ProgressTracker {
    inner: Mutex<Progress>,
    advanced: Condvar,
}

#[derive(Default, Clone, Copy)]
struct Progress {
    issued: Ticket,
    completed: Ticket,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.issued += 1;
        guard.issued
    }

    pub fn complete(&self) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.completed < guard.issued {
            guard.completed += 1;
        }
        drop(guard);
        self.advanced.notify_all();
    }

    pub fn issued(&self) -> Ticket {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .issued
    }

    pub fn completed(&self) -> Ticket {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .completed
    }

    pub fn pending(&self) -> u64 {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.issued - guard.completed
    }

    /// Block until `ticket` has completed or `timeout` elapses.
    pub fn wait_for(&self, ticket: Ticket, timeout: Duration) -> DrainStatus {
        let deadline = Instant::now() + timeout;
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        while guard.completed < ticket {
            let now = Instant::now();
            if now >= deadline {
                return DrainStatus::TimedOut {
                    pending: ticket - guard.completed,
                };
            }
            let (next, _) = self
                .advanced
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            guard = next;
        }
        DrainStatus::Drained
    }

    /// Block until every ticket issued so far has completed.
    pub fn wait_for_issued(&self, timeout: Duration) -> DrainStatus {
        let target = self.issued();
        self.wait_for(target, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_tracker_is_drained() {
        let tracker = ProgressTracker::new();
        assert_eq!(
            tracker.wait_for_issued(Duration::from_millis(1)),
            DrainStatus::Drained
        );
    }

    #[test]
    fn test_wait_times_out_with_pending_count() {
        let tracker = ProgressTracker::new();
        tracker.issue();
        tracker.issue();
        tracker.complete();
        assert_eq!(
            tracker.wait_for_issued(Duration::from_millis(20)),
            DrainStatus::TimedOut { pending: 1 }
        );
    }

    #[test]
    fn test_wait_wakes_on_completion() {
        let tracker = Arc::new(ProgressTracker::new());
        let ticket = tracker.issue();

        let worker = {
            let tracker = Arc::clone(&tracker);
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(20));
                tracker.complete();
            })
        };

        assert!(tracker.wait_for(ticket, Duration::from_secs(5)).is_drained());
        worker.join().unwrap();
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn test_later_tickets_do_not_hold_earlier_waiters() {
        let tracker = ProgressTracker::new();
        let first = tracker.issue();
        tracker.complete();
        tracker.issue();
        assert!(tracker.wait_for(first, Duration::from_millis(1)).is_drained());
    }
}
