//! Delayed removal of checked tasks.
//!
//! Each checked task owns at most one pending deadline. The control loop
//! passes the current time in and drains whatever has come due, so nothing
//! here sleeps or spawns.

use super::task::TaskId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default time a checked task lingers before it is removed.
pub const DEFAULT_EXPIRY_DELAY: Duration = Duration::from_millis(3000);

/// Identifies one arming of a timer. Re-arming a task yields a new handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpiryHandle(u64);

#[derive(Debug, Clone, Copy)]
struct PendingExpiry {
    handle: ExpiryHandle,
    deadline: Instant,
}

/// Per-task one-shot timers keyed by task id.
#[derive(Debug)]
pub struct ExpiryScheduler {
    delay: Duration,
    pending: HashMap<TaskId, PendingExpiry>,
    next_handle: u64,
}

impl ExpiryScheduler {
    /// Create a scheduler whose timers run for `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
            next_handle: 0,
        }
    }

    /// Start a fresh timer for `id`, replacing any timer already running.
    pub fn arm(&mut self, id: TaskId, now: Instant) -> ExpiryHandle {
        let handle = ExpiryHandle(self.next_handle);
        self.next_handle += 1;

        let previous = self.pending.insert(
            id,
            PendingExpiry {
                handle,
                deadline: now + self.delay,
            },
        );
        if let Some(previous) = previous {
            tracing::debug!(task = %id, old = previous.handle.0, new = handle.0, "re-armed expiry");
        } else {
            tracing::debug!(task = %id, handle = handle.0, "armed expiry");
        }

        handle
    }

    /// Cancel the timer for `id`. Returns the cancelled handle, if any.
    pub fn disarm(&mut self, id: TaskId) -> Option<ExpiryHandle> {
        let cancelled = self.pending.remove(&id).map(|p| p.handle);
        if let Some(handle) = cancelled {
            tracing::debug!(task = %id, handle = handle.0, "disarmed expiry");
        }
        cancelled
    }

    pub fn is_armed(&self, id: TaskId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TaskId> {
        let mut due: Vec<(Instant, ExpiryHandle, TaskId)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(id, p)| (p.deadline, p.handle, *id))
            .collect();
        due.sort_by_key(|(deadline, handle, _)| (*deadline, handle.0));

        for (_, _, id) in &due {
            self.pending.remove(id);
        }

        due.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for ExpiryScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRY_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{Importance, TaskList};

    const D: Duration = DEFAULT_EXPIRY_DELAY;

    fn ids(n: usize) -> Vec<TaskId> {
        let mut list = TaskList::new();
        (0..n)
            .map(|i| list.push(&format!("task {i}"), Importance::Normal).unwrap())
            .collect()
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let id = ids(1)[0];
        let t0 = Instant::now();
        let mut scheduler = ExpiryScheduler::default();
        scheduler.arm(id, t0);

        assert!(scheduler.take_due(t0 + D - Duration::from_millis(1)).is_empty());
        assert_eq!(scheduler.take_due(t0 + D), vec![id]);
        assert!(scheduler.take_due(t0 + D * 2).is_empty());
        assert!(!scheduler.is_armed(id));
    }

    #[test]
    fn test_disarm_prevents_fire() {
        let id = ids(1)[0];
        let t0 = Instant::now();
        let mut scheduler = ExpiryScheduler::default();
        let handle = scheduler.arm(id, t0);

        assert_eq!(scheduler.disarm(id), Some(handle));
        assert_eq!(scheduler.disarm(id), None);
        assert!(scheduler.take_due(t0 + D * 10).is_empty());
    }

    #[test]
    fn test_rearm_replaces_timer() {
        let id = ids(1)[0];
        let t0 = Instant::now();
        let mut scheduler = ExpiryScheduler::default();
        let first = scheduler.arm(id, t0);
        let second = scheduler.arm(id, t0 + D / 2);

        assert_ne!(first, second);
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.take_due(t0 + D).is_empty());
        assert_eq!(scheduler.take_due(t0 + D / 2 + D), vec![id]);
    }

    #[test]
    fn test_due_order_is_earliest_first() {
        let all = ids(3);
        let t0 = Instant::now();
        let mut scheduler = ExpiryScheduler::new(Duration::from_millis(100));
        scheduler.arm(all[2], t0);
        scheduler.arm(all[0], t0 + Duration::from_millis(10));
        scheduler.arm(all[1], t0 + Duration::from_millis(20));

        assert_eq!(
            scheduler.next_deadline(),
            Some(t0 + Duration::from_millis(100))
        );
        assert_eq!(
            scheduler.take_due(t0 + Duration::from_secs(1)),
            vec![all[2], all[0], all[1]]
        );
        assert_eq!(scheduler.next_deadline(), None);
    }
}
