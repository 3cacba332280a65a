#![forbid(unsafe_code)]

//! Fixed-delay deferred tasks, driven by the host's clock.
//!
//! # Invariants
//!
//! 1. Task ids are strictly increasing; `0` is reserved for "no task".
//! 2. A task is returned by [`Scheduler::poll_due`] at most once, and never
//!    before its deadline.
//! 3. A cancelled task is dropped without being returned.
//! 4. Due tasks are returned in deadline order, ties broken by id.

use core::time::Duration;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::clock::millis;

/// Identifier of a scheduled task. `0` is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TaskId(u64);

impl TaskId {
    /// The reserved "no task" id.
    pub const NONE: Self = Self(0);

    /// Build an id from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether this is the reserved id.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Shared cancellation flag for one task.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the task.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether the task was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Handle returned when a task is scheduled.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub id: TaskId,
    /// Monotonic deadline.
    pub due: Duration,
    pub token: CancelToken,
}

#[derive(Debug)]
struct Entry<T> {
    id: TaskId,
    due: Duration,
    token: CancelToken,
    payload: T,
}

/// A queue of deferred payloads.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// An empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Schedule `payload` to become due `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> ScheduledTask {
        self.next_id += 1;
        let task = ScheduledTask {
            id: TaskId(self.next_id),
            due: now.saturating_add(delay),
            token: CancelToken::new(),
        };
        self.entries.push(Entry {
            id: task.id,
            due: task.due,
            token: task.token.clone(),
            payload,
        });
        tracing::trace!(task = %task.id, due_ms = millis(task.due), "task scheduled");
        task
    }

    /// Remove and return every task due at `now`, skipping cancelled ones.
    pub fn poll_due(&mut self, now: Duration) -> Vec<(TaskId, Duration, T)> {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.due <= now);
        self.entries = pending;
        let mut fired: Vec<_> = due
            .into_iter()
            .filter(|e| {
                let cancelled = e.token.is_cancelled();
                if cancelled {
                    tracing::trace!(task = %e.id, "cancelled task dropped");
                }
                !cancelled
            })
            .map(|e| (e.id, e.due, e.payload))
            .collect();
        fired.sort_by_key(|&(id, due, _)| (due, id));
        fired
    }

    /// Number of tasks not yet returned (cancelled ones included).
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.entries.len()
    }

    /// Earliest deadline among uncancelled pending tasks.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.entries
            .iter()
            .filter(|e| !e.token.is_cancelled())
            .map(|e| e.due)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn task_id_none_is_zero() {
        assert!(TaskId::NONE.is_none());
        assert_eq!(TaskId::default(), TaskId::NONE);
        assert_eq!(TaskId::from_raw(7).raw(), 7);
        assert_eq!(TaskId::from_raw(3).to_string(), "task#3");
    }

    #[test]
    fn ids_are_monotonic_and_nonzero() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule(ms(0), ms(10), ());
        let b = scheduler.schedule(ms(0), ms(10), ());
        assert!(!a.id.is_none());
        assert!(b.id > a.id);
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(100), ms(500), "submit");
        assert!(scheduler.poll_due(ms(599)).is_empty());
        assert_eq!(scheduler.pending_len(), 1);
        assert_eq!(scheduler.next_due(), Some(ms(600)));
    }

    #[test]
    fn fires_once_at_deadline() {
        let mut scheduler = Scheduler::new();
        let task = scheduler.schedule(ms(0), ms(500), "submit");
        let fired = scheduler.poll_due(ms(500));
        assert_eq!(fired, vec![(task.id, ms(500), "submit")]);
        assert!(scheduler.poll_due(ms(10_000)).is_empty());
        assert_eq!(scheduler.pending_len(), 0);
    }

    #[test]
    fn due_tasks_come_out_in_deadline_then_id_order() {
        let mut scheduler = Scheduler::new();
        let late = scheduler.schedule(ms(0), ms(300), 'c');
        let tie_a = scheduler.schedule(ms(0), ms(100), 'a');
        let tie_b = scheduler.schedule(ms(50), ms(50), 'b');
        let order: Vec<_> = scheduler
            .poll_due(ms(1_000))
            .into_iter()
            .map(|(id, _, p)| (id, p))
            .collect();
        assert_eq!(order, vec![(tie_a.id, 'a'), (tie_b.id, 'b'), (late.id, 'c')]);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut scheduler = Scheduler::new();
        let task = scheduler.schedule(ms(0), ms(10), 1);
        let keep = scheduler.schedule(ms(0), ms(20), 2);
        task.token.clone().cancel();
        assert!(task.token.is_cancelled());
        assert_eq!(scheduler.next_due(), Some(ms(20)));
        let fired = scheduler.poll_due(ms(100));
        assert_eq!(fired, vec![(keep.id, ms(20), 2)]);
    }
}
