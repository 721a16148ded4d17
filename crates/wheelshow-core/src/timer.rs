//! Virtual-time task set.
//!
//! Timed components never sleep. They schedule tasks at absolute
//! millisecond deadlines and an outer loop fires whichever task is due
//! first. A cancelled task is removed from the set, so it can never fire
//! late; callers that hold a [`TimerId`] can ask whether it is still
//! pending before acting on it.

use std::collections::{BTreeMap, HashMap};

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A task that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    /// The handle the task was scheduled under.
    pub id: TimerId,
    /// The deadline the task was scheduled for.
    pub due_ms: u64,
    /// The task payload.
    pub task: T,
}

/// Pending tasks ordered by deadline, then by scheduling order.
#[derive(Debug)]
pub struct Timers<T> {
    next_id: u64,
    queue: BTreeMap<(u64, TimerId), T>,
    deadlines: HashMap<TimerId, u64>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    /// Creates an empty task set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Schedules `task` to fire at `due_ms`.
    pub fn schedule_at(&mut self, due_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.insert((due_ms, id), task);
        self.deadlines.insert(id, due_ms);
        id
    }

    /// Cancels a pending task. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(due_ms) => self.queue.remove(&(due_ms, id)).is_some(),
            None => false,
        }
    }

    /// Cancels every pending task and returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.deadlines.clear();
        dropped
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due_ms, _)| *due_ms)
    }

    /// Removes and returns the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired<T>> {
        let (&(due_ms, id), _) = self.queue.first_key_value()?;
        if due_ms > now_ms {
            return None;
        }
        let task = self.queue.remove(&(due_ms, id))?;
        self.deadlines.remove(&id);
        Some(Fired { id, due_ms, task })
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` when nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
