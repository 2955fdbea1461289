use std::time::Duration;

use crate::clock::Timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Debug)]
struct Scheduled<T> {
    id: TaskId,
    due: Timestamp,
    task: T,
}

/// Deferred work owned by a component. The host arms a single timer for
/// [`TaskQueue::next_due`] and calls [`TaskQueue::drain_due`] when it fires;
/// dropping or clearing the queue is how pending work gets cancelled.
#[derive(Clone, Debug)]
pub struct TaskQueue<T> {
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, now: Timestamp, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: now.after(delay),
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        self.pending.len() != before
    }

    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|entry| !predicate(&entry.task));
        before - self.pending.len()
    }

    pub fn clear(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn next_due(&self) -> Option<Timestamp> {
        self.pending
            .iter()
            .map(|entry| entry.due)
            .reduce(|earliest, due| if due < earliest { due } else { earliest })
    }

    /// Removes and returns every task due at `now`, earliest first. Ties keep
    /// scheduling order.
    pub fn drain_due(&mut self, now: Timestamp) -> Vec<T> {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= now {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by(|a, b| {
            a.due
                .partial_cmp(&b.due)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.0.cmp(&b.id.0))
        });
        due.into_iter().map(|entry| entry.task).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
