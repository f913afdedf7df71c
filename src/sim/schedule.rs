//! Deferred one-shot transitions
//!
//! A strike's follow-up (recovery, next combo swing) happens a fixed wall-clock
//! delay after the strike, not after a number of frames. Commands sit in a
//! timer queue keyed by absolute timestamp and name their entity by id; the
//! step drains whatever is due before doing anything else.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A state change waiting for its moment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Player's slash ends, recovery begins
    PlayerRecover { id: u32 },
    /// Enemy's last swing ends, back to stalking
    EnemyRecover { id: u32 },
    /// Elite re-aims and winds up its next swing
    EnemyCombo { id: u32 },
}

impl Deferred {
    pub fn entity_id(&self) -> u32 {
        match *self {
            Deferred::PlayerRecover { id }
            | Deferred::EnemyRecover { id }
            | Deferred::EnemyCombo { id } => id,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    due_ms: f64,
    seq: u64,
    command: Deferred,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties on the deadline fire in scheduling order
        self.due_ms
            .total_cmp(&other.due_ms)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Timer queue ordered by deadline, then by insertion
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl Scheduler {
    /// Queue `command` to fire once `now >= due_ms`
    pub fn schedule(&mut self, due_ms: f64, command: Deferred) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Entry {
            due_ms,
            seq,
            command,
        }));
    }

    /// Pop the earliest command that is due at `now_ms`
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Deferred> {
        let due = self
            .queue
            .peek()
            .is_some_and(|Reverse(entry)| entry.due_ms <= now_ms);
        if due {
            self.queue.pop().map(|Reverse(entry)| entry.command)
        } else {
            None
        }
    }

    /// Deadline of the next command, if any
    pub fn next_due(&self) -> Option<f64> {
        self.queue.peek().map(|Reverse(entry)| entry.due_ms)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
