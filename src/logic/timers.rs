//! Fire-and-forget deadlines for the logic thread.
//!
//! Nothing is ever cancelled: an action whose target has already gone away
//! is simply a no-op when it fires.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    FadeKill(u64),
    RemoveKill(u64),
    FadeNotification(u64),
    RemoveNotification(u64),
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Deadline {
    at: Instant,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<(Deadline, ActionSlot)>>,
    next_seq: u64,
}

// Wrapper so the heap only orders on the deadline.
#[derive(Debug)]
struct ActionSlot(TimerAction);

impl PartialEq for ActionSlot {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}
impl Eq for ActionSlot {}
impl PartialOrd for ActionSlot {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for ActionSlot {
    fn cmp(&self, _: &Self) -> std::cmp::Ordering {
        std::cmp::Ordering::Equal
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Instant, action: TimerAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((Deadline { at, seq }, ActionSlot(action))));
    }

    /// Pops every action due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: Instant) -> Vec<TimerAction> {
        let mut due = Vec::new();
        while let Some(Reverse((deadline, _))) = self.heap.peek() {
            if deadline.at > now {
                break;
            }
            if let Some(Reverse((_, ActionSlot(action)))) = self.heap.pop() {
                due.push(action);
            }
        }
        due
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse((deadline, _))| deadline.at)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
