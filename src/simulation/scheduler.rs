// src/simulation/scheduler.rs

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Index of a process inside a running simulation.
pub type ProcessId = usize;

/// A process waiting to be resumed at a point in logical time.
#[derive(Debug, Clone, Copy)]
struct Resumption {
    time: f64,
    // Breaks ties so same-instant resumptions run in scheduling order.
    seq: u64,
    process: ProcessId,
}

impl PartialEq for Resumption {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Resumption {}

impl PartialOrd for Resumption {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Resumption {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap and we want the earliest first.
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Logical clock plus the time-ordered set of pending resumptions.
///
/// The scheduler never runs processes itself; the engine pops the next
/// resumption, resumes the process and feeds the resulting suspension back in.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: f64,
    next_seq: u64,
    pending: BinaryHeap<Resumption>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Resume `process` after `duration` units of logical time.
    pub fn timeout(&mut self, process: ProcessId, duration: f64) {
        let time = self.now + duration;
        self.push(process, time);
    }

    /// Resume `process` at the current instant, after anything already
    /// scheduled for this instant.
    pub fn wake(&mut self, process: ProcessId) {
        self.push(process, self.now);
    }

    /// Pops the earliest resumption strictly before `horizon` and advances the
    /// clock to it. Returns `None` once nothing remains before the horizon.
    pub fn next_before(&mut self, horizon: f64) -> Option<ProcessId> {
        match self.pending.peek() {
            Some(next) if next.time < horizon => {}
            _ => return None,
        }

        let next = self.pending.pop()?;
        self.now = next.time;
        Some(next.process)
    }

    /// Moves the clock to the horizon and drops every pending resumption.
    pub fn finish_at(&mut self, horizon: f64) {
        self.now = horizon;
        self.pending.clear();
    }

    /// Number of resumptions still waiting.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn push(&mut self, process: ProcessId, time: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Resumption { time, seq, process });
    }
}
