// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small host-agnostic timer queue.
//!
//! The host owns the clock. It asks [`TimerQueue::next_deadline`] when to
//! wake up and then drains due timers with [`TimerQueue::pop_due`]. Timers
//! fire in deadline order; timers with the same deadline fire in the order
//! they were scheduled. A popover only ever has a handful of timers alive,
//! so they are kept inline in a [`SmallVec`].

use smallvec::SmallVec;

#[derive(Clone, Debug)]
struct Entry<K> {
    /// Schedule order, breaking ties between equal deadlines.
    seq: u64,
    deadline: u64,
    kind: K,
}

/// Deadline-ordered queue of timers carrying a `K` payload.
///
/// Timers are cancelled by payload with [`TimerQueue::cancel_where`].
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    entries: SmallVec<[Entry<K>; 8]>,
    next_seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_seq: 0,
        }
    }

    /// Schedules `kind` to fire at `deadline`.
    pub fn schedule(&mut self, deadline: u64, kind: K) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            seq,
            deadline,
            kind,
        });
    }

    /// Cancels every timer whose payload satisfies `f`.
    pub fn cancel_where(&mut self, mut f: impl FnMut(&K) -> bool) {
        self.entries.retain(|e| !f(&e.kind));
    }

    /// Cancels every timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes and returns the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<K> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.seq))
            .map(|(i, _)| i)?;
        Some(self.entries.remove(idx).kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn drain(q: &mut TimerQueue<&'static str>, now: u64) -> Vec<&'static str> {
        let mut out = Vec::new();
        while let Some(k) = q.pop_due(now) {
            out.push(k);
        }
        out
    }

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(30, "c");
        q.schedule(10, "a");
        q.schedule(10, "b");
        q.schedule(99, "late");
        assert_eq!(q.next_deadline(), Some(10));
        assert_eq!(drain(&mut q, 50), ["a", "b", "c"]);
        assert_eq!(q.next_deadline(), Some(99));
        assert_eq!(drain(&mut q, 99), ["late"]);
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn ties_keep_schedule_order_after_cancellation() {
        let mut q = TimerQueue::new();
        q.schedule(0, "a");
        q.schedule(0, "b");
        q.cancel_where(|k| *k == "a");
        q.schedule(0, "c");
        assert_eq!(drain(&mut q, 0), ["b", "c"]);
    }

    #[test]
    fn cancel_where_filters_by_payload() {
        let mut q = TimerQueue::new();
        q.schedule(0, "exit");
        q.schedule(0, "poll");
        q.schedule(5, "exit");
        q.cancel_where(|k| *k == "exit");
        assert_eq!(drain(&mut q, 10), ["poll"]);
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn nothing_due_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(100, "x");
        assert!(q.pop_due(99).is_none());
        q.clear();
        assert_eq!(q.next_deadline(), None);
    }
}
