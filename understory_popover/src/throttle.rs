// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rate limiting for scroll and resize reactions.
//!
//! Reactions carry no payload of their own (they re-measure current truth
//! when they run), so a limiter only has to decide *when* a reaction runs:
//! either right away, or once at the end of the current interval.
//!
//! ## Minimal example
//!
//! ```
//! use understory_popover::{Admission, RateLimiter, Throttle};
//!
//! let mut t = Throttle::new(200);
//! assert_eq!(t.admit(0), Admission::Run);
//! assert_eq!(t.admit(50), Admission::Deferred(200));
//! assert_eq!(t.admit(120), Admission::Deferred(200));
//! assert!(!t.take_due(199));
//! assert!(t.take_due(200));
//! assert!(!t.take_due(200));
//! ```

/// Outcome of offering a trigger to a [`RateLimiter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Run the reaction now.
    Run,
    /// Run the reaction once at the given time; later triggers before then
    /// are folded into that run.
    Deferred(u64),
}

/// Enforces a minimum interval between runs of one reaction.
pub trait RateLimiter {
    /// Offers a trigger at `now`.
    fn admit(&mut self, now: u64) -> Admission;

    /// Returns `true` (once) if a deferred run is due at `now`.
    fn take_due(&mut self, now: u64) -> bool;

    /// Time of the pending deferred run, if any.
    fn deadline(&self) -> Option<u64>;

    /// Forgets all history and any pending run.
    fn reset(&mut self);
}

/// Leading and trailing edge throttle.
///
/// The first trigger in a quiet period runs immediately. Triggers arriving
/// within `interval_ms` of the last run are collapsed into a single trailing
/// run at the end of that interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Throttle {
    interval_ms: u64,
    last_run: Option<u64>,
    pending: bool,
}

impl Throttle {
    /// Creates a throttle with the given minimum interval.
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_run: None,
            pending: false,
        }
    }

    fn next_allowed(&self) -> Option<u64> {
        self.last_run.map(|t| t.saturating_add(self.interval_ms))
    }
}

impl RateLimiter for Throttle {
    fn admit(&mut self, now: u64) -> Admission {
        match self.next_allowed() {
            Some(at) if now < at => {
                self.pending = true;
                Admission::Deferred(at)
            }
            _ => {
                self.last_run = Some(now);
                self.pending = false;
                Admission::Run
            }
        }
    }

    fn take_due(&mut self, now: u64) -> bool {
        match self.deadline() {
            Some(at) if now >= at => {
                self.pending = false;
                self.last_run = Some(now);
                true
            }
            _ => false,
        }
    }

    fn deadline(&self) -> Option<u64> {
        if self.pending {
            self.next_allowed()
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.last_run = None;
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_triggers_run_immediately() {
        let mut t = Throttle::new(200);
        assert_eq!(t.admit(1_000), Admission::Run);
        assert_eq!(t.admit(1_200), Admission::Run);
        assert_eq!(t.admit(5_000), Admission::Run);
        assert_eq!(t.deadline(), None);
    }

    #[test]
    fn bursts_collapse_into_one_trailing_run() {
        let mut t = Throttle::new(200);
        assert_eq!(t.admit(0), Admission::Run);
        for now in [10, 20, 150, 199] {
            assert_eq!(t.admit(now), Admission::Deferred(200));
        }
        assert_eq!(t.deadline(), Some(200));
        assert!(t.take_due(210));
        assert_eq!(t.deadline(), None);
        // The trailing run starts a new interval.
        assert_eq!(t.admit(300), Admission::Deferred(410));
    }

    #[test]
    fn take_due_without_pending_is_false() {
        let mut t = Throttle::new(200);
        assert!(!t.take_due(0));
        t.admit(0);
        assert!(!t.take_due(1_000));
    }

    #[test]
    fn reset_drops_pending_run() {
        let mut t = Throttle::new(200);
        t.admit(0);
        t.admit(50);
        t.reset();
        assert_eq!(t.deadline(), None);
        assert_eq!(t.admit(60), Admission::Run);
    }
}
