// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/close state and enter/exit animation scheduling.
//!
//! [`AnimationMachine`] owns the render-affecting [`OverlayState`]. It does
//! not talk to the host itself; each transition yields an [`AnimationStep`]
//! telling the caller what to do (start tracking, apply a visual, stop
//! tracking), and timed transitions are kept in an internal timer queue
//! drained with [`AnimationMachine::advance`].
//!
//! ```text
//!            open()                  next paint
//!  Closed ──────────────▶ Opening ──────────────▶ Open
//!    ▲                                             │
//!    │ exit duration                               │ close()
//!    │                                             ▼
//!    └───────────────────────────────────────── Closing
//!                    open() while Closing: back to Open
//! ```
//!
//! ## Minimal example
//!
//! ```
//! use understory_popover::{AnimationMachine, AnimationStep, Phase};
//!
//! let mut m = AnimationMachine::new(false);
//! let before = m.state().toggle;
//! m.open();
//! assert_eq!(m.commit(before, 0, 500), Some(AnimationStep::Enter));
//! assert_eq!(m.phase(), Phase::Opening);
//! assert_eq!(m.advance(0), Some(AnimationStep::Entered));
//! assert_eq!(m.phase(), Phase::Open);
//! ```

use kurbo::Vec2;

use crate::geometry::Direction;
use crate::platform::{Animated, Easing, Transition, Visual};
use crate::timer::TimerQueue;
use crate::zone::Zone;

/// Distance the overlay travels while fading in or out.
pub const ENTER_EXIT_DISTANCE: f64 = 50.0;
/// Duration of the enter transition, in milliseconds.
pub const ENTER_TRANSITION_MS: u64 = 500;

/// Render-affecting state of an overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OverlayState {
    /// Whether the overlay is logically open.
    pub toggle: bool,
    /// Whether the overlay is fully gone (not rendered, not tracked).
    pub exited: bool,
    /// Whether an exit animation is in progress.
    pub exiting: bool,
    /// Side of the target the overlay currently docks on.
    pub standing: Direction,
}

/// Lifecycle phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not rendered.
    Closed,
    /// Tracking, waiting for the paint that starts the enter transition.
    Opening,
    /// Fully open.
    Open,
    /// Exit transition running.
    Closing,
}

/// Work requested by a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimationStep {
    /// Start tracking, then apply the entering visual.
    Enter,
    /// A pending exit was canceled: make sure tracking runs, then apply the
    /// entered visual.
    Resume,
    /// Apply the entered visual.
    Entered,
    /// An exit began; nothing to apply yet.
    Exit,
    /// Apply the exited visual.
    ExitVisual,
    /// The exit finished: stop tracking.
    Exited,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AnimationTimer {
    EnterPaint,
    ExitPaint,
    ExitDone,
}

/// Open/close state machine for one overlay.
#[derive(Clone, Debug)]
pub struct AnimationMachine {
    state: OverlayState,
    phase: Phase,
    timers: TimerQueue<AnimationTimer>,
    canceled_close: bool,
}

impl AnimationMachine {
    /// Creates a machine for an overlay that is initially open or closed.
    ///
    /// An initially open overlay is not entered until [`Self::mount`].
    #[must_use]
    pub fn new(is_open: bool) -> Self {
        Self {
            state: OverlayState {
                toggle: is_open,
                exited: !is_open,
                exiting: false,
                standing: Direction::Down,
            },
            phase: Phase::Closed,
            timers: TimerQueue::new(),
            canceled_close: false,
        }
    }

    /// Current overlay state.
    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Records the side chosen by the latest resolution pass.
    pub fn set_standing(&mut self, standing: Direction) {
        self.state.standing = standing;
    }

    /// Starts the enter animation for an overlay created open.
    pub fn mount(&mut self, now: u64) -> Option<AnimationStep> {
        (self.state.toggle && self.phase == Phase::Closed).then(|| self.begin_enter(now))
    }

    /// Requests opening. Cancels a running exit.
    ///
    /// Returns `true` if an exit was canceled.
    pub fn open(&mut self) -> bool {
        let canceled = self.state.exiting;
        if canceled {
            log::debug!("popover close canceled");
            self.timers
                .cancel_where(|t| matches!(t, AnimationTimer::ExitPaint | AnimationTimer::ExitDone));
            self.state.exiting = false;
            self.canceled_close = true;
        }
        self.state.toggle = true;
        self.state.exited = false;
        canceled
    }

    /// Requests closing.
    ///
    /// A canceled exit that was not yet committed is forgotten.
    pub fn close(&mut self) {
        self.state.toggle = false;
        self.canceled_close = false;
    }

    /// Applies the toggle change since `previous_toggle`, scheduling timed
    /// transitions relative to `now`.
    pub fn commit(
        &mut self,
        previous_toggle: bool,
        now: u64,
        exit_duration_ms: u64,
    ) -> Option<AnimationStep> {
        let resumed = core::mem::take(&mut self.canceled_close);
        match (previous_toggle, self.state.toggle) {
            (false, true) if resumed => {
                self.phase = Phase::Open;
                Some(AnimationStep::Resume)
            }
            (false, true) => Some(self.begin_enter(now)),
            (true, false) => {
                log::debug!("popover exiting");
                self.timers
                    .cancel_where(|t| matches!(t, AnimationTimer::EnterPaint));
                self.state.exiting = true;
                self.phase = Phase::Closing;
                self.timers.schedule(now, AnimationTimer::ExitPaint);
                self.timers
                    .schedule(now.saturating_add(exit_duration_ms), AnimationTimer::ExitDone);
                Some(AnimationStep::Exit)
            }
            _ => None,
        }
    }

    fn begin_enter(&mut self, now: u64) -> AnimationStep {
        log::debug!("popover entering");
        self.phase = Phase::Opening;
        self.timers.schedule(now, AnimationTimer::EnterPaint);
        AnimationStep::Enter
    }

    /// Earliest pending timed transition.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Fires at most one timed transition due at or before `now`.
    pub fn advance(&mut self, now: u64) -> Option<AnimationStep> {
        let timer = self.timers.pop_due(now)?;
        Some(match timer {
            AnimationTimer::EnterPaint => {
                self.phase = Phase::Open;
                AnimationStep::Entered
            }
            AnimationTimer::ExitPaint => AnimationStep::ExitVisual,
            AnimationTimer::ExitDone => {
                log::debug!("popover exited");
                self.state.exited = true;
                self.state.exiting = false;
                self.phase = Phase::Closed;
                AnimationStep::Exited
            }
        })
    }

    /// Cancels all timed transitions and settles in [`Phase::Closed`].
    ///
    /// A closing overlay is left exited, as if its exit had completed.
    pub fn cancel_all(&mut self) {
        self.timers.clear();
        self.canceled_close = false;
        self.state.exiting = false;
        self.state.exited = !self.state.toggle;
        self.phase = Phase::Closed;
    }
}

fn displaced(zone: Zone) -> Vec2 {
    zone.flow.axes().main.unit() * (zone.order.sign() * ENTER_EXIT_DISTANCE)
}

/// Starting visual of the enter animation: displaced away from the target
/// along the main axis and transparent.
#[must_use]
pub fn entering_visual(zone: Zone) -> Visual {
    Visual {
        translate: displaced(zone),
        opacity: 0.0,
        transition: None,
    }
}

/// Resting visual of an open overlay, with the enter transition.
#[must_use]
pub fn entered_visual() -> Visual {
    Visual {
        translate: Vec2::ZERO,
        opacity: 1.0,
        transition: Some(Transition {
            properties: Animated::all(),
            duration_ms: ENTER_TRANSITION_MS,
            easing: Easing::EASE_OUT_QUINT,
        }),
    }
}

/// Final visual of the exit animation.
#[must_use]
pub fn exited_visual(zone: Zone) -> Visual {
    Visual {
        translate: displaced(zone),
        opacity: 0.0,
        transition: None,
    }
}
