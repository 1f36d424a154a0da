// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popover instance: tracking and animation wired to a host.

use crate::animation::{
    AnimationMachine, AnimationStep, OverlayState, Phase, entered_visual, entering_visual,
    exited_visual,
};
use crate::config::{ConfigError, MIN_REACTION_INTERVAL_MS, PopoverConfig};
use crate::outer::{Containment, OuterActionDetector, PointerKind};
use crate::platform::{Host, Signals};
use crate::position::Position;
use crate::throttle::{RateLimiter, Throttle};
use crate::tracking::{Reaction, Tracker};
use crate::zone::Zone;

/// One overlay docked to one target inside one frame.
///
/// The host drives a `Popover` entirely from the outside:
///
/// - [`Popover::mount`] once the elements exist, [`Popover::unmount`] before
///   they go away.
/// - [`Popover::set_open`] whenever the desired open state may have changed.
/// - [`Popover::handle_signal`] for each subscribed layout signal, and
///   [`Popover::handle_pointer`] for pointer-down and touch-start input.
/// - [`Popover::advance`] once the clock reaches [`Popover::next_deadline`].
///
/// Times are milliseconds on any monotonic clock the host chooses.
#[derive(Debug)]
pub struct Popover<L = Throttle> {
    config: PopoverConfig,
    is_open: bool,
    animation: AnimationMachine,
    tracker: Tracker<L>,
    outer: OuterActionDetector,
}

impl Popover {
    /// Creates a popover throttling layout reactions to
    /// [`MIN_REACTION_INTERVAL_MS`].
    pub fn new(config: PopoverConfig) -> Result<Self, ConfigError> {
        Self::with_rate_limiters(config, |_| Throttle::new(MIN_REACTION_INTERVAL_MS))
    }
}

impl<L: RateLimiter> Popover<L> {
    /// Creates a popover with a custom rate limiter per [`Reaction`].
    pub fn with_rate_limiters(
        config: PopoverConfig,
        make: impl FnMut(Reaction) -> L,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            is_open: config.is_open,
            animation: AnimationMachine::new(config.is_open),
            tracker: Tracker::with_limiters(make),
            outer: OuterActionDetector::default(),
            config,
        })
    }

    /// Sets the callback run for each pointer-down or touch-start outside
    /// both the overlay and the target while the overlay is tracked.
    pub fn on_outer_action(&mut self, callback: impl FnMut(PointerKind) + 'static) {
        self.outer.set_callback(callback);
    }

    /// The configuration this popover was built with.
    #[must_use]
    pub fn config(&self) -> &PopoverConfig {
        &self.config
    }

    /// Render-affecting state.
    #[must_use]
    pub fn state(&self) -> OverlayState {
        self.animation.state()
    }

    /// Lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.animation.phase()
    }

    /// Whether the overlay should be rendered at all.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        !self.animation.state().exited
    }

    /// Whether layout tracking is running.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracker.is_active()
    }

    /// The current zone, once a layout pass has run.
    #[must_use]
    pub fn zone(&self) -> Option<Zone> {
        self.tracker.zone()
    }

    /// The most recently applied position.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.tracker.position()
    }

    /// Enters immediately if configured open.
    pub fn mount(&mut self, now: u64, host: &mut impl Host) {
        if let Some(step) = self.animation.mount(now) {
            self.perform(step, now, host);
        }
    }

    /// Updates the desired open state.
    pub fn set_open(&mut self, is_open: bool, now: u64, host: &mut impl Host) {
        let will_open = !self.is_open && is_open;
        let will_close = self.is_open && !is_open;
        self.is_open = is_open;
        if will_open {
            self.open(now, host);
        } else if will_close {
            self.close(now, host);
        }
    }

    /// Opens the overlay, canceling a running exit.
    pub fn open(&mut self, now: u64, host: &mut impl Host) {
        let before = self.animation.state().toggle;
        self.animation.open();
        self.commit(before, now, host);
    }

    /// Closes the overlay.
    pub fn close(&mut self, now: u64, host: &mut impl Host) {
        let before = self.animation.state().toggle;
        self.animation.close();
        self.commit(before, now, host);
    }

    fn commit(&mut self, before: bool, now: u64, host: &mut impl Host) {
        let step = self.animation.commit(
            before,
            now,
            self.config.enter_exit_transition_duration_ms,
        );
        if let Some(step) = step {
            self.perform(step, now, host);
        }
    }

    fn perform(&mut self, step: AnimationStep, now: u64, host: &mut impl Host) {
        match step {
            AnimationStep::Enter | AnimationStep::Resume => {
                let zone = self.tracker.activate(now, &self.config, host);
                self.animation.set_standing(zone.standing);
                self.outer.set_armed(true);
                if step == AnimationStep::Enter {
                    host.apply_visual(entering_visual(zone));
                } else {
                    host.apply_visual(entered_visual());
                }
            }
            AnimationStep::Entered => host.apply_visual(entered_visual()),
            AnimationStep::Exit => {}
            AnimationStep::ExitVisual => {
                if let Some(zone) = self.tracker.zone() {
                    host.apply_visual(exited_visual(zone));
                }
            }
            AnimationStep::Exited => {
                self.outer.set_armed(false);
                self.tracker.deactivate(&self.config, host);
            }
        }
    }

    /// Handles delivered layout signals. Several flags may be set at once.
    pub fn handle_signal(&mut self, signals: Signals, now: u64, host: &mut impl Host) {
        for signal in signals.iter() {
            let Some(reaction) = Reaction::from_signal(signal) else {
                continue;
            };
            if let Some(zone) = self.tracker.on_signal(reaction, now, &self.config, host) {
                self.animation.set_standing(zone.standing);
            }
        }
    }

    /// Handles pointer-down or touch-start input originating at `origin`.
    ///
    /// Returns `true` if it was an outer action and the callback ran.
    pub fn handle_pointer<N: ?Sized>(
        &mut self,
        kind: PointerKind,
        origin: &N,
        containment: &impl Containment<N>,
    ) -> bool {
        self.outer.check(kind, origin, containment)
    }

    /// Earliest time [`Popover::advance`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.tracker.next_deadline(), self.animation.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Runs everything due at or before `now`.
    pub fn advance(&mut self, now: u64, host: &mut impl Host) {
        loop {
            // Tracking work scheduled before the next animation step runs first.
            let animation_due = self.animation.next_deadline().filter(|&at| at <= now);
            let clock = animation_due.unwrap_or(now);
            if let Some(zone) = self.tracker.advance(clock, &self.config, host) {
                self.animation.set_standing(zone.standing);
            }
            let Some(at) = animation_due else {
                break;
            };
            if let Some(step) = self.animation.advance(at) {
                self.perform(step, at, host);
            }
        }
    }

    /// Cancels all pending work and stops tracking if it ever started.
    pub fn unmount(&mut self, host: &mut impl Host) {
        self.animation.cancel_all();
        self.outer.set_armed(false);
        if self.tracker.has_tracked() {
            self.tracker.deactivate(&self.config, host);
        }
    }
}
