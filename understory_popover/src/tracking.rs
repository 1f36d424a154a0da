// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracking controller: keep a resolved position up to date while open.
//!
//! ## Usage
//!
//! 1) Call [`Tracker::activate`] when the overlay is shown. It subscribes to
//!    the layout and pointer [`Signals`], measures overlay size, frame bounds
//!    and target bounds (in that order) and runs one resolution pass.
//! 2) Forward each delivered layout signal to [`Tracker::on_signal`]. Every
//!    [`Reaction`] is rate limited on its own.
//! 3) Call [`Tracker::advance`] when [`Tracker::next_deadline`] passes, to
//!    run deferred reactions and the target drift poll.
//! 4) Call [`Tracker::deactivate`] when the overlay is gone. Deactivating an
//!    inactive tracker does nothing.
//!
//! ## Tip compensation
//!
//! The overlay's measured size includes its tip, and the tip lies along the
//! main axis of whatever zone was last applied. Re-docking into a zone with
//! the other flow moves the tip to the other dimension, which changes the
//! measured size, which triggers another pass that may flip back. To break
//! that loop, each pass hands the zone picker a size with the previous
//! zone's tip length removed. The full measured size is still used for the
//! final coordinates.

use kurbo::{Rect, Size};

use crate::config::{FrameMode, MIN_REACTION_INTERVAL_MS, PopoverConfig};
use crate::platform::{Element, Host, Signals};
use crate::position::{FrameSnapshot, Position, Spacing, resolve_position};
use crate::throttle::{Admission, RateLimiter, Throttle};
use crate::timer::TimerQueue;
use crate::zone::{Zone, pick_zone};

/// A rate-limited response to one layout signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reaction {
    /// The frame scrolled: re-measure the target, resolve only if it moved.
    FrameScroll,
    /// The frame resized: re-measure the frame and resolve.
    FrameResize,
    /// The overlay resized: re-measure the overlay and resolve.
    OverlayResize,
    /// The target resized: re-measure the target and resolve.
    TargetResize,
}

impl Reaction {
    /// All reactions, in limiter slot order.
    pub const ALL: [Self; 4] = [
        Self::FrameScroll,
        Self::FrameResize,
        Self::OverlayResize,
        Self::TargetResize,
    ];

    /// The signal that triggers this reaction.
    #[must_use]
    pub const fn signal(self) -> Signals {
        match self {
            Self::FrameScroll => Signals::FRAME_SCROLL,
            Self::FrameResize => Signals::FRAME_RESIZE,
            Self::OverlayResize => Signals::OVERLAY_RESIZE,
            Self::TargetResize => Signals::TARGET_RESIZE,
        }
    }

    /// The reaction triggered by a single layout signal.
    #[must_use]
    pub fn from_signal(signal: Signals) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.signal() == signal)
    }

    const fn slot(self) -> usize {
        match self {
            Self::FrameScroll => 0,
            Self::FrameResize => 1,
            Self::OverlayResize => 2,
            Self::TargetResize => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TrackingTimer {
    Poll,
    Trailing(Reaction),
}

/// Live measurement and re-resolution loop for one overlay.
#[derive(Debug)]
pub struct Tracker<L = Throttle> {
    active: bool,
    has_tracked: bool,
    limiters: [L; 4],
    timers: TimerQueue<TrackingTimer>,
    overlay_size: Size,
    frame: Rect,
    target: Option<Rect>,
    zone: Option<Zone>,
    position: Option<Position>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    /// Creates an inactive tracker throttling each reaction to
    /// [`MIN_REACTION_INTERVAL_MS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_limiters(|_| Throttle::new(MIN_REACTION_INTERVAL_MS))
    }
}

impl<L: RateLimiter> Tracker<L> {
    /// Creates an inactive tracker with one limiter per [`Reaction`].
    pub fn with_limiters(mut make: impl FnMut(Reaction) -> L) -> Self {
        Self {
            active: false,
            has_tracked: false,
            limiters: Reaction::ALL.map(&mut make),
            timers: TimerQueue::new(),
            overlay_size: Size::ZERO,
            frame: Rect::ZERO,
            target: None,
            zone: None,
            position: None,
        }
    }

    /// Returns `true` between activation and deactivation.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` once the tracker has ever been activated.
    #[must_use]
    pub fn has_tracked(&self) -> bool {
        self.has_tracked
    }

    /// The current zone, once a pass has run.
    #[must_use]
    pub fn zone(&self) -> Option<Zone> {
        self.zone
    }

    /// The most recently applied position.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Last measured target bounds.
    #[must_use]
    pub fn target_bounds(&self) -> Option<Rect> {
        self.target
    }

    /// Last measured frame bounds.
    #[must_use]
    pub fn frame_bounds(&self) -> Rect {
        self.frame
    }

    /// Last measured overlay size.
    #[must_use]
    pub fn overlay_size(&self) -> Size {
        self.overlay_size
    }

    /// Starts tracking and runs the first pass.
    ///
    /// If already active, only re-measures and re-resolves.
    pub fn activate(&mut self, now: u64, config: &PopoverConfig, host: &mut impl Host) -> Zone {
        if !self.active {
            log::debug!("popover tracking activated");
            self.active = true;
            self.has_tracked = true;
            host.subscribe(Signals::all());
            if config.frame == FrameMode::Parent {
                host.set_body_visible(true);
            }
            if let Some(interval) = config.poll_interval_ms() {
                self.timers.schedule(now.saturating_add(interval), TrackingTimer::Poll);
            }
        }
        self.overlay_size = host.measure_size(Element::Overlay);
        self.frame = host.measure_bounds(Element::Frame);
        self.measure_target(host);
        self.resolve(config, host)
    }

    /// Stops tracking: unsubscribes, cancels the poll and any deferred
    /// reaction. Does nothing if inactive.
    pub fn deactivate(&mut self, config: &PopoverConfig, host: &mut impl Host) {
        if !self.active {
            return;
        }
        log::debug!("popover tracking deactivated");
        self.active = false;
        self.timers.clear();
        for limiter in &mut self.limiters {
            limiter.reset();
        }
        host.unsubscribe(Signals::all());
        if config.frame == FrameMode::Parent {
            host.set_body_visible(false);
        }
    }

    /// Offers a layout signal. Returns the new zone if a pass ran.
    pub fn on_signal(
        &mut self,
        reaction: Reaction,
        now: u64,
        config: &PopoverConfig,
        host: &mut impl Host,
    ) -> Option<Zone> {
        if !self.active {
            return None;
        }
        match self.limiters[reaction.slot()].admit(now) {
            Admission::Run => self.react(reaction, config, host),
            Admission::Deferred(at) => {
                let kind = TrackingTimer::Trailing(reaction);
                self.timers.cancel_where(|k| *k == kind);
                self.timers.schedule(at, kind);
                log::trace!("{reaction:?} deferred to {at}");
                None
            }
        }
    }

    /// Earliest time [`Tracker::advance`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Runs due deferred reactions and drift polls. Returns the latest new
    /// zone if any pass ran.
    pub fn advance(&mut self, now: u64, config: &PopoverConfig, host: &mut impl Host) -> Option<Zone> {
        let mut zone = None;
        while let Some(timer) = self.timers.pop_due(now) {
            let resolved = match timer {
                TrackingTimer::Trailing(reaction) => {
                    if self.limiters[reaction.slot()].take_due(now) {
                        self.react(reaction, config, host)
                    } else {
                        None
                    }
                }
                TrackingTimer::Poll => {
                    if let Some(interval) = config.poll_interval_ms() {
                        self.timers.schedule(now.saturating_add(interval), TrackingTimer::Poll);
                    }
                    self.check_target_reposition(config, host)
                }
            };
            zone = resolved.or(zone);
        }
        zone
    }

    /// Re-measures the target and resolves only if it moved.
    pub fn check_target_reposition(
        &mut self,
        config: &PopoverConfig,
        host: &mut impl Host,
    ) -> Option<Zone> {
        if !self.active {
            return None;
        }
        if self.measure_target(host) {
            Some(self.resolve(config, host))
        } else {
            None
        }
    }

    fn react(&mut self, reaction: Reaction, config: &PopoverConfig, host: &mut impl Host) -> Option<Zone> {
        log::trace!("running {reaction:?}");
        match reaction {
            Reaction::FrameScroll => return self.check_target_reposition(config, host),
            Reaction::FrameResize => self.frame = host.measure_bounds(Element::Frame),
            Reaction::OverlayResize => self.overlay_size = host.measure_size(Element::Overlay),
            Reaction::TargetResize => {
                self.measure_target(host);
            }
        }
        Some(self.resolve(config, host))
    }

    /// Measures the target; returns `true` if its bounds changed.
    fn measure_target(&mut self, host: &mut impl Host) -> bool {
        let bounds = host.measure_bounds(Element::Target);
        if self.target == Some(bounds) {
            return false;
        }
        self.target = Some(bounds);
        true
    }

    /// Runs one pass: pick a zone, resolve it and apply it.
    pub fn resolve(&mut self, config: &PopoverConfig, host: &mut impl Host) -> Zone {
        let target = self.target.unwrap_or(Rect::ZERO);

        let mut picking_size = self.overlay_size;
        if let Some(previous) = self.zone {
            let tip_axis = previous.flow.axes().main;
            let without_tip = (tip_axis.length(picking_size) - config.tip_size).max(0.0);
            picking_size = tip_axis.with_length(picking_size, without_tip);
        }
        let zone = pick_zone(config.zone_prefs(), self.frame, target, picking_size);

        let frame = FrameSnapshot {
            bounds: self.frame,
            scroll: host.measure_scroll_offset(Element::Frame),
        };
        let spacing = Spacing {
            tip_size: config.tip_size,
            offset: config.offset,
            corner_radius: host.measure_corner_radius(Element::Body),
        };
        let position = resolve_position(zone, target, self.overlay_size, &frame, spacing);

        if self.zone != Some(zone) {
            log::debug!("popover docking {:?}", zone.standing);
        }
        self.zone = Some(zone);
        self.position = Some(position);

        host.apply_flow(zone.flow);
        host.apply_order(zone.order);
        match config.frame {
            FrameMode::Viewport => host.apply_position(Element::Overlay, position.origin),
            FrameMode::Parent => {
                host.apply_position(Element::Body, position.origin - self.frame.origin().to_vec2());
                host.apply_parent_frame(self.frame.size());
            }
        }
        zone
    }
}
