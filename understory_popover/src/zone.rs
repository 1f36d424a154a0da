// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zone picking: choose which side of the target the overlay docks on.
//!
//! The frame around a target is split into four candidate zones, one per
//! [`Direction`]. Each zone spans the whole frame along its cross axis and
//! reaches from the target's edge to the frame's edge along its main axis.
//! [`pick_zone`] ranks them greedily:
//!
//! 1. A forced [`ZonePrefs::place`] wins unconditionally.
//! 2. A [`ZonePrefs::prefer_place`] wins if a matching zone can hold the overlay.
//! 3. Otherwise the largest zone that can hold the overlay wins; if none can,
//!    the largest zone overall.
//!
//! Equal areas are broken by [`Direction::PRIORITY`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_popover::{Direction, Flow, ZonePrefs, pick_zone};
//!
//! let frame = Rect::new(0.0, 0.0, 1000.0, 800.0);
//! let target = Rect::new(100.0, 100.0, 150.0, 120.0);
//! let zone = pick_zone(ZonePrefs::default(), frame, target, Size::new(200.0, 80.0));
//! assert_eq!(zone.standing, Direction::Down);
//! assert_eq!(zone.flow, Flow::Column);
//! ```

use kurbo::{Rect, Size};

use crate::geometry::{Direction, Flow, Order};

/// A docking decision: side, axis orientation and ordering sign.
///
/// A `Zone` can only be built from a [`Direction`], so `flow` and `order`
/// always agree with `standing`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Zone {
    /// Side of the target the overlay docks on.
    pub standing: Direction,
    /// Axis orientation implied by `standing`.
    pub flow: Flow,
    /// Main-axis ordering implied by `standing`.
    pub order: Order,
}

impl Zone {
    /// Builds the zone for docking in `standing`.
    #[must_use]
    pub const fn new(standing: Direction) -> Self {
        Self {
            standing,
            flow: standing.flow(),
            order: standing.order(),
        }
    }
}

impl From<Direction> for Zone {
    fn from(standing: Direction) -> Self {
        Self::new(standing)
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::new(Direction::default())
    }
}

/// A placement request, used both for forcing and for preferring zones.
///
/// Besides a concrete side, a placement may name only an axis orientation
/// (any row or column zone) or only an order (any zone before or after the
/// target).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Exactly this side.
    Side(Direction),
    /// Any zone with this flow.
    Flow(Flow),
    /// Any zone with this order.
    Order(Order),
}

impl Placement {
    /// Returns `true` if `zone` satisfies this placement.
    #[must_use]
    pub fn matches(self, zone: Zone) -> bool {
        match self {
            Self::Side(d) => zone.standing == d,
            Self::Flow(f) => zone.flow == f,
            Self::Order(o) => zone.order == o,
        }
    }
}

impl From<Direction> for Placement {
    fn from(d: Direction) -> Self {
        Self::Side(d)
    }
}

/// Placement preferences consulted by [`pick_zone`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ZonePrefs {
    /// Preferred placement, honoured only when a matching zone fits the overlay.
    pub prefer_place: Option<Placement>,
    /// Forced placement, honoured regardless of fit.
    pub place: Option<Placement>,
}

/// The space available on one side of the target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoneCandidate {
    /// The zone this space belongs to.
    pub zone: Zone,
    /// Available width and height, never negative.
    pub available: Size,
}

impl ZoneCandidate {
    /// Available area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.available.width * self.available.height
    }

    /// Returns `true` if an overlay of `size` fits entirely in this zone.
    #[must_use]
    pub fn fits(&self, size: Size) -> bool {
        self.available.width >= size.width && self.available.height >= size.height
    }
}

/// Computes the four candidate zones around `target` inside `frame`,
/// in [`Direction::PRIORITY`] order.
#[must_use]
pub fn candidates(frame: Rect, target: Rect) -> [ZoneCandidate; 4] {
    Direction::PRIORITY.map(|standing| {
        let (w, h) = match standing {
            Direction::Up => (frame.width(), target.y0 - frame.y0),
            Direction::Down => (frame.width(), frame.y1 - target.y1),
            Direction::Left => (target.x0 - frame.x0, frame.height()),
            Direction::Right => (frame.x1 - target.x1, frame.height()),
        };
        ZoneCandidate {
            zone: Zone::new(standing),
            available: Size::new(w.max(0.0), h.max(0.0)),
        }
    })
}

/// Selects the zone the overlay should dock in.
///
/// `overlay` should already exclude any size contribution that depends on the
/// previous zone (see the tracking controller's tip compensation); this
/// function only looks at the numbers it is given.
#[must_use]
pub fn pick_zone(prefs: ZonePrefs, frame: Rect, target: Rect, overlay: Size) -> Zone {
    let all = candidates(frame, target);

    if let Some(place) = prefs.place {
        if let Placement::Side(d) = place {
            return Zone::new(d);
        }
        return best(all.iter().filter(|c| place.matches(c.zone)), overlay)
            .unwrap_or_default();
    }

    if let Some(prefer) = prefs.prefer_place {
        let preferred = best_fitting(
            all.iter().filter(|c| prefer.matches(c.zone)),
            overlay,
        );
        if let Some(zone) = preferred {
            return zone;
        }
    }

    best(all.iter(), overlay).unwrap_or_default()
}

/// Largest fitting candidate, falling back to the largest candidate.
fn best<'a>(
    candidates: impl Iterator<Item = &'a ZoneCandidate> + Clone,
    overlay: Size,
) -> Option<Zone> {
    best_fitting(candidates.clone(), overlay).or_else(|| largest(candidates))
}

fn best_fitting<'a>(
    candidates: impl Iterator<Item = &'a ZoneCandidate>,
    overlay: Size,
) -> Option<Zone> {
    largest(candidates.filter(|c| c.fits(overlay)))
}

/// Largest candidate; the first one wins on equal area.
fn largest<'a>(candidates: impl Iterator<Item = &'a ZoneCandidate>) -> Option<Zone> {
    let mut winner: Option<&ZoneCandidate> = None;
    for c in candidates {
        match winner {
            Some(w) if c.area() <= w.area() => {}
            _ => winner = Some(c),
        }
    }
    winner.map(|c| c.zone)
}
