// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_popover --heading-base-level=0

//! Understory Popover: headless placement and lifecycle for anchored overlays.
//!
//! A popover is an overlay (tooltip, dropdown, hint bubble) docked to a
//! target element inside a bounding frame. The overlay is a body plus a
//! small tip pointing at the target. This crate decides where it goes and
//! keeps it there:
//!
//! - **Zone picking** ([`pick_zone`]): choose the side of the target
//!   (above, below, left or right) with the most room, honoring forced and
//!   preferred [`Placement`]s.
//! - **Position resolution** ([`resolve_position`]): turn a [`Zone`] into
//!   coordinates, sliding the overlay along the target edge to stay inside
//!   the frame while the tip still reaches the target.
//! - **Tracking** ([`Tracker`]): re-measure and re-resolve on scroll and
//!   resize signals (each one rate limited) and poll for target drift.
//! - **Animation** ([`AnimationMachine`]): open/close state with enter and
//!   exit transitions, including cancelling an exit by reopening.
//! - **Outer actions** ([`OuterActionDetector`]): report pointer or touch
//!   input outside both the overlay and the target.
//!
//! [`Popover`] wires all of these together for one overlay.
//!
//! It does **not** own a scene, an event loop or a clock. The host
//! implements [`BoundsProvider`], [`SubscriptionService`] and [`StyleSink`]
//! (together, [`Host`]), forwards signals, and calls [`Popover::advance`]
//! when [`Popover::next_deadline`] passes. Times are plain `u64`
//! milliseconds.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_popover::{
//!     BoundsProvider, Direction, Element, Flow, Order, Popover, PopoverConfig, Signals,
//!     StyleSink, SubscriptionService, Visual,
//! };
//!
//! #[derive(Default)]
//! struct Page {
//!     origin: Option<Point>,
//! }
//!
//! impl BoundsProvider for Page {
//!     fn measure_bounds(&mut self, element: Element) -> Rect {
//!         match element {
//!             Element::Frame => Rect::new(0.0, 0.0, 1000.0, 800.0),
//!             _ => Rect::new(450.0, 100.0, 550.0, 130.0),
//!         }
//!     }
//!     fn measure_size(&mut self, _: Element) -> Size {
//!         Size::new(200.0, 80.0)
//!     }
//!     fn measure_scroll_offset(&mut self, _: Element) -> Vec2 {
//!         Vec2::ZERO
//!     }
//! }
//!
//! impl SubscriptionService for Page {
//!     fn subscribe(&mut self, _: Signals) {}
//!     fn unsubscribe(&mut self, _: Signals) {}
//! }
//!
//! impl StyleSink for Page {
//!     fn apply_flow(&mut self, _: Flow) {}
//!     fn apply_order(&mut self, _: Order) {}
//!     fn apply_position(&mut self, _: Element, origin: Point) {
//!         self.origin = Some(origin);
//!     }
//!     fn apply_parent_frame(&mut self, _: Size) {}
//!     fn apply_visual(&mut self, _: Visual) {}
//!     fn set_body_visible(&mut self, _: bool) {}
//! }
//!
//! let mut page = Page::default();
//! let mut popover = Popover::new(PopoverConfig::default()).unwrap();
//! popover.mount(0, &mut page);
//! popover.set_open(true, 0, &mut page);
//! popover.advance(0, &mut page);
//!
//! // Plenty of room below the target.
//! assert_eq!(popover.zone().unwrap().standing, Direction::Down);
//! assert_eq!(page.origin, Some(Point::new(400.0, 134.0)));
//! ```
//!
//! ## Frames
//!
//! With [`FrameMode::Viewport`] the overlay container is positioned in the
//! frame's space. With [`FrameMode::Parent`] the body is positioned relative
//! to the parent's box, the container adopts the parent's size through
//! [`StyleSink::apply_parent_frame`], and the body is hidden whenever
//! tracking stops.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` float math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`PopoverConfig`] and
//!   the placement types.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animation;
mod config;
mod geometry;
mod outer;
mod platform;
mod popover;
mod position;
mod throttle;
mod timer;
mod tracking;
mod zone;

pub use animation::{
    AnimationMachine, AnimationStep, ENTER_EXIT_DISTANCE, ENTER_TRANSITION_MS, OverlayState,
    Phase, entered_visual, entering_visual, exited_visual,
};
pub use config::{
    ConfigError, DEFAULT_ENTER_EXIT_TRANSITION_DURATION_MS, DEFAULT_OFFSET,
    DEFAULT_REFRESH_INTERVAL_MS, DEFAULT_TIP_SIZE, FrameMode, MIN_REACTION_INTERVAL_MS,
    PopoverConfig,
};
pub use geometry::{Axis, AxisMap, Direction, Flow, Order};
pub use outer::{Containment, OuterActionDetector, PointerKind, is_outer_action};
pub use platform::{
    Animated, BoundsProvider, Easing, Element, Host, Signals, StyleSink, SubscriptionService,
    Transition, Visual,
};
pub use popover::Popover;
pub use position::{CrossClamp, FrameSnapshot, Position, Spacing, resolve_position};
pub use throttle::{Admission, RateLimiter, Throttle};
pub use timer::TimerQueue;
pub use tracking::{Reaction, Tracker};
pub use zone::{Placement, Zone, ZoneCandidate, ZonePrefs, candidates, pick_zone};
