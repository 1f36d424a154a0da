// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The platform boundary: everything the engine needs from its host.
//!
//! The engine never touches a real scene. It names the elements it cares
//! about by [`Element`] role and asks the host to measure them
//! ([`BoundsProvider`]), to start or stop delivering signals
//! ([`SubscriptionService`]), and to apply computed styles ([`StyleSink`]).
//! A host typically maps each role to one of its own node handles.

use kurbo::{Point, Rect, Size, Vec2};

use crate::geometry::{Flow, Order};

/// Elements the engine refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// The bounding frame: the viewport, or the configured parent element.
    Frame,
    /// The element the overlay is attached to.
    Target,
    /// The overlay's outer container (body plus tip).
    Overlay,
    /// The overlay's body, without the tip.
    Body,
}

bitflags::bitflags! {
    /// Signals the engine may ask the host to deliver.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Signals: u8 {
        /// The frame scrolled.
        const FRAME_SCROLL   = 0b0000_0001;
        /// The frame changed size.
        const FRAME_RESIZE   = 0b0000_0010;
        /// The overlay changed size.
        const OVERLAY_RESIZE = 0b0000_0100;
        /// The target changed size.
        const TARGET_RESIZE  = 0b0000_1000;
        /// A pointer went down anywhere.
        const POINTER_DOWN   = 0b0001_0000;
        /// A touch started anywhere.
        const TOUCH_START    = 0b0010_0000;
    }
}

impl Signals {
    /// Signals that drive re-measurement.
    pub const LAYOUT: Self = Self::FRAME_SCROLL
        .union(Self::FRAME_RESIZE)
        .union(Self::OVERLAY_RESIZE)
        .union(Self::TARGET_RESIZE);
    /// Signals that may indicate an outer action.
    pub const POINTER: Self = Self::POINTER_DOWN.union(Self::TOUCH_START);
}

/// Measures elements.
pub trait BoundsProvider {
    /// Bounds of `element`, in the same space for every element.
    ///
    /// For the viewport frame this is `(0, 0)` to its visible size.
    fn measure_bounds(&mut self, element: Element) -> Rect;

    /// Rendered size of `element`.
    fn measure_size(&mut self, element: Element) -> Size;

    /// Scroll offset of `element`'s content (only asked for [`Element::Frame`]).
    fn measure_scroll_offset(&mut self, element: Element) -> Vec2;

    /// Corner radius of `element` (only asked for [`Element::Body`]).
    fn measure_corner_radius(&mut self, element: Element) -> f64 {
        let _ = element;
        0.0
    }
}

/// Starts and stops signal delivery.
///
/// Requests are not reference counted: the engine never subscribes to a
/// signal it already holds.
pub trait SubscriptionService {
    /// Start delivering `signals`.
    fn subscribe(&mut self, signals: Signals);
    /// Stop delivering `signals`.
    fn unsubscribe(&mut self, signals: Signals);
}

/// Timing curve of a CSS-style transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Easing {
    /// First control point.
    pub p1: Point,
    /// Second control point.
    pub p2: Point,
}

impl Easing {
    /// Fast start, long soft landing: `cubic-bezier(0.230, 1.000, 0.320, 1.000)`.
    pub const EASE_OUT_QUINT: Self = Self {
        p1: Point::new(0.230, 1.000),
        p2: Point::new(0.320, 1.000),
    };
}

bitflags::bitflags! {
    /// Style properties a transition applies to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Animated: u8 {
        /// Vertical position.
        const TOP       = 0b0001;
        /// Horizontal position.
        const LEFT      = 0b0010;
        /// Opacity.
        const OPACITY   = 0b0100;
        /// Transform.
        const TRANSFORM = 0b1000;
    }
}

/// A style transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    /// Properties that animate.
    pub properties: Animated,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Timing curve.
    pub easing: Easing,
}

/// Transform, opacity and transition of the overlay container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Visual {
    /// Translation applied on top of the resolved position.
    pub translate: Vec2,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// Transition to apply, if it changes with this visual.
    pub transition: Option<Transition>,
}

/// Applies computed styles.
pub trait StyleSink {
    /// Lay out the overlay container along `flow`.
    fn apply_flow(&mut self, flow: Flow);
    /// Place the body before or after the tip.
    fn apply_order(&mut self, order: Order);
    /// Position `element` (the container or the body) at `origin`.
    fn apply_position(&mut self, element: Element, origin: Point);
    /// Size the container from a parent frame: `size.width` as its width and
    /// `size.height` as its top margin.
    fn apply_parent_frame(&mut self, size: Size);
    /// Apply transform, opacity and transition to the container.
    fn apply_visual(&mut self, visual: Visual);
    /// Show or hide the body.
    fn set_body_visible(&mut self, visible: bool);
}

/// Everything a popover needs from its host.
pub trait Host: BoundsProvider + SubscriptionService + StyleSink {}

impl<T: BoundsProvider + SubscriptionService + StyleSink + ?Sized> Host for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_groups_are_disjoint_and_complete() {
        assert!(Signals::LAYOUT.intersection(Signals::POINTER).is_empty());
        assert_eq!(Signals::LAYOUT | Signals::POINTER, Signals::all());
    }
}
