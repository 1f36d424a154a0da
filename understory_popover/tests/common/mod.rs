// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared host for popover integration tests.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test file uses every helper."
)]

use kurbo::{Point, Rect, Size, Vec2};
use understory_popover::{
    BoundsProvider, Containment, Element, Flow, Order, Signals, StyleSink, SubscriptionService,
    Visual,
};

/// One call the engine made into the host.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Subscribe(Signals),
    Unsubscribe(Signals),
    Flow(Flow),
    Order(Order),
    Position(Element, Point),
    ParentFrame(Size),
    Visual(Visual),
    BodyVisible(bool),
}

/// A scene with one frame, one target and one overlay, recording every
/// style write.
#[derive(Debug)]
pub(crate) struct RecordingHost {
    pub(crate) frame: Rect,
    pub(crate) target: Rect,
    pub(crate) overlay: Size,
    pub(crate) scroll: Vec2,
    pub(crate) corner_radius: f64,
    pub(crate) subscribed: Signals,
    pub(crate) calls: Vec<Call>,
}

impl RecordingHost {
    pub(crate) fn new(frame: Rect, target: Rect, overlay: Size) -> Self {
        Self {
            frame,
            target,
            overlay,
            scroll: Vec2::ZERO,
            corner_radius: 0.0,
            subscribed: Signals::empty(),
            calls: Vec::new(),
        }
    }

    /// 1000x800 viewport, 50x20 target at (100, 100), 200x80 overlay.
    pub(crate) fn viewport() -> Self {
        Self::new(
            Rect::new(0.0, 0.0, 1000.0, 800.0),
            Rect::new(100.0, 100.0, 150.0, 120.0),
            Size::new(200.0, 80.0),
        )
    }

    /// Number of resolution passes applied so far.
    pub(crate) fn passes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Flow(_)))
            .count()
    }

    pub(crate) fn last_position(&self, element: Element) -> Option<Point> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Position(e, p) if *e == element => Some(*p),
            _ => None,
        })
    }

    pub(crate) fn last_visual(&self) -> Option<Visual> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Visual(v) => Some(*v),
            _ => None,
        })
    }

    pub(crate) fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|&c| f(c)).count()
    }
}

impl BoundsProvider for RecordingHost {
    fn measure_bounds(&mut self, element: Element) -> Rect {
        match element {
            Element::Frame => self.frame,
            Element::Target => self.target,
            Element::Overlay | Element::Body => {
                let origin = self
                    .last_position(Element::Overlay)
                    .unwrap_or(Point::ZERO);
                Rect::from_origin_size(origin, self.overlay)
            }
        }
    }

    fn measure_size(&mut self, _: Element) -> Size {
        self.overlay
    }

    fn measure_scroll_offset(&mut self, _: Element) -> Vec2 {
        self.scroll
    }

    fn measure_corner_radius(&mut self, _: Element) -> f64 {
        self.corner_radius
    }
}

impl SubscriptionService for RecordingHost {
    fn subscribe(&mut self, signals: Signals) {
        self.subscribed |= signals;
        self.calls.push(Call::Subscribe(signals));
    }

    fn unsubscribe(&mut self, signals: Signals) {
        self.subscribed -= signals;
        self.calls.push(Call::Unsubscribe(signals));
    }
}

impl StyleSink for RecordingHost {
    fn apply_flow(&mut self, flow: Flow) {
        self.calls.push(Call::Flow(flow));
    }

    fn apply_order(&mut self, order: Order) {
        self.calls.push(Call::Order(order));
    }

    fn apply_position(&mut self, element: Element, origin: Point) {
        self.calls.push(Call::Position(element, origin));
    }

    fn apply_parent_frame(&mut self, size: Size) {
        self.calls.push(Call::ParentFrame(size));
    }

    fn apply_visual(&mut self, visual: Visual) {
        self.calls.push(Call::Visual(visual));
    }

    fn set_body_visible(&mut self, visible: bool) {
        self.calls.push(Call::BodyVisible(visible));
    }
}

/// Where a pointer event originated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Node {
    InOverlay,
    InTarget,
    Elsewhere,
}

/// Containment for [`Node`].
#[derive(Debug)]
pub(crate) struct Tree;

impl Containment<Node> for Tree {
    fn contains(&self, root: Element, node: &Node) -> bool {
        matches!(
            (root, node),
            (Element::Overlay, Node::InOverlay) | (Element::Target, Node::InTarget)
        )
    }
}
