// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position resolution: turn a [`Zone`] into frame-clamped coordinates.
//!
//! [`resolve_position`] is a pure function of its snapshots. It docks the
//! overlay against the target along the main axis, centers it on the target
//! along the cross axis, then clamps the cross axis against the frame using
//! the first matching rule:
//!
//! 1. The overlay is longer than the whole frame: pin it to the frame start
//!    and let it overflow.
//! 2. The target's trailing edge sits within the hanging buffer of the frame
//!    start: align the overlay so the tip stays next to the docking corner.
//! 3. The overlay is longer than the inner frame (frame minus buffers on both
//!    sides): center it in the whole frame.
//! 4. The overlay starts before the inner frame: move it to the inner start.
//! 5. The overlay ends past the inner frame: move it back by the overflow,
//!    so it ends at `frame end - (tip_size + offset)`.
//!
//! Finally the frame's scroll offset is added so the result is in document
//! space rather than in the frame's visible space.

use kurbo::{Point, Rect, Size, Vec2};

use crate::geometry::{AxisMap, Order};
use crate::zone::Zone;

/// Spacing parameters for the resolver.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spacing {
    /// Length of the tip connecting overlay and target.
    pub tip_size: f64,
    /// Gap between the tip and the target.
    pub offset: f64,
    /// Corner radius of the overlay body.
    pub corner_radius: f64,
}

impl Spacing {
    /// Buffer kept between the overlay and each cross-axis frame edge.
    #[must_use]
    pub fn frame_buffer(&self) -> f64 {
        self.tip_size + self.offset
    }

    /// Minimum cross-axis clearance near a docking corner.
    #[must_use]
    pub fn hanging_buffer(&self) -> f64 {
        self.corner_radius * 2.0 + self.tip_size * 2.0 + self.frame_buffer()
    }
}

/// Measured state of the frame the overlay lives in.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    /// Visible bounds of the frame, in the same space as the target bounds.
    pub bounds: Rect,
    /// Current scroll offset of the frame's content.
    pub scroll: Vec2,
}

/// Which clamping rule produced a [`Position`]'s cross-axis start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CrossClamp {
    /// Centered on the target; no rule applied.
    None,
    /// Overlay longer than the frame, pinned to the frame start.
    Overflow,
    /// Target too close to the frame start; aligned to the hanging buffer.
    Hanging,
    /// Overlay longer than the inner frame; centered in the frame.
    Centered,
    /// Pushed forward to the inner frame start.
    InnerStart,
    /// Pulled back to the inner frame end.
    InnerEnd,
}

/// A resolved overlay placement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    /// The zone this position was resolved for.
    pub zone: Zone,
    /// Top-left corner of the overlay.
    pub origin: Point,
    /// Overlay length along the main axis.
    pub main_length: f64,
    /// Overlay length along the cross axis.
    pub cross_length: f64,
    /// Rule used to clamp the cross axis.
    pub clamp: CrossClamp,
}

impl Position {
    fn axes(&self) -> AxisMap {
        self.zone.flow.axes()
    }

    /// Overlay start along the main axis.
    #[must_use]
    pub fn main_start(&self) -> f64 {
        self.axes().main.component(self.origin.to_vec2())
    }

    /// Overlay end along the main axis.
    #[must_use]
    pub fn main_end(&self) -> f64 {
        self.main_start() + self.main_length
    }

    /// Overlay start along the cross axis.
    #[must_use]
    pub fn cross_start(&self) -> f64 {
        self.axes().cross.component(self.origin.to_vec2())
    }

    /// Overlay end along the cross axis.
    #[must_use]
    pub fn cross_end(&self) -> f64 {
        self.cross_start() + self.cross_length
    }

    /// The overlay's rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        let axes = self.axes();
        let size = Size::ZERO;
        let size = axes.main.with_length(size, self.main_length);
        let size = axes.cross.with_length(size, self.cross_length);
        Rect::from_origin_size(self.origin, size)
    }
}

/// Resolves the overlay's placement for `zone`.
///
/// `target` and `frame.bounds` must be in the same coordinate space; the
/// result is in that space shifted by `frame.scroll`.
#[must_use]
pub fn resolve_position(
    zone: Zone,
    target: Rect,
    overlay: Size,
    frame: &FrameSnapshot,
    spacing: Spacing,
) -> Position {
    let AxisMap { main, cross } = zone.flow.axes();
    let main_length = main.length(overlay);
    let cross_length = cross.length(overlay);

    let mut main_start = match zone.order {
        Order::Before => main.start(target) - main_length,
        Order::After => main.end(target),
    };
    main_start += spacing.offset * zone.order.sign();

    let centered = cross.center(target) - cross_length / 2.0;

    let frame_buffer = spacing.frame_buffer();
    let hanging = spacing.hanging_buffer();
    let frame_start = cross.start(frame.bounds);
    let frame_end = cross.end(frame.bounds);
    let frame_length = frame_end - frame_start;
    let inner_length = frame_length - frame_buffer * 2.0;
    let inner_start = frame_start + frame_buffer;
    let inner_end = frame_end - frame_buffer;
    let target_cross_end = cross.end(target);

    let (cross_start, clamp) = if cross_length > frame_length {
        (frame_start, CrossClamp::Overflow)
    } else if target_cross_end - frame_start < hanging {
        (target_cross_end - hanging, CrossClamp::Hanging)
    } else if cross_length > inner_length {
        (
            frame_start + (frame_length - cross_length) / 2.0,
            CrossClamp::Centered,
        )
    } else if centered < inner_start {
        (inner_start, CrossClamp::InnerStart)
    } else if centered + cross_length > inner_end {
        (
            centered - (centered + cross_length - inner_end),
            CrossClamp::InnerEnd,
        )
    } else {
        (centered, CrossClamp::None)
    };

    let main_start = main_start + main.component(frame.scroll);
    let cross_start = cross_start + cross.component(frame.scroll);
    let origin = (main.unit() * main_start + cross.unit() * cross_start).to_point();

    log::trace!(
        "resolved {:?} at ({}, {}) clamp={clamp:?}",
        zone.standing,
        origin.x,
        origin.y
    );

    Position {
        zone,
        origin,
        main_length,
        cross_length,
        clamp,
    }
}
