// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis vocabulary shared by the zone picker, the resolver and the tracker.
//!
//! Everything above this module reasons in terms of a *main* axis (the one
//! the overlay docks along) and a *cross* axis (perpendicular to it). The
//! [`AxisMap`] for a [`Flow`] says which screen [`Axis`] plays which role,
//! and [`Axis`] knows how to read starts, ends and lengths out of
//! [`kurbo::Rect`], [`kurbo::Size`] and [`kurbo::Vec2`] values.

use kurbo::{Rect, Size, Vec2};

/// One of the two screen axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right (`x`).
    Horizontal,
    /// Top to bottom (`y`).
    Vertical,
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Leading edge of `rect` along this axis (`left` or `top`).
    #[must_use]
    pub fn start(self, rect: Rect) -> f64 {
        match self {
            Self::Horizontal => rect.x0,
            Self::Vertical => rect.y0,
        }
    }

    /// Trailing edge of `rect` along this axis (`right` or `bottom`).
    #[must_use]
    pub fn end(self, rect: Rect) -> f64 {
        match self {
            Self::Horizontal => rect.x1,
            Self::Vertical => rect.y1,
        }
    }

    /// Extent of `rect` along this axis (`width` or `height`).
    #[must_use]
    pub fn extent(self, rect: Rect) -> f64 {
        self.end(rect) - self.start(rect)
    }

    /// Midpoint of `rect` along this axis.
    #[must_use]
    pub fn center(self, rect: Rect) -> f64 {
        self.start(rect) + self.extent(rect) / 2.0
    }

    /// Length of `size` along this axis.
    #[must_use]
    pub fn length(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Component of `v` along this axis.
    #[must_use]
    pub fn component(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Returns `size` with its length along this axis replaced.
    #[must_use]
    pub fn with_length(self, size: Size, length: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(length, size.height),
            Self::Vertical => Size::new(size.width, length),
        }
    }

    /// Unit vector pointing along this axis.
    #[must_use]
    pub const fn unit(self) -> Vec2 {
        match self {
            Self::Horizontal => Vec2::new(1.0, 0.0),
            Self::Vertical => Vec2::new(0.0, 1.0),
        }
    }
}

/// Axis orientation of a docked overlay.
///
/// `Row` overlays sit to the left or right of their target and extend
/// horizontally away from it; `Column` overlays sit above or below.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Flow {
    /// Main axis is horizontal.
    Row,
    /// Main axis is vertical.
    Column,
}

impl Flow {
    /// Returns the main/cross axis assignment for this flow.
    #[must_use]
    pub const fn axes(self) -> AxisMap {
        match self {
            Self::Row => AxisMap {
                main: Axis::Horizontal,
                cross: Axis::Vertical,
            },
            Self::Column => AxisMap {
                main: Axis::Vertical,
                cross: Axis::Horizontal,
            },
        }
    }
}

/// Main/cross axis assignment for a [`Flow`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisMap {
    /// Axis the overlay docks along.
    pub main: Axis,
    /// Axis perpendicular to `main`.
    pub cross: Axis,
}

/// Which side of the target the overlay is placed on, along the main axis.
///
/// The discriminants are the signs used in offset arithmetic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// The overlay precedes the target (above it or to its left).
    Before = -1,
    /// The overlay follows the target (below it or to its right).
    After = 1,
}

impl Order {
    /// `-1.0` for [`Order::Before`], `1.0` for [`Order::After`].
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Before => -1.0,
            Self::After => 1.0,
        }
    }
}

/// The four docking directions ("standing") of an overlay relative to its target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Above the target.
    Up,
    /// Below the target.
    #[default]
    Down,
    /// Left of the target.
    Left,
    /// Right of the target.
    Right,
}

impl Direction {
    /// All directions in tie-break order: an earlier entry wins over a later
    /// one when their available areas are equal.
    pub const PRIORITY: [Self; 4] = [Self::Down, Self::Up, Self::Right, Self::Left];

    /// The flow implied by docking in this direction.
    #[must_use]
    pub const fn flow(self) -> Flow {
        match self {
            Self::Up | Self::Down => Flow::Column,
            Self::Left | Self::Right => Flow::Row,
        }
    }

    /// The order implied by docking in this direction.
    #[must_use]
    pub const fn order(self) -> Order {
        match self {
            Self::Up | Self::Left => Order::Before,
            Self::Down | Self::Right => Order::After,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_flow_and_order_mapping() {
        assert_eq!(Direction::Up.flow(), Flow::Column);
        assert_eq!(Direction::Down.flow(), Flow::Column);
        assert_eq!(Direction::Left.flow(), Flow::Row);
        assert_eq!(Direction::Right.flow(), Flow::Row);

        assert_eq!(Direction::Up.order(), Order::Before);
        assert_eq!(Direction::Left.order(), Order::Before);
        assert_eq!(Direction::Down.order(), Order::After);
        assert_eq!(Direction::Right.order(), Order::After);
    }

    #[test]
    fn axis_map_is_orthogonal() {
        for flow in [Flow::Row, Flow::Column] {
            let axes = flow.axes();
            assert_eq!(axes.main.cross(), axes.cross, "{flow:?} axes must differ");
        }
        assert_eq!(Flow::Row.axes().main, Axis::Horizontal);
        assert_eq!(Flow::Column.axes().main, Axis::Vertical);
    }

    #[test]
    fn rect_accessors_follow_axis() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(Axis::Horizontal.start(r), 10.0);
        assert_eq!(Axis::Horizontal.end(r), 110.0);
        assert_eq!(Axis::Horizontal.extent(r), 100.0);
        assert_eq!(Axis::Horizontal.center(r), 60.0);
        assert_eq!(Axis::Vertical.start(r), 20.0);
        assert_eq!(Axis::Vertical.end(r), 70.0);
        assert_eq!(Axis::Vertical.extent(r), 50.0);
        assert_eq!(Axis::Vertical.center(r), 45.0);
    }

    #[test]
    fn with_length_replaces_one_dimension() {
        let s = Size::new(200.0, 80.0);
        assert_eq!(Axis::Horizontal.with_length(s, 5.0), Size::new(5.0, 80.0));
        assert_eq!(Axis::Vertical.with_length(s, 5.0), Size::new(200.0, 5.0));
    }
}
