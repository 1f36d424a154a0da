// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outer-action detection: pointer or touch input landing outside both the
//! overlay and its target.
//!
//! The host knows its own tree, so it answers containment questions through
//! [`Containment`]; `N` is whatever the host uses to identify the node an
//! event originated from.
//!
//! ```
//! use understory_popover::{Containment, Element, is_outer_action};
//!
//! // Node ids: 1 is inside the overlay, 2 inside the target, 3 elsewhere.
//! struct Ids;
//! impl Containment<u32> for Ids {
//!     fn contains(&self, root: Element, node: &u32) -> bool {
//!         matches!((root, node), (Element::Overlay, 1) | (Element::Target, 2))
//!     }
//! }
//!
//! assert!(!is_outer_action(&Ids, &1));
//! assert!(!is_outer_action(&Ids, &2));
//! assert!(is_outer_action(&Ids, &3));
//! ```

use alloc::boxed::Box;
use core::fmt;

use crate::platform::Element;

/// Kind of input that may constitute an outer action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A pointer button went down.
    PointerDown,
    /// A touch started.
    TouchStart,
}

/// Answers whether a node lies in the subtree of an element.
pub trait Containment<N: ?Sized> {
    /// Returns `true` if `node` is `root` or one of its descendants.
    fn contains(&self, root: Element, node: &N) -> bool;
}

/// Returns `true` if `origin` is outside both the overlay and the target.
pub fn is_outer_action<N: ?Sized>(containment: &impl Containment<N>, origin: &N) -> bool {
    !containment.contains(Element::Overlay, origin) && !containment.contains(Element::Target, origin)
}

/// Calls a callback once per outer action while armed.
pub struct OuterActionDetector {
    armed: bool,
    callback: Box<dyn FnMut(PointerKind)>,
}

impl fmt::Debug for OuterActionDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OuterActionDetector")
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

impl Default for OuterActionDetector {
    fn default() -> Self {
        Self::new(|_| {})
    }
}

impl OuterActionDetector {
    /// Creates a disarmed detector.
    pub fn new(callback: impl FnMut(PointerKind) + 'static) -> Self {
        Self {
            armed: false,
            callback: Box::new(callback),
        }
    }

    /// Replaces the callback.
    pub fn set_callback(&mut self, callback: impl FnMut(PointerKind) + 'static) {
        self.callback = Box::new(callback);
    }

    /// Starts or stops reacting to input.
    pub fn set_armed(&mut self, armed: bool) {
        self.armed = armed;
    }

    /// Returns `true` while input is being checked.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Checks one input event, invoking the callback if it is an outer action.
    ///
    /// Returns `true` if the callback ran.
    pub fn check<N: ?Sized>(
        &mut self,
        kind: PointerKind,
        origin: &N,
        containment: &impl Containment<N>,
    ) -> bool {
        if !self.armed || !is_outer_action(containment, origin) {
            return false;
        }
        (self.callback)(kind);
        true
    }
}
