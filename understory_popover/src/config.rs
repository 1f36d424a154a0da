// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-instance popover configuration.

use core::fmt;

use crate::zone::{Placement, ZonePrefs};

/// Default tip length, in pixels.
pub const DEFAULT_TIP_SIZE: f64 = 7.0;
/// Default gap between tip and target, in pixels.
pub const DEFAULT_OFFSET: f64 = 4.0;
/// Default target drift polling interval, in milliseconds.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 200;
/// Default exit animation duration, in milliseconds.
pub const DEFAULT_ENTER_EXIT_TRANSITION_DURATION_MS: u64 = 500;
/// Minimum interval between two runs of the same scroll/resize reaction.
pub const MIN_REACTION_INTERVAL_MS: u64 = 200;

/// Which element bounds the overlay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameMode {
    /// The viewport; the overlay container is positioned in document space.
    #[default]
    Viewport,
    /// A designated parent element; the overlay body is positioned relative
    /// to the parent's box and the container adopts the parent's width.
    Parent,
}

/// Configuration for a [`Popover`](crate::Popover).
///
/// Built with [`Default`] and the `with_*` methods, and checked by
/// [`PopoverConfig::validate`] when the popover is created.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopoverConfig {
    /// Length of the tip connecting the overlay body to the target.
    pub tip_size: f64,
    /// Gap between the tip and the target.
    pub offset: f64,
    /// Placement to prefer when it has room.
    pub prefer_place: Option<Placement>,
    /// Placement to force regardless of room.
    pub place: Option<Placement>,
    /// Target drift polling interval; `None` or `Some(0)` disables polling.
    pub refresh_interval_ms: Option<u64>,
    /// Duration of the exit animation before the overlay is unmounted.
    pub enter_exit_transition_duration_ms: u64,
    /// Frame the overlay is constrained to.
    pub frame: FrameMode,
    /// Whether the popover starts open.
    pub is_open: bool,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            tip_size: DEFAULT_TIP_SIZE,
            offset: DEFAULT_OFFSET,
            prefer_place: None,
            place: None,
            refresh_interval_ms: Some(DEFAULT_REFRESH_INTERVAL_MS),
            enter_exit_transition_duration_ms: DEFAULT_ENTER_EXIT_TRANSITION_DURATION_MS,
            frame: FrameMode::Viewport,
            is_open: false,
        }
    }
}

impl PopoverConfig {
    /// Sets the tip size.
    #[must_use]
    pub fn with_tip_size(mut self, tip_size: f64) -> Self {
        self.tip_size = tip_size;
        self
    }

    /// Sets the target offset.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the preferred placement.
    #[must_use]
    pub fn with_prefer_place(mut self, place: impl Into<Placement>) -> Self {
        self.prefer_place = Some(place.into());
        self
    }

    /// Sets the forced placement.
    #[must_use]
    pub fn with_place(mut self, place: impl Into<Placement>) -> Self {
        self.place = Some(place.into());
        self
    }

    /// Sets the polling interval; `None` disables polling.
    #[must_use]
    pub fn with_refresh_interval_ms(mut self, interval: Option<u64>) -> Self {
        self.refresh_interval_ms = interval;
        self
    }

    /// Sets the exit animation duration.
    #[must_use]
    pub fn with_enter_exit_transition_duration_ms(mut self, ms: u64) -> Self {
        self.enter_exit_transition_duration_ms = ms;
        self
    }

    /// Sets the frame mode.
    #[must_use]
    pub fn with_frame(mut self, frame: FrameMode) -> Self {
        self.frame = frame;
        self
    }

    /// Sets whether the popover starts open.
    #[must_use]
    pub fn with_open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    /// Effective polling interval, with zero treated as disabled.
    #[must_use]
    pub fn poll_interval_ms(&self) -> Option<u64> {
        self.refresh_interval_ms.filter(|&ms| ms > 0)
    }

    /// Zone picking preferences derived from this configuration.
    #[must_use]
    pub fn zone_prefs(&self) -> ZonePrefs {
        ZonePrefs {
            prefer_place: self.prefer_place,
            place: self.place,
        }
    }

    /// Checks that all lengths are finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_length(self.tip_size, ConfigError::InvalidTipSize)?;
        check_length(self.offset, ConfigError::InvalidOffset)?;
        Ok(())
    }
}

fn check_length(value: f64, err: fn(f64) -> ConfigError) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(err(value))
    }
}

/// Error returned by [`PopoverConfig::validate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `tip_size` is negative or not finite.
    InvalidTipSize(f64),
    /// `offset` is negative or not finite.
    InvalidOffset(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTipSize(v) => {
                write!(f, "tip size must be finite and non-negative, got {v}")
            }
            Self::InvalidOffset(v) => {
                write!(f, "offset must be finite and non-negative, got {v}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Direction;

    #[test]
    fn defaults_match_documented_values() {
        let config = PopoverConfig::default();
        assert_eq!(config.tip_size, 7.0);
        assert_eq!(config.offset, 4.0);
        assert_eq!(config.refresh_interval_ms, Some(200));
        assert_eq!(config.enter_exit_transition_duration_ms, 500);
        assert_eq!(config.frame, FrameMode::Viewport);
        assert!(!config.is_open);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_disables_polling() {
        let config = PopoverConfig::default().with_refresh_interval_ms(Some(0));
        assert_eq!(config.poll_interval_ms(), None);
        let config = config.with_refresh_interval_ms(None);
        assert_eq!(config.poll_interval_ms(), None);
        let config = config.with_refresh_interval_ms(Some(50));
        assert_eq!(config.poll_interval_ms(), Some(50));
    }

    #[test]
    fn builders_feed_zone_prefs() {
        let prefs = PopoverConfig::default()
            .with_prefer_place(Direction::Up)
            .with_place(Direction::Left)
            .zone_prefs();
        assert_eq!(prefs.prefer_place, Some(Placement::Side(Direction::Up)));
        assert_eq!(prefs.place, Some(Placement::Side(Direction::Left)));
    }

    #[test]
    fn rejects_bad_lengths() {
        let err = PopoverConfig::default()
            .with_tip_size(-1.0)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTipSize(-1.0));

        let err = PopoverConfig::default()
            .with_offset(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOffset(v) if v.is_nan()));
    }
}
