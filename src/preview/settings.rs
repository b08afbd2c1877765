// SPDX-License-Identifier: MPL-2.0
//! Runtime tuning shared by preview instances.

use crate::config::{DEFAULT_MAX_DISPLAY_HEIGHT, DEFAULT_MAX_DISPLAY_WIDTH};
use crate::domain::preview::{AutoplayRatio, ScrubThrottleTable, Size, DEFAULT_VELOCITY_EPSILON};
use std::time::Duration;

/// Resolved settings handed to each [`PreviewInstance`](super::PreviewInstance).
///
/// Built from [`Config::preview_settings`](crate::config::Config::preview_settings)
/// or taken as [`Default`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSettings {
    /// Viewport fraction of the preferred size required to autoplay.
    pub autoplay_ratio: AutoplayRatio,
    /// Envelope the intrinsic media size is fitted into.
    pub display_envelope: Size,
    /// Velocity → minimum seek interval table.
    pub throttle: ScrubThrottleTable,
    /// Sample spacing below which drag velocity counts as unbounded.
    pub velocity_epsilon: Duration,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            autoplay_ratio: AutoplayRatio::default(),
            display_envelope: Size::new(DEFAULT_MAX_DISPLAY_WIDTH, DEFAULT_MAX_DISPLAY_HEIGHT),
            throttle: ScrubThrottleTable::default(),
            velocity_epsilon: DEFAULT_VELOCITY_EPSILON,
        }
    }
}
