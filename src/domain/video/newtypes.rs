// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for video playback values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0, linear engine gain).
pub mod volume_bounds {
    /// Minimum volume level.
    pub const MIN: f32 = 0.0;
    /// Maximum volume level.
    pub const MAX: f32 = 1.0;
    /// Default volume level.
    pub const DEFAULT: f32 = 1.0;
    /// Below this level the output is considered muted.
    pub const MUTE_THRESHOLD: f32 = 0.001;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// The value is handed to the engine unchanged; mapping to a perceptual
/// curve is the engine's business.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Silence.
    pub const MUTED: Self = Self(volume_bounds::MIN);

    /// Creates a new volume level, clamping to valid range.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self::MUTED;
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Returns the volume value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively muted (below audible threshold).
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 < volume_bounds::MUTE_THRESHOLD
    }

    /// Level to restore when un-muting.
    ///
    /// A remembered level of zero would leave the output silent, so full
    /// volume is used instead.
    #[must_use]
    pub fn restore_level(self) -> Self {
        if self.is_muted() {
            Self::default()
        } else {
            self
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::DEFAULT)
    }
}
