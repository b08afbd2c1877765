// SPDX-License-Identifier: MPL-2.0
//! Preview value objects.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// InstanceId
// =============================================================================

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable, comparable identity of a preview instance.
///
/// Identities are never reused within a process, so a stale registry entry
/// can never alias a newer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocates the next unused identity.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview#{}", self.0)
    }
}

// =============================================================================
// Size
// =============================================================================

/// Width and height in host points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Shrinks `self` into `envelope`, preserving aspect ratio.
    ///
    /// Width is constrained first, then height. Sizes already inside the
    /// envelope are returned unchanged; nothing is ever scaled up.
    #[must_use]
    pub fn fit_within(self, envelope: Size) -> Size {
        let mut width = self.width;
        let mut height = self.height;

        if width > envelope.width && width > 0.0 {
            let scale = envelope.width / width;
            width = envelope.width;
            height *= scale;
        }
        if height > envelope.height && height > 0.0 {
            let scale = envelope.height / height;
            height = envelope.height;
            width *= scale;
        }

        Size { width, height }
    }

    /// Returns true if both dimensions reach `ratio` of `preferred`.
    #[must_use]
    pub fn covers(self, preferred: Size, ratio: AutoplayRatio) -> bool {
        let ratio = ratio.value();
        self.width >= preferred.width * ratio && self.height >= preferred.height * ratio
    }
}

// =============================================================================
// AutoplayRatio
// =============================================================================

/// Autoplay ratio bounds.
pub mod autoplay_bounds {
    /// Smallest accepted ratio.
    pub const MIN: f32 = 0.1;
    /// Largest accepted ratio (viewport must match the preferred size).
    pub const MAX: f32 = 1.0;
    /// Default ratio: viewport must reach 80% of the preferred size.
    pub const DEFAULT: f32 = 0.8;
}

/// Fraction of the preferred render size the viewport must reach, in each
/// dimension, before a preview may autoplay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayRatio(f32);

impl AutoplayRatio {
    /// Creates a new ratio, clamping to valid range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(autoplay_bounds::MIN, autoplay_bounds::MAX))
    }

    /// Returns the value as f32.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for AutoplayRatio {
    fn default() -> Self {
        Self(autoplay_bounds::DEFAULT)
    }
}
