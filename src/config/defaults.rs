// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used when a setting is missing from `preview.toml`. Constants are
//! organized by category.
//!
//! # Categories
//!
//! - **Autoplay**: Viewport-to-preferred-size ratio
//! - **Display**: Envelope the preferred render size is fitted into
//! - **Scrub**: Velocity sampling

use crate::domain::preview::newtypes::autoplay_bounds;

// ==========================================================================
// Autoplay Defaults
// ==========================================================================

/// Default autoplay ratio (viewport must reach 80% of preferred size).
pub const DEFAULT_AUTOPLAY_RATIO: f32 = autoplay_bounds::DEFAULT;

// ==========================================================================
// Display Envelope Defaults
// ==========================================================================

/// Default maximum preferred render width, in host points.
pub const DEFAULT_MAX_DISPLAY_WIDTH: f32 = 1280.0;

/// Default maximum preferred render height, in host points.
pub const DEFAULT_MAX_DISPLAY_HEIGHT: f32 = 720.0;

/// Smallest accepted envelope dimension.
pub const MIN_DISPLAY_DIMENSION: f32 = 16.0;

// ==========================================================================
// Scrub Defaults
// ==========================================================================

/// Samples closer than this (milliseconds) count as infinitely fast.
pub const DEFAULT_VELOCITY_EPSILON_MS: f64 = 0.5;
