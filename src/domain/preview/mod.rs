// SPDX-License-Identifier: MPL-2.0
//! Preview coordination rules.
//!
//! Pure decision logic shared by the runtime types in [`crate::preview`]:
//! the lifecycle transition table, the autoplay size heuristic and the
//! velocity-to-interval table used to throttle scrubbing.

pub mod lifecycle;
pub mod newtypes;
pub mod throttle;

pub use lifecycle::{LifecycleState, Visibility};
pub use newtypes::{AutoplayRatio, InstanceId, Size};
pub use throttle::{
    scrub_velocity, ScrubThrottleTable, ThrottleStep, ThrottleTableError, DEFAULT_VELOCITY_EPSILON,
};
