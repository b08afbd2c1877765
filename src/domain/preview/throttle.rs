// SPDX-License-Identifier: MPL-2.0
//! Scrub throttling rules.
//!
//! Interactive dragging produces positions far faster than a decoder can
//! seek. Slow, precise drags should reach the engine on every sample, while
//! fast flings are coalesced. The drag velocity (timeline seconds travelled
//! per wall-clock second) selects a minimum interval between two seeks.
//!
//! | velocity      | minimum interval |
//! |---------------|------------------|
//! | ≤ 1.25        | none             |
//! | ≤ 5           | 1/120 s          |
//! | ≤ 20          | 1/60 s           |
//! | ≤ 60          | 1/30 s           |
//! | faster        | 1/15 s           |

use std::fmt;
use std::time::Duration;

/// Default sample spacing below which velocity is considered unbounded.
pub const DEFAULT_VELOCITY_EPSILON: Duration = Duration::from_micros(500);

/// Computes drag velocity in timeline seconds per wall-clock second.
///
/// Returns `f64::INFINITY` when the two samples are closer than `epsilon`,
/// so that bursts of near-simultaneous samples land in the slowest bucket.
#[must_use]
pub fn scrub_velocity(timeline_delta_secs: f64, elapsed: Duration, epsilon: Duration) -> f64 {
    if elapsed < epsilon || elapsed.is_zero() {
        return f64::INFINITY;
    }
    timeline_delta_secs.abs() / elapsed.as_secs_f64()
}

/// One row of the throttle table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleStep {
    /// Inclusive upper velocity bound for this row.
    pub max_velocity: f64,
    /// Minimum wall-clock spacing between two dispatched seeks.
    pub min_interval: Duration,
}

impl ThrottleStep {
    #[must_use]
    pub fn new(max_velocity: f64, min_interval: Duration) -> Self {
        Self {
            max_velocity,
            min_interval,
        }
    }
}

/// Reasons a throttle table is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleTableError {
    /// A velocity bound is negative or not a number.
    InvalidVelocity { row: usize },
    /// Velocity bounds are not strictly ascending.
    VelocityNotAscending { row: usize },
    /// Intervals shrink as velocity grows.
    IntervalNotMonotonic { row: usize },
}

impl fmt::Display for ThrottleTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidVelocity { row } => write!(f, "row {}: invalid velocity bound", row),
            Self::VelocityNotAscending { row } => {
                write!(f, "row {}: velocity bounds must be ascending", row)
            }
            Self::IntervalNotMonotonic { row } => {
                write!(f, "row {}: interval must not shrink as velocity grows", row)
            }
        }
    }
}

impl std::error::Error for ThrottleTableError {}

/// Monotonic velocity → minimum-interval step table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubThrottleTable {
    steps: Vec<ThrottleStep>,
    fallback: Duration,
}

impl ScrubThrottleTable {
    /// Builds a table from ascending rows plus the interval used above the
    /// last row (and for unbounded velocity).
    ///
    /// # Errors
    ///
    /// Returns a [`ThrottleTableError`] if velocities are invalid or not
    /// strictly ascending, or if any interval is shorter than the previous one.
    pub fn new(steps: Vec<ThrottleStep>, fallback: Duration) -> Result<Self, ThrottleTableError> {
        let mut previous: Option<ThrottleStep> = None;
        for (row, step) in steps.iter().enumerate() {
            if step.max_velocity.is_nan() || step.max_velocity < 0.0 {
                return Err(ThrottleTableError::InvalidVelocity { row });
            }
            if let Some(prev) = previous {
                if step.max_velocity <= prev.max_velocity {
                    return Err(ThrottleTableError::VelocityNotAscending { row });
                }
                if step.min_interval < prev.min_interval {
                    return Err(ThrottleTableError::IntervalNotMonotonic { row });
                }
            }
            previous = Some(*step);
        }
        if let Some(last) = previous {
            if fallback < last.min_interval {
                return Err(ThrottleTableError::IntervalNotMonotonic { row: steps.len() });
            }
        }
        Ok(Self { steps, fallback })
    }

    /// Minimum interval to keep between seeks at the given velocity.
    #[must_use]
    pub fn interval_for(&self, velocity: f64) -> Duration {
        if velocity.is_nan() {
            return self.fallback;
        }
        self.steps
            .iter()
            .find(|step| velocity <= step.max_velocity)
            .map_or(self.fallback, |step| step.min_interval)
    }

    /// Rows of the table, in ascending velocity order.
    #[must_use]
    pub fn steps(&self) -> &[ThrottleStep] {
        &self.steps
    }

    /// Interval used above the last row.
    #[must_use]
    pub fn fallback(&self) -> Duration {
        self.fallback
    }
}

impl Default for ScrubThrottleTable {
    fn default() -> Self {
        Self {
            steps: vec![
                ThrottleStep::new(1.25, Duration::ZERO),
                ThrottleStep::new(5.0, Duration::from_secs_f64(1.0 / 120.0)),
                ThrottleStep::new(20.0, Duration::from_secs_f64(1.0 / 60.0)),
                ThrottleStep::new(60.0, Duration::from_secs_f64(1.0 / 30.0)),
            ],
            fallback: Duration::from_secs_f64(1.0 / 15.0),
        }
    }
}
