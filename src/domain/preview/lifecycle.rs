// SPDX-License-Identifier: MPL-2.0
//! Preview lifecycle state machine.
//!
//! ```text
//! Created ──▶ AwaitingVisibility ──▶ Active ◀──▶ Suspended
//!    │               │                 │             │
//!    └───────────────┴────────┬────────┴─────────────┘
//!                             ▼
//!                          Closing ──▶ Closed
//! ```
//!
//! Attaching a new source to a live instance goes back to
//! `AwaitingVisibility`.

/// Lifecycle of a single preview instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Constructed, no source attached yet.
    #[default]
    Created,
    /// Source attached (possibly still loading), waiting to be shown at a
    /// large enough size.
    AwaitingVisibility,
    /// Visible and allowed to play.
    Active,
    /// Hidden; paused and out of the exclusivity registry.
    Suspended,
    /// Teardown requested; paused and unregistered, release pending.
    Closing,
    /// Engine session released. Terminal.
    Closed,
}

impl LifecycleState {
    /// Returns true if the transition `self → next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::{Active, AwaitingVisibility, Closed, Closing, Created, Suspended};

        match (self, next) {
            (Created, AwaitingVisibility) => true,
            (AwaitingVisibility | Active | Suspended, AwaitingVisibility) => true,
            (AwaitingVisibility | Suspended, Active) => true,
            (Active, Suspended) => true,
            (Created | AwaitingVisibility | Active | Suspended, Closing) => true,
            (Closing, Closed) => true,
            _ => false,
        }
    }

    /// Returns true once teardown has started.
    #[must_use]
    pub fn is_closing_or_closed(self) -> bool {
        matches!(self, Self::Closing | Self::Closed)
    }

    /// Returns true if the instance may be promoted to `Active`.
    #[must_use]
    pub fn can_activate(self) -> bool {
        matches!(self, Self::AwaitingVisibility | Self::Suspended)
    }

    /// Returns true if the instance is active.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Visibility signal delivered by the host for an instance surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The surface is on screen.
    Visible,
    /// The surface is occluded or off screen, but may come back.
    Hidden,
    /// The surface is going away for good; treated as a teardown request.
    Final,
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible {
            Self::Visible
        } else {
            Self::Hidden
        }
    }
}
