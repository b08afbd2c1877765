// SPDX-License-Identifier: MPL-2.0
//! Seek precision requested from the engine.

/// How precisely the engine should land on a requested position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeekMode {
    /// Approximate, low-latency seek, possibly to the nearest keyframe.
    /// Used while a scrub gesture is in progress.
    #[default]
    Fast,
    /// Frame-exact seek. Issued once when a scrub gesture ends.
    Accurate,
}

impl SeekMode {
    /// Returns true for frame-exact seeks.
    #[must_use]
    pub fn is_accurate(self) -> bool {
        matches!(self, Self::Accurate)
    }
}
