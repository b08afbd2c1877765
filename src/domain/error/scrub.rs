// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Reasons a scrub gesture cannot be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubError {
    /// The media has a zero or non-finite duration.
    Unavailable,
    /// No media has finished loading yet.
    NotLoaded,
    /// The instance has been torn down.
    Closed,
}

impl fmt::Display for ScrubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrubError::Unavailable => write!(f, "Media has no seekable duration"),
            ScrubError::NotLoaded => write!(f, "Media is not loaded"),
            ScrubError::Closed => write!(f, "Preview is closed"),
        }
    }
}

impl std::error::Error for ScrubError {}
