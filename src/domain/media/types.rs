// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any engine dependencies.

use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of the media attached to a preview instance.
///
/// # Example
///
/// ```
/// use preview_coord::domain::media::MediaSource;
///
/// let source = MediaSource::new("/tmp/clip.mp4");
/// assert_eq!(source.file_name(), Some("clip.mp4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaSource {
    path: PathBuf,
}

impl MediaSource {
    /// Creates a source from a file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the underlying path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the last path component, used for log lines.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Metadata available once the engine has loaded a source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaMetadata {
    /// Duration in seconds. May be zero or non-finite for live/still media.
    pub duration_secs: f64,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

impl MediaMetadata {
    /// Creates a new `MediaMetadata`.
    #[must_use]
    pub fn new(duration_secs: f64, width: u32, height: u32) -> Self {
        Self {
            duration_secs,
            width,
            height,
        }
    }

    /// Returns true if the timeline can be scrubbed.
    ///
    /// Zero, negative and non-finite durations have no usable timeline.
    #[must_use]
    pub fn is_scrubbable(&self) -> bool {
        self.duration_secs.is_finite() && self.duration_secs > 0.0
    }

    /// Clamps a timeline position into `[0, duration]`.
    #[must_use]
    pub fn clamp_position(&self, position_secs: f64) -> f64 {
        if !self.is_scrubbable() || position_secs.is_nan() {
            return 0.0;
        }
        position_secs.clamp(0.0, self.duration_secs)
    }
}

/// An audio or subtitle track as enumerated by the engine.
///
/// The coordination core treats tracks as opaque and only forwards selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    /// Index used for selection.
    pub index: usize,
    /// Human readable title, if the container provides one.
    pub title: Option<String>,
    /// Language tag, if the container provides one.
    pub language: Option<String>,
}

impl TrackInfo {
    /// Label shown to the user: title, then language, then a numbered fallback.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.title, &self.language) {
            (Some(title), _) => title.clone(),
            (None, Some(language)) => language.clone(),
            (None, None) => format!("Track {}", self.index + 1),
        }
    }
}
