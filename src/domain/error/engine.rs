// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Failures reported by a decode/render engine.
///
/// None of these are fatal to the coordination context: a failed load leaves
/// the instance non-playing, a failed seek is simply logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not open or parse the source.
    LoadFailed(String),

    /// A seek could not be serviced.
    SeekFailed(String),

    /// The session was already released.
    Closed,

    /// The requested audio/subtitle track does not exist.
    TrackUnavailable(usize),

    /// Generic error with raw message
    Other(String),
}

impl EngineError {
    /// Stable key the host can map to a localized message.
    pub fn key(&self) -> &'static str {
        match self {
            EngineError::LoadFailed(_) => "error-engine-load-failed",
            EngineError::SeekFailed(_) => "error-engine-seek-failed",
            EngineError::Closed => "error-engine-closed",
            EngineError::TrackUnavailable(_) => "error-engine-track-unavailable",
            EngineError::Other(_) => "error-engine-general",
        }
    }

    /// Categorizes a raw engine message.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("closed") || msg_lower.contains("released") {
            return EngineError::Closed;
        }

        if msg_lower.contains("seek") {
            return EngineError::SeekFailed(msg.to_string());
        }

        if msg_lower.contains("no such file")
            || msg_lower.contains("permission denied")
            || msg_lower.contains("unsupported")
            || msg_lower.contains("invalid data")
            || msg_lower.contains("open")
        {
            return EngineError::LoadFailed(msg.to_string());
        }

        EngineError::Other(msg.to_string())
    }

    /// Returns true if the session behind this error is gone.
    pub fn is_closed(&self) -> bool {
        matches!(self, EngineError::Closed)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::LoadFailed(msg) => write!(f, "Failed to load media: {}", msg),
            EngineError::SeekFailed(msg) => write!(f, "Seek failed: {}", msg),
            EngineError::Closed => write!(f, "Engine session is closed"),
            EngineError::TrackUnavailable(index) => write!(f, "No track at index {}", index),
            EngineError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
