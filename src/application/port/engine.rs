// SPDX-License-Identifier: MPL-2.0
//! Decode/render engine port definition.
//!
//! This module defines the [`MediaEngine`] trait. The engine owns decoding,
//! frame production and audio output; the coordination core only tells it
//! when to load, play, pause, seek and close.
//!
//! # Design Notes
//!
//! - One engine value is one exclusively-owned session for one preview
//! - The engine runs its work on its own execution context; the futures it
//!   returns only await completion
//! - [`close`](MediaEngine::close) is synchronous and is called exactly once
//! - Uses domain types only (`MediaSource`, `MediaMetadata`, `EngineError`)

use crate::domain::error::EngineError;
use crate::domain::media::{MediaMetadata, MediaSource, TrackInfo};
use crate::domain::video::SeekMode;
use futures_util::future::LocalBoxFuture;

/// Future returned by asynchronous engine operations.
pub type EngineFuture<T> = LocalBoxFuture<'static, Result<T, EngineError>>;

// =============================================================================
// MediaEngine Trait
// =============================================================================

/// Port for a per-instance decode/render session.
///
/// # Lifecycle
///
/// 1. `load()` a source and await its metadata
/// 2. `play()` / `pause()` / `seek()` any number of times
/// 3. `close()` once to release decode, audio and render resources
///
/// # Example
///
/// ```ignore
/// use preview_coord::application::port::MediaEngine;
/// use preview_coord::domain::media::MediaSource;
/// use preview_coord::domain::video::SeekMode;
///
/// async fn open_at(engine: &dyn MediaEngine, source: &MediaSource, at: f64) {
///     let meta = engine.load(source).await.expect("load failed");
///     if meta.is_scrubbable() {
///         let _ = engine.seek(meta.clamp_position(at), SeekMode::Accurate).await;
///     }
///     engine.play();
/// }
/// ```
pub trait MediaEngine {
    /// Opens `source` and resolves with its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LoadFailed`] if the source cannot be opened or
    /// parsed.
    fn load(&self, source: &MediaSource) -> EngineFuture<MediaMetadata>;

    /// Starts or resumes playback. Idempotent.
    fn play(&self);

    /// Pauses playback. Idempotent.
    fn pause(&self);

    /// Returns true while the engine is producing frames.
    fn is_playing(&self) -> bool;

    /// Seeks to `position_secs`, resolving once the engine has serviced the
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SeekFailed`] if the position cannot be reached.
    fn seek(&self, position_secs: f64, mode: SeekMode) -> EngineFuture<()>;

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Metadata of the loaded source, if any.
    fn metadata(&self) -> Option<MediaMetadata>;

    /// Current output gain (0.0–1.0).
    fn volume(&self) -> f32;

    /// Sets the output gain (0.0–1.0).
    fn set_volume(&self, volume: f32);

    /// Audio tracks of the loaded source.
    fn audio_tracks(&self) -> Vec<TrackInfo>;

    /// Subtitle tracks of the loaded source.
    fn subtitle_tracks(&self) -> Vec<TrackInfo>;

    /// Switches to the audio track at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TrackUnavailable`] for unknown indices.
    fn select_audio_track(&self, index: usize) -> EngineFuture<()>;

    /// Switches to the subtitle track at `index`, or disables subtitles.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TrackUnavailable`] for unknown indices.
    fn select_subtitle_track(&self, index: Option<usize>) -> EngineFuture<()>;

    /// Synchronously releases decode, audio and render resources.
    ///
    /// Called exactly once per session by the coordination core.
    fn close(&self);
}
