// SPDX-License-Identifier: MPL-2.0
//! A single media preview and its visibility-driven lifecycle.
//!
//! The host creates one [`PreviewInstance`] per inspected file, attaches a
//! source, and forwards visibility and layout reports. The instance decides
//! when its engine session may play, yields to other instances through the
//! shared [`InstanceRegistry`], and releases the session exactly once.
//!
//! # Example
//!
//! ```ignore
//! use preview_coord::preview::{InstanceRegistry, PreviewInstance, PreviewSettings};
//! use preview_coord::domain::media::MediaSource;
//! use preview_coord::domain::preview::{Size, Visibility};
//!
//! let registry = InstanceRegistry::new();
//! let preview = PreviewInstance::new(&registry, engine, PreviewSettings::default());
//! preview.attach(MediaSource::new("clip.mp4"));
//! preview.on_visibility_changed(Visibility::Visible);
//! preview.on_layout_changed(Size::new(1280.0, 720.0));
//! // ... later
//! preview.detach();
//! ```

use super::registry::{InstanceRegistry, PlaybackTarget};
use super::scrub::ScrubDispatcher;
use super::settings::PreviewSettings;
use super::time_format::format_timestamp;
use crate::application::port::{EngineFuture, MediaEngine};
use crate::domain::error::{EngineError, ScrubError};
use crate::domain::media::{MediaMetadata, MediaSource, TrackInfo};
use crate::domain::preview::{InstanceId, LifecycleState, Size, Visibility};
use crate::domain::video::Volume;
use futures_util::FutureExt;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tokio::task::JoinHandle;

/// One preview surface bound to an exclusively owned engine session.
///
/// Always handled through an `Rc`; see [`PreviewInstance::new`].
pub struct PreviewInstance {
    id: InstanceId,
    registry: Rc<InstanceRegistry>,
    engine: Rc<dyn MediaEngine>,
    settings: PreviewSettings,
    self_ref: Weak<PreviewInstance>,

    state: Cell<LifecycleState>,
    visible: Cell<bool>,
    viewport: Cell<Option<Size>>,
    /// Explicit pause requested by the user.
    user_paused: Cell<bool>,
    /// Size heuristic has passed once for the current source.
    autoplay_latched: Cell<bool>,
    host_surface_missing: Cell<bool>,

    source: RefCell<Option<MediaSource>>,
    metadata: Cell<Option<MediaMetadata>>,
    preferred_size: Cell<Option<Size>>,
    load_error: RefCell<Option<EngineError>>,
    load_generation: Cell<u64>,
    loading: Cell<bool>,
    load_task: RefCell<Option<JoinHandle<()>>>,

    teardown_requested: Cell<bool>,
    released: Cell<bool>,
    scrub: RefCell<Option<ScrubDispatcher>>,
    pre_mute_volume: Cell<Option<Volume>>,
}

impl PreviewInstance {
    /// Creates an instance in [`LifecycleState::Created`].
    ///
    /// The registry is shared by every instance of the process.
    #[must_use]
    pub fn new(
        registry: &Rc<InstanceRegistry>,
        engine: Rc<dyn MediaEngine>,
        settings: PreviewSettings,
    ) -> Rc<Self> {
        Rc::new_cyclic(|self_ref| Self {
            id: InstanceId::next(),
            registry: Rc::clone(registry),
            engine,
            settings,
            self_ref: self_ref.clone(),
            state: Cell::new(LifecycleState::Created),
            visible: Cell::new(false),
            viewport: Cell::new(None),
            user_paused: Cell::new(false),
            autoplay_latched: Cell::new(false),
            host_surface_missing: Cell::new(false),
            source: RefCell::new(None),
            metadata: Cell::new(None),
            preferred_size: Cell::new(None),
            load_error: RefCell::new(None),
            load_generation: Cell::new(0),
            loading: Cell::new(false),
            load_task: RefCell::new(None),
            teardown_requested: Cell::new(false),
            released: Cell::new(false),
            scrub: RefCell::new(None),
            pre_mute_volume: Cell::new(None),
        })
    }

    // =========================================================================
    // Host lifecycle hooks
    // =========================================================================

    /// Binds `source` and starts loading it.
    ///
    /// Attaching to a live instance replaces the previous source: playback
    /// stops, scrub work is cancelled, the autoplay latch is reset and any
    /// load still in progress is discarded. Ignored once teardown started.
    ///
    /// # Panics
    ///
    /// Panics if called outside a [`LocalSet`](tokio::task::LocalSet).
    pub fn attach(&self, source: MediaSource) {
        let previous = self.state.get();
        if previous.is_closing_or_closed() {
            log::debug!("{}: attach after teardown ignored", self.id);
            return;
        }
        let Some(this) = self.self_ref.upgrade() else {
            return;
        };

        if previous.is_active() {
            self.engine.pause();
        }
        if previous != LifecycleState::AwaitingVisibility {
            self.transition(LifecycleState::AwaitingVisibility);
        }
        if matches!(
            previous,
            LifecycleState::Active | LifecycleState::Suspended
        ) {
            self.registry.unregister(self.id);
        }

        self.autoplay_latched.set(false);
        self.metadata.set(None);
        self.preferred_size.set(None);
        *self.load_error.borrow_mut() = None;
        drop(self.scrub.borrow_mut().take());
        if let Some(task) = self.load_task.borrow_mut().take() {
            task.abort();
        }

        let generation = self.load_generation.get().wrapping_add(1);
        self.load_generation.set(generation);
        self.loading.set(true);
        log::info!("{}: loading {}", self.id, source);

        let load = self.engine.load(&source);
        *self.source.borrow_mut() = Some(source);
        let task = tokio::task::spawn_local(async move {
            let result = load.await;
            this.finish_load(generation, result);
        });
        *self.load_task.borrow_mut() = Some(task);
    }

    /// Handles a visibility report from the host surface.
    pub fn on_visibility_changed(&self, visibility: Visibility) {
        self.host_surface_missing.set(false);
        match visibility {
            Visibility::Visible => {
                self.visible.set(true);
                self.evaluate_activation();
            }
            Visibility::Hidden => {
                self.visible.set(false);
                if self.state.get().is_active() {
                    self.suspend();
                }
            }
            Visibility::Final => {
                self.visible.set(false);
                self.detach();
            }
        }
    }

    /// Handles a layout report with the current viewport size.
    pub fn on_layout_changed(&self, viewport: Size) {
        self.viewport.set(Some(viewport));
        self.evaluate_activation();
    }

    /// Records that the host could not provide a visibility notifier.
    ///
    /// The instance keeps its current state and keeps accepting layout
    /// reports and explicit controls.
    pub fn on_host_surface_unavailable(&self) {
        self.host_surface_missing.set(true);
        log::warn!(
            "{}: host surface unavailable, visibility reports will not arrive",
            self.id
        );
    }

    /// Requests teardown. Idempotent.
    ///
    /// Playback stops and the instance leaves the registry immediately. The
    /// engine session is released now, or as soon as an in-progress load
    /// settles.
    pub fn detach(&self) {
        if self.state.get().is_closing_or_closed() {
            return;
        }
        self.teardown_requested.set(true);
        self.transition(LifecycleState::Closing);
        self.registry.unregister(self.id);
        self.engine.pause();

        if self.loading.get() {
            log::debug!("{}: release deferred until load settles", self.id);
            return;
        }
        self.release();
    }

    // =========================================================================
    // Playback controls
    // =========================================================================

    /// Starts playback. A manual call clears the explicit-pause intent.
    ///
    /// A manual call on a visible, loaded instance activates it even if the
    /// viewport is too small for autoplay. Otherwise only an active instance
    /// plays and the intent is kept for the next activation.
    pub fn play(&self, manually: bool) {
        if manually {
            self.user_paused.set(false);
        }
        if self.released.get() {
            return;
        }
        if manually
            && self.state.get().can_activate()
            && self.visible.get()
            && self.preferred_size.get().is_some()
        {
            self.autoplay_latched.set(true);
            self.activate();
            return;
        }
        if !self.state.get().is_active() {
            return;
        }
        self.claim_exclusivity();
        self.engine.play();
    }

    /// Pauses playback. A manual call sets the explicit-pause intent.
    pub fn pause(&self, manually: bool) {
        if manually {
            self.user_paused.set(true);
        }
        if self.released.get() {
            return;
        }
        self.engine.pause();
    }

    /// Manual play/pause toggle.
    pub fn toggle_play_pause(&self) {
        if self.is_playing() {
            self.pause(true);
        } else {
            self.play(true);
        }
    }

    /// Mutes, or restores the level from before the last mute.
    pub fn toggle_mute(&self) {
        if self.released.get() {
            return;
        }
        let current = Volume::new(self.engine.volume());
        if current.is_muted() {
            let restored = self
                .pre_mute_volume
                .take()
                .unwrap_or_default()
                .restore_level();
            self.engine.set_volume(restored.value());
        } else {
            self.pre_mute_volume.set(Some(current));
            self.engine.set_volume(Volume::MUTED.value());
        }
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        Volume::new(self.engine.volume()).is_muted()
    }

    #[must_use]
    pub fn audio_tracks(&self) -> Vec<TrackInfo> {
        if self.released.get() {
            return Vec::new();
        }
        self.engine.audio_tracks()
    }

    #[must_use]
    pub fn subtitle_tracks(&self) -> Vec<TrackInfo> {
        if self.released.get() {
            return Vec::new();
        }
        self.engine.subtitle_tracks()
    }

    /// Switches the audio track. Failures are logged and returned.
    pub fn select_audio_track(&self, index: usize) -> EngineFuture<()> {
        if self.released.get() {
            return async { Err(EngineError::Closed) }.boxed_local();
        }
        let id = self.id;
        self.engine
            .select_audio_track(index)
            .map(move |result| {
                if let Err(err) = &result {
                    log::warn!("{}: audio track {} not selected: {}", id, index, err);
                }
                result
            })
            .boxed_local()
    }

    /// Switches or disables subtitles. Failures are logged and returned.
    pub fn select_subtitle_track(&self, index: Option<usize>) -> EngineFuture<()> {
        if self.released.get() {
            return async { Err(EngineError::Closed) }.boxed_local();
        }
        let id = self.id;
        self.engine
            .select_subtitle_track(index)
            .map(move |result| {
                if let Err(err) = &result {
                    log::warn!("{}: subtitle track {:?} not selected: {}", id, index, err);
                }
                result
            })
            .boxed_local()
    }

    // =========================================================================
    // Scrub surface
    // =========================================================================

    /// Starts a scrub gesture.
    ///
    /// # Errors
    ///
    /// See [`ScrubError`].
    pub fn begin_scrub(&self) -> Result<(), ScrubError> {
        self.with_scrub(ScrubDispatcher::begin_scrub)
    }

    /// Feeds a gesture position, in seconds.
    ///
    /// # Errors
    ///
    /// See [`ScrubError`].
    pub fn scrub(&self, position_secs: f64) -> Result<(), ScrubError> {
        self.with_scrub(|dispatcher| dispatcher.scrub(position_secs))
    }

    /// Ends the gesture with one accurate seek.
    ///
    /// # Errors
    ///
    /// See [`ScrubError`].
    pub fn end_scrub(&self) -> Result<(), ScrubError> {
        self.with_scrub(ScrubDispatcher::end_scrub)
    }

    /// Whether a play/pause control should currently offer "pause".
    ///
    /// True while playing, and during a gesture that interrupted playback.
    #[must_use]
    pub fn should_show_pause_button(&self) -> bool {
        if self.is_playing() {
            return true;
        }
        self.scrub.borrow().as_ref().is_some_and(|dispatcher| {
            (dispatcher.is_scrubbing() || dispatcher.is_finishing())
                && dispatcher.was_playing_before_scrub()
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn lifecycle_state(&self) -> LifecycleState {
        self.state.get()
    }

    /// Intrinsic media size fitted into the display envelope, once loaded.
    #[must_use]
    pub fn preferred_size(&self) -> Option<Size> {
        self.preferred_size.get()
    }

    #[must_use]
    pub fn source(&self) -> Option<MediaSource> {
        self.source.borrow().clone()
    }

    #[must_use]
    pub fn metadata(&self) -> Option<MediaMetadata> {
        self.metadata.get()
    }

    /// Error of the last load, if it failed.
    #[must_use]
    pub fn load_error(&self) -> Option<EngineError> {
        self.load_error.borrow().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// True after the host reported it has no visibility notifier, until a
    /// visibility report arrives anyway.
    #[must_use]
    pub fn is_host_surface_missing(&self) -> bool {
        self.host_surface_missing.get()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    #[must_use]
    pub fn is_user_paused(&self) -> bool {
        self.user_paused.get()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        !self.released.get() && self.engine.is_playing()
    }

    #[must_use]
    pub fn is_scrub_available(&self) -> bool {
        self.scrub.borrow().is_some()
    }

    /// Current position formatted for a readout next to the scrub bar.
    #[must_use]
    pub fn position_label(&self) -> String {
        let duration = self.metadata.get().map_or(0.0, |meta| meta.duration_secs);
        if self.released.get() {
            return format_timestamp(f64::NAN, duration);
        }
        format_timestamp(self.engine.current_time(), duration)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn transition(&self, next: LifecycleState) -> bool {
        let current = self.state.get();
        if !current.can_transition_to(next) {
            log::debug!("{}: ignoring {:?} -> {:?}", self.id, current, next);
            return false;
        }
        self.state.set(next);
        log::debug!("{}: {:?} -> {:?}", self.id, current, next);
        true
    }

    fn finish_load(&self, generation: u64, result: Result<MediaMetadata, EngineError>) {
        if generation != self.load_generation.get() {
            log::debug!("{}: discarding superseded load", self.id);
            return;
        }
        self.loading.set(false);
        drop(self.load_task.borrow_mut().take());
        if self.released.get() {
            return;
        }

        match result {
            Ok(metadata) => {
                log::info!(
                    "{}: loaded {:.3}s {}x{}",
                    self.id,
                    metadata.duration_secs,
                    metadata.width,
                    metadata.height
                );
                self.metadata.set(Some(metadata));
                let intrinsic = Size::new(metadata.width as f32, metadata.height as f32);
                self.preferred_size
                    .set(Some(intrinsic.fit_within(self.settings.display_envelope)));
                if !self.teardown_requested.get() {
                    self.install_scrub(metadata);
                }
            }
            Err(err) => {
                log::error!("{}: load failed: {}", self.id, err);
                *self.load_error.borrow_mut() = Some(err);
            }
        }

        if self.teardown_requested.get() {
            self.release();
            return;
        }
        self.evaluate_activation();
    }

    fn with_scrub<R>(&self, f: impl FnOnce(&ScrubDispatcher) -> R) -> Result<R, ScrubError> {
        if self.released.get() || self.state.get().is_closing_or_closed() {
            return Err(ScrubError::Closed);
        }
        let scrub = self.scrub.borrow();
        match scrub.as_ref() {
            Some(dispatcher) => Ok(f(dispatcher)),
            None if self.metadata.get().is_some() => Err(ScrubError::Unavailable),
            None => Err(ScrubError::NotLoaded),
        }
    }

    fn install_scrub(&self, metadata: MediaMetadata) {
        let weak = self.self_ref.clone();
        let on_resume = move || {
            if let Some(this) = weak.upgrade() {
                this.resume_after_scrub();
            }
        };
        match ScrubDispatcher::new(
            Rc::clone(&self.engine),
            metadata,
            &self.settings,
            on_resume,
        ) {
            Ok(dispatcher) => *self.scrub.borrow_mut() = Some(dispatcher),
            Err(err) => log::debug!("{}: scrubbing disabled: {}", self.id, err),
        }
    }

    fn evaluate_activation(&self) {
        if !self.state.get().can_activate() || !self.visible.get() {
            return;
        }
        let Some(preferred) = self.preferred_size.get() else {
            return;
        };

        if !self.autoplay_latched.get() {
            let Some(viewport) = self.viewport.get() else {
                log::debug!("{}: waiting for a layout report", self.id);
                return;
            };
            if !viewport.covers(preferred, self.settings.autoplay_ratio) {
                log::debug!(
                    "{}: viewport {}x{} too small for {}x{}, autoplay deferred",
                    self.id,
                    viewport.width,
                    viewport.height,
                    preferred.width,
                    preferred.height
                );
                return;
            }
            self.autoplay_latched.set(true);
        }

        self.activate();
    }

    fn activate(&self) {
        if !self.transition(LifecycleState::Active) {
            return;
        }
        self.claim_exclusivity();
        if self.user_paused.get() {
            log::debug!("{}: active, paused by user", self.id);
        } else {
            self.engine.play();
        }
    }

    fn suspend(&self) {
        if !self.transition(LifecycleState::Suspended) {
            return;
        }
        self.engine.pause();
        self.registry.unregister(self.id);
    }

    /// Registers and pauses every other instance.
    fn claim_exclusivity(&self) {
        if let Some(this) = self.self_ref.upgrade() {
            self.registry.register(&this);
        }
        self.registry.pause_all_except(self.id);
    }

    fn resume_after_scrub(&self) {
        if self.released.get() || !self.state.get().is_active() || self.user_paused.get() {
            return;
        }
        self.claim_exclusivity();
        self.engine.play();
    }

    /// Closes the engine session. Runs at most once.
    fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        if !self.state.get().is_closing_or_closed() {
            self.transition(LifecycleState::Closing);
        }
        self.transition(LifecycleState::Closed);
        self.registry.unregister(self.id);

        drop(self.scrub.borrow_mut().take());
        if let Some(task) = self.load_task.borrow_mut().take() {
            task.abort();
        }
        self.loading.set(false);

        self.engine.close();
        log::info!("{}: closed", self.id);
    }
}

impl PlaybackTarget for PreviewInstance {
    fn instance_id(&self) -> InstanceId {
        self.id
    }

    fn is_playing(&self) -> bool {
        PreviewInstance::is_playing(self)
    }

    fn pause_for_exclusivity(&self) -> Result<(), EngineError> {
        if self.released.get() {
            return Err(EngineError::Closed);
        }
        self.engine.pause();
        Ok(())
    }
}

impl Drop for PreviewInstance {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for PreviewInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewInstance")
            .field("id", &self.id)
            .field("state", &self.state.get())
            .field("source", &self.source.borrow())
            .field("visible", &self.visible.get())
            .field("user_paused", &self.user_paused.get())
            .finish_non_exhaustive()
    }
}
