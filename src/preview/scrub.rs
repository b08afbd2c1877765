// SPDX-License-Identifier: MPL-2.0
//! Scrub gesture → throttled seek stream.
//!
//! While a gesture is in progress every sample replaces the pending target.
//! The pending target is handed to the [`SeekQueue`] as a fast seek as soon
//! as the velocity-dependent interval since the previous dispatch has
//! elapsed; otherwise a single deferred flush is (re)scheduled for the
//! remaining wait. Ending the gesture flushes what is left, then queues
//! exactly one accurate seek behind all fast ones and resumes playback if it
//! was running when the gesture began.

use super::seek_queue::SeekQueue;
use super::settings::PreviewSettings;
use crate::application::port::MediaEngine;
use crate::domain::error::ScrubError;
use crate::domain::media::MediaMetadata;
use crate::domain::preview::{scrub_velocity, ScrubThrottleTable};
use crate::domain::video::SeekMode;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScrubPhase {
    #[default]
    Idle,
    Scrubbing,
    /// Waiting for the final accurate seek before resuming.
    Finishing,
}

#[derive(Debug, Default)]
struct ScrubSession {
    phase: ScrubPhase,
    was_playing: bool,
    /// Latest undispatched target (last wins).
    pending: Option<f64>,
    /// Previous unclamped sample, for velocity.
    last_sample: Option<(f64, Instant)>,
    last_dispatch: Option<Instant>,
    last_target: Option<f64>,
    flush: Option<JoinHandle<()>>,
    finishing: Option<JoinHandle<()>>,
    dispatched: usize,
}

impl ScrubSession {
    fn abort_flush(&mut self) {
        if let Some(flush) = self.flush.take() {
            flush.abort();
        }
    }

    fn abort_finishing(&mut self) {
        if let Some(finishing) = self.finishing.take() {
            finishing.abort();
        }
    }
}

struct ScrubShared {
    engine: Rc<dyn MediaEngine>,
    queue: SeekQueue,
    metadata: MediaMetadata,
    throttle: ScrubThrottleTable,
    velocity_epsilon: Duration,
    on_resume: Box<dyn Fn()>,
    session: RefCell<ScrubSession>,
}

impl ScrubShared {
    fn dispatch_pending(&self, now: Instant) {
        let target = {
            let mut session = self.session.borrow_mut();
            let Some(target) = session.pending.take() else {
                return;
            };
            session.last_dispatch = Some(now);
            session.last_target = Some(target);
            session.dispatched += 1;
            target
        };
        if let Err(err) = self.queue.submit(target, SeekMode::Fast) {
            log::debug!("scrub seek to {:.3}s dropped: {}", target, err);
        }
    }
}

/// Per-instance scrub coordinator.
///
/// Created once metadata reports a finite, positive duration. Must be used
/// from within a [`LocalSet`](tokio::task::LocalSet).
pub struct ScrubDispatcher {
    shared: Rc<ScrubShared>,
}

impl ScrubDispatcher {
    /// Creates a dispatcher and spawns its seek queue.
    ///
    /// `on_resume` runs when a gesture that interrupted playback finishes.
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Unavailable`] when the duration is zero or not
    /// finite.
    pub fn new(
        engine: Rc<dyn MediaEngine>,
        metadata: MediaMetadata,
        settings: &PreviewSettings,
        on_resume: impl Fn() + 'static,
    ) -> Result<Self, ScrubError> {
        if !metadata.is_scrubbable() {
            return Err(ScrubError::Unavailable);
        }
        let queue = SeekQueue::spawn(Rc::clone(&engine));
        Ok(Self {
            shared: Rc::new(ScrubShared {
                engine,
                queue,
                metadata,
                throttle: settings.throttle.clone(),
                velocity_epsilon: settings.velocity_epsilon,
                on_resume: Box::new(on_resume),
                session: RefCell::new(ScrubSession::default()),
            }),
        })
    }

    /// Starts a gesture: records whether playback was running and pauses.
    ///
    /// During the finishing phase the pending resume is cancelled and the
    /// original intent is kept. No-op while already scrubbing.
    pub fn begin_scrub(&self) {
        let shared = &self.shared;
        {
            let mut session = shared.session.borrow_mut();
            match session.phase {
                ScrubPhase::Scrubbing => return,
                ScrubPhase::Finishing => session.abort_finishing(),
                ScrubPhase::Idle => session.was_playing = shared.engine.is_playing(),
            }
            session.phase = ScrubPhase::Scrubbing;
            session.pending = None;
            session.last_sample = None;
            session.last_target = None;
        }
        if shared.engine.is_playing() {
            shared.engine.pause();
        }
    }

    /// Feeds one gesture sample, taken now.
    pub fn scrub(&self, position_secs: f64) {
        self.scrub_at(position_secs, Instant::now());
    }

    /// Feeds one gesture sample taken at `now`.
    ///
    /// Starts a gesture implicitly if none is in progress. Velocity is
    /// measured on the raw position; only the seek target is clamped.
    pub fn scrub_at(&self, position_secs: f64, now: Instant) {
        if !self.is_scrubbing() {
            self.begin_scrub();
        }
        let shared = &self.shared;
        let target = shared.metadata.clamp_position(position_secs);

        let due = {
            let mut session = shared.session.borrow_mut();
            let velocity = match session.last_sample {
                Some((previous, at)) => scrub_velocity(
                    position_secs - previous,
                    now.saturating_duration_since(at),
                    shared.velocity_epsilon,
                ),
                None => 0.0,
            };
            session.last_sample = Some((position_secs, now));
            session.pending = Some(target);
            session.abort_flush();

            let interval = shared.throttle.interval_for(velocity);
            match session.last_dispatch {
                Some(last) if now < last + interval => last + interval,
                _ => now,
            }
        };

        if due <= now {
            shared.dispatch_pending(now);
            return;
        }

        let weak: Weak<ScrubShared> = Rc::downgrade(shared);
        let flush = tokio::task::spawn_local(async move {
            tokio::time::sleep_until(due).await;
            if let Some(shared) = weak.upgrade() {
                // Detach our own handle rather than aborting it.
                drop(shared.session.borrow_mut().flush.take());
                shared.dispatch_pending(Instant::now());
            }
        });
        shared.session.borrow_mut().flush = Some(flush);
    }

    /// Ends the gesture.
    ///
    /// Flushes the pending target, queues exactly one accurate seek to the
    /// last dispatched position (or the engine's current time if the gesture
    /// had no samples) and resumes afterwards if playback was running at
    /// [`begin_scrub`](Self::begin_scrub). No-op outside a gesture.
    pub fn end_scrub(&self) {
        let shared = &self.shared;
        {
            let mut session = shared.session.borrow_mut();
            if session.phase != ScrubPhase::Scrubbing {
                return;
            }
            session.abort_flush();
        }
        shared.dispatch_pending(Instant::now());

        let target = {
            let mut session = shared.session.borrow_mut();
            session.phase = ScrubPhase::Finishing;
            session.last_target
        };
        let target = shared
            .metadata
            .clamp_position(target.unwrap_or_else(|| shared.engine.current_time()));

        let completion = match shared.queue.submit_and_notify(target, SeekMode::Accurate) {
            Ok(completion) => Some(completion),
            Err(err) => {
                log::debug!("final scrub seek to {:.3}s dropped: {}", target, err);
                None
            }
        };

        let weak: Weak<ScrubShared> = Rc::downgrade(shared);
        let finishing = tokio::task::spawn_local(async move {
            if let Some(completion) = completion {
                // Outcome already logged by the queue.
                let _ = completion.await;
            }
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let resume = {
                let mut session = shared.session.borrow_mut();
                drop(session.finishing.take());
                session.phase = ScrubPhase::Idle;
                session.last_sample = None;
                session.was_playing
            };
            if resume {
                (shared.on_resume)();
            }
        });
        shared.session.borrow_mut().finishing = Some(finishing);
    }

    /// Drops any pending work without resuming playback.
    pub fn cancel(&self) {
        let mut session = self.shared.session.borrow_mut();
        session.abort_flush();
        session.abort_finishing();
        session.pending = None;
        session.last_sample = None;
        session.phase = ScrubPhase::Idle;
    }

    #[must_use]
    pub fn is_scrubbing(&self) -> bool {
        self.shared.session.borrow().phase == ScrubPhase::Scrubbing
    }

    #[must_use]
    pub fn is_finishing(&self) -> bool {
        self.shared.session.borrow().phase == ScrubPhase::Finishing
    }

    /// Playback intent sampled at the start of the current or last gesture.
    #[must_use]
    pub fn was_playing_before_scrub(&self) -> bool {
        self.shared.session.borrow().was_playing
    }

    /// Number of fast seeks handed to the queue so far.
    #[must_use]
    pub fn dispatched_count(&self) -> usize {
        self.shared.session.borrow().dispatched
    }

    /// Media duration the dispatcher clamps targets to.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.shared.metadata.duration_secs
    }
}

impl Drop for ScrubDispatcher {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ScrubDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.shared.session.borrow();
        f.debug_struct("ScrubDispatcher")
            .field("phase", &session.phase)
            .field("pending", &session.pending)
            .field("dispatched", &session.dispatched)
            .finish()
    }
}
