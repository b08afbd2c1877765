// SPDX-License-Identifier: MPL-2.0
//! Shared fixtures for integration tests.
//!
//! [`RecordingEngine`] is a scripted [`MediaEngine`] that records every call
//! with paused-clock timestamps.

#![allow(dead_code)]

use futures_util::FutureExt;
use preview_coord::application::port::{EngineFuture, MediaEngine};
use preview_coord::domain::error::EngineError;
use preview_coord::domain::media::{MediaMetadata, MediaSource, TrackInfo};
use preview_coord::domain::video::SeekMode;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekRecord {
    pub position: f64,
    pub mode: SeekMode,
    pub started_at: Instant,
    pub finished_at: Instant,
}

struct EngineState {
    playing: Cell<bool>,
    position: Cell<f64>,
    volume: Cell<f32>,
    metadata: Cell<Option<MediaMetadata>>,
    load_result: RefCell<Result<MediaMetadata, EngineError>>,
    load_delay: Cell<Duration>,
    seek_latency: Cell<Duration>,
    seeks: RefCell<Vec<SeekRecord>>,
    in_flight: Cell<usize>,
    max_in_flight: Cell<usize>,
    loads: Cell<usize>,
    plays: Cell<usize>,
    pauses: Cell<usize>,
    closes: Cell<usize>,
}

/// Scripted engine; clones share state.
#[derive(Clone)]
pub struct RecordingEngine {
    state: Rc<EngineState>,
}

impl RecordingEngine {
    pub fn new(metadata: MediaMetadata) -> Self {
        Self::with_load_result(Ok(metadata))
    }

    pub fn failing(error: EngineError) -> Self {
        Self::with_load_result(Err(error))
    }

    fn with_load_result(load_result: Result<MediaMetadata, EngineError>) -> Self {
        Self {
            state: Rc::new(EngineState {
                playing: Cell::new(false),
                position: Cell::new(0.0),
                volume: Cell::new(1.0),
                metadata: Cell::new(None),
                load_result: RefCell::new(load_result),
                load_delay: Cell::new(Duration::ZERO),
                seek_latency: Cell::new(Duration::ZERO),
                seeks: RefCell::new(Vec::new()),
                in_flight: Cell::new(0),
                max_in_flight: Cell::new(0),
                loads: Cell::new(0),
                plays: Cell::new(0),
                pauses: Cell::new(0),
                closes: Cell::new(0),
            }),
        }
    }

    pub fn with_load_delay(self, delay: Duration) -> Self {
        self.state.load_delay.set(delay);
        self
    }

    pub fn with_seek_latency(self, latency: Duration) -> Self {
        self.state.seek_latency.set(latency);
        self
    }

    pub fn handle(&self) -> Rc<dyn MediaEngine> {
        Rc::new(self.clone())
    }

    pub fn set_playing(&self, playing: bool) {
        self.state.playing.set(playing);
    }

    pub fn seeks(&self) -> Vec<SeekRecord> {
        self.state.seeks.borrow().clone()
    }

    pub fn fast_seeks(&self) -> Vec<SeekRecord> {
        self.seeks_with(SeekMode::Fast)
    }

    pub fn accurate_seeks(&self) -> Vec<SeekRecord> {
        self.seeks_with(SeekMode::Accurate)
    }

    fn seeks_with(&self, mode: SeekMode) -> Vec<SeekRecord> {
        self.seeks().into_iter().filter(|s| s.mode == mode).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.get()
    }

    pub fn load_count(&self) -> usize {
        self.state.loads.get()
    }

    pub fn play_count(&self) -> usize {
        self.state.plays.get()
    }

    pub fn pause_count(&self) -> usize {
        self.state.pauses.get()
    }

    pub fn close_count(&self) -> usize {
        self.state.closes.get()
    }
}

impl MediaEngine for RecordingEngine {
    fn load(&self, _source: &MediaSource) -> EngineFuture<MediaMetadata> {
        let state = Rc::clone(&self.state);
        state.loads.set(state.loads.get() + 1);
        async move {
            let delay = state.load_delay.get();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let result = state.load_result.borrow().clone();
            if let Ok(metadata) = &result {
                state.metadata.set(Some(*metadata));
            }
            result
        }
        .boxed_local()
    }

    fn play(&self) {
        self.state.plays.set(self.state.plays.get() + 1);
        self.state.playing.set(true);
    }

    fn pause(&self) {
        self.state.pauses.set(self.state.pauses.get() + 1);
        self.state.playing.set(false);
    }

    fn is_playing(&self) -> bool {
        self.state.playing.get()
    }

    fn seek(&self, position_secs: f64, mode: SeekMode) -> EngineFuture<()> {
        let state = Rc::clone(&self.state);
        async move {
            let started_at = Instant::now();
            state.in_flight.set(state.in_flight.get() + 1);
            state
                .max_in_flight
                .set(state.max_in_flight.get().max(state.in_flight.get()));

            let latency = state.seek_latency.get();
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            state.in_flight.set(state.in_flight.get() - 1);
            state.position.set(position_secs);
            state.seeks.borrow_mut().push(SeekRecord {
                position: position_secs,
                mode,
                started_at,
                finished_at: Instant::now(),
            });
            Ok(())
        }
        .boxed_local()
    }

    fn current_time(&self) -> f64 {
        self.state.position.get()
    }

    fn metadata(&self) -> Option<MediaMetadata> {
        self.state.metadata.get()
    }

    fn volume(&self) -> f32 {
        self.state.volume.get()
    }

    fn set_volume(&self, volume: f32) {
        self.state.volume.set(volume);
    }

    fn audio_tracks(&self) -> Vec<TrackInfo> {
        vec![
            TrackInfo {
                index: 0,
                title: None,
                language: Some("en".to_string()),
            },
            TrackInfo {
                index: 1,
                title: Some("Commentary".to_string()),
                language: None,
            },
        ]
    }

    fn subtitle_tracks(&self) -> Vec<TrackInfo> {
        Vec::new()
    }

    fn select_audio_track(&self, index: usize) -> EngineFuture<()> {
        async move {
            if index < 2 {
                Ok(())
            } else {
                Err(EngineError::TrackUnavailable(index))
            }
        }
        .boxed_local()
    }

    fn select_subtitle_track(&self, index: Option<usize>) -> EngineFuture<()> {
        async move {
            match index {
                None => Ok(()),
                Some(index) => Err(EngineError::TrackUnavailable(index)),
            }
        }
        .boxed_local()
    }

    fn close(&self) {
        self.state.closes.set(self.state.closes.get() + 1);
        self.state.playing.set(false);
    }
}

/// Routes `log` output through the test harness (`RUST_LOG=debug`).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs `future` on a fresh [`LocalSet`].
pub async fn local<F: Future>(future: F) -> F::Output {
    init_logging();
    LocalSet::new().run_until(future).await
}

/// Lets every ready local task run without advancing the clock.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// Sleeps on the paused clock, letting timers and tasks run.
pub async fn wait(duration: Duration) {
    tokio::time::sleep(duration).await;
}
