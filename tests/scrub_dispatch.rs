// SPDX-License-Identifier: MPL-2.0
//! Integration tests for scrub throttling and the end-of-gesture seek.
//!
//! All tests run on a paused tokio clock, so sample spacing and seek
//! latencies are deterministic.

mod common;

use common::{local, settle, wait, RecordingEngine};
use preview_coord::application::port::MediaEngine;
use preview_coord::domain::media::MediaMetadata;
use preview_coord::domain::video::SeekMode;
use preview_coord::preview::{PreviewSettings, ScrubDispatcher};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const SLOWEST_INTERVAL: f64 = 1.0 / 15.0;

fn long_clip() -> MediaMetadata {
    MediaMetadata::new(600.0, 1920, 1080)
}

fn dispatcher_for(engine: &RecordingEngine) -> (ScrubDispatcher, Rc<Cell<usize>>) {
    let resumed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&resumed);
    let playback = engine.clone();
    let dispatcher = ScrubDispatcher::new(
        engine.handle(),
        long_clip(),
        &PreviewSettings::default(),
        move || {
            counter.set(counter.get() + 1);
            playback.play();
        },
    )
    .expect("clip is scrubbable");
    (dispatcher, resumed)
}

#[tokio::test(start_paused = true)]
async fn slow_drag_dispatches_every_sample() {
    local(async {
        let engine = RecordingEngine::new(long_clip());
        let (dispatcher, _) = dispatcher_for(&engine);

        dispatcher.begin_scrub();
        // 0.1 timeline seconds every 100 ms: velocity 1.0
        for step in 0..10 {
            dispatcher.scrub(10.0 + f64::from(step) * 0.1);
            settle().await;
            wait(Duration::from_millis(100)).await;
        }

        let fast = engine.fast_seeks();
        assert_eq!(fast.len(), 10);
        assert_eq!(dispatcher.dispatched_count(), 10);
        for (step, seek) in fast.iter().enumerate() {
            let expected = 10.0 + step as f64 * 0.1;
            assert!((seek.position - expected).abs() < 1e-9);
        }
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn fast_fling_is_spaced_by_the_slowest_interval() {
    local(async {
        let engine = RecordingEngine::new(long_clip());
        let (dispatcher, _) = dispatcher_for(&engine);

        dispatcher.begin_scrub();
        // 0.5 timeline seconds every 2 ms: velocity 250
        let mut last = 0.0;
        for step in 0..100 {
            last = f64::from(step) * 0.5;
            dispatcher.scrub(last);
            wait(Duration::from_millis(2)).await;
        }
        dispatcher.end_scrub();
        settle().await;
        wait(Duration::from_millis(10)).await;

        let fast = engine.fast_seeks();
        assert!(fast.len() >= 3, "expected periodic flushes, got {}", fast.len());
        assert!(fast.len() < 10, "fling was not throttled: {} seeks", fast.len());

        // The end-of-gesture flush bypasses the throttle; all others are spaced.
        let throttled = &fast[..fast.len() - 1];
        let min_gap = Duration::from_secs_f64(SLOWEST_INTERVAL);
        for pair in throttled.windows(2) {
            let gap = pair[1].started_at - pair[0].started_at;
            assert!(
                gap + Duration::from_micros(1) >= min_gap,
                "seeks only {:?} apart",
                gap
            );
        }

        let final_count = fast.iter().filter(|s| s.position == last).count();
        assert_eq!(final_count, 1, "last sample must be dispatched exactly once");
        assert_eq!(fast.last().map(|s| s.position), Some(last));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn fling_past_the_end_is_still_throttled() {
    local(async {
        let engine = RecordingEngine::new(long_clip());
        let (dispatcher, _) = dispatcher_for(&engine);

        dispatcher.begin_scrub();
        // Raw positions beyond the 600 s duration, 10 s every 2 ms.
        for step in 0..50 {
            dispatcher.scrub(700.0 + f64::from(step) * 10.0);
            wait(Duration::from_millis(2)).await;
        }
        wait(Duration::from_millis(200)).await;

        let fast = engine.fast_seeks();
        assert!(!fast.is_empty());
        assert!(fast.len() <= 3, "overshoot was not throttled: {} seeks", fast.len());
        assert!(fast.iter().all(|seek| seek.position == 600.0));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn end_scrub_issues_one_accurate_seek_after_all_fast_seeks() {
    local(async {
        let engine =
            RecordingEngine::new(long_clip()).with_seek_latency(Duration::from_millis(30));
        engine.set_playing(true);
        let (dispatcher, resumed) = dispatcher_for(&engine);

        dispatcher.begin_scrub();
        assert!(!engine.is_playing());
        for step in 0..20 {
            dispatcher.scrub(f64::from(step) * 3.0);
            wait(Duration::from_millis(5)).await;
        }
        dispatcher.end_scrub();
        assert!(dispatcher.is_finishing());
        assert_eq!(resumed.get(), 0);

        wait(Duration::from_secs(2)).await;

        let seeks = engine.seeks();
        let accurate = engine.accurate_seeks();
        assert_eq!(accurate.len(), 1);
        let final_seek = seeks.last().copied().expect("seeks were issued");
        assert_eq!(final_seek.mode, SeekMode::Accurate);
        assert_eq!(final_seek.position, 57.0);
        for fast in engine.fast_seeks() {
            assert!(fast.finished_at <= final_seek.started_at);
        }
        assert_eq!(engine.max_in_flight(), 1);

        assert!(!dispatcher.is_finishing());
        assert_eq!(resumed.get(), 1);
        assert!(engine.is_playing());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn paused_playback_stays_paused_after_scrub() {
    local(async {
        let engine = RecordingEngine::new(long_clip());
        let (dispatcher, resumed) = dispatcher_for(&engine);

        dispatcher.begin_scrub();
        assert!(!dispatcher.was_playing_before_scrub());
        dispatcher.scrub(42.0);
        dispatcher.end_scrub();
        wait(Duration::from_millis(50)).await;

        assert_eq!(engine.accurate_seeks().len(), 1);
        assert_eq!(resumed.get(), 0);
        assert_eq!(engine.play_count(), 0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn restart_during_finishing_keeps_original_intent() {
    local(async {
        let engine =
            RecordingEngine::new(long_clip()).with_seek_latency(Duration::from_millis(50));
        engine.set_playing(true);
        let (dispatcher, resumed) = dispatcher_for(&engine);

        dispatcher.begin_scrub();
        dispatcher.scrub(100.0);
        dispatcher.end_scrub();
        assert!(dispatcher.is_finishing());

        // Engine is paused now; a fresh sample would record "not playing".
        dispatcher.begin_scrub();
        assert!(dispatcher.is_scrubbing());
        assert!(dispatcher.was_playing_before_scrub());
        wait(Duration::from_millis(500)).await;
        assert_eq!(resumed.get(), 0, "cancelled finishing must not resume");

        dispatcher.scrub(200.0);
        dispatcher.end_scrub();
        wait(Duration::from_secs(1)).await;

        assert_eq!(resumed.get(), 1);
        let accurate = engine.accurate_seeks();
        assert_eq!(accurate.len(), 2);
        assert_eq!(accurate[1].position, 200.0);
        assert_eq!(engine.max_in_flight(), 1);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn superseded_flush_never_dispatches_a_stale_target() {
    local(async {
        let engine = RecordingEngine::new(long_clip());
        let (dispatcher, _) = dispatcher_for(&engine);

        dispatcher.begin_scrub();
        dispatcher.scrub(0.0);
        settle().await;
        wait(Duration::from_millis(1)).await;
        dispatcher.scrub(50.0);
        wait(Duration::from_millis(1)).await;
        dispatcher.scrub(80.0);
        wait(Duration::from_millis(200)).await;

        let positions: Vec<f64> = engine.fast_seeks().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 80.0]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn dropping_the_dispatcher_cancels_scheduled_work() {
    local(async {
        let engine = RecordingEngine::new(long_clip());
        let (dispatcher, resumed) = dispatcher_for(&engine);
        engine.set_playing(true);

        dispatcher.begin_scrub();
        dispatcher.scrub(0.0);
        settle().await;
        dispatcher.scrub(300.0);
        drop(dispatcher);
        wait(Duration::from_millis(500)).await;

        assert_eq!(engine.fast_seeks().len(), 1);
        assert!(engine.accurate_seeks().is_empty());
        assert_eq!(resumed.get(), 0);
    })
    .await;
}

#[test]
fn zero_and_non_finite_durations_never_engage() {
    for duration in [0.0, f64::NAN, f64::INFINITY] {
        let engine = RecordingEngine::new(MediaMetadata::new(duration, 640, 360));
        let result = ScrubDispatcher::new(
            engine.handle(),
            MediaMetadata::new(duration, 640, 360),
            &PreviewSettings::default(),
            || {},
        );
        assert!(result.is_err());
    }
}
