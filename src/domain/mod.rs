// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core coordination rules with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`EngineError`](error::EngineError),
//!   [`ScrubError`](error::ScrubError))
//! - [`media`]: Media types ([`MediaSource`](media::MediaSource),
//!   [`MediaMetadata`](media::MediaMetadata), [`TrackInfo`](media::TrackInfo))
//! - [`preview`]: Preview coordination rules ([`LifecycleState`](preview::LifecycleState),
//!   [`ScrubThrottleTable`](preview::ScrubThrottleTable), [`Size`](preview::Size))
//! - [`video`]: Playback value objects ([`SeekMode`](video::SeekMode),
//!   [`Volume`](video::Volume))

pub mod error;
pub mod media;
pub mod preview;
pub mod video;
