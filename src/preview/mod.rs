// SPDX-License-Identifier: MPL-2.0
//! Runtime coordination of preview instances.
//!
//! - [`registry`]: process-wide exclusivity through weak references
//! - [`instance`]: per-instance visibility lifecycle and controls
//! - [`scrub`]: throttled seek dispatch for scrub gestures
//! - [`seek_queue`]: strictly ordered seek submission
//!
//! Everything here is `!Send` and runs on one coordination context, a
//! [`tokio::task::LocalSet`] driven by a current-thread runtime.

pub mod instance;
pub mod registry;
pub mod scrub;
pub mod seek_queue;
pub mod settings;
pub mod time_format;

pub use instance::PreviewInstance;
pub use registry::{InstanceRegistry, PlaybackTarget};
pub use scrub::ScrubDispatcher;
pub use seek_queue::{SeekCompletion, SeekQueue};
pub use settings::PreviewSettings;
pub use time_format::format_timestamp;
