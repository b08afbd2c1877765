// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that engine adapters implement.
//! These traits use only domain types, ensuring the coordination core remains
//! independent of concrete decode pipelines.
//!
//! # Available Ports
//!
//! - [`engine`]: Media load, playback, seeking and teardown
//!
//! # Design Notes
//!
//! - Traits are **not** `Send`: every call happens on the coordination context
//! - Long-running operations return `'static` local futures so they can be
//!   awaited from spawned local tasks without borrowing the engine
//! - Methods return `Result` with domain error types

pub mod engine;

// Re-export main types for convenience
pub use engine::{EngineFuture, MediaEngine};
