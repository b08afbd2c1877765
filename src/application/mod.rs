// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports the coordination core depends on.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Engine adapters implement application layer ports
//! - [`crate::preview`] drives the ports
//!
//! # Example
//!
//! ```ignore
//! use preview_coord::application::port::MediaEngine;
//!
//! // An adapter wraps the real decode/render pipeline
//! struct PipelineEngine { /* ... */ }
//! impl MediaEngine for PipelineEngine { /* ... */ }
//! ```

pub mod port;
