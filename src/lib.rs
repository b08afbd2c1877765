// SPDX-License-Identifier: MPL-2.0
//! `preview_coord` coordinates many concurrent media previews.
//!
//! A host creates one [`preview::PreviewInstance`] per inspected file. The
//! crate makes sure that at most one of them plays at a time, drives each
//! instance through a visibility-based lifecycle, and turns interactive
//! scrubbing into a throttled, strictly ordered stream of seeks.
//!
//! Decoding itself is delegated to an engine implementing
//! [`application::port::MediaEngine`].
//!
//! All coordination types are `!Send` and must live on a single
//! coordination context, typically a [`tokio::task::LocalSet`].

#![doc(html_root_url = "https://docs.rs/preview_coord/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod preview;
