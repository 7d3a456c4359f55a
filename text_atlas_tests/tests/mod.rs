// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `text_atlas`.
//!
//! - The `util` module contains glyph factories and geometry checks shared by the tests.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so the helpers only need to be defined once.
//! - Tests are grouped by topic: `atlas` for a single tier, `text_atlas` for the two-tier
//!   composition, `invariants` for properties that must hold for any input, `raster` for
//!   pixels drawn from the font fixtures in `assets/`.
//! - For test naming, put the topic first, e.g. `atlas_rejects_empty` rather than
//!   `rejects_empty_atlas`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod atlas;
mod util;
