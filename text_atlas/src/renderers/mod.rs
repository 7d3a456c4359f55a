// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Various renderer implementation backends.

pub mod recording;

#[cfg(feature = "tiny_skia")]
pub mod tiny_skia;
