// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text Atlas packs rasterized glyphs into fixed-size texture pages and locates them afterwards.
//!
//! A [`TextAtlas`] is built once from a [`GlyphSource`]: glyphs without intrinsic color go into
//! an alpha-only *mask* [`Atlas`], glyphs whose typeface carries color go into a full-color
//! atlas. Inside each atlas, glyphs are packed page by page with a [`RectanglePack`], batched
//! into one [`TextRun`] per paint style, and every page is drawn once onto a surface provided
//! by a [`RenderContext`]. After construction the atlas is frozen and answers
//! [`TextAtlas::locator`] queries with an [`AtlasLocator`]: a page index plus the glyph's
//! rectangle within that page, in device pixels.
//!
//! Page indices form one contiguous space: mask pages come first, color pages follow.
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//! - `tiny_skia` (enabled by default): A CPU [`RenderContext`] built on tiny-skia, drawing glyph
//!   outlines extracted with Skrifa.
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use text_atlas::peniko::kurbo::Rect;
//! use text_atlas::renderers::recording::RecordingContext;
//! use text_atlas::{Font, Glyph, GlyphSource, TextAtlas, TextGlyphs, TextStyle, Typeface};
//!
//! let font = Font::new(Arc::new(Typeface::new(1, false)), 12.0);
//! let glyphs = (0..3)
//!     .map(|id| Glyph::new(id, font.clone(), Rect::new(0.0, -10.0, 8.0, 0.0)))
//!     .collect();
//! let source = TextGlyphs::new(7, glyphs, 1.0);
//!
//! let mut context = RecordingContext::new(1024);
//! let atlas = TextAtlas::new(&source, &mut context, 2.0).unwrap();
//!
//! let locator = atlas.locator(&source.mask_glyphs()[1], TextStyle::Fill).unwrap();
//! assert_eq!(locator.page_index, 0);
//! assert!(atlas.atlas_texture(locator.page_index).is_some());
//! ```
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use peniko;
pub use peniko::kurbo;

mod atlas;
mod backend;
mod error;
mod glyph;
mod pack;
mod page;
mod style;
mod text_atlas;

pub mod renderers;

pub use atlas::{Atlas, AtlasConfig, AtlasLocator, MAX_FONT_SIZE};
pub use backend::{Canvas, RenderContext, Surface, Texture, TextureOf};
pub use error::{Error, ErrorKind};
pub use glyph::{Font, Glyph, GlyphKey, GlyphSource, TextGlyphs, TextStyle, Typeface};
pub use pack::{DEFAULT_PADDING, RectanglePack};
pub use page::{Page, PageLayout, TextRun, build_pages, draw_text_runs};
pub use style::{GlyphPaint, StyleGrouper, StyleKey};
pub use text_atlas::TextAtlas;
