// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting a glyph list into atlas pages.

use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::atlas::{AtlasConfig, AtlasLocator};
use crate::backend::Canvas;
use crate::error::Error;
use crate::glyph::{Font, Glyph, GlyphKey};
use crate::kurbo::{Affine, Point, Rect};
use crate::pack::RectanglePack;
use crate::style::{GlyphPaint, StyleGrouper};

#[cfg(not(feature = "std"))]
use crate::kurbo::common::FloatFuncs as _;

/// A batch of glyphs sharing one paint and one font, drawn with a single call.
#[derive(Clone, Debug)]
pub struct TextRun {
    glyph_ids: Vec<u32>,
    positions: Vec<Point>,
    font: Font,
    paint: GlyphPaint,
}

impl TextRun {
    pub(crate) fn new(glyph: &Glyph) -> Self {
        Self {
            glyph_ids: Vec::new(),
            positions: Vec::new(),
            font: glyph.font.clone(),
            paint: GlyphPaint::from_glyph(glyph),
        }
    }

    pub(crate) fn push(&mut self, glyph_id: u32, position: Point) {
        self.glyph_ids.push(glyph_id);
        self.positions.push(position);
    }

    /// The glyphs of this run, in packing order.
    #[inline]
    pub fn glyph_ids(&self) -> &[u32] {
        &self.glyph_ids
    }

    /// Draw offset of each glyph, in unscaled page units.
    #[inline]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// The font shared by the run.
    #[inline]
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// The paint shared by the run.
    #[inline]
    pub fn paint(&self) -> &GlyphPaint {
        &self.paint
    }
}

/// A sealed page that has not been drawn yet.
#[derive(Clone, Debug)]
pub struct PageLayout {
    pub(crate) runs: Vec<TextRun>,
    width: u32,
    height: u32,
}

impl PageLayout {
    /// Width of the page texture in device pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the page texture in device pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The draw runs of this page.
    #[inline]
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Total number of glyphs across all runs.
    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|run| run.glyph_ids.len()).sum()
    }
}

/// A drawn atlas page, owning its texture.
#[derive(Debug)]
pub struct Page<T> {
    runs: Vec<TextRun>,
    width: u32,
    height: u32,
    texture: T,
}

impl<T> Page<T> {
    pub(crate) fn new(layout: PageLayout, texture: T) -> Self {
        Self {
            runs: layout.runs,
            width: layout.width,
            height: layout.height,
            texture,
        }
    }

    /// Width of the page texture in device pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the page texture in device pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The draw runs the page was rendered from.
    #[inline]
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// The texture holding the page's glyph images.
    #[inline]
    pub fn texture(&self) -> &T {
        &self.texture
    }

    /// Total number of glyphs across all runs.
    pub fn glyph_count(&self) -> usize {
        self.runs.iter().map(|run| run.glyph_ids.len()).sum()
    }
}

/// Largest page side in unscaled units; keeps packer sums of two extents within `u32`.
const MAX_PAGE_UNITS: u32 = u32::MAX / 4;

/// Packs `glyphs` into pages no larger than `config.max_texture_size` once scaled.
///
/// Glyphs are processed in order. When placing a glyph would grow the current page beyond the
/// limit, the page is sealed as it stood before that glyph and the glyph starts the next page.
/// Returns the sealed pages and a locator for every glyph, keyed by its atlas key. A glyph whose
/// atlas key was already placed is skipped, so it is drawn once.
#[expect(
    clippy::cast_possible_truncation,
    reason = "page and glyph extents are bounded by the maximum texture size"
)]
pub fn build_pages(
    glyphs: &[Glyph],
    scale: f32,
    config: &AtlasConfig,
) -> Result<(Vec<PageLayout>, HashMap<GlyphKey, AtlasLocator>), Error> {
    let max_page_size =
        ((config.max_texture_size as f32 / scale).floor() as u32).min(MAX_PAGE_UNITS);
    let mut pack = RectanglePack::with_padding(config.padding, scale);
    let mut grouper = StyleGrouper::new();
    let mut pages = Vec::new();
    let mut locators = HashMap::with_capacity(glyphs.len());
    let mut page_glyphs = 0_usize;

    for glyph in glyphs {
        let key = glyph.atlas_key(glyph.style);
        if locators.contains_key(&key) {
            continue;
        }
        let stroke = if glyph.style.strokes() {
            glyph.stroke_width.ceil() as u32
        } else {
            0
        };
        // A glyph must fit between the leading and trailing padding of an empty page.
        let full_width = padded_extent(glyph.bounds.width(), stroke);
        let full_height = padded_extent(glyph.bounds.height(), stroke);
        let limit = u64::from(max_page_size).saturating_sub(2 * u64::from(pack.padding()));
        if full_width > limit || full_height > limit {
            let page_index = pages.len() + usize::from(page_glyphs > 0);
            return Err(Error::glyph_exceeds_page(
                glyph.id,
                page_index,
                u32::try_from(full_width).unwrap_or(u32::MAX),
                u32::try_from(full_height).unwrap_or(u32::MAX),
            ));
        }
        // Both extents are below `max_page_size` now.
        let (width, height) = (full_width as u32, full_height as u32);

        let (pack_width, pack_height) = (pack.width(), pack.height());
        let mut point = pack.add_rect(width, height);
        if pack.width() > max_page_size || pack.height() > max_page_size {
            if page_glyphs == 0 {
                return Err(Error::glyph_exceeds_page(
                    glyph.id,
                    pages.len(),
                    width,
                    height,
                ));
            }
            pages.push(seal(
                grouper.take_runs(),
                pack_width,
                pack_height,
                scale,
                config,
            ));
            pack.reset();
            page_glyphs = 0;
            point = pack.add_rect(width, height);
            if pack.width() > max_page_size || pack.height() > max_page_size {
                return Err(Error::glyph_exceeds_page(
                    glyph.id,
                    pages.len(),
                    width,
                    height,
                ));
            }
        }

        // The draw origin sits at the top-left of the stroked ink bounds.
        let origin_x = glyph.bounds.x0 - f64::from(stroke);
        let origin_y = glyph.bounds.y0 - f64::from(stroke);
        let (x, y) = (f64::from(point.0), f64::from(point.1));
        grouper
            .run_for(glyph)
            .push(glyph.id, Point::new(x - origin_x, y - origin_y));
        page_glyphs += 1;

        let location = Rect::from_origin_size((x, y), (f64::from(width), f64::from(height)))
            .scale_from_origin(f64::from(scale));
        locators.insert(
            key,
            AtlasLocator {
                page_index: pages.len(),
                location,
            },
        );
    }

    pages.push(seal(
        grouper.take_runs(),
        pack.width(),
        pack.height(),
        scale,
        config,
    ));
    Ok((pages, locators))
}

/// Rounded-up ink extent plus the stroke on both sides.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the float to integer cast saturates and the result is range checked"
)]
fn padded_extent(ink: f64, stroke: u32) -> u64 {
    (ink.ceil() as u64).saturating_add(2 * u64::from(stroke))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "scaled page extents are clamped to the maximum texture size"
)]
fn seal(
    runs: Vec<TextRun>,
    width: u32,
    height: u32,
    scale: f32,
    config: &AtlasConfig,
) -> PageLayout {
    // Rounding may push `floor(max / scale) * scale` a hair above `max`.
    let scaled = |extent: u32| {
        ((extent as f32 * scale).ceil() as u32).min(config.max_texture_size)
    };
    let page = PageLayout {
        runs,
        width: scaled(width),
        height: scaled(height),
    };
    log::trace!(
        "sealed atlas page: {}x{}, {} runs, {} glyphs",
        page.width,
        page.height,
        page.runs.len(),
        page.glyph_count()
    );
    page
}

/// Draws `runs` onto `canvas`, one draw call per run.
///
/// Each run is drawn under the canvas's current transform scaled by `scale`; the transform is
/// restored afterwards.
pub fn draw_text_runs<C: Canvas + ?Sized>(canvas: &mut C, runs: &[TextRun], scale: f32) {
    let total = canvas.transform();
    for run in runs {
        canvas.set_transform(total);
        canvas.concat(Affine::scale(f64::from(scale)));
        canvas.draw_glyphs(&run.glyph_ids, &run.positions, &run.font, run.paint);
    }
    canvas.set_transform(total);
}
