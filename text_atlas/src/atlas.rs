// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single tier of glyph pages and the locators into them.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use hashbrown::HashMap;

use crate::backend::{RenderContext, Surface, Texture};
use crate::error::Error;
use crate::glyph::{Glyph, GlyphKey, TextStyle};
use crate::kurbo::Rect;
use crate::pack::DEFAULT_PADDING;
use crate::page::{Page, build_pages, draw_text_runs};

/// Largest scaled font size an atlas accepts.
///
/// Text bigger than this is better drawn directly as vector paths than cached in pages that
/// would mostly hold a handful of huge glyphs.
pub const MAX_FONT_SIZE: f32 = 256.0;

/// Limits that govern how an atlas is packed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasConfig {
    /// Largest page side length in device pixels.
    pub max_texture_size: u32,
    /// Spacing kept between glyphs, in device pixels.
    pub padding: u32,
    /// Largest accepted font size after scaling, checked against the first glyph.
    pub max_font_size: f32,
}

impl AtlasConfig {
    /// Creates a config for pages up to `max_texture_size` pixels on a side, with
    /// [`DEFAULT_PADDING`] and [`MAX_FONT_SIZE`].
    pub fn new(max_texture_size: u32) -> Self {
        Self {
            max_texture_size,
            padding: DEFAULT_PADDING,
            max_font_size: MAX_FONT_SIZE,
        }
    }
}

/// Where a glyph image lives within an atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasLocator {
    /// Index of the page holding the glyph.
    pub page_index: usize,
    /// The glyph's rectangle within the page, in device pixels.
    pub location: Rect,
}

/// Pages of glyph images drawn with one tier's surface format, plus locators into them.
///
/// Built in one pass by [`Atlas::new`] and immutable afterwards.
pub struct Atlas<T> {
    pages: Vec<Page<T>>,
    locators: HashMap<GlyphKey, AtlasLocator>,
    alpha_only: bool,
}

impl<T: Texture> Atlas<T> {
    /// Packs `glyphs` into pages and draws every page with `context`.
    ///
    /// `scale` converts local glyph units into device pixels. With `alpha_only`, pages are
    /// allocated as coverage-only surfaces.
    ///
    /// Fails if there are no glyphs, if the first glyph's font size times `scale` exceeds
    /// `config.max_font_size`, if a glyph cannot fit an empty page, or if the context cannot
    /// allocate a page.
    pub fn new<C>(
        context: &mut C,
        glyphs: &[Glyph],
        scale: f32,
        config: &AtlasConfig,
        alpha_only: bool,
    ) -> Result<Self, Error>
    where
        C: RenderContext,
        C::Surface: Surface<Texture = T>,
    {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::invalid_scale(scale));
        }
        let Some(first) = glyphs.first() else {
            return Err(Error::empty());
        };
        let scaled_size = first.font.size * scale;
        if scaled_size > config.max_font_size {
            log::warn!(
                "not building glyph atlas: font size {scaled_size} exceeds {}",
                config.max_font_size
            );
            return Err(Error::glyph_too_large(first.id, scaled_size));
        }

        let (layouts, locators) = build_pages(glyphs, scale, config)?;
        let mut pages = Vec::with_capacity(layouts.len());
        for (index, layout) in layouts.into_iter().enumerate() {
            let (width, height) = (layout.width(), layout.height());
            let Some(mut surface) = context.make_surface(width, height, alpha_only) else {
                log::warn!("failed to allocate {width}x{height} surface for atlas page {index}");
                return Err(Error::surface_allocation(index, width, height));
            };
            draw_text_runs(surface.canvas(), layout.runs(), scale);
            let Some(texture) = surface.into_texture() else {
                log::warn!("failed to retrieve texture for atlas page {index}");
                return Err(Error::surface_allocation(index, width, height));
            };
            pages.push(Page::new(layout, texture));
        }

        log::debug!(
            "built {} glyph atlas: {} glyphs on {} pages",
            if alpha_only { "mask" } else { "color" },
            locators.len(),
            pages.len()
        );
        Ok(Self {
            pages,
            locators,
            alpha_only,
        })
    }

    /// Bytes of texture memory held by all pages.
    pub fn memory_usage(&self) -> usize {
        self.pages.iter().map(|page| page.texture().memory_usage()).sum()
    }
}

impl<T> Atlas<T> {
    /// Finds `glyph` as drawn in `style`.
    pub fn locator(&self, glyph: &Glyph, style: TextStyle) -> Option<AtlasLocator> {
        self.locators.get(&glyph.atlas_key(style)).copied()
    }

    /// The pages of this atlas, in index order.
    #[inline]
    pub fn pages(&self) -> &[Page<T>] {
        &self.pages
    }

    /// The page at `index`.
    #[inline]
    pub fn page(&self, index: usize) -> Option<&Page<T>> {
        self.pages.get(index)
    }

    /// The texture of the page at `index`.
    #[inline]
    pub fn texture(&self, index: usize) -> Option<&T> {
        self.pages.get(index).map(Page::texture)
    }

    /// The number of pages.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The number of distinct glyph images.
    #[inline]
    pub fn glyph_count(&self) -> usize {
        self.locators.len()
    }

    /// Whether pages were drawn as coverage-only surfaces.
    #[inline]
    pub fn is_alpha_only(&self) -> bool {
        self.alpha_only
    }
}

impl<T> Debug for Atlas<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Atlas")
            .field("pages", &self.pages.len())
            .field("glyphs", &self.locators.len())
            .field("alpha_only", &self.alpha_only)
            .finish_non_exhaustive()
    }
}
