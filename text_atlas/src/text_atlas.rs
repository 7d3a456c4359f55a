// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mask and color atlases behind one page index space.

use core::fmt::{Debug, Formatter};

use crate::atlas::{Atlas, AtlasConfig, AtlasLocator};
use crate::backend::{RenderContext, Surface, Texture};
use crate::error::{Error, ErrorKind};
use crate::glyph::{Glyph, GlyphSource, TextStyle};

/// The atlases for one piece of content: a mask tier and an optional color tier.
///
/// Page indices are shared between the tiers. Indices below the mask page count address mask
/// pages; the color pages follow, so color page `i` has index `mask_page_count + i`.
pub struct TextAtlas<T> {
    content_id: u64,
    mask_atlas: Atlas<T>,
    color_atlas: Option<Atlas<T>>,
    scale: f32,
}

impl<T: Texture> TextAtlas<T> {
    /// Builds the atlases for `source`, drawn at `scale` times the source's max scale.
    ///
    /// Pages are limited to the context's maximum texture size.
    pub fn new<S, C>(source: &S, context: &mut C, scale: f32) -> Result<Self, Error>
    where
        S: GlyphSource + ?Sized,
        C: RenderContext,
        C::Surface: Surface<Texture = T>,
    {
        let config = AtlasConfig::new(context.max_texture_size());
        Self::with_config(source, context, scale, config)
    }

    /// Like [`TextAtlas::new`], with explicit packing limits.
    ///
    /// `config.max_texture_size` is clamped to what the context supports.
    ///
    /// The mask tier must build for the whole atlas to succeed. The color tier is left out
    /// when the source has no color glyphs or they are too large to cache, but a failed
    /// surface allocation in either tier fails the whole atlas.
    pub fn with_config<S, C>(
        source: &S,
        context: &mut C,
        scale: f32,
        mut config: AtlasConfig,
    ) -> Result<Self, Error>
    where
        S: GlyphSource + ?Sized,
        C: RenderContext,
        C::Surface: Surface<Texture = T>,
    {
        config.max_texture_size = config.max_texture_size.min(context.max_texture_size());
        let scale = scale * source.max_scale();
        let mask_atlas = Atlas::new(context, source.mask_glyphs(), scale, &config, true)?;
        let color_atlas = match Atlas::new(context, source.color_glyphs(), scale, &config, false)
        {
            Ok(atlas) => Some(atlas),
            Err(err) if err.kind() == ErrorKind::SurfaceAllocation => return Err(err),
            Err(err) => {
                if err.kind() != ErrorKind::Empty {
                    log::debug!("leaving out color glyph atlas: {err}");
                }
                None
            }
        };
        Ok(Self {
            content_id: source.id(),
            mask_atlas,
            color_atlas,
            scale,
        })
    }

    /// Bytes of texture memory held by both tiers.
    pub fn memory_usage(&self) -> usize {
        self.mask_atlas.memory_usage()
            + self.color_atlas.as_ref().map_or(0, Atlas::memory_usage)
    }
}

impl<T> TextAtlas<T> {
    /// Finds `glyph` as drawn in `style`, with the page index in the shared index space.
    ///
    /// Glyphs whose typeface has color are looked up in the color tier.
    pub fn locator(&self, glyph: &Glyph, style: TextStyle) -> Option<AtlasLocator> {
        if glyph.has_color() {
            let mut locator = self.color_atlas.as_ref()?.locator(glyph, style)?;
            locator.page_index += self.mask_atlas.page_count();
            Some(locator)
        } else {
            self.mask_atlas.locator(glyph, style)
        }
    }

    /// The texture of the page at `page_index` in the shared index space.
    pub fn atlas_texture(&self, page_index: usize) -> Option<&T> {
        let mask_pages = self.mask_atlas.page_count();
        if page_index < mask_pages {
            self.mask_atlas.texture(page_index)
        } else {
            self.color_atlas.as_ref()?.texture(page_index - mask_pages)
        }
    }

    /// The id of the glyph source this atlas was built from.
    #[inline]
    pub fn content_id(&self) -> u64 {
        self.content_id
    }

    /// The scale pages were drawn at: the requested scale times the source's max scale.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The mask tier.
    #[inline]
    pub fn mask_atlas(&self) -> &Atlas<T> {
        &self.mask_atlas
    }

    /// The color tier, if the content has color glyphs.
    #[inline]
    pub fn color_atlas(&self) -> Option<&Atlas<T>> {
        self.color_atlas.as_ref()
    }

    /// Total number of pages across both tiers.
    pub fn page_count(&self) -> usize {
        self.mask_atlas.page_count() + self.color_atlas.as_ref().map_or(0, Atlas::page_count)
    }
}

impl<T> Debug for TextAtlas<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextAtlas")
            .field("content_id", &self.content_id)
            .field("mask_atlas", &self.mask_atlas)
            .field("color_atlas", &self.color_atlas)
            .field("scale", &self.scale)
            .finish()
    }
}
