// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graphics backend an atlas draws its pages with.
//!
//! An atlas only needs three things from a backend: the largest texture it supports, a way
//! to allocate a drawable surface of a given size, and a canvas that can draw a batch of
//! glyphs under a transform. See [`renderers`](crate::renderers) for implementations.

use crate::glyph::Font;
use crate::kurbo::{Affine, Point};
use crate::style::GlyphPaint;

/// The rendering context pages are allocated from.
pub trait RenderContext {
    /// The surface type this context allocates.
    type Surface: Surface;

    /// The largest texture side length, in pixels, the backend supports.
    fn max_texture_size(&self) -> u32;

    /// Allocates a cleared surface of `width` x `height` pixels.
    ///
    /// With `alpha_only`, the surface only needs a coverage channel. Returns `None` if the
    /// backend cannot provide the surface.
    fn make_surface(&mut self, width: u32, height: u32, alpha_only: bool) -> Option<Self::Surface>;
}

/// A drawable surface whose contents end up in a texture.
pub trait Surface {
    /// The canvas drawing into this surface.
    type Canvas: Canvas + ?Sized;
    /// The texture the surface's contents are retained in.
    type Texture: Texture;

    /// The canvas drawing into this surface.
    fn canvas(&mut self) -> &mut Self::Canvas;

    /// Finishes drawing and returns the backing texture, or `None` on backend failure.
    fn into_texture(self) -> Option<Self::Texture>;
}

/// Something glyphs can be drawn onto.
pub trait Canvas {
    /// The current transform.
    fn transform(&self) -> Affine;

    /// Replaces the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Applies `transform` before the current transform.
    fn concat(&mut self, transform: Affine) {
        let current = self.transform();
        self.set_transform(current * transform);
    }

    /// Draws `glyph_ids` at `positions` with one shared font and paint.
    ///
    /// Positions are in the canvas's local coordinates, which the current transform maps to
    /// surface pixels. Both slices have the same length.
    fn draw_glyphs(
        &mut self,
        glyph_ids: &[u32],
        positions: &[Point],
        font: &Font,
        paint: GlyphPaint,
    );
}

/// A texture holding rendered atlas pages.
pub trait Texture {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// The memory the texture occupies, in bytes.
    fn memory_usage(&self) -> usize;
}

/// The texture type produced by a [`RenderContext`].
pub type TextureOf<C> = <<C as RenderContext>::Surface as Surface>::Texture;
