// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A backend that records draw calls instead of rasterizing them.
//!
//! Each page texture keeps the list of [`DrawCommand`]s issued while the page was drawn, which
//! makes it possible to inspect exactly what an atlas asked the backend to do. The context can
//! also be given a surface budget to simulate allocation failures.

use alloc::vec::Vec;

use crate::backend::{Canvas, RenderContext, Surface, Texture};
use crate::glyph::Font;
use crate::kurbo::{Affine, Point};
use crate::style::GlyphPaint;

/// A single recorded glyph batch.
///
/// The fields mirror the arguments of [`Canvas::draw_glyphs`], plus the transform in effect
/// when the call was made.
#[derive(Clone, Debug)]
pub struct DrawCommand {
    /// The canvas transform at the time of the call.
    pub transform: Affine,
    /// The glyphs drawn.
    pub glyph_ids: Vec<u32>,
    /// Local position of each glyph.
    pub positions: Vec<Point>,
    /// The font shared by the batch.
    pub font: Font,
    /// The paint shared by the batch.
    pub paint: GlyphPaint,
}

/// A [`RenderContext`] whose surfaces record draw calls.
#[derive(Clone, Debug)]
pub struct RecordingContext {
    max_texture_size: u32,
    surface_budget: Option<usize>,
    surfaces_made: usize,
}

impl RecordingContext {
    /// Creates a context supporting textures up to `max_texture_size` pixels on a side.
    pub fn new(max_texture_size: u32) -> Self {
        Self {
            max_texture_size,
            surface_budget: None,
            surfaces_made: 0,
        }
    }

    /// Limits the context to allocating `budget` surfaces in total; later requests fail.
    #[must_use]
    pub fn with_surface_budget(mut self, budget: usize) -> Self {
        self.surface_budget = Some(budget);
        self
    }

    /// The number of surfaces allocated so far.
    #[inline]
    pub fn surfaces_made(&self) -> usize {
        self.surfaces_made
    }
}

impl RenderContext for RecordingContext {
    type Surface = RecordingSurface;

    fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }

    fn make_surface(&mut self, width: u32, height: u32, alpha_only: bool) -> Option<Self::Surface> {
        if self
            .surface_budget
            .is_some_and(|budget| self.surfaces_made >= budget)
        {
            return None;
        }
        self.surfaces_made += 1;
        Some(RecordingSurface {
            width,
            height,
            alpha_only,
            canvas: RecordingCanvas::default(),
        })
    }
}

/// A surface produced by [`RecordingContext`].
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    alpha_only: bool,
    canvas: RecordingCanvas,
}

impl Surface for RecordingSurface {
    type Canvas = RecordingCanvas;
    type Texture = RecordedTexture;

    fn canvas(&mut self) -> &mut Self::Canvas {
        &mut self.canvas
    }

    fn into_texture(self) -> Option<Self::Texture> {
        Some(RecordedTexture {
            width: self.width,
            height: self.height,
            alpha_only: self.alpha_only,
            commands: self.canvas.commands,
        })
    }
}

/// A [`Canvas`] that appends every glyph batch to a command list.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    transform: Affine,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// The commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Canvas for RecordingCanvas {
    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn draw_glyphs(
        &mut self,
        glyph_ids: &[u32],
        positions: &[Point],
        font: &Font,
        paint: GlyphPaint,
    ) {
        debug_assert_eq!(glyph_ids.len(), positions.len(), "one position per glyph");
        self.commands.push(DrawCommand {
            transform: self.transform,
            glyph_ids: glyph_ids.to_vec(),
            positions: positions.to_vec(),
            font: font.clone(),
            paint,
        });
    }
}

/// The texture of a recorded page.
#[derive(Clone, Debug)]
pub struct RecordedTexture {
    width: u32,
    height: u32,
    alpha_only: bool,
    commands: Vec<DrawCommand>,
}

impl RecordedTexture {
    /// Whether the page was allocated as a coverage-only surface.
    #[inline]
    pub fn is_alpha_only(&self) -> bool {
        self.alpha_only
    }

    /// The draw calls made while drawing the page, in order.
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Texture for RecordedTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    /// One byte per pixel for alpha-only pages, four otherwise.
    fn memory_usage(&self) -> usize {
        let bytes_per_pixel = if self.alpha_only { 1 } else { 4 };
        self.width as usize * self.height as usize * bytes_per_pixel
    }
}
