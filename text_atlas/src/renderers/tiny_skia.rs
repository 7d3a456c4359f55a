// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A CPU backend rasterizing glyph outlines with tiny-skia.
//!
//! Mask pages are drawn into a [`Mask`], one coverage byte per pixel. Color pages are drawn
//! into a premultiplied RGBA [`Pixmap`]. Outlines are extracted with Skrifa, unhinted, from
//! the typeface's font data; glyphs of typefaces without font data draw nothing.
//!
//! On color pages, glyphs with `COLR` version 0 layers are filled layer by layer in the colors
//! of the first `CPAL` palette. Other glyphs, and strokes, are painted in opaque black. Bitmap
//! color formats (`CBDT`, `sbix`) and `COLR` version 1 paint graphs are not rendered.

use alloc::vec::Vec;

use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::raw::TableProvider;
use skrifa::raw::tables::colr::Colr;
use skrifa::raw::tables::cpal::Cpal;
use skrifa::{FontRef, GlyphId, MetadataProvider, OutlineGlyphCollection};
use tiny_skia::{Color, FillRule, Mask, Paint, Path, PathBuilder, PathStroker, Pixmap, Transform};

use crate::backend::{Canvas, RenderContext, Surface, Texture};
use crate::glyph::Font;
use crate::kurbo::{Affine, Point};
use crate::style::GlyphPaint;

/// A [`RenderContext`] allocating tiny-skia masks and pixmaps.
#[derive(Copy, Clone, Debug)]
pub struct TinySkiaContext {
    max_texture_size: u32,
}

impl TinySkiaContext {
    /// Creates a context producing textures up to `max_texture_size` pixels on a side.
    pub fn new(max_texture_size: u32) -> Self {
        Self { max_texture_size }
    }
}

impl RenderContext for TinySkiaContext {
    type Surface = TinySkiaSurface;

    fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }

    fn make_surface(&mut self, width: u32, height: u32, alpha_only: bool) -> Option<Self::Surface> {
        let texture = if alpha_only {
            TinySkiaTexture::Mask(Mask::new(width, height)?)
        } else {
            TinySkiaTexture::Pixmap(Pixmap::new(width, height)?)
        };
        Some(TinySkiaSurface {
            canvas: TinySkiaCanvas {
                texture,
                transform: Affine::IDENTITY,
            },
        })
    }
}

/// A surface produced by [`TinySkiaContext`].
#[derive(Debug)]
pub struct TinySkiaSurface {
    canvas: TinySkiaCanvas,
}

impl Surface for TinySkiaSurface {
    type Canvas = TinySkiaCanvas;
    type Texture = TinySkiaTexture;

    fn canvas(&mut self) -> &mut Self::Canvas {
        &mut self.canvas
    }

    fn into_texture(self) -> Option<Self::Texture> {
        Some(self.canvas.texture)
    }
}

/// A rasterized atlas page.
#[derive(Clone)]
pub enum TinySkiaTexture {
    /// Coverage only.
    Mask(Mask),
    /// Premultiplied RGBA.
    Pixmap(Pixmap),
}

impl TinySkiaTexture {
    /// The coverage mask, for mask pages.
    pub fn as_mask(&self) -> Option<&Mask> {
        match self {
            Self::Mask(mask) => Some(mask),
            Self::Pixmap(_) => None,
        }
    }

    /// The pixmap, for color pages.
    pub fn as_pixmap(&self) -> Option<&Pixmap> {
        match self {
            Self::Mask(_) => None,
            Self::Pixmap(pixmap) => Some(pixmap),
        }
    }

    /// The raw pixel bytes.
    pub fn data(&self) -> &[u8] {
        match self {
            Self::Mask(mask) => mask.data(),
            Self::Pixmap(pixmap) => pixmap.data(),
        }
    }
}

impl core::fmt::Debug for TinySkiaTexture {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kind = match self {
            Self::Mask(_) => "Mask",
            Self::Pixmap(_) => "Pixmap",
        };
        f.debug_struct(kind)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl Texture for TinySkiaTexture {
    fn width(&self) -> u32 {
        match self {
            Self::Mask(mask) => mask.width(),
            Self::Pixmap(pixmap) => pixmap.width(),
        }
    }

    fn height(&self) -> u32 {
        match self {
            Self::Mask(mask) => mask.height(),
            Self::Pixmap(pixmap) => pixmap.height(),
        }
    }

    fn memory_usage(&self) -> usize {
        self.data().len()
    }
}

/// A [`Canvas`] drawing glyph outlines into a [`TinySkiaTexture`].
#[derive(Debug)]
pub struct TinySkiaCanvas {
    texture: TinySkiaTexture,
    transform: Affine,
}

impl Canvas for TinySkiaCanvas {
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
        let Some(data) = font.typeface.data() else {
            return;
        };
        let font_ref = match FontRef::from_index(data.data.as_ref(), data.index) {
            Ok(font_ref) => font_ref,
            Err(err) => {
                log::debug!("typeface {} is unreadable: {err}", font.typeface.unique_id());
                return;
            }
        };
        let outlines = font_ref.outline_glyphs();
        let glyphs = || glyph_ids.iter().copied().zip(positions.iter().copied());
        let transform = to_transform(self.transform);
        let stroke = paint.style.strokes().then(|| tiny_skia::Stroke {
            width: paint.stroke_width,
            ..Default::default()
        });

        match &mut self.texture {
            TinySkiaTexture::Mask(mask) => {
                let Some(path) = glyph_path(&outlines, glyphs(), font) else {
                    return;
                };
                if paint.fills() {
                    mask.fill_path(&path, FillRule::Winding, true, transform);
                }
                if let Some(stroke) = stroke {
                    let res_scale = PathStroker::compute_resolution_scale(&transform);
                    if let Some(outline) = path.stroke(&stroke, res_scale) {
                        mask.fill_path(&outline, FillRule::Winding, true, transform);
                    }
                }
            }
            TinySkiaTexture::Pixmap(pixmap) => {
                let ink = Paint::default();
                if paint.fills() {
                    let layers = ColorLayers::new(&font_ref);
                    let mut plain = Vec::new();
                    for (id, position) in glyphs() {
                        let painted = match &layers {
                            Some(layers) => {
                                layers.fill(pixmap, &outlines, id, position, font, transform)
                            }
                            None => false,
                        };
                        if !painted {
                            plain.push((id, position));
                        }
                    }
                    if let Some(path) = glyph_path(&outlines, plain, font) {
                        pixmap.fill_path(&path, &ink, FillRule::Winding, transform, None);
                    }
                }
                if let Some(stroke) = stroke {
                    if let Some(path) = glyph_path(&outlines, glyphs(), font) {
                        pixmap.stroke_path(&path, &ink, &stroke, transform, None);
                    }
                }
            }
        }
    }
}

/// Builds one path holding the outlines of `glyphs`, each offset by its position.
fn glyph_path(
    outlines: &OutlineGlyphCollection<'_>,
    glyphs: impl IntoIterator<Item = (u32, Point)>,
    font: &Font,
) -> Option<Path> {
    let mut pen = TinySkiaPen {
        builder: PathBuilder::new(),
        x: 0.0,
        y: 0.0,
    };
    for (id, position) in glyphs {
        let Some(outline) = outlines.get(GlyphId::new(id)) else {
            log::trace!("typeface {} has no outline for glyph {id}", font.typeface.unique_id());
            continue;
        };
        pen.set_origin(position);
        let settings = DrawSettings::unhinted(Size::new(font.size), LocationRef::default());
        if let Err(err) = outline.draw(settings, &mut pen) {
            log::debug!("failed to draw outline of glyph {id}: {err}");
        }
    }
    pen.builder.finish()
}

/// `COLR` version 0 layers of a typeface, with colors from its first `CPAL` palette.
struct ColorLayers<'a> {
    colr: Colr<'a>,
    cpal: Option<Cpal<'a>>,
}

impl<'a> ColorLayers<'a> {
    fn new(font_ref: &FontRef<'a>) -> Option<Self> {
        Some(Self {
            colr: font_ref.colr().ok()?,
            cpal: font_ref.cpal().ok(),
        })
    }

    /// Fills each layer of glyph `id` in its palette color.
    ///
    /// Returns `false` if the glyph has no layers, leaving the page untouched.
    fn fill(
        &self,
        pixmap: &mut Pixmap,
        outlines: &OutlineGlyphCollection<'_>,
        id: u32,
        position: Point,
        font: &Font,
        transform: Transform,
    ) -> bool {
        let Ok(Some(range)) = self.colr.v0_base_glyph(GlyphId::new(id)) else {
            return false;
        };
        if range.is_empty() {
            return false;
        }
        for index in range {
            let Ok((layer_id, palette_index)) = self.colr.v0_layer(index) else {
                log::debug!("glyph {id} refers to missing color layer {index}");
                continue;
            };
            let Some(path) = glyph_path(outlines, [(layer_id.to_u32(), position)], font) else {
                continue;
            };
            let mut ink = Paint::default();
            ink.set_color(self.color(palette_index));
            pixmap.fill_path(&path, &ink, FillRule::Winding, transform, None);
        }
        true
    }

    /// The color of entry `palette_index` in the first palette; black for the foreground
    /// entry `0xFFFF` or a missing palette.
    fn color(&self, palette_index: u16) -> Color {
        let record = self.cpal.as_ref().and_then(|cpal| {
            if palette_index >= cpal.num_palette_entries() {
                return None;
            }
            let records = cpal.color_records_array()?.ok()?;
            let first = usize::from(cpal.color_record_indices().first()?.get());
            records.get(first + usize::from(palette_index))
        });
        match record {
            Some(record) => {
                Color::from_rgba8(record.red(), record.green(), record.blue(), record.alpha())
            }
            None => Color::BLACK,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "tiny-skia works in f32 and page coordinates are small"
)]
fn to_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// Outline pen appending to a tiny-skia path, flipping font units (y up) to page space (y down).
struct TinySkiaPen {
    builder: PathBuilder,
    x: f32,
    y: f32,
}

impl TinySkiaPen {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "tiny-skia works in f32 and page coordinates are small"
    )]
    fn set_origin(&mut self, origin: Point) {
        self.x = origin.x as f32;
        self.y = origin.y as f32;
    }
}

impl OutlinePen for TinySkiaPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.x + x, self.y - y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.x + x, self.y - y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.builder
            .quad_to(self.x + cx0, self.y - cy0, self.x + x, self.y - y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.x + cx0,
            self.y - cy0,
            self.x + cx1,
            self.y - cy1,
            self.x + x,
            self.y - y,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::*;
    use crate::glyph::{Glyph, TextGlyphs, TextStyle, Typeface};
    use crate::kurbo::Rect;
    use crate::text_atlas::TextAtlas;

    #[test]
    fn surfaces_follow_alpha_only() {
        let mut context = TinySkiaContext::new(512);
        let mask = context.make_surface(10, 6, true).unwrap().into_texture().unwrap();
        assert!(mask.as_mask().is_some());
        assert_eq!(mask.memory_usage(), 60);

        let color = context.make_surface(10, 6, false).unwrap().into_texture().unwrap();
        assert!(color.as_pixmap().is_some());
        assert_eq!(color.memory_usage(), 240);
    }

    #[test]
    fn empty_surface_is_refused() {
        assert!(TinySkiaContext::new(512).make_surface(0, 4, true).is_none());
    }

    #[test]
    fn affine_maps_to_row_order() {
        let affine = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            to_transform(affine),
            Transform::from_row(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
        );
    }

    #[test]
    fn typeface_without_data_draws_nothing() {
        let font = Font::new(Arc::new(Typeface::new(1, false)), 16.0);
        let glyphs: Vec<_> = (0..4)
            .map(|id| {
                Glyph::new(id, font.clone(), Rect::new(0.0, -12.0, 9.0, 3.0))
                    .with_style(TextStyle::StrokeAndFill, 1.0)
            })
            .collect();
        let source = TextGlyphs::new(1, glyphs, 1.0);
        let mut context = TinySkiaContext::new(256);
        let atlas = TextAtlas::new(&source, &mut context, 1.0).unwrap();

        let texture = atlas.atlas_texture(0).unwrap();
        assert!(texture.as_mask().is_some());
        assert!(texture.data().iter().all(|&coverage| coverage == 0));
        assert!(atlas.color_atlas().is_none());
    }
}
