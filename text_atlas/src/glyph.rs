// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph requests and the content collaborator that supplies them.

use alloc::sync::Arc;
use alloc::vec::Vec;
use hashbrown::HashSet;
use skrifa::FontRef;
use skrifa::raw::TableProvider;

use crate::kurbo::Rect;
use crate::peniko::FontData;
use crate::style::StyleKey;

/// A font face, identified by an id that is unique within the process.
#[derive(Clone, Debug)]
pub struct Typeface {
    id: u32,
    has_color: bool,
    data: Option<FontData>,
}

impl Typeface {
    /// Creates a typeface without font data.
    ///
    /// Such a typeface can be packed and located, but renderers that need outlines draw
    /// nothing for it.
    pub fn new(id: u32, has_color: bool) -> Self {
        Self {
            id,
            has_color,
            data: None,
        }
    }

    /// Creates a typeface from font data, detecting whether it provides color glyphs.
    ///
    /// A face counts as colored if it has a `COLR`, `CBDT` or `sbix` table.
    /// Returns `None` if the data cannot be parsed as a font.
    pub fn from_font_data(id: u32, data: FontData) -> Option<Self> {
        let font_ref = FontRef::from_index(data.data.as_ref(), data.index).ok()?;
        let has_color =
            font_ref.colr().is_ok() || font_ref.cbdt().is_ok() || font_ref.sbix().is_ok();
        Some(Self {
            id,
            has_color,
            data: Some(data),
        })
    }

    /// The process-unique id of this typeface.
    #[inline]
    pub fn unique_id(&self) -> u32 {
        self.id
    }

    /// Whether glyphs from this typeface carry their own color.
    #[inline]
    pub fn has_color(&self) -> bool {
        self.has_color
    }

    /// The font data backing this typeface, if any.
    #[inline]
    pub fn data(&self) -> Option<&FontData> {
        self.data.as_ref()
    }
}

/// A typeface at a particular size.
#[derive(Clone, Debug)]
pub struct Font {
    /// The face glyphs are drawn from.
    pub typeface: Arc<Typeface>,
    /// Font size in pixels per em, before any atlas scale is applied.
    pub size: f32,
}

impl Font {
    /// Creates a new font.
    pub fn new(typeface: Arc<Typeface>, size: f32) -> Self {
        Self { typeface, size }
    }
}

/// How a glyph is painted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextStyle {
    /// The glyph interior is filled.
    #[default]
    Fill,
    /// Only the glyph outline is stroked.
    Stroke,
    /// The glyph is filled and its outline stroked.
    StrokeAndFill,
}

impl TextStyle {
    /// Whether this style paints the glyph interior.
    #[inline]
    pub fn fills(self) -> bool {
        matches!(self, Self::Fill | Self::StrokeAndFill)
    }

    /// Whether this style strokes the glyph outline.
    #[inline]
    pub fn strokes(self) -> bool {
        matches!(self, Self::Stroke | Self::StrokeAndFill)
    }
}

/// A glyph that should be rasterized into an atlas.
#[derive(Clone, Debug)]
pub struct Glyph {
    /// The glyph index within the font. This is *not* a Unicode code point.
    pub id: u32,
    /// The font the glyph is drawn with.
    pub font: Font,
    /// The paint style of the glyph.
    pub style: TextStyle,
    /// Stroke width in local units; only meaningful when `style` strokes.
    pub stroke_width: f32,
    /// Ink bounds of the glyph relative to its origin, in unscaled local units.
    pub bounds: Rect,
}

impl Glyph {
    /// Creates a filled glyph.
    pub fn new(id: u32, font: Font, bounds: Rect) -> Self {
        Self {
            id,
            font,
            style: TextStyle::Fill,
            stroke_width: 0.0,
            bounds,
        }
    }

    /// Returns this glyph with the given style and stroke width.
    #[must_use]
    pub fn with_style(mut self, style: TextStyle, stroke_width: f32) -> Self {
        self.style = style;
        self.stroke_width = stroke_width;
        self
    }

    /// Whether the glyph's typeface carries its own color.
    #[inline]
    pub fn has_color(&self) -> bool {
        self.font.typeface.has_color()
    }

    /// The key of the draw run this glyph belongs to.
    #[inline]
    pub fn style_key(&self) -> StyleKey {
        StyleKey::from_glyph(self)
    }

    /// The key identifying this glyph drawn in `style` within an atlas.
    pub fn atlas_key(&self, style: TextStyle) -> GlyphKey {
        GlyphKey {
            typeface_id: self.font.typeface.unique_id(),
            glyph_id: self.id,
            style,
            stroke_width_bits: if style.strokes() {
                self.stroke_width.to_bits()
            } else {
                0
            },
        }
    }
}

/// Unique identifier of a glyph image within an atlas.
///
/// Two glyphs with the same key share one rasterized image. The stroke width only takes
/// part when the style strokes, so a fill lookup finds the glyph whatever its stroke width.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GlyphKey {
    /// Unique id of the typeface.
    pub typeface_id: u32,
    /// Glyph index within the typeface.
    pub glyph_id: u32,
    /// The paint style the image was drawn with.
    pub style: TextStyle,
    /// Stroke width as `f32` bits, or 0 for [`TextStyle::Fill`].
    pub stroke_width_bits: u32,
}

/// Supplies the glyphs of one piece of content, split into mask and color tiers.
pub trait GlyphSource {
    /// Identifies the content, so caches can associate an atlas with it.
    fn id(&self) -> u64;

    /// Glyphs rendered as alpha coverage and tinted at draw time.
    fn mask_glyphs(&self) -> &[Glyph];

    /// Glyphs whose typeface provides intrinsic color.
    fn color_glyphs(&self) -> &[Glyph];

    /// The largest scale the content is drawn at, already reflected in glyph sizing upstream.
    fn max_scale(&self) -> f32;
}

/// The stock [`GlyphSource`]: an ordered list of glyphs split by color capability.
#[derive(Clone, Debug)]
pub struct TextGlyphs {
    id: u64,
    mask_glyphs: Vec<Glyph>,
    color_glyphs: Vec<Glyph>,
    max_scale: f32,
}

impl TextGlyphs {
    /// Partitions `glyphs` into tiers, keeping the first glyph for each atlas key.
    ///
    /// Relative order is preserved within each tier.
    pub fn new(id: u64, glyphs: Vec<Glyph>, max_scale: f32) -> Self {
        let mut seen = HashSet::with_capacity(glyphs.len());
        let mut mask_glyphs = Vec::new();
        let mut color_glyphs = Vec::new();
        for glyph in glyphs {
            if !seen.insert(glyph.atlas_key(glyph.style)) {
                continue;
            }
            if glyph.has_color() {
                color_glyphs.push(glyph);
            } else {
                mask_glyphs.push(glyph);
            }
        }
        Self {
            id,
            mask_glyphs,
            color_glyphs,
            max_scale,
        }
    }
}

impl GlyphSource for TextGlyphs {
    fn id(&self) -> u64 {
        self.id
    }

    fn mask_glyphs(&self) -> &[Glyph] {
        &self.mask_glyphs
    }

    fn color_glyphs(&self) -> &[Glyph] {
        &self.color_glyphs
    }

    fn max_scale(&self) -> f32 {
        self.max_scale
    }
}
