// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use text_atlas::kurbo::Rect;
use text_atlas::renderers::recording::{RecordedTexture, RecordingContext};
use text_atlas::{Atlas, AtlasConfig, AtlasLocator, Font, Glyph, TextStyle, Typeface};

pub(crate) const FONT_SIZE: f32 = 12.0;

pub(crate) fn face(id: u32, has_color: bool) -> Arc<Typeface> {
    Arc::new(Typeface::new(id, has_color))
}

/// A filled glyph whose ink box sits on the baseline: `width` wide and `height` tall.
pub(crate) fn glyph(face: &Arc<Typeface>, id: u32, width: f64, height: f64) -> Glyph {
    Glyph::new(
        id,
        Font::new(face.clone(), FONT_SIZE),
        Rect::new(0.0, -height, width, 0.0),
    )
}

pub(crate) fn squares(face: &Arc<Typeface>, count: u32, size: f64) -> Vec<Glyph> {
    (0..count).map(|id| glyph(face, id, size, size)).collect()
}

/// A mixed bag of glyph sizes and styles on two typefaces.
pub(crate) fn assorted(count: u32) -> Vec<Glyph> {
    let faces = [face(1, false), face(2, false)];
    (0..count)
        .map(|id| {
            let face = &faces[(id % 2) as usize];
            let width = f64::from(2 + (id * 7) % 19);
            let height = f64::from(4 + (id * 11) % 23);
            let glyph = glyph(face, id, width, height);
            match id % 3 {
                0 => glyph,
                1 => glyph.with_style(TextStyle::Stroke, 1.5),
                _ => glyph.with_style(TextStyle::StrokeAndFill, 2.0),
            }
        })
        .collect()
}

pub(crate) fn mask_atlas(
    glyphs: &[Glyph],
    scale: f32,
    max_texture_size: u32,
) -> Atlas<RecordedTexture> {
    let mut context = RecordingContext::new(max_texture_size);
    Atlas::new(
        &mut context,
        glyphs,
        scale,
        &AtlasConfig::new(max_texture_size),
        true,
    )
    .unwrap()
}

pub(crate) fn locators<T>(atlas: &Atlas<T>, glyphs: &[Glyph]) -> Vec<AtlasLocator> {
    glyphs
        .iter()
        .map(|glyph| atlas.locator(glyph, glyph.style).unwrap())
        .collect()
}

pub(crate) fn overlaps(a: Rect, b: Rect) -> bool {
    a.intersect(b).area() > 0.0
}

/// Asserts that no two locators on the same page overlap.
pub(crate) fn assert_disjoint(locators: &[AtlasLocator]) {
    for (i, a) in locators.iter().enumerate() {
        for (j, b) in locators.iter().enumerate().skip(i + 1) {
            if a.page_index == b.page_index {
                assert!(
                    !overlaps(a.location, b.location),
                    "locators {i} and {j} overlap on page {}: {:?} and {:?}",
                    a.page_index,
                    a.location,
                    b.location
                );
            }
        }
    }
}
