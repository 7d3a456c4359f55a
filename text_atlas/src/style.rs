// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping glyphs into draw runs by paint style.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::glyph::{Glyph, TextStyle};
use crate::kurbo::Stroke;
use crate::page::TextRun;

/// Identity of a draw run: glyphs with equal keys share one paint and one font.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleKey {
    /// The paint style.
    pub style: TextStyle,
    /// Stroke width as `f32` bits, or 0 unless `style` strokes.
    pub stroke_width_bits: u32,
    /// Unique id of the typeface.
    pub typeface_id: u32,
}

impl StyleKey {
    /// The style key of `glyph`.
    pub fn from_glyph(glyph: &Glyph) -> Self {
        Self {
            style: glyph.style,
            stroke_width_bits: if glyph.style.strokes() {
                glyph.stroke_width.to_bits()
            } else {
                0
            },
            typeface_id: glyph.font.typeface.unique_id(),
        }
    }
}

/// The paint shared by every glyph of a run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphPaint {
    /// Whether to fill, stroke, or both.
    pub style: TextStyle,
    /// Stroke width in local units; zero unless `style` strokes.
    pub stroke_width: f32,
}

impl GlyphPaint {
    /// The paint for drawing `glyph` in its own style.
    pub fn from_glyph(glyph: &Glyph) -> Self {
        Self {
            style: glyph.style,
            stroke_width: if glyph.style.strokes() {
                glyph.stroke_width
            } else {
                0.0
            },
        }
    }

    /// Whether the glyph interior is painted.
    #[inline]
    pub fn fills(self) -> bool {
        self.style.fills()
    }

    /// Stroke parameters, if the paint strokes.
    pub fn stroke(self) -> Option<Stroke> {
        self.style
            .strokes()
            .then(|| Stroke::new(f64::from(self.stroke_width)))
    }
}

/// Collects glyphs into runs, one per distinct [`StyleKey`], in order of first appearance.
///
/// Lookup is a linear scan: a page rarely holds more than a handful of paint styles, and
/// run order has to stay stable so that draw calls are issued in a deterministic order.
#[derive(Debug, Default)]
pub struct StyleGrouper {
    keys: SmallVec<[StyleKey; 4]>,
    runs: Vec<TextRun>,
}

impl StyleGrouper {
    /// Creates an empty grouper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the open run for `glyph`'s style, opening a new one if needed.
    pub fn run_for(&mut self, glyph: &Glyph) -> &mut TextRun {
        let key = glyph.style_key();
        let index = match self.keys.iter().position(|k| *k == key) {
            Some(index) => index,
            None => {
                self.keys.push(key);
                self.runs.push(TextRun::new(glyph));
                self.runs.len() - 1
            }
        };
        &mut self.runs[index]
    }

    /// Takes the open runs, leaving the grouper empty.
    pub fn take_runs(&mut self) -> Vec<TextRun> {
        self.keys.clear();
        core::mem::take(&mut self.runs)
    }

    /// The number of open runs.
    #[inline]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether no run is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
