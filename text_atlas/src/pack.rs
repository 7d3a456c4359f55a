// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strip-growth rectangle packing for atlas pages.

#[cfg(not(feature = "std"))]
use crate::kurbo::common::FloatFuncs as _;

/// Minimum spacing, in device pixels, kept between neighbouring glyphs on a page.
///
/// Sampling a glyph with bilinear filtering reads texels next to its rectangle; this gap keeps
/// those texels empty once the page is scaled.
pub const DEFAULT_PADDING: u32 = 3;

/// Greedy packer that places rectangles into a region that grows as needed.
///
/// The region starts empty and grows by strips: a new column on the right or a new row at
/// the bottom, whichever keeps the region closer to square. Within a strip, rectangles are
/// placed at a cursor that only moves right or down, so every placed rectangle lies either
/// left of or above the cursor. Together with the region always bounding every placement,
/// this guarantees placed rectangles never overlap.
///
/// This is a heuristic, not an optimal packer: placement is O(1) and the fill factor is
/// reasonable for glyphs of similar size.
#[derive(Clone, Debug)]
pub struct RectanglePack {
    padding: u32,
    width: u32,
    height: u32,
    x: u32,
    y: u32,
}

impl RectanglePack {
    /// Creates a packer for a page rendered at `scale`, using [`DEFAULT_PADDING`].
    pub fn new(scale: f32) -> Self {
        Self::with_padding(DEFAULT_PADDING, scale)
    }

    /// Creates a packer keeping `padding` device pixels between rectangles at `scale`.
    ///
    /// The packer works in unscaled units, so the padding is divided by the scale and
    /// rounded up.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "padding divided by a positive scale is a small non-negative value"
    )]
    pub fn with_padding(padding: u32, scale: f32) -> Self {
        let padding = (padding as f32 / scale).ceil() as u32;
        let mut pack = Self {
            padding,
            width: 0,
            height: 0,
            x: 0,
            y: 0,
        };
        pack.reset();
        pack
    }

    /// Padding in unscaled units, applied to the right and bottom of each rectangle and once
    /// along the top and left of the region.
    #[inline]
    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Current width of the packed region, including padding.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current height of the packed region, including padding.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Places a `width` x `height` rectangle and returns its top-left corner.
    ///
    /// The region grows to bound the rectangle and the padding after it. Extents saturate at
    /// `u32::MAX`; callers bound the region size well below that.
    pub fn add_rect(&mut self, width: u32, height: u32) -> (u32, u32) {
        let w = width.saturating_add(self.padding);
        let h = height.saturating_add(self.padding);

        // Space left in the current strip, compared against what placing at the cursor would
        // spill over the region's right and bottom edges.
        let area = i128::from(self.width - self.x) * i128::from(self.height - self.y);
        if self.overflow_x(w) * i128::from(self.y) > area
            || self.overflow_y(h) * i128::from(self.x) > area
        {
            if self.width <= self.height {
                self.x = self.width;
                self.y = self.padding;
                self.width = self.width.saturating_add(w);
            } else {
                self.x = self.padding;
                self.y = self.height;
                self.height = self.height.saturating_add(h);
            }
        }

        let point = (self.x, self.y);
        let right = self.x.saturating_add(w);
        let bottom = self.y.saturating_add(h);
        if self.overflow_x(w) < self.overflow_y(h) {
            self.x = right;
        } else {
            self.y = bottom;
        }
        self.width = self.width.max(right);
        self.height = self.height.max(bottom);
        point
    }

    /// How far a rectangle of width `w` at the cursor would reach past the right edge.
    fn overflow_x(&self, w: u32) -> i128 {
        i128::from(self.x) + i128::from(w) - i128::from(self.width)
    }

    /// How far a rectangle of height `h` at the cursor would reach past the bottom edge.
    fn overflow_y(&self, h: u32) -> i128 {
        i128::from(self.y) + i128::from(h) - i128::from(self.height)
    }

    /// Restores the empty region, keeping the padding.
    pub fn reset(&mut self) {
        self.width = self.padding;
        self.height = self.padding;
        self.x = self.padding;
        self.y = self.padding;
    }
}
