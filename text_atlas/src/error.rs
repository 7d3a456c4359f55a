// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned when an atlas cannot be built.
///
/// Carries a non-exhaustive [`ErrorKind`] plus whatever context was available at the point
/// of failure. None of these errors leave a partially built atlas behind: callers are
/// expected to fall back to rendering the affected text without an atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The glyph involved, when the failure is attributable to one.
    glyph_id: Option<u32>,

    /// The page being built or rendered, when relevant.
    page_index: Option<usize>,

    /// Width in pixels of the offending glyph or surface.
    width: u32,

    /// Height in pixels of the offending glyph or surface.
    height: u32,

    /// The scaled font size or the scale itself, depending on the kind.
    value: f32,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The glyph id involved in the failure, if any.
    pub fn glyph_id(&self) -> Option<u32> {
        self.glyph_id
    }

    /// The page index involved in the failure, if any.
    pub fn page_index(&self) -> Option<usize> {
        self.page_index
    }

    /// Width and height in pixels of the offending glyph or surface.
    ///
    /// Zero for kinds that are not about a size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            glyph_id: None,
            page_index: None,
            width: 0,
            height: 0,
            value: 0.0,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(ErrorKind::Empty)
    }

    pub(crate) fn invalid_scale(scale: f32) -> Self {
        Self {
            value: scale,
            ..Self::new(ErrorKind::InvalidScale)
        }
    }

    pub(crate) fn glyph_too_large(glyph_id: u32, scaled_font_size: f32) -> Self {
        Self {
            glyph_id: Some(glyph_id),
            value: scaled_font_size,
            ..Self::new(ErrorKind::GlyphTooLarge)
        }
    }

    pub(crate) fn glyph_exceeds_page(
        glyph_id: u32,
        page_index: usize,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            glyph_id: Some(glyph_id),
            page_index: Some(page_index),
            width,
            height,
            ..Self::new(ErrorKind::GlyphExceedsPage)
        }
    }

    pub(crate) fn surface_allocation(page_index: usize, width: u32, height: u32) -> Self {
        Self {
            page_index: Some(page_index),
            width,
            height,
            ..Self::new(ErrorKind::SurfaceAllocation)
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::Empty => write!(f, "no glyphs to pack"),
            ErrorKind::InvalidScale => write!(f, "invalid atlas scale {}", self.value),
            ErrorKind::GlyphTooLarge => write!(
                f,
                "glyph {} has scaled font size {} above the atlas ceiling",
                self.glyph_id.unwrap_or_default(),
                self.value
            ),
            ErrorKind::GlyphExceedsPage => write!(
                f,
                "glyph {} ({}x{}) does not fit an empty atlas page {}",
                self.glyph_id.unwrap_or_default(),
                self.width,
                self.height,
                self.page_index.unwrap_or_default()
            ),
            ErrorKind::SurfaceAllocation => write!(
                f,
                "failed to allocate a {}x{} surface for atlas page {}",
                self.width,
                self.height,
                self.page_index.unwrap_or_default()
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// There were no glyphs for this atlas.
    Empty,

    /// The scale was zero, negative or not finite.
    InvalidScale,

    /// The first glyph's font size, multiplied by the scale, exceeds the configured ceiling.
    GlyphTooLarge,

    /// A single glyph, with padding, is larger than an empty page may grow.
    GlyphExceedsPage,

    /// The render context could not provide a surface or texture for a page.
    SurfaceAllocation,
}
