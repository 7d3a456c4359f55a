// Copyright 2026 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_atlas::kurbo::{Affine, Rect, Size};
use text_atlas::renderers::recording::RecordingContext;
use text_atlas::{Atlas, AtlasConfig, ErrorKind, MAX_FONT_SIZE, TextStyle, Texture};

use crate::util::{assert_disjoint, face, glyph, locators, mask_atlas, squares};

#[test]
fn atlas_three_glyphs_share_one_run() {
    let glyphs = squares(&face(1, false), 3, 10.0);
    let atlas = mask_atlas(&glyphs, 1.0, 128);

    assert_eq!(atlas.page_count(), 1);
    let page = atlas.page(0).unwrap();
    assert!(page.width() < 128 && page.height() < 128);
    assert_eq!(page.runs().len(), 1);
    assert_eq!(page.runs()[0].glyph_ids(), &[0, 1, 2]);

    let locators = locators(&atlas, &glyphs);
    assert!(locators.iter().all(|locator| locator.page_index == 0));
    assert_disjoint(&locators);
}

#[test]
fn atlas_overflow_moves_glyph_to_next_page() {
    let glyphs = squares(&face(1, false), 100, 50.0);
    let atlas = mask_atlas(&glyphs, 1.0, 128);

    assert!(atlas.page_count() > 1);
    for page in atlas.pages() {
        assert!(page.width() <= 128 && page.height() <= 128);
        assert_eq!(page.texture().width(), page.width());
    }
    let total: usize = atlas.pages().iter().map(|page| page.glyph_count()).sum();
    assert_eq!(total, 100);

    // Each page starts with the glyph that did not fit the one before.
    let mut expected_first = 0;
    for (index, page) in atlas.pages().iter().enumerate() {
        let first = page.runs()[0].glyph_ids()[0];
        assert_eq!(first, expected_first);
        let locator = atlas.locator(&glyphs[first as usize], TextStyle::Fill).unwrap();
        assert_eq!(locator.page_index, index);
        expected_first += page.glyph_count() as u32;
    }
}

#[test]
fn atlas_fill_and_stroke_get_separate_runs() {
    let face = face(1, false);
    let glyphs: Vec<_> = (0..6)
        .map(|id| {
            let glyph = glyph(&face, id, 10.0, 10.0);
            if id % 2 == 0 {
                glyph
            } else {
                glyph.with_style(TextStyle::Stroke, 2.0)
            }
        })
        .collect();
    let atlas = mask_atlas(&glyphs, 1.0, 128);

    assert_eq!(atlas.page_count(), 1);
    let runs = atlas.page(0).unwrap().runs();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].glyph_ids(), &[0, 2, 4]);
    assert_eq!(runs[0].paint().style, TextStyle::Fill);
    assert_eq!(runs[1].glyph_ids(), &[1, 3, 5]);
    assert_eq!(runs[1].paint().stroke_width, 2.0);

    // A stroked glyph reserves room for the stroke on every side.
    let stroked = atlas.locator(&glyphs[1], TextStyle::Stroke).unwrap();
    assert_eq!(stroked.location.size(), Size::new(14.0, 14.0));
    assert!(atlas.locator(&glyphs[1], TextStyle::Fill).is_none());
}

#[test]
fn atlas_draws_each_run_once_under_scale() {
    let face = face(1, false);
    let glyphs = vec![
        glyph(&face, 1, 6.0, 8.0),
        glyph(&face, 2, 6.0, 8.0).with_style(TextStyle::StrokeAndFill, 1.0),
        glyph(&face, 3, 6.0, 8.0),
    ];
    let atlas = mask_atlas(&glyphs, 2.0, 256);

    let texture = atlas.texture(0).unwrap();
    assert!(texture.is_alpha_only());
    let commands = texture.commands();
    assert_eq!(commands.len(), 2);
    for command in commands {
        assert_eq!(command.transform, Affine::scale(2.0));
        assert_eq!(command.glyph_ids.len(), command.positions.len());
    }
    assert_eq!(commands[0].glyph_ids, [1, 3]);
    assert_eq!(commands[1].glyph_ids, [2]);
}

#[test]
fn atlas_locator_is_scaled() {
    let glyphs = squares(&face(1, false), 1, 10.0);
    let atlas = mask_atlas(&glyphs, 2.0, 256);
    let locator = atlas.locator(&glyphs[0], TextStyle::Fill).unwrap();
    // Padding is ceil(3 / 2) = 2 units, so the glyph lands at (2, 2) before scaling.
    assert_eq!(locator.location, Rect::new(4.0, 4.0, 24.0, 24.0));
}

#[test]
fn atlas_rejects_empty() {
    let mut context = RecordingContext::new(128);
    let err = Atlas::new(&mut context, &[], 1.0, &AtlasConfig::new(128), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Empty);
    assert_eq!(context.surfaces_made(), 0);
}

#[test]
fn atlas_rejects_oversized_font() {
    let glyphs = squares(&face(1, false), 2, 10.0);
    let mut context = RecordingContext::new(1024);
    let config = AtlasConfig::new(1024);

    // 12 px text at scale 22 is 264 px, over the ceiling.
    let err = Atlas::new(&mut context, &glyphs, 22.0, &config, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GlyphTooLarge);
    assert_eq!(err.glyph_id(), Some(0));

    // Exactly at the ceiling is still accepted.
    let mut at_ceiling = glyphs[0].clone();
    at_ceiling.font.size = MAX_FONT_SIZE / 8.0;
    assert!(Atlas::new(&mut context, &[at_ceiling], 8.0, &config, true).is_ok());
}

#[test]
fn atlas_rejects_invalid_scale() {
    let glyphs = squares(&face(1, false), 1, 10.0);
    let mut context = RecordingContext::new(128);
    let config = AtlasConfig::new(128);
    for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let err = Atlas::new(&mut context, &glyphs, scale, &config, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidScale);
    }
}

#[test]
fn atlas_rejects_glyph_wider_than_page() {
    let face = face(1, false);
    let glyphs = vec![glyph(&face, 1, 10.0, 10.0), glyph(&face, 2, 140.0, 10.0)];
    let mut context = RecordingContext::new(128);
    let err = Atlas::new(&mut context, &glyphs, 1.0, &AtlasConfig::new(128), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GlyphExceedsPage);
    assert_eq!(err.glyph_id(), Some(2));
    assert_eq!(context.surfaces_made(), 0);
}

#[test]
fn atlas_surface_failure_fails_build() {
    let glyphs = squares(&face(1, false), 10, 50.0);
    let mut context = RecordingContext::new(128).with_surface_budget(1);
    let err = Atlas::new(&mut context, &glyphs, 1.0, &AtlasConfig::new(128), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SurfaceAllocation);
    assert_eq!(err.page_index(), Some(1));
}

#[test]
fn atlas_memory_usage_sums_pages() {
    let glyphs = squares(&face(1, false), 10, 50.0);
    let atlas = mask_atlas(&glyphs, 1.0, 128);
    let expected: usize = atlas
        .pages()
        .iter()
        .map(|page| (page.width() * page.height()) as usize)
        .sum();
    assert_eq!(atlas.memory_usage(), expected);
    assert_eq!(atlas.glyph_count(), 10);
}

#[test]
fn atlas_custom_padding() {
    let glyphs = squares(&face(1, false), 2, 10.0);
    let mut context = RecordingContext::new(128);
    let config = AtlasConfig {
        padding: 0,
        ..AtlasConfig::new(128)
    };
    let atlas = Atlas::new(&mut context, &glyphs, 1.0, &config, true).unwrap();
    let first = atlas.locator(&glyphs[0], TextStyle::Fill).unwrap();
    assert_eq!(first.location, Rect::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn atlas_rejects_glyph_beyond_u32_extent() {
    let face = face(1, false);
    let config = AtlasConfig::new(128);
    let cases = [
        glyph(&face, 2, 4_294_967_294.0, 10.0),
        glyph(&face, 2, 10.0, 10.0).with_style(TextStyle::Stroke, 3.0e9),
    ];
    for huge in cases {
        let glyphs = vec![glyph(&face, 1, 10.0, 10.0), huge];
        let mut context = RecordingContext::new(128);
        let err = Atlas::new(&mut context, &glyphs, 1.0, &config, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GlyphExceedsPage);
        assert_eq!(err.glyph_id(), Some(2));
        assert_eq!(context.surfaces_made(), 0);
    }
}

#[test]
fn atlas_draws_repeated_glyph_once() {
    let face = face(1, false);
    let glyphs = vec![
        glyph(&face, 4, 10.0, 10.0),
        glyph(&face, 5, 10.0, 10.0),
        glyph(&face, 4, 10.0, 10.0),
    ];
    let atlas = mask_atlas(&glyphs, 1.0, 128);

    assert_eq!(atlas.glyph_count(), 2);
    assert_eq!(atlas.page(0).unwrap().glyph_count(), 2);
    let commands = atlas.texture(0).unwrap().commands();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].glyph_ids, [4, 5]);
    assert_eq!(
        atlas.locator(&glyphs[2], TextStyle::Fill),
        atlas.locator(&glyphs[0], TextStyle::Fill)
    );
}
