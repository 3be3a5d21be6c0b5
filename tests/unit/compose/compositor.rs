use super::*;
use crate::foundation::core::Canvas;
use crate::glyph::cache::DEFAULT_FONT_PX;
use crate::glyph::raster::MapRasterizer;

fn cache_of(raster: MapRasterizer, text: &str) -> GlyphCache {
    let mut cache = GlyphCache::new(Box::new(raster), DEFAULT_FONT_PX).unwrap();
    cache.ensure_text_loaded(text);
    cache
}

fn still() -> ComposeParams {
    ComposeParams {
        noise: NoiseParams {
            strength: 0.0,
            freq: 0.04,
        },
        ..ComposeParams::default()
    }
}

fn frame(w: u32, h: u32) -> Frame {
    Frame::try_new(Canvas {
        width: w,
        height: h,
    })
    .unwrap()
}

fn covered(frame: &Frame) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            if frame.coverage_at(x, y).unwrap() != 0 {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn single_pixel_glyph_lands_on_baseline() {
    let mut raster = MapRasterizer::new();
    raster.insert_block('A', 1, 1);
    let cache = cache_of(raster, "A");
    let lines = TextLine::stack(&["A"], &LineMetrics::default());

    // noise(0, 0, 0) is 0.3, so strength 1 keeps the sample inside the 1x1 source.
    let params = ComposeParams {
        noise: NoiseParams {
            strength: 1.0,
            freq: 0.04,
        },
        ..ComposeParams::default()
    };
    let mut f = frame(8, 8);
    compose(&mut f, &lines, &cache, 0.0, &params).unwrap();

    let line_y = lines[0].y as u32;
    let baseline = cache.baseline_height("A");
    let expected_y = line_y + (baseline - 1);
    assert_eq!(covered(&f), vec![(0, expected_y)]);
    assert_eq!(f.coverage_at(0, expected_y), Some(255));
}

#[test]
fn missing_glyph_advances_by_fallback() {
    let mut raster = MapRasterizer::new();
    raster.insert_block('A', 3, 2);
    let cache = cache_of(raster, "?A");
    let lines = TextLine::stack(&["?A"], &LineMetrics::default());

    let mut f = frame(32, 8);
    compose(&mut f, &lines, &cache, 0.0, &still()).unwrap();
    let px = covered(&f);
    assert_eq!(px.len(), 6);
    assert!(px.iter().all(|&(x, y)| (20..23).contains(&x) && y < 2));
}

#[test]
fn descenders_drop_and_quotes_hug_the_top() {
    let mut raster = MapRasterizer::new();
    raster.insert_block('H', 4, 10);
    raster.insert_block('p', 4, 10);
    raster.insert_block('"', 2, 3);
    let cache = cache_of(raster, "Hp\"");
    let lines = TextLine::stack(&["Hp\""], &LineMetrics::default());

    let mut f = frame(16, 32);
    compose(&mut f, &lines, &cache, 0.0, &still()).unwrap();

    // H: x 0..4, y 0..10
    assert_eq!(f.coverage_at(0, 0), Some(255));
    assert_eq!(f.coverage_at(3, 9), Some(255));
    // p: x 4..8, y 13..23
    assert_eq!(f.coverage_at(4, 12), Some(0));
    assert_eq!(f.coverage_at(4, 13), Some(255));
    assert_eq!(f.coverage_at(7, 22), Some(255));
    // quote: x 8..10, y 0..3 rather than baseline-aligned at 7
    assert_eq!(f.coverage_at(8, 0), Some(255));
    assert_eq!(f.coverage_at(9, 2), Some(255));
    assert_eq!(f.coverage_at(8, 7), Some(0));
    assert_eq!(f.covered_pixels(), 40 + 40 + 6);
}

#[test]
fn second_line_starts_one_pitch_down() {
    let mut raster = MapRasterizer::new();
    raster.insert_block('A', 2, 2);
    let cache = cache_of(raster, "A");
    let lines = TextLine::stack(&["", "A"], &LineMetrics::default());

    let mut f = frame(4, 60);
    compose(&mut f, &lines, &cache, 0.0, &still()).unwrap();
    assert_eq!(covered(&f), vec![(0, 54), (1, 54), (0, 55), (1, 55)]);
}

#[test]
fn glyphs_outside_the_frame_are_clipped() {
    let mut raster = MapRasterizer::new();
    raster.insert_block('W', 8, 8);
    let cache = cache_of(raster, "WW");
    let lines = TextLine::stack(&["WW"], &LineMetrics::default());

    let mut f = frame(5, 5);
    compose(&mut f, &lines, &cache, 0.0, &still()).unwrap();
    assert_eq!(f.covered_pixels(), 25);
}

#[test]
fn compose_clears_previous_content() {
    let mut raster = MapRasterizer::new();
    raster.insert_block('A', 2, 2);
    let cache = cache_of(raster, "A");
    let mut f = frame(8, 8);

    let lines = TextLine::stack(&["A"], &LineMetrics::default());
    compose(&mut f, &lines, &cache, 0.0, &still()).unwrap();
    assert_eq!(f.covered_pixels(), 4);

    compose(&mut f, &[], &cache, 0.0, &still()).unwrap();
    assert_eq!(f.covered_pixels(), 0);
}

#[test]
fn cached_bitmaps_survive_boiling() {
    let mut raster = MapRasterizer::new();
    raster.insert_block('M', 12, 12);
    let cache = cache_of(raster, "MM");
    let before = cache.drawable('M' as u32).unwrap().clone();

    let lines = TextLine::stack(&["MM"], &LineMetrics::default());
    let mut f = frame(40, 20);
    for i in 0..5 {
        compose(&mut f, &lines, &cache, i as f32 / 12.0, &ComposeParams::default()).unwrap();
    }
    assert_eq!(cache.drawable('M' as u32).unwrap(), &before);
}

#[test]
fn compose_is_deterministic() {
    let mut raster = MapRasterizer::new();
    raster.insert_block('M', 12, 12);
    raster.insert_block('j', 6, 14);
    let cache = cache_of(raster, "Mj M");
    let lines = TextLine::stack(&["Mj M"], &LineMetrics::default());

    let mut a = frame(64, 40);
    let mut b = frame(64, 40);
    compose(&mut a, &lines, &cache, 0.75, &ComposeParams::default()).unwrap();
    compose(&mut b, &lines, &cache, 0.75, &ComposeParams::default()).unwrap();
    assert_eq!(a, b);
    assert!(a.covered_pixels() > 0);
}
