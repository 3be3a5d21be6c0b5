use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::glyph::raster::{MapRasterizer, RasterGlyph};

struct CountingRasterizer {
    inner: MapRasterizer,
    calls: Arc<AtomicUsize>,
}

impl Rasterizer for CountingRasterizer {
    fn rasterize(&self, ch: char, px_height: f32) -> RasterGlyph {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.rasterize(ch, px_height)
    }
}

fn cache_with(glyphs: &[(char, u32, u32)]) -> (GlyphCache, Arc<AtomicUsize>) {
    let mut inner = MapRasterizer::new();
    for &(ch, w, h) in glyphs {
        inner.insert_block(ch, w, h);
    }
    let calls = Arc::new(AtomicUsize::new(0));
    let raster = CountingRasterizer {
        inner,
        calls: calls.clone(),
    };
    (
        GlyphCache::new(Box::new(raster), DEFAULT_FONT_PX).unwrap(),
        calls,
    )
}

#[test]
fn ensure_loaded_is_idempotent() {
    let (mut cache, calls) = cache_with(&[('A', 4, 6)]);
    cache.ensure_loaded('A' as u32);
    let first = cache.entry('A' as u32).unwrap().clone();
    cache.ensure_loaded('A' as u32);
    let second = cache.entry('A' as u32).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!((first.width, first.height), (second.width, second.height));
    assert!(Arc::ptr_eq(&first.bitmap, &second.bitmap));
}

#[test]
fn empty_glyph_is_loaded_but_not_drawable() {
    let (mut cache, calls) = cache_with(&[]);
    assert!(!cache.entry(' ' as u32).unwrap().loaded);
    cache.ensure_loaded(' ' as u32);
    let e = cache.entry(' ' as u32).unwrap();
    assert!(e.loaded);
    assert_eq!((e.width, e.height), (0, 0));
    assert!(cache.drawable(' ' as u32).is_none());

    cache.ensure_loaded(' ' as u32);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn codes_outside_ascii_are_ignored() {
    let (mut cache, calls) = cache_with(&[]);
    cache.ensure_loaded(128);
    cache.ensure_loaded(0x263A);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(cache.entry(128).is_none());
}

#[test]
fn baseline_excludes_descenders() {
    let (mut cache, _) = cache_with(&[('p', 5, 40), ('q', 5, 41), ('g', 5, 42), ('H', 6, 30)]);
    cache.ensure_text_loaded("pqgH");
    assert_eq!(cache.baseline_height("pqg"), 0);
    assert_eq!(cache.baseline_height("pqgH"), 30);
}

#[test]
fn baseline_ignores_unloaded_glyphs() {
    let (mut cache, _) = cache_with(&[('A', 4, 30), ('B', 4, 50)]);
    cache.ensure_loaded('A' as u32);
    assert_eq!(cache.baseline_height("AB"), 30);
}

#[test]
fn descender_and_quote_sets() {
    for c in ['g', 'j', 'p', 'q', 'y', ',', ';'] {
        assert!(has_descender(c as u32), "{c}");
    }
    for c in ['a', 'Q', '.', '\''] {
        assert!(!has_descender(c as u32), "{c}");
    }
    assert!(is_quote('\'' as u32));
    assert!(is_quote('"' as u32));
    assert!(!is_quote('`' as u32));
}

#[test]
fn bitmap_rejects_wrong_length() {
    assert!(CoverageBitmap::new(2, 2, vec![0; 3]).is_err());
    assert!(CoverageBitmap::new(2, 2, vec![0; 4]).is_ok());
}

#[test]
fn invalid_px_height_is_rejected() {
    assert!(GlyphCache::new(Box::new(MapRasterizer::new()), 0.0).is_err());
    assert!(GlyphCache::new(Box::new(MapRasterizer::new()), f32::NAN).is_err());
}

#[test]
fn missing_font_file_is_a_font_error() {
    let err = GlyphCache::from_font_path("no/such/font.otf", DEFAULT_FONT_PX).unwrap_err();
    assert!(matches!(err, LineboilError::Font(_)));
}
