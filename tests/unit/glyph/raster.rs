use super::*;

#[test]
fn empty_glyph_has_no_area() {
    assert!(RasterGlyph::empty().is_empty());
    let g = RasterGlyph {
        width: 3,
        height: 0,
        coverage: Vec::new(),
    };
    assert!(g.is_empty());
}

#[test]
fn garbage_font_bytes_are_a_font_error() {
    let err = FontdueRasterizer::from_bytes(b"not a font", 64.0)
        .err()
        .expect("garbage bytes must not parse");
    assert!(matches!(err, LineboilError::Font(_)));
}

#[test]
fn map_rasterizer_serves_registered_glyphs_only() {
    let mut r = MapRasterizer::new();
    r.insert_block('A', 3, 2);
    let a = r.rasterize('A', 64.0);
    assert_eq!((a.width, a.height), (3, 2));
    assert_eq!(a.coverage, vec![255; 6]);
    assert!(r.rasterize('B', 64.0).is_empty());
}
