use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

#[test]
fn new_frame_is_transparent() {
    let f = Frame::try_new(canvas(4, 3)).unwrap();
    assert_eq!(f.pixels().len(), 12);
    assert_eq!(f.covered_pixels(), 0);
}

#[test]
fn zero_sized_frame_is_rejected() {
    assert!(Frame::try_new(canvas(0, 3)).is_err());
}

#[test]
fn stamp_skips_zero_and_clips() {
    let mut f = Frame::try_new(canvas(2, 2)).unwrap();
    f.stamp(0, 0, 0);
    f.stamp(-1, 0, 200);
    f.stamp(2, 1, 200);
    f.stamp(1, 5, 200);
    assert_eq!(f.covered_pixels(), 0);

    f.stamp(1, 1, 200);
    assert_eq!(f.pixels()[3], 0xFFFF_FFC8);
    assert_eq!(f.coverage_at(1, 1), Some(200));
    assert_eq!(f.coverage_at(2, 1), None);
}

#[test]
fn rgba8_is_white_with_coverage_alpha() {
    let mut f = Frame::try_new(canvas(2, 1)).unwrap();
    f.stamp(1, 0, 7);
    assert_eq!(f.to_rgba8(), vec![0, 0, 0, 0, 255, 255, 255, 7]);
}

#[test]
fn clear_resets_pixels() {
    let mut f = Frame::try_new(canvas(3, 3)).unwrap();
    f.stamp(1, 1, 9);
    f.clear();
    assert_eq!(f.covered_pixels(), 0);
}
