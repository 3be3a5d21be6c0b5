use super::*;

fn ramp(w: usize, h: usize) -> Vec<u8> {
    (0..w * h).map(|i| (i % 251) as u8 + 1).collect()
}

#[test]
fn output_is_zero_or_copied_from_source() {
    let (w, h) = (23, 17);
    let src = ramp(w, h);
    let mut dst = vec![0xAA; w * h];
    for step in 0..12 {
        let t = step as f32 * 0.31;
        boil(&mut dst, &src, w, h, t, NoiseParams::default()).unwrap();
        for &v in &dst {
            assert!(v == 0 || src.contains(&v), "value {v} not from source");
        }
    }
}

#[test]
fn boil_never_mutates_source() {
    let (w, h) = (9, 9);
    let src = ramp(w, h);
    let before = src.clone();
    let mut dst = vec![0; w * h];
    boil(&mut dst, &src, w, h, 2.5, NoiseParams::default()).unwrap();
    assert_eq!(src, before);
}

#[test]
fn zero_strength_is_identity() {
    let (w, h) = (8, 5);
    let src = ramp(w, h);
    let mut dst = vec![0; w * h];
    let params = NoiseParams {
        strength: 0.0,
        freq: 0.04,
    };
    boil(&mut dst, &src, w, h, 1.0, params).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn positive_displacement_pushes_bottom_right_out_of_bounds() {
    // Noise is >= 0 and strength is large, so the last pixel samples past the edge.
    let (w, h) = (4, 4);
    let src = vec![255; w * h];
    let mut dst = vec![1; w * h];
    let params = NoiseParams {
        strength: 100.0,
        freq: 0.5,
    };
    boil(&mut dst, &src, w, h, 0.0, params).unwrap();
    assert_eq!(dst[w * h - 1], 0);
}

#[test]
fn boil_is_deterministic() {
    let (w, h) = (16, 12);
    let src = ramp(w, h);
    let mut a = vec![0; w * h];
    let mut b = vec![0; w * h];
    boil(&mut a, &src, w, h, 4.2, NoiseParams::default()).unwrap();
    boil(&mut b, &src, w, h, 4.2, NoiseParams::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn mismatched_lengths_are_rejected() {
    let src = vec![0; 12];
    let mut dst = vec![0; 11];
    let err = boil(&mut dst, &src, 4, 3, 0.0, NoiseParams::default()).unwrap_err();
    assert!(err.to_string().contains("validation error"));
}
