use super::*;

#[test]
fn lines_stack_by_pitch() {
    let metrics = LineMetrics::default();
    let lines = TextLine::stack(&["a", "b", "c"], &metrics);
    let ys: Vec<i32> = lines.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![0, 54, 108]);
}

#[test]
fn glyph_time_staggers_per_character() {
    assert_eq!(glyph_time(0.0, 0), 0.0);
    assert!((glyph_time(1.0, 2) - 0.6).abs() < 1e-6);
    assert!((glyph_time(2.0, 1) - 0.75).abs() < 1e-6);
}

#[test]
fn placement_rules() {
    // baseline 40, glyph 30 tall, line at y=54
    assert_eq!(glyph_top('A' as u32, 54, 40, 30), 64);
    assert_eq!(glyph_top('p' as u32, 54, 40, 30), 77);
    assert_eq!(glyph_top('"' as u32, 54, 40, 10), 54);
    assert_eq!(glyph_top('\'' as u32, 54, 40, 10), 54);
}

#[test]
fn taller_than_baseline_rises_above_line() {
    assert_eq!(glyph_top('g' as u32, 0, 0, 20), -7);
    assert_eq!(glyph_top('x' as u32, 0, 10, 20), -10);
}

#[test]
fn baseline_of_skips_descenders_and_unloaded() {
    let heights = |code: u32| match char::from_u32(code) {
        Some('A') => Some(30),
        Some('y') => Some(45),
        Some('b') => Some(33),
        _ => None,
    };
    assert_eq!(baseline_of("Ay", heights), 30);
    assert_eq!(baseline_of("Aby?", heights), 33);
    assert_eq!(baseline_of("y", heights), 0);
    assert_eq!(baseline_of("", heights), 0);
}

#[test]
fn stacking_saturates_instead_of_overflowing() {
    let metrics = LineMetrics {
        line_gap: i32::MAX,
        ..LineMetrics::default()
    };
    assert_eq!(metrics.pitch(), i32::MAX);
    assert!(metrics.validate(1).is_err());
    let ys: Vec<i32> = TextLine::stack(&["a", "b", "c"], &metrics)
        .iter()
        .map(|l| l.y)
        .collect();
    assert_eq!(ys, vec![0, i32::MAX, i32::MAX]);
}

#[test]
fn default_metrics_validate_for_any_realistic_line_count() {
    let metrics = LineMetrics::default();
    metrics.validate(0).unwrap();
    metrics.validate(9).unwrap();
    metrics.validate(10_000).unwrap();
}
