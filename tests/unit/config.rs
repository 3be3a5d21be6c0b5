use super::*;

#[test]
fn defaults_match_reference_constants() {
    let cfg = BoilConfig::default();
    assert_eq!(cfg.fps, Fps { num: 12, den: 1 });
    assert_eq!(cfg.preroll, 144);
    assert_eq!(
        cfg.canvas,
        Canvas {
            width: 1600,
            height: 500
        }
    );
    assert_eq!(cfg.noise.strength, 4.0);
    assert_eq!(cfg.noise.freq, 0.04);
    assert_eq!(cfg.metrics.line_gap, 30);
    assert_eq!(cfg.lines.len(), 9);
    assert_eq!(cfg.drain_order, DrainOrder::Fifo);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let json = r#"{ "preroll": 24, "noise": { "strength": 2.5 }, "drain_order": "lifo" }"#;
    let cfg = BoilConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.preroll, 24);
    assert_eq!(cfg.noise.strength, 2.5);
    assert_eq!(cfg.noise.freq, 0.04);
    assert_eq!(cfg.drain_order, DrainOrder::Lifo);
    assert_eq!(cfg.fps.num, 12);
}

#[test]
fn unknown_keys_are_rejected() {
    let err = BoilConfig::from_reader(r#"{ "fsp": 3 }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("parse config JSON"));
}

#[test]
fn invalid_values_are_rejected() {
    let zero_fps = r#"{ "fps": { "num": 0, "den": 1 } }"#;
    assert!(BoilConfig::from_reader(zero_fps.as_bytes()).is_err());

    let zero_canvas = r#"{ "canvas": { "width": 0, "height": 10 } }"#;
    assert!(BoilConfig::from_reader(zero_canvas.as_bytes()).is_err());

    let cfg = BoilConfig {
        lines: vec!["caf\u{e9}".to_owned()],
        ..BoilConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = BoilConfig {
        noise: NoiseParams {
            strength: f32::INFINITY,
            freq: 0.04,
        },
        ..BoilConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn text_lines_follow_pitch() {
    let cfg = BoilConfig::default();
    let lines = cfg.text_lines();
    assert_eq!(lines[0].y, 0);
    assert_eq!(lines[8].y, 8 * 54);
    assert_eq!(lines[3].text, "\"Hello!\" he said.");
}

#[test]
fn line_spacing_overflow_is_a_validation_error() {
    let mut cfg = BoilConfig::default();
    cfg.metrics.line_gap = i32::MAX;
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, LineboilError::Validation(_)));

    let json = r#"{ "metrics": { "line_gap": 2147483647 } }"#;
    assert!(BoilConfig::from_reader(json.as_bytes()).is_err());

    // Pitch fits on its own but the ninth line lands past i32::MAX.
    let mut cfg = BoilConfig::default();
    cfg.metrics.line_gap = i32::MAX / 4;
    assert!(cfg.validate().is_err());
    cfg.lines.truncate(2);
    cfg.validate().unwrap();
}

#[test]
fn negative_line_spacing_is_rejected() {
    let mut cfg = BoilConfig::default();
    cfg.metrics.glyph_row_height = -500;
    assert!(cfg.validate().is_err());

    let mut cfg = BoilConfig::default();
    cfg.metrics.line_gap = -1;
    assert!(cfg.validate().is_err());

    let mut cfg = BoilConfig::default();
    cfg.metrics.fallback_advance = -1;
    assert!(cfg.validate().is_err());
}
