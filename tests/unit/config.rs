use super::*;

#[test]
fn defaults_reproduce_reference_constants() {
    let cfg = HeatmapConfig::default();
    cfg.validate().unwrap();
    let style = cfg.frame_style().unwrap();
    assert_eq!(style, FrameStyle::default());
    assert_eq!(cfg.tick_period(), Duration::from_secs(1));
    assert_eq!(cfg.palette.dark_blue, "#141233");
}

#[test]
fn empty_json_is_default() {
    let cfg = HeatmapConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, HeatmapConfig::default());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg = HeatmapConfig::from_json_str(
        r##"{ "canvas": { "width": 300, "height": 200 }, "palette": { "pink": "#ff00ff" },
            "tick_period_ms": 250, "mirror_background": true }"##,
    )
    .unwrap();
    cfg.validate().unwrap();
    let style = cfg.frame_style().unwrap();
    assert_eq!(style.canvas, Canvas { width: 300, height: 200 });
    assert_eq!(style.palette.pink, Rgb::new(0xFF, 0x00, 0xFF));
    assert_eq!(style.palette.orange, Palette::default().orange);
    assert_eq!(cfg.tick_period(), Duration::from_millis(250));
    assert!(cfg.mirror_background);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = HeatmapConfig::from_json_str(r#"{ "fps": 30 }"#).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));
}

#[test]
fn malformed_palette_hex_is_a_color_error() {
    let mut cfg = HeatmapConfig::default();
    cfg.palette.orange = "FF4500".to_string();
    assert!(matches!(
        cfg.validate(),
        Err(HeatmapError::MalformedColor(_))
    ));

    let mut cfg = HeatmapConfig::default();
    cfg.glyph.high = "#FFF".to_string();
    assert!(matches!(
        cfg.validate(),
        Err(HeatmapError::MalformedColor(_))
    ));
}

#[test]
fn rejects_bad_geometry_and_timing() {
    let mut cfg = HeatmapConfig::default();
    cfg.canvas.width = 0;
    assert!(matches!(cfg.validate(), Err(HeatmapError::Validation(_))));

    let mut cfg = HeatmapConfig::default();
    cfg.canvas.height = 70_000;
    assert!(matches!(cfg.validate(), Err(HeatmapError::Validation(_))));

    let mut cfg = HeatmapConfig::default();
    cfg.bounds.lat_min = cfg.bounds.lat_max;
    assert!(matches!(cfg.validate(), Err(HeatmapError::Validation(_))));

    let mut cfg = HeatmapConfig::default();
    cfg.glyph.min_radius = 9.0;
    assert!(matches!(cfg.validate(), Err(HeatmapError::Validation(_))));

    let mut cfg = HeatmapConfig::default();
    cfg.tick_period_ms = 0;
    assert!(matches!(cfg.validate(), Err(HeatmapError::Validation(_))));
}

#[test]
fn midpoint_override_applies_to_stats() {
    let stats = RidershipStats::new(0.0, 100.0, 50.0).unwrap();
    let cfg = HeatmapConfig {
        midpoint_ridership: Some(20.0),
        ..HeatmapConfig::default()
    };
    assert_eq!(cfg.apply_to_stats(stats).unwrap().midpoint(), 20.0);
    let unchanged = HeatmapConfig::default().apply_to_stats(stats).unwrap();
    assert_eq!(unchanged, stats);

    let out_of_range = HeatmapConfig {
        midpoint_ridership: Some(500.0),
        ..HeatmapConfig::default()
    };
    assert!(out_of_range.apply_to_stats(stats).is_err());
}

#[test]
fn from_path_reports_missing_file() {
    let err = HeatmapConfig::from_path("target/does-not-exist/heatmap.json").unwrap_err();
    assert!(err.to_string().contains("open heatmap config"));
}
