use super::*;

#[test]
fn empty_json_yields_defaults() {
    let cfg = GardenConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, GardenConfig::default());
    assert_eq!(cfg.render.columns, 10);
    assert_eq!(cfg.viewport, Viewport::default());
}

#[test]
fn partial_sections_merge_with_defaults() {
    let cfg = GardenConfig::from_json_str(
        r##"{
            "acquire": { "endpoint": "https://example.com/exec", "limit": "25" },
            "render": { "columns": 7, "showLabels": true, "theme": { "primary": "#112233" } },
            "viewport": { "width": 800, "height": 450 }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.acquire.endpoint(), "https://example.com/exec");
    assert_eq!(cfg.acquire.limit(), 25);
    assert_eq!(cfg.render.columns, 7);
    assert!(cfg.render.show_labels);
    assert_eq!(cfg.render.theme.primary, HexColor::rgb(0x11, 0x22, 0x33));
    assert_eq!(cfg.render.theme.secondary, Theme::default().secondary);
    assert_eq!(cfg.viewport.width, 800.0);
}

#[test]
fn invalid_values_are_config_errors() {
    for bad in [
        r#"{ "render": { "columns": 0 } }"#,
        r#"{ "render": { "ceilings": { "score": 0 } } }"#,
        r#"{ "viewport": { "width": -1, "height": 10 } }"#,
        r#"{ "render": { "theme": { "primary": "red" } } }"#,
        r#"{ "acquire": { "endpoint": "nope" } }"#,
        "not json",
    ] {
        let err = GardenConfig::from_json_str(bad).unwrap_err();
        assert!(matches!(err, GardenError::Config(_)), "{bad}: {err}");
    }
}

#[test]
fn from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garden.json");
    std::fs::write(&path, r#"{ "render": { "vignette": false } }"#).unwrap();
    let cfg = GardenConfig::from_path(&path).unwrap();
    assert!(!cfg.render.vignette);
    assert!(GardenConfig::from_path(&dir.path().join("missing.json")).is_err());
}
