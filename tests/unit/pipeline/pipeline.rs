use super::*;
use crate::foundation::core::HexColor;
use serde_json::json;

#[test]
fn payload_to_scene() {
    let p = GardenPipeline::default();
    let raw = json!({
        "ok": true,
        "rows": [
            { "DateKey": "2024-01-01", "DailyScore": 10 },
            { "DateKey": "2024-01-02", "DailyScore": "55" },
            "garbage"
        ]
    });
    let (scene, report) = p.build_from_payload(&raw);
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.degraded, 1);
    assert_eq!(scene.flowers().len(), 3);
    assert!(!scene.placeholder);
}

#[test]
fn empty_payload_builds_placeholder() {
    let p = GardenPipeline::default();
    let (scene, report) = p.build_from_payload(&json!({ "ok": true, "rows": [] }));
    assert!(report.records.is_empty());
    assert!(scene.placeholder);
    assert_eq!(scene, p.placeholder());
}

#[test]
fn theme_supplies_missing_colors() {
    let mut options = RenderOptions::default();
    options.theme.primary = HexColor::rgb(1, 2, 3);
    let p = GardenPipeline::new(options, Viewport::default());
    let (_, report) = p.build_from_payload(&json!([{ "date": "2024-02-02" }]));
    assert_eq!(report.records[0].primary_color, HexColor::rgb(1, 2, 3));
}

#[test]
fn columns_option_drives_layout() {
    let options = RenderOptions {
        columns: 1,
        ..RenderOptions::default()
    };
    let vp = Viewport::default();
    let p = GardenPipeline::new(options, vp);
    let records: Vec<_> = (0..3)
        .map(|i| DayRecord::placeholder(i, HexColor::WHITE, HexColor::BLACK))
        .collect();
    let scene = p.build(&records);
    assert_eq!(scene.flowers().len(), 3);
    assert_eq!(p.viewport(), vp);
}
