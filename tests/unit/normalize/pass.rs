use super::*;
use serde_json::json;

#[test]
fn end_to_end_row_normalizes() {
    let raw = json!({
        "ok": true,
        "rows": [{
            "DateKey": "2024-01-01",
            "PrimaryColor": "#ff0000",
            "SecondaryColor": "#00ff00",
            "DailyScore": 80
        }]
    });
    let records = normalize(&raw);
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.identity_key, "2024-01-01");
    assert_eq!(r.primary_color, HexColor::rgb(255, 0, 0));
    assert_eq!(r.secondary_color, HexColor::rgb(0, 255, 0));
    assert_eq!(r.metrics.score, 80.0);
    assert_eq!(r.metrics.entries, 0.0);
    assert_eq!(r.metrics.level, 0.0);
}

#[test]
fn shape_resolution_order() {
    assert_eq!(normalize(&json!([{}, {}])).len(), 2);
    assert_eq!(normalize(&json!({"days": [{}]})).len(), 1);
    assert_eq!(normalize(&json!({"data": [{}, {}, {}]})).len(), 3);
    // `rows` wins over `days`; non-array collections are skipped.
    assert_eq!(normalize(&json!({"rows": [{}], "days": [{}, {}]})).len(), 1);
    assert_eq!(normalize(&json!({"rows": "nope", "days": [{}, {}]})).len(), 2);
}

#[test]
fn unrecognized_shapes_yield_nothing() {
    for raw in [
        json!(null),
        json!({}),
        json!(42),
        json!("rows"),
        json!({"ok": false, "error": "boom"}),
    ] {
        assert!(normalize(&raw).is_empty(), "{raw}");
    }
}

#[test]
fn garbage_rows_keep_their_slot() {
    let theme = Theme::default();
    let raw = json!([null, 7, "x", [1, 2], {"date": "2024-02-02"}, true]);
    let report = normalize_with(&raw, &theme);
    assert_eq!(report.records.len(), 6);
    assert_eq!(report.degraded, 5);
    assert_eq!(report.records[0].identity_key, "idx:0");
    assert_eq!(report.records[3].identity_key, "idx:3");
    assert_eq!(report.records[4].identity_key, "2024-02-02");
    assert_eq!(report.records[5].primary_color, theme.primary);
}

#[test]
fn invalid_colors_fall_back_to_role_defaults() {
    let theme = Theme::default();
    let raw = json!([{"primaryColor": "red", "secondaryColor": "#12345"}]);
    let report = normalize_with(&raw, &theme);
    assert_eq!(report.records[0].primary_color, theme.primary);
    assert_eq!(report.records[0].secondary_color, theme.secondary);
    assert_eq!(report.degraded, 1);
    assert_ne!(theme.primary, theme.secondary);
}

#[test]
fn aliases_prefer_first_non_empty_value() {
    let raw = json!([{
        "DateKey": "  ",
        "dateKey": null,
        "date": "2024-03-03",
        "color": "#ABC",
        "c2": "#def",
        "score": "55.5",
        "EntryCount": 3,
        "lvl": 2,
        "Title": "Sunday",
        "WeekKey": "2024-W09"
    }]);
    let r = &normalize(&raw)[0];
    assert_eq!(r.identity_key, "2024-03-03");
    assert_eq!(r.primary_color.to_string(), "#aabbcc");
    assert_eq!(r.secondary_color.to_string(), "#ddeeff");
    assert_eq!(r.metrics.score, 55.5);
    assert_eq!(r.metrics.entries, 3.0);
    assert_eq!(r.metrics.level, 2.0);
    assert_eq!(r.label, "Sunday");
    assert_eq!(r.week_key.as_deref(), Some("2024-W09"));
}

#[test]
fn numbers_are_coerced_without_clamping() {
    let raw = json!([
        {"score": "NaN", "entries": "inf", "level": {}},
        {"score": -40, "entries": 1e6, "level": "7"},
    ]);
    let report = normalize_with(&raw, &Theme::default());
    let m0 = report.records[0].metrics;
    assert_eq!((m0.score, m0.entries, m0.level), (0.0, 0.0, 0.0));
    let m1 = report.records[1].metrics;
    assert_eq!((m1.score, m1.entries, m1.level), (-40.0, 1e6, 7.0));
    assert_eq!(report.degraded, 1);
}

#[test]
fn numeric_identity_is_stringified() {
    let r = &normalize(&json!([{"id": 20240101}]))[0];
    assert_eq!(r.identity_key, "20240101");
    assert_eq!(r.display_label(), "20240101");
}

#[test]
fn validation_surfaces_server_reason() {
    let err = validate_payload(&json!({"ok": false, "error": "sheet missing"})).unwrap_err();
    assert!(err.to_string().contains("sheet missing"));
    let err = validate_payload(&json!({"ok": false})).unwrap_err();
    assert!(err.to_string().contains("ok:false"));
    assert!(validate_payload(&json!({"ok": true})).is_err());
    assert!(validate_payload(&json!(null)).is_err());
    assert!(validate_payload(&json!({"ok": true, "rows": []})).is_ok());
    assert!(validate_payload(&json!([])).is_ok());
}
