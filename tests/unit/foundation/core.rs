use super::*;

#[test]
fn hex_accepts_short_and_long_forms() {
    assert_eq!(HexColor::parse("#ff0000"), Some(HexColor::rgb(255, 0, 0)));
    assert_eq!(HexColor::parse("#F00"), Some(HexColor::rgb(255, 0, 0)));
    assert_eq!(HexColor::parse("#0aF"), Some(HexColor::rgb(0x00, 0xaa, 0xff)));
    assert_eq!(HexColor::parse("#00FF00").unwrap().to_string(), "#00ff00");
}

#[test]
fn hex_rejects_everything_else() {
    for bad in ["red", "ff0000", "#ff00", "#ff00000", "#gg0000", "", "#", "#ff00ff80", "#+1+"] {
        assert_eq!(HexColor::parse(bad), None, "{bad:?}");
    }
}

#[test]
fn hex_serde_uses_canonical_string() {
    let c: HexColor = serde_json::from_str("\"#ABC\"").unwrap();
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#aabbcc\"");
    assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
}

#[test]
fn viewport_parses_view_box() {
    let v = Viewport::from_view_box("0 0 1600 900").unwrap();
    assert_eq!(v, Viewport::default());
    let v = Viewport::from_view_box("10,20, 320 ,200").unwrap();
    assert_eq!((v.width, v.height), (320.0, 200.0));
    assert_eq!(v.view_box(), "0 0 320 200");
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::from_view_box("0 0 0 900").is_err());
    assert!(Viewport::from_view_box("0 0 100").is_err());
    assert!(Viewport::from_view_box("a b c d").is_err());
    assert!(Viewport::new(f64::NAN, 10.0).is_err());
    assert!(Viewport::new(10.0, -1.0).is_err());
}
