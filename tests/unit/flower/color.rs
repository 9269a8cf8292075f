use super::*;

#[test]
fn endpoints_are_exact() {
    let a = HexColor::rgb(12, 200, 99);
    let b = HexColor::rgb(250, 3, 180);
    assert_eq!(blend(a, b, 0.0), a);
    assert_eq!(blend(a, b, 1.0), b);
}

#[test]
fn midpoint_and_clamping() {
    let black = HexColor::BLACK;
    let white = HexColor::WHITE;
    assert_eq!(blend(black, white, 0.5), HexColor::rgb(128, 128, 128));
    assert_eq!(blend(black, white, -3.0), black);
    assert_eq!(blend(black, white, 9.0), white);
    assert_eq!(blend(black, white, f64::NAN), black);
}

#[test]
fn lighten_moves_toward_white() {
    assert_eq!(lighten(HexColor::rgb(255, 0, 0), 0.4), HexColor::rgb(255, 102, 102));
}
