//! RGB blending used for petal and accent colors.

use crate::foundation::core::HexColor;
use crate::foundation::math::clamp01;

/// Per-channel linear blend in RGB space. `t` is clamped to `[0, 1]`; `t == 0` returns `a` and
/// `t == 1` returns `b` exactly.
pub fn blend(a: HexColor, b: HexColor, t: f64) -> HexColor {
    let t = clamp01(t);
    let ch = |x: u8, y: u8| -> u8 {
        let x = f64::from(x);
        let y = f64::from(y);
        (x + (y - x) * t).round().clamp(0.0, 255.0) as u8
    };
    HexColor::rgb(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b))
}

/// Blend toward white.
pub fn lighten(c: HexColor, t: f64) -> HexColor {
    blend(c, HexColor::WHITE, t)
}

#[cfg(test)]
#[path = "../../tests/unit/flower/color.rs"]
mod tests;
