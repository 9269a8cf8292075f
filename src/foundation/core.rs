//! Viewport and color types plus the kurbo geometry re-exports.

use crate::foundation::error::{GardenError, GardenResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Drawing area shared by layout and composition for one render pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in user units.
    pub width: f64,
    /// Height in user units.
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
        }
    }
}

impl Viewport {
    /// Build a viewport, rejecting non-finite or non-positive sizes.
    pub fn new(width: f64, height: f64) -> GardenResult<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(GardenError::config(format!("viewport width must be > 0, got {width}")));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(GardenError::config(format!("viewport height must be > 0, got {height}")));
        }
        Ok(Self { width, height })
    }

    /// Parse an SVG `viewBox` value (`"min-x min-y width height"`, space or comma separated).
    pub fn from_view_box(view_box: &str) -> GardenResult<Self> {
        let parts = view_box
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GardenError::config(format!("invalid viewBox \"{view_box}\": {e}")))?;
        match parts.as_slice() {
            [_, _, w, h] => Self::new(*w, *h),
            _ => Err(GardenError::config(format!(
                "viewBox must have 4 numbers, got \"{view_box}\""
            ))),
        }
    }

    /// The `viewBox` attribute value for this viewport.
    pub fn view_box(self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Opaque sRGB color that is always valid `#rrggbb` hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexColor {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl HexColor {
    /// `#ffffff`
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
    /// `#000000`
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` (case-insensitive). Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |pair: &str| u8::from_str_radix(pair, 16).ok();
        match hex.len() {
            3 => {
                let nib = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 17);
                Some(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Some(Self::rgb(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
            )),
            _ => None,
        }
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for HexColor {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| GardenError::config(format!("color must be #RGB or #RRGGBB, got \"{s}\"")))
    }
}

impl serde::Serialize for HexColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for HexColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
