use std::path::Path;

use anyhow::Context as _;

use crate::acquire::config::AcquireConfig;
use crate::foundation::core::{HexColor, Viewport};
use crate::foundation::error::{GardenError, GardenResult};

/// Palette used for defaults during normalization and for every non-record layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    /// Fallback for a record's primary (petal) color.
    pub primary: HexColor,
    /// Fallback for a record's secondary (disk) color.
    pub secondary: HexColor,
    /// Stem stroke.
    pub stem: HexColor,
    /// Leaf fill.
    pub leaf: HexColor,
    /// Sky gradient, top.
    pub sky_top: HexColor,
    /// Sky gradient, bottom.
    pub sky_bottom: HexColor,
    /// Far hill silhouette.
    pub hill_far: HexColor,
    /// Near hill silhouette.
    pub hill_near: HexColor,
    /// Ground gradient, top.
    pub ground_top: HexColor,
    /// Ground gradient, bottom.
    pub ground_bottom: HexColor,
    /// Horizon haze.
    pub haze: HexColor,
    /// Grass tufts.
    pub grass: HexColor,
    /// Captions and labels.
    pub text: HexColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: HexColor::rgb(0xff, 0xd0, 0x5a),
            secondary: HexColor::rgb(0xff, 0x8f, 0x6b),
            stem: HexColor::rgb(0x78, 0xdc, 0xa0),
            leaf: HexColor::rgb(0x4f, 0xa8, 0x72),
            sky_top: HexColor::rgb(0x0b, 0x10, 0x26),
            sky_bottom: HexColor::rgb(0x2b, 0x3a, 0x67),
            hill_far: HexColor::rgb(0x1d, 0x2b, 0x4a),
            hill_near: HexColor::rgb(0x16, 0x23, 0x3b),
            ground_top: HexColor::rgb(0x1f, 0x3b, 0x2c),
            ground_bottom: HexColor::rgb(0x0e, 0x1d, 0x15),
            haze: HexColor::rgb(0x9f, 0xb4, 0xd8),
            grass: HexColor::rgb(0x2f, 0x5e, 0x3f),
            text: HexColor::rgb(0xe8, 0xec, 0xf5),
        }
    }
}

/// Reference ceilings that map raw metrics to boosts in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MetricCeilings {
    /// Daily score that yields a full boost.
    pub score: f64,
    /// Entry count that yields a full boost.
    pub entries: f64,
    /// Level that yields a full boost.
    pub level: f64,
}

impl Default for MetricCeilings {
    fn default() -> Self {
        Self {
            score: 100.0,
            entries: 10.0,
            level: 5.0,
        }
    }
}

/// Knobs for the layout/generate/compose pipeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Grid columns before wrapping to a new row.
    pub columns: usize,
    /// Palette.
    pub theme: Theme,
    /// Boost ceilings.
    pub ceilings: MetricCeilings,
    /// Draw each record's label under its flower.
    pub show_labels: bool,
    /// Darken the corners.
    pub vignette: bool,
    /// Foreground caption, e.g. bot name and record count.
    pub summary: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            columns: crate::layout::DEFAULT_COLUMNS,
            theme: Theme::default(),
            ceilings: MetricCeilings::default(),
            show_labels: false,
            vignette: true,
            summary: None,
        }
    }
}

impl RenderOptions {
    /// Reject zero columns and non-positive or non-finite ceilings.
    pub fn validate(&self) -> GardenResult<()> {
        if self.columns == 0 {
            return Err(GardenError::config("columns must be >= 1"));
        }
        for (name, v) in [
            ("score", self.ceilings.score),
            ("entries", self.ceilings.entries),
            ("level", self.ceilings.level),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(GardenError::config(format!(
                    "{name} ceiling must be > 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Full configuration: acquisition, rendering, and the target viewport.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Transport, endpoint and cache settings.
    pub acquire: AcquireConfig,
    /// Scene options.
    pub render: RenderOptions,
    /// Target drawing area.
    pub viewport: Viewport,
}

impl GardenConfig {
    /// Parse and validate a JSON config. Missing sections take their defaults.
    pub fn from_json_str(s: &str) -> GardenResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| GardenError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config file, then parse it as [`GardenConfig::from_json_str`] does.
    pub fn from_path(path: &Path) -> GardenResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check render options and viewport.
    pub fn validate(&self) -> GardenResult<()> {
        self.render.validate()?;
        Viewport::new(self.viewport.width, self.viewport.height)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
