use crate::foundation::core::HexColor;

/// Raw daily metrics, unclamped. Always finite.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Metrics {
    /// Daily score.
    pub score: f64,
    /// Logged entries.
    pub entries: f64,
    /// Level reached.
    pub level: f64,
}

/// Canonical record for one day, produced by normalization.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Seed identity for procedural generation; usually the date key.
    pub identity_key: String,
    /// Petal color.
    pub primary_color: HexColor,
    /// Disk color.
    pub secondary_color: HexColor,
    /// Numeric metrics, 0 when absent.
    pub metrics: Metrics,
    /// Display label; may be empty.
    pub label: String,
    /// Coarser period the day belongs to, used only as label context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_key: Option<String>,
}

impl DayRecord {
    /// Record carrying only defaults, keyed by its position.
    pub fn placeholder(index: usize, primary: HexColor, secondary: HexColor) -> Self {
        Self {
            identity_key: positional_key(index),
            primary_color: primary,
            secondary_color: secondary,
            metrics: Metrics::default(),
            label: String::new(),
            week_key: None,
        }
    }

    /// Label to draw: the explicit label, else the identity key.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.identity_key
        } else {
            &self.label
        }
    }
}

/// Identity used when a row carries no date/identity of its own.
pub fn positional_key(index: usize) -> String {
    format!("idx:{index}")
}
