use crate::config::RenderOptions;
use crate::foundation::core::Viewport;
use crate::layout::GridLayout;
use crate::normalize::{DayRecord, NormalizeReport, normalize_with};
use crate::scene::{Composer, SceneSpec};

/// Normalize, lay out, generate and compose in strict sequence for one viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct GardenPipeline {
    composer: Composer,
    grid: GridLayout,
    viewport: Viewport,
}

impl GardenPipeline {
    /// Pipeline drawing into `viewport` with `options`; the grid takes its column count from the
    /// options.
    pub fn new(options: RenderOptions, viewport: Viewport) -> Self {
        let grid = GridLayout::with_columns(options.columns);
        Self {
            composer: Composer::new(options),
            grid,
            viewport,
        }
    }

    /// Target viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Render options shared with the composer.
    pub fn options(&self) -> &RenderOptions {
        self.composer.options()
    }

    /// Scene for already-normalized records. Empty input yields the placeholder scene.
    pub fn build(&self, records: &[DayRecord]) -> SceneSpec {
        self.build_with_notice(records, None)
    }

    /// [`GardenPipeline::build`] with an optional status notice in the foreground.
    #[tracing::instrument(skip_all, fields(records = records.len()))]
    pub fn build_with_notice(&self, records: &[DayRecord], notice: Option<&str>) -> SceneSpec {
        let positions = self.grid.positions(records.len(), self.viewport);
        let scene = self
            .composer
            .compose_with_notice(records, &positions, self.viewport, notice);
        tracing::info!(
            flowers = scene.flowers().len(),
            nodes = scene.node_count(),
            placeholder = scene.placeholder,
            "scene built"
        );
        scene
    }

    /// Normalize a raw payload with the configured theme, then build.
    pub fn build_from_payload(&self, raw: &serde_json::Value) -> (SceneSpec, NormalizeReport) {
        let report = normalize_with(raw, &self.options().theme);
        if report.degraded > 0 {
            tracing::warn!(degraded = report.degraded, "rows fell back to defaults");
        }
        (self.build(&report.records), report)
    }

    /// The data-independent scene shown when nothing is loaded.
    pub fn placeholder(&self) -> SceneSpec {
        self.composer.compose_placeholder(self.viewport)
    }
}

impl Default for GardenPipeline {
    fn default() -> Self {
        Self::new(RenderOptions::default(), Viewport::default())
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/pipeline.rs"]
mod tests;
