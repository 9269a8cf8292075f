use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Viewport;
use crate::foundation::error::GardenResult;
use crate::render::svg::scene_to_svg;
use crate::scene::SceneSpec;

/// Render target: a declared view box and at most one attached scene tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgMount {
    viewport: Viewport,
    attached: Option<SceneSpec>,
}

impl SvgMount {
    /// Empty mount over `viewport`.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            attached: None,
        }
    }

    /// Mount sized by an SVG `viewBox` string.
    pub fn from_view_box(view_box: &str) -> GardenResult<Self> {
        Ok(Self::new(Viewport::from_view_box(view_box)?))
    }

    /// Viewport derived from the mount's view box, for layout and composition.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The scene currently mounted.
    pub fn attached(&self) -> Option<&SceneSpec> {
        self.attached.as_ref()
    }

    /// `true` when no scene is mounted.
    pub fn is_empty(&self) -> bool {
        self.attached.is_none()
    }

    /// Detach and drop the current scene, if any.
    pub fn clear(&mut self) {
        self.attached = None;
    }

    /// Serialize the attached scene. An empty mount yields an empty SVG of its own view box.
    pub fn to_svg_string(&self) -> String {
        match &self.attached {
            Some(scene) => scene_to_svg(scene),
            None => format!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{}\"/>\n",
                self.viewport.view_box()
            ),
        }
    }

    /// Write [`SvgMount::to_svg_string`] to `path`.
    pub fn write_svg(&self, path: &Path) -> GardenResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, self.to_svg_string())
            .with_context(|| format!("write svg '{}'", path.display()))?;
        Ok(())
    }
}

/// Swap `scene` into `mount`: the previous tree is cleared before the new one is attached.
/// A missing mount is a logged no-op; returns whether anything was attached.
pub fn render(scene: &SceneSpec, mount: Option<&mut SvgMount>) -> bool {
    let Some(mount) = mount else {
        tracing::warn!("render skipped: no mount point");
        return false;
    };
    if scene.viewport != mount.viewport {
        tracing::debug!(
            scene = ?scene.viewport,
            mount = ?mount.viewport,
            "scene viewport differs from mount view box"
        );
    }
    mount.clear();
    mount.attached = Some(scene.clone());
    tracing::debug!(nodes = scene.node_count(), "scene attached");
    true
}

#[cfg(test)]
#[path = "../../tests/unit/render/mount.rs"]
mod tests;
