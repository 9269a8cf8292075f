use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{GardenError, GardenResult};
use crate::render::mount::SvgMount;

/// Straight-alpha RGBA8 image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8, row-major.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// RGBA at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: &Path) -> GardenResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

const MAX_DIM: u32 = 16_384;

/// Rasterize SVG text at `scale` times its intrinsic size.
pub fn rasterize_svg(svg: &str, scale: f32) -> GardenResult<RasterImage> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(GardenError::config(format!("raster scale must be > 0, got {scale}")));
    }

    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    let opts = usvg::Options {
        fontdb: Arc::new(fontdb),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;

    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(GardenError::config(format!(
            "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| GardenError::config("failed to allocate pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Ok(RasterImage {
        width,
        height,
        data,
    })
}

/// Rasterize whatever is attached to `mount`.
#[tracing::instrument(skip(mount))]
pub fn rasterize_mount(mount: &SvgMount, scale: f32) -> GardenResult<RasterImage> {
    rasterize_svg(&mount.to_svg_string(), scale)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
