use crate::config::Theme;
use crate::foundation::core::{BezPath, HexColor, Point, Viewport};
use crate::foundation::math::Rng32;
use crate::scene::model::{Gradient, GradientStop, Paint, SceneNode, Style};

/// Horizon line as a fraction of viewport height; ground fills below it.
pub const GROUND_Y: f64 = 0.62;
const GRASS_TUFTS: usize = 160;

pub(crate) const SKY_GRADIENT: &str = "sky";
pub(crate) const GROUND_GRADIENT: &str = "ground";
pub(crate) const HAZE_GRADIENT: &str = "haze";
pub(crate) const VIGNETTE_GRADIENT: &str = "vignette";

fn full_rect(viewport: Viewport, y: f64, height: f64, style: Style) -> SceneNode {
    SceneNode::Rect {
        x: 0.0,
        y,
        width: viewport.width,
        height,
        style,
    }
}

pub(crate) fn sky(viewport: Viewport, theme: &Theme) -> (Gradient, SceneNode) {
    let gradient = Gradient::Vertical {
        id: SKY_GRADIENT.to_owned(),
        stops: vec![
            GradientStop::new(0.0, theme.sky_top, 1.0),
            GradientStop::new(1.0, theme.sky_bottom, 1.0),
        ],
    };
    let rect = full_rect(
        viewport,
        0.0,
        viewport.height,
        Style::fill(Paint::Gradient(SKY_GRADIENT.to_owned())),
    );
    (gradient, rect)
}

/// Rolling silhouette band closed down to the bottom edge. Shape depends only on `key`.
pub(crate) fn hills(
    viewport: Viewport,
    key: &str,
    baseline: f64,
    amplitude: f64,
    color: HexColor,
) -> SceneNode {
    const SEGMENTS: usize = 8;
    let mut rng = Rng32::from_key(key);
    let base_y = viewport.height * baseline;
    let amp = viewport.height * amplitude;
    let step = viewport.width / SEGMENTS as f64;

    let mut path = BezPath::new();
    path.move_to((0.0, viewport.height));
    let mut prev = Point::new(0.0, base_y - amp * rng.next_f64());
    path.line_to(prev);
    for i in 1..=SEGMENTS {
        let next = Point::new(step * i as f64, base_y - amp * rng.next_f64());
        let mid_x = (prev.x + next.x) * 0.5;
        path.curve_to(Point::new(mid_x, prev.y), Point::new(mid_x, next.y), next);
        prev = next;
    }
    path.line_to((viewport.width, viewport.height));
    path.close_path();

    SceneNode::Path {
        path,
        style: Style::fill(Paint::Solid(color)),
    }
}

pub(crate) fn ground(viewport: Viewport, theme: &Theme) -> (Gradient, SceneNode) {
    let gradient = Gradient::Vertical {
        id: GROUND_GRADIENT.to_owned(),
        stops: vec![
            GradientStop::new(0.0, theme.ground_top, 1.0),
            GradientStop::new(1.0, theme.ground_bottom, 1.0),
        ],
    };
    let top = viewport.height * GROUND_Y;
    let rect = full_rect(
        viewport,
        top,
        viewport.height - top,
        Style::fill(Paint::Gradient(GROUND_GRADIENT.to_owned())),
    );
    (gradient, rect)
}

/// Soft band of haze straddling the horizon.
pub(crate) fn haze(viewport: Viewport, theme: &Theme) -> (Gradient, SceneNode) {
    let gradient = Gradient::Vertical {
        id: HAZE_GRADIENT.to_owned(),
        stops: vec![
            GradientStop::new(0.0, theme.haze, 0.0),
            GradientStop::new(0.5, theme.haze, 0.28),
            GradientStop::new(1.0, theme.haze, 0.0),
        ],
    };
    let band = viewport.height * 0.12;
    let rect = full_rect(
        viewport,
        viewport.height * GROUND_Y - band * 0.5,
        band,
        Style::fill(Paint::Gradient(HAZE_GRADIENT.to_owned())),
    );
    (gradient, rect)
}

/// Grass tufts scattered over the ground. Fixed count, fixed seed.
pub(crate) fn ground_cover(viewport: Viewport, theme: &Theme) -> Vec<SceneNode> {
    let mut rng = Rng32::from_key("ground-cover");
    let s = viewport.height / 900.0;
    let top = viewport.height * (GROUND_Y + 0.02);
    (0..GRASS_TUFTS)
        .map(|_| {
            let x = rng.range(0.0, viewport.width);
            let y = rng.range(top, viewport.height);
            // Tufts further down (closer) are taller.
            let depth = (y - top) / (viewport.height - top).max(1e-9);
            let len = s * (4.0 + 10.0 * depth) * rng.range(0.7, 1.3);
            SceneNode::Line {
                from: Point::new(x, y),
                to: Point::new(x + rng.jitter(len * 0.4), y - len),
                style: Style::stroke(Paint::Solid(theme.grass), s * 1.2)
                    .with_opacity(0.35 + 0.5 * depth),
            }
        })
        .collect()
}

pub(crate) fn vignette(viewport: Viewport) -> (Gradient, SceneNode) {
    let gradient = Gradient::Radial {
        id: VIGNETTE_GRADIENT.to_owned(),
        cx: 0.5,
        cy: 0.45,
        r: 0.75,
        stops: vec![
            GradientStop::new(0.6, HexColor::BLACK, 0.0),
            GradientStop::new(1.0, HexColor::BLACK, 0.55),
        ],
    };
    let rect = full_rect(
        viewport,
        0.0,
        viewport.height,
        Style::fill(Paint::Gradient(VIGNETTE_GRADIENT.to_owned())),
    );
    (gradient, rect)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/backdrop.rs"]
mod tests;
