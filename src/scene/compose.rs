use crate::config::RenderOptions;
use crate::flower::{FlowerGenerator, FlowerGeometry};
use crate::foundation::core::{HexColor, Point, Viewport};
use crate::layout::{GridLayout, PLACEHOLDER_SLOTS, Position};
use crate::normalize::DayRecord;
use crate::scene::backdrop;
use crate::scene::model::{Paint, SceneNode, SceneSpec, Style, TextAnchor};

/// Sky, hills, ground and haze.
pub const BACKGROUND_LAYER: &str = "background";
/// Grass tufts along the ground band.
pub const GROUND_COVER_LAYER: &str = "ground-cover";
/// One subtree per flower, back rows first.
pub const FLOWERS_LAYER: &str = "flowers";
/// Vignette, caption and status notice.
pub const FOREGROUND_LAYER: &str = "foreground";

/// Caption drawn over the placeholder scene.
pub const PLACEHOLDER_CAPTION: &str = "No garden data loaded";

/// Assembles background, ground cover, flowers and foreground into one scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composer {
    options: RenderOptions,
    generator: FlowerGenerator,
}

impl Composer {
    /// Composer whose flower generator shares the options' ceilings and theme.
    pub fn new(options: RenderOptions) -> Self {
        let generator = FlowerGenerator::new(options.ceilings, options.theme.clone());
        Self { options, generator }
    }

    /// Options every scene from this composer is built with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Compose one flower per record at the matching position. No records means the placeholder
    /// scene.
    pub fn compose(
        &self,
        records: &[DayRecord],
        positions: &[Position],
        viewport: Viewport,
    ) -> SceneSpec {
        self.compose_with_notice(records, positions, viewport, None)
    }

    /// [`Composer::compose`] plus an optional status line in the top-right corner, drawn on a
    /// translucent backing strip in the foreground layer.
    #[tracing::instrument(skip_all, fields(records = records.len(), notice = notice.is_some()))]
    pub fn compose_with_notice(
        &self,
        records: &[DayRecord],
        positions: &[Position],
        viewport: Viewport,
        notice: Option<&str>,
    ) -> SceneSpec {
        if records.is_empty() {
            let records = placeholder_records(&self.options);
            let positions = GridLayout::with_columns(self.options.columns).positions(0, viewport);
            return self.build(&records, &positions, viewport, true, notice);
        }
        if positions.len() != records.len() {
            tracing::warn!(
                records = records.len(),
                positions = positions.len(),
                "record/position count mismatch; extra entries ignored"
            );
        }
        self.build(records, positions, viewport, false, notice)
    }

    /// Data-independent scene over the synthetic grid.
    pub fn compose_placeholder(&self, viewport: Viewport) -> SceneSpec {
        self.compose_with_notice(&[], &[], viewport, None)
    }

    fn build(
        &self,
        records: &[DayRecord],
        positions: &[Position],
        viewport: Viewport,
        placeholder: bool,
        notice: Option<&str>,
    ) -> SceneSpec {
        let theme = &self.options.theme;
        let mut defs = Vec::new();

        let (sky_def, sky) = backdrop::sky(viewport, theme);
        let (ground_def, ground) = backdrop::ground(viewport, theme);
        let (haze_def, haze) = backdrop::haze(viewport, theme);
        defs.extend([sky_def, ground_def, haze_def]);
        let background = SceneNode::group(
            BACKGROUND_LAYER,
            vec![
                sky,
                backdrop::hills(viewport, "hills-far", 0.52, 0.10, theme.hill_far),
                backdrop::hills(viewport, "hills-near", 0.60, 0.07, theme.hill_near),
                ground,
                haze,
            ],
        );

        let ground_cover =
            SceneNode::group(GROUND_COVER_LAYER, backdrop::ground_cover(viewport, theme));

        // Back rows first so nearer flowers overlap farther ones.
        let mut order: Vec<usize> = (0..records.len().min(positions.len())).collect();
        order.sort_by_key(|&i| (std::cmp::Reverse(positions[i].row), i));
        let show_labels = self.options.show_labels && !placeholder;
        let flowers = order
            .into_iter()
            .map(|i| {
                let geom = self.generator.generate(&records[i], positions[i], viewport);
                let label = show_labels.then(|| records[i].display_label());
                flower_node(i, &geom, label, positions[i], viewport, &self.options)
            })
            .collect();
        let flowers = SceneNode::group(FLOWERS_LAYER, flowers);

        let mut foreground = Vec::new();
        if self.options.vignette {
            let (def, rect) = backdrop::vignette(viewport);
            defs.push(def);
            foreground.push(rect);
        }
        let s = scale(viewport);
        let caption = if placeholder {
            Some((PLACEHOLDER_CAPTION, viewport.width * 0.5, TextAnchor::Middle))
        } else {
            let inset = (40.0 * s).min(viewport.width * 0.25);
            self.options
                .summary
                .as_deref()
                .map(|text| (text, inset, TextAnchor::Start))
        };
        if let Some((text, x, anchor)) = caption {
            foreground.push(SceneNode::Text {
                at: Point::new(x, viewport.height - 28.0 * s),
                content: text.to_owned(),
                size: 18.0 * s,
                anchor,
                style: Style::fill(Paint::Solid(theme.text)).with_opacity(0.85),
            });
        }
        if let Some(text) = notice {
            foreground.extend(notice_nodes(text, viewport));
        }

        SceneSpec {
            viewport,
            defs,
            children: vec![
                background,
                ground_cover,
                flowers,
                SceneNode::group(FOREGROUND_LAYER, foreground),
            ],
            placeholder,
        }
    }
}

fn scale(viewport: Viewport) -> f64 {
    viewport.height / 900.0
}

/// Backing strip and right-aligned text for a status notice.
fn notice_nodes(text: &str, viewport: Viewport) -> [SceneNode; 2] {
    let s = scale(viewport);
    let size = 14.0 * s;
    let margin = 16.0 * s;
    let height = size * 2.0;
    // Width estimated at 0.6 em per character.
    let width = (text.chars().count() as f64 * size * 0.6 + size * 1.5).min(viewport.width);
    let right = viewport.width - margin;
    [
        SceneNode::Rect {
            x: (right - width).max(0.0),
            y: margin,
            width,
            height,
            style: Style::fill(Paint::Translucent(HexColor::BLACK, 0.35)),
        },
        SceneNode::Text {
            at: Point::new(right - size * 0.75, margin + height * 0.5 + size * 0.35),
            content: text.to_owned(),
            size,
            anchor: TextAnchor::End,
            style: Style::fill(Paint::Solid(HexColor::WHITE)),
        },
    ]
}

/// Flower subtree: stem, leaves, beads, petal rings (outer first), head disks, optional label.
fn flower_node(
    index: usize,
    geom: &FlowerGeometry,
    label: Option<&str>,
    position: Position,
    viewport: Viewport,
    options: &RenderOptions,
) -> SceneNode {
    let mut children = Vec::new();

    children.push(SceneNode::Path {
        path: geom.stem.path(),
        style: Style::stroke(Paint::Solid(geom.stem_color), geom.stem.width),
    });
    for leaf in &geom.leaves {
        children.push(SceneNode::Path {
            path: leaf.path(),
            style: Style::fill(Paint::Solid(geom.leaf_color)).with_opacity(0.9),
        });
    }
    for bead in &geom.beads {
        children.push(SceneNode::Circle {
            center: bead.center,
            radius: bead.radius,
            style: Style::fill(Paint::Solid(geom.bead_color)).with_opacity(0.85),
        });
    }
    for ring in &geom.petal_rings {
        for petal in &ring.petals {
            children.push(SceneNode::Path {
                path: ring.petal_path(geom.head.center, petal),
                style: Style::fill(Paint::Solid(ring.color)).with_opacity(0.92),
            });
        }
    }
    children.push(SceneNode::Circle {
        center: geom.head.center,
        radius: geom.head.inner_radius,
        style: Style::fill(Paint::Solid(geom.head.disk_color)),
    });
    children.push(SceneNode::Circle {
        center: geom.head.center,
        radius: geom.head.highlight_radius,
        style: Style::fill(Paint::Solid(geom.head.highlight_color)).with_opacity(0.8),
    });
    if let Some(text) = label {
        let s = scale(viewport);
        children.push(SceneNode::Text {
            at: Point::new(position.x, position.y + 18.0 * s),
            content: text.to_owned(),
            size: 12.0 * s,
            anchor: TextAnchor::Middle,
            style: Style::fill(Paint::Solid(options.theme.text)).with_opacity(0.8),
        });
    }

    SceneNode::group(format!("flower-{index}"), children)
}

/// Synthetic records for the placeholder scene: theme colors, zero metrics.
pub fn placeholder_records(options: &RenderOptions) -> Vec<DayRecord> {
    (0..PLACEHOLDER_SLOTS)
        .map(|i| DayRecord {
            identity_key: format!("placeholder-{i}"),
            ..DayRecord::placeholder(i, options.theme.primary, options.theme.secondary)
        })
        .collect()
}

/// Compose with default options.
pub fn compose(records: &[DayRecord], positions: &[Position], viewport: Viewport) -> SceneSpec {
    Composer::default().compose(records, positions, viewport)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
