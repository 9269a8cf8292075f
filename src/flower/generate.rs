use std::f64::consts::TAU;

use kurbo::{CubicBez, ParamCurve, ParamCurveDeriv};

use crate::config::{MetricCeilings, Theme};
use crate::flower::color::{blend, lighten};
use crate::foundation::core::{BezPath, HexColor, Point, Vec2, Viewport};
use crate::foundation::math::{Rng32, clamp01, lerp, seed_from_key};
use crate::layout::Position;
use crate::normalize::{DayRecord, Metrics};

/// How far outer petals move toward white at full score boost.
pub const OUTER_LIGHTEN: f64 = 0.5;
/// Sizes are authored against this viewport height and scaled from it.
const REFERENCE_HEIGHT: f64 = 900.0;

/// Metrics divided by their ceilings and clamped to `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Boosts {
    /// Score boost.
    pub score: f64,
    /// Entries boost.
    pub entries: f64,
    /// Level boost.
    pub level: f64,
}

impl Boosts {
    /// Divide each metric by its ceiling. A non-positive ceiling gives no boost.
    pub fn from_metrics(m: &Metrics, ceilings: &MetricCeilings) -> Self {
        let boost = |v: f64, ceil: f64| {
            if ceil > 0.0 { clamp01(v / ceil) } else { 0.0 }
        };
        Self {
            score: boost(m.score, ceilings.score),
            entries: boost(m.entries, ceilings.entries),
            level: boost(m.level, ceilings.level),
        }
    }
}

/// Which side of the stem a leaf grows on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafSide {
    /// Toward negative x.
    Left,
    /// Toward positive x.
    Right,
}

impl LeafSide {
    fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Cubic stem from the anchor (base) to the flower head (tip).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StemGeometry {
    /// Anchor on the ground.
    pub base: Point,
    /// First control point.
    pub c1: Point,
    /// Second control point.
    pub c2: Point,
    /// Where the head sits.
    pub tip: Point,
    /// Stroke width.
    pub width: f64,
}

impl StemGeometry {
    /// The stem as a kurbo cubic.
    pub fn curve(&self) -> CubicBez {
        CubicBez::new(self.base, self.c1, self.c2, self.tip)
    }

    /// Open path for stroking.
    pub fn path(&self) -> BezPath {
        let mut p = BezPath::new();
        p.move_to(self.base);
        p.curve_to(self.c1, self.c2, self.tip);
        p
    }

    /// Point at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        self.curve().eval(t)
    }

    /// Unit tangent at `t`, pointing from base toward tip.
    pub fn tangent_at(&self, t: f64) -> Vec2 {
        let d = self.curve().deriv().eval(t).to_vec2();
        let len = d.hypot();
        if len > 1e-9 { d / len } else { Vec2::new(0.0, -1.0) }
    }
}

/// One leaf along the stem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafGeometry {
    /// Point on the stem.
    pub attach: Point,
    /// Free end.
    pub tip: Point,
    /// Half-width at the widest point.
    pub width: f64,
    /// Side of the stem.
    pub side: LeafSide,
}

impl LeafGeometry {
    /// Closed almond shape from attach point to tip.
    pub fn path(&self) -> BezPath {
        let axis = self.tip - self.attach;
        let len = axis.hypot().max(1e-9);
        let normal = Vec2::new(-axis.y, axis.x) / len * self.width;
        let mid = self.attach + axis * 0.5;
        let mut p = BezPath::new();
        p.move_to(self.attach);
        p.quad_to(mid + normal, self.tip);
        p.quad_to(mid - normal, self.attach);
        p.close_path();
        p
    }
}

/// Accent dot along the stem. Bead count grows with the entries boost.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bead {
    /// Center.
    pub center: Point,
    /// Radius.
    pub radius: f64,
}

/// One petal, relative to the head center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Petal {
    /// Direction from the head center, radians.
    pub angle: f64,
    /// Base to tip.
    pub length: f64,
    /// Half-width at the widest point.
    pub width: f64,
}

/// Petals sharing one color and inset.
#[derive(Clone, Debug, PartialEq)]
pub struct PetalRing {
    /// Distance from the head center to each petal's base.
    pub inset: f64,
    /// Fill for every petal in the ring.
    pub color: HexColor,
    /// Petals in angle order.
    pub petals: Vec<Petal>,
}

impl PetalRing {
    /// Closed petal outline around `center`.
    pub fn petal_path(&self, center: Point, petal: &Petal) -> BezPath {
        let dir = Vec2::from_angle(petal.angle);
        let normal = Vec2::new(-dir.y, dir.x) * petal.width;
        let base = center + dir * self.inset;
        let tip = base + dir * petal.length;
        let mut p = BezPath::new();
        p.move_to(base);
        p.curve_to(
            base + dir * (petal.length * 0.25) + normal,
            base + dir * (petal.length * 0.9) + normal * 0.6,
            tip,
        );
        p.curve_to(
            base + dir * (petal.length * 0.9) - normal * 0.6,
            base + dir * (petal.length * 0.25) - normal,
            base,
        );
        p.close_path();
        p
    }
}

/// Disk and highlight drawn over the petal rings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadGeometry {
    /// Head center, the stem tip.
    pub center: Point,
    /// Overall head radius.
    pub radius: f64,
    /// Disk radius.
    pub inner_radius: f64,
    /// Disk fill.
    pub disk_color: HexColor,
    /// Highlight radius.
    pub highlight_radius: f64,
    /// Highlight fill.
    pub highlight_color: HexColor,
}

/// Everything needed to draw one flower. Pure data.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowerGeometry {
    /// Seed derived from the identity key.
    pub seed: u32,
    /// Boosts from the record's metrics.
    pub boosts: Boosts,
    /// Stem curve.
    pub stem: StemGeometry,
    /// Stem stroke.
    pub stem_color: HexColor,
    /// Leaves, alternating sides.
    pub leaves: Vec<LeafGeometry>,
    /// Leaf fill.
    pub leaf_color: HexColor,
    /// Beads along the stem.
    pub beads: Vec<Bead>,
    /// Bead fill.
    pub bead_color: HexColor,
    /// Outermost ring first.
    pub petal_rings: Vec<PetalRing>,
    /// Disk and highlight.
    pub head: HeadGeometry,
}

/// Deterministic flower synthesis: identity key seeds the sequence, boosts scale it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowerGenerator {
    /// Metric ceilings.
    pub ceilings: MetricCeilings,
    /// Palette for stems, leaves and beads.
    pub theme: Theme,
}

impl FlowerGenerator {
    /// Generator with explicit ceilings and theme.
    pub fn new(ceilings: MetricCeilings, theme: Theme) -> Self {
        Self { ceilings, theme }
    }

    /// Geometry for `record` anchored at `position`. Same record and position, same geometry.
    pub fn generate(
        &self,
        record: &DayRecord,
        position: Position,
        viewport: Viewport,
    ) -> FlowerGeometry {
        let seed = seed_from_key(&record.identity_key);
        let mut rng = Rng32::new(seed);
        let boosts = Boosts::from_metrics(&record.metrics, &self.ceilings);
        let s = viewport.height / REFERENCE_HEIGHT;

        // Stem.
        let base = position.point();
        let stem_len = s * (120.0 + 110.0 * boosts.score + 40.0 * rng.next_f64());
        let lean = rng.jitter(0.18) * stem_len;
        let stem = StemGeometry {
            base,
            c1: base + Vec2::new(rng.jitter(0.12) * stem_len, -stem_len * 0.33),
            c2: base + Vec2::new(lean * 0.5 + rng.jitter(0.12) * stem_len, -stem_len * 0.66),
            tip: base + Vec2::new(lean, -stem_len),
            width: s * (2.5 + 1.5 * boosts.entries),
        };

        // Leaves: 2..=4, alternating sides.
        let leaf_count = 2 + ((rng.next_f64() * 3.0) as usize).min(2);
        let mut side = if rng.next_f64() < 0.5 {
            LeafSide::Left
        } else {
            LeafSide::Right
        };
        let mut leaves = Vec::with_capacity(leaf_count);
        for i in 0..leaf_count {
            let t = (0.2 + 0.55 * (i as f64 + 0.5) / leaf_count as f64 + rng.jitter(0.04))
                .clamp(0.1, 0.85);
            let size = s * (14.0 + 10.0 * boosts.entries + 6.0 * rng.next_f64());
            let attach = stem.point_at(t);
            let tangent = stem.tangent_at(t);
            let outward = Vec2::new(-tangent.y, tangent.x) * side.sign();
            leaves.push(LeafGeometry {
                attach,
                tip: attach + outward * (size * 1.6) + tangent * (size * 0.7),
                width: size * 0.38,
                side,
            });
            side = side.flip();
        }

        // Accent beads along the stem: more entries, more beads.
        let bead_count = (boosts.entries * 6.0).round() as usize;
        let bead_radius = s * (1.6 + 1.2 * boosts.level);
        let beads = (0..bead_count)
            .map(|i| {
                let t = 0.12 + 0.7 * (i as f64 + 1.0) / (bead_count as f64 + 1.0);
                Bead {
                    center: stem.point_at(t),
                    radius: bead_radius,
                }
            })
            .collect();

        // Head and petal rings.
        let head_radius = s * (16.0 + 14.0 * boosts.score + 4.0 * rng.next_f64());
        let ring_count = 1 + (boosts.level * 2.0).round() as usize;
        let outer_color = lighten(record.primary_color, OUTER_LIGHTEN * boosts.score);
        let mut petal_rings = Vec::with_capacity(ring_count);
        for ring in 0..ring_count {
            let ring_scale = 1.0 - 0.28 * ring as f64;
            let ring_radius = head_radius * ring_scale;
            let petal_count = 6 + ((rng.next_f64() * 4.0) as usize).min(3);
            let phase = rng.next_f64() * TAU / petal_count as f64;
            let color = if ring == 0 {
                outer_color
            } else {
                blend(
                    record.primary_color,
                    record.secondary_color,
                    ring as f64 / ring_count as f64,
                )
            };
            let petals = (0..petal_count)
                .map(|k| Petal {
                    angle: phase + TAU * k as f64 / petal_count as f64 + rng.jitter(0.18),
                    length: ring_radius * lerp(0.9, 1.1, rng.next_f64()),
                    width: ring_radius * 0.42,
                })
                .collect();
            petal_rings.push(PetalRing {
                inset: head_radius * 0.2 * ring_scale,
                color,
                petals,
            });
        }

        let inner_radius = head_radius * 0.34;
        let head = HeadGeometry {
            center: stem.tip,
            radius: head_radius,
            inner_radius,
            disk_color: record.secondary_color,
            highlight_radius: inner_radius * 0.4,
            highlight_color: lighten(record.secondary_color, 0.45),
        };

        FlowerGeometry {
            seed,
            boosts,
            stem,
            stem_color: self.theme.stem,
            leaves,
            leaf_color: self.theme.leaf,
            beads,
            bead_color: blend(self.theme.stem, record.primary_color, 0.5),
            petal_rings,
            head,
        }
    }
}

/// Generate with default ceilings and theme.
pub fn generate(record: &DayRecord, position: Position, viewport: Viewport) -> FlowerGeometry {
    FlowerGenerator::default().generate(record, position, viewport)
}

#[cfg(test)]
#[path = "../../tests/unit/flower/generate.rs"]
mod tests;
