use crate::foundation::core::{BezPath, HexColor, Point, Viewport};

/// Fill or stroke paint.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// Nothing is painted.
    None,
    /// Opaque color.
    Solid(HexColor),
    /// Color with straight alpha in `[0, 1]`.
    Translucent(HexColor, f64),
    /// Reference to a gradient in [`SceneSpec::defs`] by id.
    Gradient(String),
}

/// Paint and opacity for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Interior paint.
    pub fill: Paint,
    /// Outline paint.
    pub stroke: Paint,
    /// Outline width; ignored when `stroke` is [`Paint::None`].
    pub stroke_width: f64,
    /// Whole-node opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Paint::None,
            stroke: Paint::None,
            stroke_width: 0.0,
            opacity: 1.0,
        }
    }
}

impl Style {
    /// Fill only.
    pub fn fill(paint: Paint) -> Self {
        Self {
            fill: paint,
            ..Self::default()
        }
    }

    /// Stroke only.
    pub fn stroke(paint: Paint, width: f64) -> Self {
        Self {
            stroke: paint,
            stroke_width: width,
            ..Self::default()
        }
    }

    /// Same style at `opacity`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Horizontal alignment of text relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// One color stop.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    /// Offset in `[0, 1]`.
    pub offset: f64,
    /// Stop color.
    pub color: HexColor,
    /// Stop alpha in `[0, 1]`.
    pub alpha: f64,
}

impl GradientStop {
    /// Stop at `offset`.
    pub fn new(offset: f64, color: HexColor, alpha: f64) -> Self {
        Self {
            offset,
            color,
            alpha,
        }
    }
}

/// Gradient definitions, in object-bounding-box units.
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    /// Top-to-bottom linear gradient.
    Vertical {
        /// Definition id.
        id: String,
        /// Stops, top to bottom.
        stops: Vec<GradientStop>,
    },
    /// Radial gradient fading outward from `(cx, cy)`.
    Radial {
        /// Definition id.
        id: String,
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
        /// Stops, center outward.
        stops: Vec<GradientStop>,
    },
}

impl Gradient {
    /// Id referenced by [`Paint::Gradient`].
    pub fn id(&self) -> &str {
        match self {
            Self::Vertical { id, .. } | Self::Radial { id, .. } => id,
        }
    }
}

/// One drawable primitive or a group of them.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    /// Named container, painted in child order.
    Group {
        /// Group id, emitted as the SVG `id`.
        id: String,
        /// Children, back to front.
        children: Vec<SceneNode>,
    },
    /// Axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Paint.
        style: Style,
    },
    /// Arbitrary outline.
    Path {
        /// Outline.
        path: BezPath,
        /// Paint.
        style: Style,
    },
    /// Circle.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Paint.
        style: Style,
    },
    /// Straight segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Paint; only the stroke is used.
        style: Style,
    },
    /// Single line of text.
    Text {
        /// Anchor point on the baseline.
        at: Point,
        /// Text to draw.
        content: String,
        /// Font size in user units.
        size: f64,
        /// Alignment relative to `at`.
        anchor: TextAnchor,
        /// Paint.
        style: Style,
    },
}

impl SceneNode {
    /// Named group.
    pub fn group(id: impl Into<String>, children: Vec<SceneNode>) -> Self {
        Self::Group {
            id: id.into(),
            children,
        }
    }

    /// This node plus all descendants.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Group { children, .. } => 1 + children.iter().map(Self::node_count).sum::<usize>(),
            _ => 1,
        }
    }

    /// Group id; `None` for primitives.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Group { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// The complete render target content, rebuilt wholesale each render.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSpec {
    /// Drawing area.
    pub viewport: Viewport,
    /// Gradients referenced by nodes.
    pub defs: Vec<Gradient>,
    /// Back-to-front layers.
    pub children: Vec<SceneNode>,
    /// Built from synthetic records because no data was available.
    pub placeholder: bool,
}

impl SceneSpec {
    /// Nodes in the whole tree.
    pub fn node_count(&self) -> usize {
        self.children.iter().map(SceneNode::node_count).sum()
    }

    /// Top-level layer group by id.
    pub fn layer(&self, id: &str) -> Option<&SceneNode> {
        self.children.iter().find(|n| n.id() == Some(id))
    }

    /// Flower subtrees in paint order.
    pub fn flowers(&self) -> &[SceneNode] {
        match self.layer(crate::scene::compose::FLOWERS_LAYER) {
            Some(SceneNode::Group { children, .. }) => children,
            _ => &[],
        }
    }
}
