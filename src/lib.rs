//! LifeLog Garden turns a daily-record export into a deterministic procedural garden scene.
//!
//! # Pipeline overview
//!
//! 1. **Acquire**: fetch the export over a bounded, cancellable transport, falling back to the
//!    last cached payload for the same configuration ([`acquire()`])
//! 2. **Normalize**: coerce loosely shaped rows into [`DayRecord`]s (never fails)
//! 3. **Layout**: assign each record a grid slot ([`layout()`])
//! 4. **Generate**: derive flower geometry from the record's identity and metrics ([`generate()`])
//! 5. **Compose / render**: assemble one [`SceneSpec`] and swap it into an [`SvgMount`]
//!
//! Steps 2 through 5 are pure and synchronous: the same records and viewport always produce the
//! same scene, node for node. [`GardenSession`] ties the stages together across reloads.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod acquire;
mod config;
mod flower;
mod foundation;
mod layout;
mod normalize;
mod pipeline;
mod render;
mod scene;
mod session;

pub use acquire::cache::{CacheStore, ExportCacheEntry, FileCache, MemoryCache};
pub use acquire::config::{AcquireConfig, Bot, RouteMode, TransportKind};
pub use acquire::transport::{CancelToken, Transport, http_client};
pub use acquire::{Acquired, FROM_CACHE, acquire};
pub use config::{GardenConfig, MetricCeilings, RenderOptions, Theme};
pub use flower::color::{blend, lighten};
pub use flower::{
    Bead, Boosts, FlowerGenerator, FlowerGeometry, HeadGeometry, LeafGeometry, LeafSide,
    OUTER_LIGHTEN, Petal, PetalRing, StemGeometry, generate,
};
pub use foundation::core::{BezPath, HexColor, Point, Vec2, Viewport};
pub use foundation::error::{
    GardenError, GardenResult, TransportError, TransportFailure,
};
pub use foundation::math::{Rng32, seed_from_key};
pub use layout::{DEFAULT_COLUMNS, GridLayout, PLACEHOLDER_SLOTS, Position, layout};
pub use normalize::{
    DayRecord, Metrics, NormalizeReport, normalize, normalize_with, positional_key, resolve_rows,
    validate_payload,
};
pub use pipeline::GardenPipeline;
pub use render::{RasterImage, SvgMount, rasterize_mount, rasterize_svg, render, scene_to_svg};
pub use scene::{
    BACKGROUND_LAYER, Composer, FLOWERS_LAYER, FOREGROUND_LAYER, GROUND_COVER_LAYER, GROUND_Y,
    Gradient, GradientStop, PLACEHOLDER_CAPTION, Paint, SceneNode, SceneSpec, Style, TextAnchor,
    compose, placeholder_records,
};
pub use session::{GardenSession, LoadStatus, ReloadOutcome, ReloadRequest};
