mod backdrop;
mod compose;
mod model;

pub use backdrop::GROUND_Y;
pub use compose::{
    BACKGROUND_LAYER, Composer, FLOWERS_LAYER, FOREGROUND_LAYER, GROUND_COVER_LAYER,
    PLACEHOLDER_CAPTION, compose, placeholder_records,
};
pub use model::{Gradient, GradientStop, Paint, SceneNode, SceneSpec, Style, TextAnchor};
