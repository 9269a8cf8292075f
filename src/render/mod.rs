mod mount;
mod raster;
mod svg;

pub use mount::{SvgMount, render};
pub use raster::{RasterImage, rasterize_mount, rasterize_svg};
pub use svg::scene_to_svg;
