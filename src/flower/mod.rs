pub mod color;
mod generate;

pub use generate::{
    Bead, Boosts, FlowerGenerator, FlowerGeometry, HeadGeometry, LeafGeometry, LeafSide,
    OUTER_LIGHTEN, Petal, PetalRing, StemGeometry, generate,
};
