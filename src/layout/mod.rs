mod solver;

pub use solver::{
    DEFAULT_COLUMNS, GridLayout, PLACEHOLDER_SLOTS, Position, layout,
};
