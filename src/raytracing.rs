pub mod camera;
pub mod core;
pub mod math;
pub mod sampling;
pub mod tiling;

pub use math::*;
