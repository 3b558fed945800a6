pub mod ray;
pub mod rotation;
pub mod vec3;

pub use ray::*;
pub use rotation::*;
pub use vec3::*;
