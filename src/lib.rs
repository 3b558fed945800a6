//! Yaw-only ray caster over spherical scene objects.
//!
//! A [`Camera`] precomputes one heading per screen cell, then turns every cast
//! into a frame of [`Pixel`]s, either on the calling thread or split into tiles
//! rendered concurrently.

pub mod raytracing;

pub use raytracing::camera::{Camera, Pixel, PixelSource};
pub use raytracing::core::{RayIntersectable, Sphere};
pub use raytracing::math::{Ray, RotationY, Vec3};
pub use raytracing::sampling::SampleSeed;
