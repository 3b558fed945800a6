use std::fmt;

use super::math::{Ray, Vec3};

/// Scale from a unit color component to the 8-bit range.
pub const COLOR_SCALE: f64 = 255.99;

/// What the camera needs from a scene object.
///
/// Implementors are shared with the concurrent cast workers, hence `Send + Sync`.
pub trait RayIntersectable: Send + Sync {
    /// Distance `t >= 0` along the ray to the nearest visible hit.
    fn intersect(&self, ray: &Ray) -> Option<f64>;
    /// Outward unit normal at `ray.at(t)`.
    fn hit_normal(&self, ray: &Ray, t: f64) -> Vec3;
    /// RGB, components in [0, 1].
    fn surface_color(&self) -> Vec3;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    color: Vec3,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64, color: Vec3) -> Sphere {
        Sphere {
            center,
            radius,
            color,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl fmt::Display for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{position: {}, radius: {}}}", self.center, self.radius)
    }
}

impl RayIntersectable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        debug_assert!(a > 0.0, "ray direction must be non-zero");
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return None;
        }

        // only the nearest root counts, a sphere behind the origin is invisible
        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if t < 0.0 {
            return None;
        }
        Some(t)
    }

    fn hit_normal(&self, ray: &Ray, t: f64) -> Vec3 {
        (ray.at(t) - self.center).normalize()
    }

    fn surface_color(&self) -> Vec3 {
        self.color
    }
}

pub struct RaycastResult<'a> {
    pub hitted_object: &'a dyn RayIntersectable,
    pub t: f64,
}

/// Scans the objects once and keeps the closest hit.
pub fn hit<'a>(objects: &'a [Box<dyn RayIntersectable>], ray: &Ray) -> Option<RaycastResult<'a>> {
    let mut closest: Option<RaycastResult<'a>> = None;
    for object in objects {
        if let Some(t) = object.intersect(ray) {
            if closest.as_ref().map_or(true, |c| t < c.t) {
                closest = Some(RaycastResult {
                    hitted_object: object.as_ref(),
                    t,
                });
            }
        }
    }
    closest
}

/// Lambertian facing ratio times the surface color, in the 0..256 range.
pub fn shade(ray: &Ray, result: &RaycastResult) -> Vec3 {
    let normal = result.hitted_object.hit_normal(ray, result.t);
    let facing_ratio = normal.dot(-ray.direction).max(0.0);
    result
        .hitted_object
        .surface_color()
        .scale(facing_ratio * COLOR_SCALE)
}

/// Vertical white to sky blue gradient, in the 0..256 range.
pub fn background_color(ray: &Ray) -> Vec3 {
    let t = ray.direction.y * 0.5 + 1.0;
    let white = Vec3::one();
    let blue = Vec3::new(0.5, 0.7, 1.0);
    let lerp = white.scale(1.0 - t) + blue.scale(t);
    lerp.scale(COLOR_SCALE)
}

pub fn resolve_color(objects: &[Box<dyn RayIntersectable>], ray: &Ray) -> Vec3 {
    match hit(objects, ray) {
        Some(result) => shade(ray, &result),
        None => background_color(ray),
    }
}
