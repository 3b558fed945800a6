use super::Vec3;

/// Rotation about the Y axis with its trigonometry computed once.
///
/// The angle is kept next to its sine and cosine so the transform can never
/// be read out of sync with the yaw it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationY {
    angle: f64,
    sin: f64,
    cos: f64,
}

impl RotationY {
    pub fn new(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { angle, sin, cos }
    }

    pub fn identity() -> Self {
        Self::new(0.0)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline(always)]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            v.x * self.cos + v.z * self.sin,
            v.y,
            -v.x * self.sin + v.z * self.cos,
        )
    }
}

impl Default for RotationY {
    fn default() -> Self {
        Self::identity()
    }
}
