use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::math::Vec3;

/// Where anti-aliasing jitter comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleSeed {
    /// Fresh randomness every cast, drawn from the thread-local generator.
    #[default]
    Entropy,
    /// Reproducible frames: each pixel gets a generator derived from the seed
    /// and its buffer index, independent of evaluation order.
    Fixed(u64),
}

impl SampleSeed {
    /// Generator for the pixel at `index`, or `None` when jitter should come
    /// straight from `rand::thread_rng()`.
    pub fn pixel_rng(&self, index: usize) -> Option<StdRng> {
        match self {
            SampleSeed::Entropy => None,
            SampleSeed::Fixed(seed) => {
                // spread neighbouring indices before seeding
                let mixed = seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                Some(StdRng::seed_from_u64(mixed))
            }
        }
    }
}

/// Random sub-pixel offset in `[0, 1/factor)` on x and y.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, factor: u32) -> Vec3 {
    let factor = factor as f64;
    let dx = rng.gen_range(0.0..1.0) / factor;
    let dy = rng.gen_range(0.0..1.0) / factor;
    Vec3::new(dx, dy, 0.0)
}
