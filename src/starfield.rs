//! Procedural star-field generation.
//!
//! Uniformly samples points inside a box kept above the horizon. The sampler
//! is a pure function of its random source: production uses the unseeded
//! thread rng, tests pass a seeded one for determinism.

use cgmath::Point3;
use rand::Rng;

use crate::data_structures::PointCloud;

/// Star count of the shipped scene.
pub const STAR_COUNT: usize = 14_500;

/// Sampling box: x,z in [-horizontal, horizontal], y in [floor, ceiling].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarBounds {
    pub horizontal: f32,
    pub floor: f32,
    pub ceiling: f32,
}

impl Default for StarBounds {
    fn default() -> Self {
        // Floor of 28 keeps every star above the moon's horizon line.
        Self {
            horizontal: 1000.0,
            floor: 28.0,
            ceiling: 1000.0,
        }
    }
}

/// Samples `count` star positions with the unseeded production rng.
pub fn generate(count: usize, bounds: &StarBounds) -> PointCloud {
    generate_with(count, bounds, &mut rand::thread_rng())
}

/// Samples `count` star positions from an injectable random source.
pub fn generate_with<R: Rng>(count: usize, bounds: &StarBounds, rng: &mut R) -> PointCloud {
    let h = bounds.horizontal;
    let positions = (0..count)
        .map(|_| {
            Point3::new(
                rng.gen_range(-h..=h),
                rng.gen_range(bounds.floor..=bounds.ceiling),
                rng.gen_range(-h..=h),
            )
        })
        .collect();
    PointCloud { positions }
}
