//! Surface height: normalized terrain noise shaped by a curve and mapped onto
//! the world's vertical range.

use std::f64::consts::PI;

use strata_config::{TerrainCurve, TerrainNoiseConfig};
use strata_voxel::CHUNK_HEIGHT;

use crate::noise::{NoiseConfig, NoiseField};
use crate::seed::{WorldSeed, det_sin};

/// Apply a terrain curve to normalized noise `n` in `[-1, 1]`.
///
/// `Hills` maps onto `[0, 1]` rather than `[-1, 1]`, which lifts hill terrain
/// into the upper half of the height range.
pub fn apply_curve(curve: TerrainCurve, n: f64) -> f64 {
    match curve {
        TerrainCurve::Standard | TerrainCurve::Plains => n,
        TerrainCurve::Mountains => n * n.abs(),
        TerrainCurve::Hills => det_sin(n * PI) * 0.5 + 0.5,
    }
}

/// Map a curved noise value onto `[min_height, max_height]`, truncating toward zero.
pub fn height_from_noise(n: f64, min_height: i32, max_height: i32) -> i32 {
    let span = (max_height - min_height) as f64;
    (min_height as f64 + (n + 1.0) * 0.5 * span) as i32
}

/// Computes the uncached surface height of world columns.
#[derive(Clone, Debug)]
pub struct TerrainShaper {
    noise: NoiseField,
    curve: TerrainCurve,
    min_height: i32,
    max_height: i32,
}

impl TerrainShaper {
    /// Build the height field for a world seed.
    ///
    /// Heights span `[0, total_height]` before being clamped into the chunk's
    /// vertical range.
    pub fn new(seed: WorldSeed, terrain: &TerrainNoiseConfig, total_height: i32) -> Self {
        let noise = NoiseField::new(
            seed,
            NoiseConfig {
                octaves: terrain.octaves,
                persistence: terrain.persistence,
                scale: terrain.scale,
            },
        );
        Self {
            noise,
            curve: terrain.curve,
            min_height: 0,
            max_height: total_height,
        }
    }

    /// The underlying noise field.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Highest cell index a surface may occupy.
    pub fn top(&self) -> i32 {
        (self.max_height.min(CHUNK_HEIGHT as i32) - 1).max(0)
    }

    /// Surface height of world column `(x, z)`.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let n = self.noise.sample_2d(x as f64, z as f64, true);
        let curved = apply_curve(self.curve, n);
        height_from_noise(curved, self.min_height, self.max_height).clamp(0, self.top())
    }
}
