//! Climate field: scattered seeded feature points plus analytic temperature
//! and humidity bands.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::BiomeTag;
use crate::seed::{WorldSeed, det_cos, det_sin, det_sqrt};

/// Side length of the square feature points are scattered over.
const POINT_EXTENT: f64 = 1000.0;

/// A scattered point carrying a biome tag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeaturePoint {
    pub x: f64,
    pub z: f64,
    pub tag: BiomeTag,
}

/// Climate at one world column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimateSample {
    /// In `[0, 1]`.
    pub temperature: f64,
    /// In `[0, 1]`.
    pub humidity: f64,
    /// Tag of the nearest feature point. Not consumed by classification.
    pub nearest_tag: BiomeTag,
    /// Distance to the nearest feature point in scaled space.
    pub distance: f64,
}

/// Samples climate at world columns.
#[derive(Clone, Debug)]
pub struct ClimateField {
    points: Vec<FeaturePoint>,
    scale: f64,
}

impl ClimateField {
    /// Scatter `point_count` feature points from the world seed.
    pub fn new(seed: WorldSeed, point_count: u32, scale: f64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let points = (0..point_count)
            .map(|_| {
                let x = rng.random_range(0.0..POINT_EXTENT);
                let z = rng.random_range(0.0..POINT_EXTENT);
                let tag = BiomeTag::ALL[rng.random_range(0..BiomeTag::ALL.len())];
                FeaturePoint { x, z, tag }
            })
            .collect();
        Self { points, scale }
    }

    /// The scattered feature points.
    pub fn points(&self) -> &[FeaturePoint] {
        &self.points
    }

    /// Climate at world column `(x, z)`.
    ///
    /// The nearest point is searched at `(x * scale, z * scale)`; temperature
    /// and humidity use the unscaled coordinates.
    pub fn climate_at(&self, x: f64, z: f64) -> ClimateSample {
        let sx = x * self.scale;
        let sz = z * self.scale;

        let nearest = self
            .points
            .iter()
            .map(|p| {
                let dx = p.x - sx;
                let dz = p.z - sz;
                (dx * dx + dz * dz, p.tag)
            })
            .min_by(|a, b| a.0.total_cmp(&b.0));

        let (nearest_tag, distance) = match nearest {
            Some((dist_sq, tag)) => (tag, det_sqrt(dist_sq)),
            None => (BiomeTag::Plains, f64::MAX),
        };

        ClimateSample {
            temperature: (det_sin(x * 0.01) + 1.0) * 0.5,
            humidity: (det_cos(z * 0.008) + 1.0) * 0.5,
            nearest_tag,
            distance,
        }
    }
}
