//! 3D noise cave carving.
//!
//! Every cell above the world floor whose normalized cave noise exceeds the
//! threshold is cleared to Air. The floor layer (`y = 0`) is never carved.

use strata_config::CaveNoiseConfig;
use strata_voxel::{CHUNK_HEIGHT, CHUNK_SIZE, Chunk, Material};

use crate::noise::{NoiseConfig, NoiseField};
use crate::seed::WorldSeed;

/// Octaves of the cave noise.
pub const CAVE_OCTAVES: u32 = 3;

/// Persistence of the cave noise.
pub const CAVE_PERSISTENCE: f64 = 0.5;

/// Carves caves into generated chunks.
#[derive(Clone, Debug)]
pub struct CaveCarver {
    noise: NoiseField,
    threshold: f64,
    top: i32,
}

impl CaveCarver {
    /// Create a carver. The cave noise is seeded with `seed + 1` to decorrelate
    /// it from the terrain height field.
    pub fn new(seed: WorldSeed, config: &CaveNoiseConfig, total_height: i32) -> Self {
        let noise = NoiseField::new(
            seed.wrapping_add(1),
            NoiseConfig {
                octaves: CAVE_OCTAVES,
                persistence: CAVE_PERSISTENCE,
                scale: config.scale,
            },
        );
        Self {
            noise,
            threshold: config.threshold,
            top: total_height.clamp(0, CHUNK_HEIGHT as i32),
        }
    }

    /// Returns the carve threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns `true` if the world cell `(x, y, z)` lies inside a cave.
    pub fn is_cave(&self, x: i32, y: i32, z: i32) -> bool {
        self.noise.sample_3d(x as f64, y as f64, z as f64, true) > self.threshold
    }

    /// Clear cave cells in chunk `(chunk_x, chunk_z)`. Returns the number of
    /// cells cleared.
    pub fn carve(&self, chunk: &mut Chunk, chunk_x: i32, chunk_z: i32) -> usize {
        let size = CHUNK_SIZE as i32;
        let base_x = chunk_x * size;
        let base_z = chunk_z * size;
        let mut carved = 0;

        for lx in 0..size {
            for lz in 0..size {
                for y in 1..self.top {
                    if self.is_cave(base_x + lx, y, base_z + lz) {
                        if !chunk.get(lx, y, lz).is_air() {
                            carved += 1;
                        }
                        chunk.set(lx, y, lz, Material::Air);
                    }
                }
            }
        }

        carved
    }
}
