//! Host glue for the Strata generator: named worlds, each owning a generator
//! and the chunks generated for it.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use strata_config::GeneratorConfig;
use strata_terrain::{GeneratedChunk, Generator, WorldSeed, seed_from_string};
use strata_voxel::{Chunk, ChunkAccess, ChunkCoord, ChunkManager};

/// Name of the world created when none is given.
pub const DEFAULT_WORLD: &str = "world";

/// Numeric seed for an optional seed string.
///
/// A non-empty string is hashed with [`seed_from_string`]; otherwise a random
/// non-negative seed is drawn.
pub fn resolve_seed(seed: Option<&str>) -> WorldSeed {
    match seed {
        Some(s) if !s.is_empty() => seed_from_string(s),
        _ => rand::random::<u32>() as WorldSeed,
    }
}

/// A named world: its seed, its generator and its loaded chunks.
pub struct World {
    name: String,
    seed: WorldSeed,
    generator: Arc<Generator>,
    chunks: ChunkManager,
}

impl World {
    /// Create an empty world generating with `config`.
    pub fn new(name: impl Into<String>, seed: WorldSeed, config: GeneratorConfig) -> Self {
        Self {
            name: name.into(),
            seed,
            generator: Arc::new(Generator::new(seed, config)),
            chunks: ChunkManager::new(),
        }
    }

    /// World name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World seed.
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// The world's generator, shareable with worker threads.
    pub fn generator(&self) -> &Arc<Generator> {
        &self.generator
    }

    /// Loaded chunks.
    pub fn chunks(&self) -> &ChunkManager {
        &self.chunks
    }

    /// Generate `coord` in place unless it is already loaded.
    pub fn ensure_chunk(&mut self, coord: ChunkCoord) -> &Chunk {
        if !self.chunks.is_loaded(&coord) {
            self.generator
                .generate_chunk(&mut self.chunks, coord.x, coord.z);
        }
        self.chunks.chunk_mut(coord)
    }

    /// Store a chunk produced by a worker pool.
    pub fn insert_generated(&mut self, generated: GeneratedChunk) {
        self.chunks.load_chunk(generated.coord, generated.chunk);
    }

    /// Where players enter this world.
    pub fn spawn_point(&self) -> (i32, i32, i32) {
        self.generator.spawn_point()
    }
}

/// Registry of named worlds.
pub struct WorldManager {
    config: GeneratorConfig,
    worlds: FxHashMap<String, World>,
}

impl WorldManager {
    /// New worlds generate with `config`.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            worlds: FxHashMap::default(),
        }
    }

    /// Create a world named `name`.
    ///
    /// Returns `false` without touching anything when the name is taken.
    pub fn create_world(&mut self, name: &str, seed: Option<&str>) -> bool {
        if self.worlds.contains_key(name) {
            tracing::warn!("World {:?} already exists", name);
            return false;
        }

        let seed = resolve_seed(seed);
        self.worlds
            .insert(name.to_string(), World::new(name, seed, self.config.clone()));
        tracing::info!("Created world {:?} with seed {}", name, seed);
        true
    }

    /// Look up a world by name.
    pub fn get_world(&self, name: &str) -> Option<&World> {
        self.worlds.get(name)
    }

    /// Mutable lookup by name.
    pub fn get_world_mut(&mut self, name: &str) -> Option<&mut World> {
        self.worlds.get_mut(name)
    }

    /// Number of worlds.
    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }
}
