//! The generation pipeline: one seed and one configuration turned into
//! finished chunks.

use std::path::Path;
use std::sync::Arc;

use strata_config::GeneratorConfig;
use strata_voxel::{CHUNK_SIZE, Chunk, ChunkAccess, ChunkCoord};

use crate::biome::{BiomeTable, BiomeTag, ClimateField, ClimateSample, classify};
use crate::cache::ColumnCache;
use crate::cave::CaveCarver;
use crate::column::TerrainColumnBuilder;
use crate::feature::DecorationScatter;
use crate::seed::WorldSeed;
use crate::structure::StructurePlacer;
use crate::terrain_height::TerrainShaper;

/// Fixed player spawn point.
pub const SPAWN_POINT: (i32, i32, i32) = (0, 128, 0);

/// Seeded terrain generator.
///
/// Every table is resolved once at construction and read-only afterwards, so a
/// generator can be shared across worker threads behind an [`Arc`]. The only
/// mutable state is the [`ColumnCache`], which never changes output.
pub struct Generator {
    seed: WorldSeed,
    config: GeneratorConfig,
    shaper: TerrainShaper,
    climate: ClimateField,
    biomes: BiomeTable,
    columns: TerrainColumnBuilder,
    caves: CaveCarver,
    structures: StructurePlacer,
    decorations: DecorationScatter,
    cache: Arc<ColumnCache>,
}

impl Generator {
    /// Build a generator with its own cache.
    pub fn new(seed: WorldSeed, config: GeneratorConfig) -> Self {
        Self::with_cache(seed, config, Arc::new(ColumnCache::new()))
    }

    /// Build a generator that memoizes into `cache`.
    ///
    /// Cached values are only valid for one seed and configuration; share a
    /// cache only between generators built from the same pair.
    pub fn with_cache(seed: WorldSeed, config: GeneratorConfig, cache: Arc<ColumnCache>) -> Self {
        let total_height = config.world.total_height;
        let generator = Self {
            seed,
            shaper: TerrainShaper::new(seed, &config.terrain, total_height),
            climate: ClimateField::new(seed, config.biome.points, config.biome.scale),
            biomes: BiomeTable::from_config(&config.biomes),
            columns: TerrainColumnBuilder::from_config(&config),
            caves: CaveCarver::new(seed, &config.cave, total_height),
            structures: StructurePlacer::new(seed, &config.structures),
            decorations: DecorationScatter::new(seed),
            cache,
            config,
        };
        tracing::info!(
            "Generator ready: seed {}, sea level {}, {} biome profiles",
            seed,
            generator.config.world.sea_level,
            generator.biomes.len()
        );
        generator
    }

    /// Build a generator from the preset `<config_dir>/<preset>.ron`.
    ///
    /// A preset that cannot be read or parsed is replaced by the defaults.
    pub fn from_preset(seed: WorldSeed, preset: &str, config_dir: &Path) -> Self {
        let config = GeneratorConfig::load_or_create(config_dir, preset).unwrap_or_else(|e| {
            tracing::warn!("Preset {:?} unusable ({}), using defaults", preset, e);
            GeneratorConfig::default()
        });
        Self::new(seed, config)
    }

    /// The world seed.
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// The configuration this generator was built from.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The shared memo cache.
    pub fn cache(&self) -> &Arc<ColumnCache> {
        &self.cache
    }

    /// The resolved biome table.
    pub fn biome_table(&self) -> &BiomeTable {
        &self.biomes
    }

    /// Where players enter the world.
    pub fn spawn_point(&self) -> (i32, i32, i32) {
        SPAWN_POINT
    }

    /// Forget every memoized height and biome.
    pub fn clear_caches(&self) {
        self.cache.clear();
        tracing::debug!("Cleared column caches");
    }

    // -----------------------------------------------------------------------
    // Column queries
    // -----------------------------------------------------------------------

    /// Memoized surface height of world column `(x, z)`.
    pub fn terrain_height(&self, x: i32, z: i32) -> i32 {
        self.cache
            .height_or_insert_with(x, z, || self.shaper.height_at(x, z))
    }

    /// Memoized biome of world column `(x, z)`.
    pub fn biome_at(&self, x: i32, z: i32) -> BiomeTag {
        self.cache.biome_or_insert_with(x, z, || {
            let climate = self.climate_at(x, z);
            classify(climate.temperature, climate.humidity)
        })
    }

    /// Climate of world column `(x, z)`. Not memoized.
    pub fn climate_at(&self, x: i32, z: i32) -> ClimateSample {
        self.climate.climate_at(x as f64, z as f64)
    }

    // -----------------------------------------------------------------------
    // Chunk generation
    // -----------------------------------------------------------------------

    /// Fill local column `(local_x, local_z)` of a chunk whose world column is
    /// `(world_x, world_z)`.
    pub fn build_column(
        &self,
        chunk: &mut Chunk,
        local_x: i32,
        local_z: i32,
        world_x: i32,
        world_z: i32,
    ) {
        let height = self.terrain_height(world_x, world_z);
        self.columns.fill_column(chunk, local_x, local_z, height);
    }

    /// Apply the biome override to one column and record its overlay id.
    pub fn apply_biome(
        &self,
        chunk: &mut Chunk,
        local_x: i32,
        local_z: i32,
        world_x: i32,
        world_z: i32,
    ) {
        let tag = self.biome_at(world_x, world_z);
        self.columns
            .apply_biome(chunk, local_x, local_z, tag, self.biomes.profile(tag));
    }

    /// Generate chunk `(chunk_x, chunk_z)` into the host's storage.
    pub fn generate_chunk(&self, world: &mut impl ChunkAccess, chunk_x: i32, chunk_z: i32) {
        let chunk = world.chunk_mut(ChunkCoord::new(chunk_x, chunk_z));
        self.generate_into(chunk, chunk_x, chunk_z);
    }

    /// Generate chunk `(chunk_x, chunk_z)` into a fresh chunk.
    pub fn generate(&self, chunk_x: i32, chunk_z: i32) -> Chunk {
        let mut chunk = Chunk::new();
        self.generate_into(&mut chunk, chunk_x, chunk_z);
        chunk
    }

    fn generate_into(&self, chunk: &mut Chunk, chunk_x: i32, chunk_z: i32) {
        let size = CHUNK_SIZE as i32;
        let base_x = chunk_x * size;
        let base_z = chunk_z * size;

        for lx in 0..size {
            for lz in 0..size {
                self.build_column(chunk, lx, lz, base_x + lx, base_z + lz);
            }
        }
        for lx in 0..size {
            for lz in 0..size {
                self.apply_biome(chunk, lx, lz, base_x + lx, base_z + lz);
            }
        }

        let carved = self.caves.carve(chunk, chunk_x, chunk_z);
        let structures = self.structures.place_structures(chunk, chunk_x, chunk_z);
        let decorations =
            self.decorations
                .decorate(chunk, chunk_x, chunk_z, &self.biomes, &|x, z| {
                    self.biome_at(x, z)
                });

        tracing::debug!(
            "Generated chunk ({}, {}): {} cave cells, {} structures, {} decorations",
            chunk_x,
            chunk_z,
            carved,
            structures.len(),
            decorations
        );
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("seed", &self.seed)
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}
