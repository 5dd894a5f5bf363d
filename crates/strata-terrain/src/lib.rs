//! Procedural terrain generation: fractal noise, climate-driven biomes, layered
//! columns, caves, structures and decorations, composed into a deterministic
//! per-chunk pipeline.

mod cave;
mod column;
mod terrain_height;

pub mod async_generation;
pub mod biome;
pub mod cache;
pub mod feature;
pub mod generator;
pub mod noise;
pub mod seed;
pub mod structure;

pub use async_generation::{AsyncChunkGenerator, GeneratedChunk, GenerationTask, SubmitError};
pub use biome::{
    BiomeProfile, BiomeTable, BiomeTag, ClimateField, ClimateSample, Decoration, DecorationKind,
    FeaturePoint, classify,
};
pub use cache::ColumnCache;
pub use cave::{CAVE_OCTAVES, CAVE_PERSISTENCE, CaveCarver};
pub use column::{Layer, TerrainColumnBuilder};
pub use feature::{DecorationScatter, place_decoration};
pub use generator::{Generator, SPAWN_POINT};
pub use noise::{NoiseConfig, NoiseField};
pub use seed::{WorldSeed, hash_chunk, seed_from_string};
pub use structure::{PlacedStructure, StructureKind, StructurePlacer};
pub use terrain_height::{TerrainShaper, apply_curve, height_from_noise};
