//! Voxel cell storage for generated terrain: the closed material set, the
//! fixed-size column chunk with its biome overlay, and the chunk map hosts
//! hand to the generator.

pub mod chunk;
pub mod chunk_manager;
pub mod material;

pub use chunk::{CHUNK_AREA, CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME, Chunk};
pub use chunk_manager::{ChunkAccess, ChunkCoord, ChunkManager};
pub use material::{Material, UnknownMaterial};
