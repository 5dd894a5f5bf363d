//! Owner of all generated chunks, keyed by [`ChunkCoord`].
//!
//! The [`ChunkManager`] provides O(1) lookup, insert, and removal using an
//! [`FxHashMap`](rustc_hash::FxHashMap) for fast hashing of small keys.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::chunk::{CHUNK_SIZE, Chunk};

/// A chunk's position on the horizontal chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// Chunk-grid X coordinate.
    pub x: i32,
    /// Chunk-grid Z coordinate.
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the world column `(world_x, world_z)`.
    pub fn from_world(world_x: i32, world_z: i32) -> Self {
        let size = CHUNK_SIZE as i32;
        Self {
            x: world_x.div_euclid(size),
            z: world_z.div_euclid(size),
        }
    }

    /// World coordinates of this chunk's `(0, 0)` column.
    pub fn world_origin(self) -> (i32, i32) {
        let size = CHUNK_SIZE as i32;
        (self.x * size, self.z * size)
    }

    /// Returns the coordinate offset by `(dx, dz)` chunks.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }
}

/// Host-side chunk storage the generator writes into.
pub trait ChunkAccess {
    /// Mutable access to the chunk at `coord`, creating an empty one if absent.
    fn chunk_mut(&mut self, coord: ChunkCoord) -> &mut Chunk;
}

/// Owns all currently loaded chunks.
pub struct ChunkManager {
    chunks: FxHashMap<ChunkCoord, Chunk>,
}

impl ChunkManager {
    /// Creates an empty chunk manager.
    pub fn new() -> Self {
        Self {
            chunks: FxHashMap::default(),
        }
    }

    /// Inserts a chunk, replacing any chunk already stored at `coord`.
    pub fn load_chunk(&mut self, coord: ChunkCoord, chunk: Chunk) {
        self.chunks.insert(coord, chunk);
    }

    /// Removes and returns the chunk at `coord`.
    pub fn unload_chunk(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        self.chunks.remove(&coord)
    }

    /// Immutable access to a loaded chunk.
    pub fn get_chunk(&self, coord: &ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    /// Mutable access to a loaded chunk.
    pub fn get_chunk_mut(&mut self, coord: &ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(coord)
    }

    /// Returns `true` if a chunk is stored at `coord`.
    pub fn is_loaded(&self, coord: &ChunkCoord) -> bool {
        self.chunks.contains_key(coord)
    }

    /// Number of currently loaded chunks.
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates over all loaded chunk coordinates.
    pub fn loaded_coords(&self) -> impl Iterator<Item = &ChunkCoord> {
        self.chunks.keys()
    }

    /// Iterates over all loaded `(coord, chunk)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk)> {
        self.chunks.iter()
    }
}

impl ChunkAccess for ChunkManager {
    fn chunk_mut(&mut self, coord: ChunkCoord) -> &mut Chunk {
        self.chunks.entry(coord).or_default()
    }
}

impl Default for ChunkManager {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
