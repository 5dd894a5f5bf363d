//! Fixed-size column chunk: 16×128×16 material cells plus a 16×16 biome overlay.
//!
//! Coordinates are chunk-local `i32` values so that stamping code can write at
//! arbitrary offsets. Out-of-range reads return Air and out-of-range writes are
//! ignored, which is how structures that straddle a chunk edge get clipped.

use crate::material::Material;

/// Horizontal side length of a chunk in cells.
pub const CHUNK_SIZE: usize = 16;

/// Vertical extent of a chunk in cells.
pub const CHUNK_HEIGHT: usize = 128;

/// Number of columns in a chunk (16²).
pub const CHUNK_AREA: usize = CHUNK_SIZE * CHUNK_SIZE;

/// Total number of cells in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_HEIGHT;

/// A column chunk with bounds-checked access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Cells in `y`-major column order: `(x * 16 + z) * 128 + y`.
    cells: Box<[Material]>,
    /// Biome ID per column, `x * 16 + z`.
    biomes: Box<[u8]>,
}

impl Chunk {
    /// Creates a chunk filled with Air and an all-zero biome overlay.
    pub fn new() -> Self {
        Self::new_filled(Material::Air)
    }

    /// Creates a chunk filled with the given material.
    pub fn new_filled(material: Material) -> Self {
        Self {
            cells: vec![material; CHUNK_VOLUME].into_boxed_slice(),
            biomes: vec![0; CHUNK_AREA].into_boxed_slice(),
        }
    }

    /// Returns `true` if `(x, y, z)` lies inside the chunk.
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        Self::column_in_bounds(x, z) && (0..CHUNK_HEIGHT as i32).contains(&y)
    }

    /// Returns `true` if column `(x, z)` lies inside the chunk.
    pub fn column_in_bounds(x: i32, z: i32) -> bool {
        (0..CHUNK_SIZE as i32).contains(&x) && (0..CHUNK_SIZE as i32).contains(&z)
    }

    /// Returns the material at `(x, y, z)`, or Air when out of range.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Material {
        if !Self::in_bounds(x, y, z) {
            return Material::Air;
        }
        self.cells[Self::cell_index(x, y, z)]
    }

    /// Sets the material at `(x, y, z)`. Out-of-range writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, z: i32, material: Material) {
        if !Self::in_bounds(x, y, z) {
            tracing::trace!("Chunk::set clipped at ({}, {}, {})", x, y, z);
            return;
        }
        self.cells[Self::cell_index(x, y, z)] = material;
    }

    /// Returns `true` if the cell at `(x, y, z)` is Air (including out of range).
    pub fn is_empty(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z).is_air()
    }

    /// Highest non-Air cell in column `(x, z)`, scanning from the top.
    ///
    /// Returns `None` for an empty or out-of-range column.
    pub fn surface_y(&self, x: i32, z: i32) -> Option<i32> {
        if !Self::column_in_bounds(x, z) {
            return None;
        }
        let base = Self::cell_index(x, 0, z);
        self.cells[base..base + CHUNK_HEIGHT]
            .iter()
            .rposition(|m| !m.is_air())
            .map(|y| y as i32)
    }

    /// Biome ID recorded for column `(x, z)`, or `None` when out of range.
    pub fn biome_id(&self, x: i32, z: i32) -> Option<u8> {
        Self::column_in_bounds(x, z).then(|| self.biomes[Self::column_index(x, z)])
    }

    /// Records the biome ID of column `(x, z)`. Out-of-range writes are dropped.
    pub fn set_biome_id(&mut self, x: i32, z: i32, id: u8) {
        if !Self::column_in_bounds(x, z) {
            return;
        }
        self.biomes[Self::column_index(x, z)] = id;
    }

    /// Cells of column `(x, z)` from `y = 0` upward, or `None` when out of range.
    pub fn column(&self, x: i32, z: i32) -> Option<&[Material]> {
        if !Self::column_in_bounds(x, z) {
            return None;
        }
        let base = Self::cell_index(x, 0, z);
        Some(&self.cells[base..base + CHUNK_HEIGHT])
    }

    /// All cells in storage order.
    pub fn cells(&self) -> &[Material] {
        &self.cells
    }

    /// The biome overlay in storage order.
    pub fn biomes(&self) -> &[u8] {
        &self.biomes
    }

    /// Number of cells holding `material`.
    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|&&m| m == material).count()
    }

    fn cell_index(x: i32, y: i32, z: i32) -> usize {
        Self::column_index(x, z) * CHUNK_HEIGHT + y as usize
    }

    fn column_index(x: i32, z: i32) -> usize {
        x as usize * CHUNK_SIZE + z as usize
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
