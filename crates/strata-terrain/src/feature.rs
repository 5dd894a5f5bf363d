//! Decoration scatter: biome-driven trees, plants and boulders on top of the
//! finished terrain surface.

use glam::IVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use strata_voxel::{CHUNK_SIZE, Chunk, Material};

use crate::biome::{BiomeTable, BiomeTag, DecorationKind};
use crate::seed::{DECORATION_SALT, WorldSeed, chunk_rng};

/// Scatters decorations over chunks.
#[derive(Clone, Debug)]
pub struct DecorationScatter {
    seed: WorldSeed,
}

impl DecorationScatter {
    /// Create a scatter pass for a world seed.
    pub fn new(seed: WorldSeed) -> Self {
        Self { seed }
    }

    /// Roll every decoration of every column's biome and place the hits.
    /// Biomes without a table entry get no decorations.
    ///
    /// `biome_at` is queried with world column coordinates. Returns the number
    /// of decorations placed.
    pub fn decorate(
        &self,
        chunk: &mut Chunk,
        chunk_x: i32,
        chunk_z: i32,
        table: &BiomeTable,
        biome_at: &dyn Fn(i32, i32) -> BiomeTag,
    ) -> usize {
        let mut rng = chunk_rng(self.seed, chunk_x, chunk_z, DECORATION_SALT);
        let size = CHUNK_SIZE as i32;
        let mut placed = 0;

        for lx in 0..size {
            for lz in 0..size {
                let tag = biome_at(chunk_x * size + lx, chunk_z * size + lz);
                for decoration in table.decorations(tag) {
                    let u: f64 = rng.random();
                    if u >= decoration.density {
                        continue;
                    }
                    if let Some(surface) = chunk.surface_y(lx, lz) {
                        place_decoration(
                            chunk,
                            &mut rng,
                            decoration.kind,
                            IVec3::new(lx, surface + 1, lz),
                        );
                        placed += 1;
                    }
                }
            }
        }

        placed
    }
}

/// Build one decoration with its base at `base`.
pub fn place_decoration(
    chunk: &mut Chunk,
    rng: &mut ChaCha8Rng,
    kind: DecorationKind,
    base: IVec3,
) {
    match kind {
        DecorationKind::OakTree => {
            let height = rng.random_range(4..=6);
            tree(chunk, base, height, Material::OakLog, Material::OakLeaves, 2);
        }
        DecorationKind::BirchTree => {
            let height = rng.random_range(5..=7);
            tree(chunk, base, height, Material::BirchLog, Material::BirchLeaves, 1);
        }
        DecorationKind::Cactus => {
            let height = rng.random_range(1..=3);
            for dy in 0..height {
                chunk.set(base.x, base.y + dy, base.z, Material::Cactus);
            }
        }
        DecorationKind::TallGrass => plant(chunk, base, Material::TallGrass),
        DecorationKind::Flower => plant(chunk, base, Material::Flower),
        DecorationKind::DeadBush => plant(chunk, base, Material::DeadBush),
        DecorationKind::Boulder => {
            for offset in [
                IVec3::ZERO,
                IVec3::X,
                IVec3::Z,
                IVec3::new(1, 0, 1),
                IVec3::Y,
            ] {
                let p = base + offset;
                let material = if rng.random::<f64>() < 0.3 {
                    Material::MossyCobblestone
                } else {
                    Material::Cobblestone
                };
                chunk.set(p.x, p.y, p.z, material);
            }
        }
    }
}

fn plant(chunk: &mut Chunk, base: IVec3, material: Material) {
    if chunk.is_empty(base.x, base.y, base.z) {
        chunk.set(base.x, base.y, base.z, material);
    }
}

/// Trunk of `height` logs with a leaf crown around its top. Leaves only fill Air.
fn tree(
    chunk: &mut Chunk,
    base: IVec3,
    height: i32,
    log: Material,
    leaves: Material,
    radius: i32,
) {
    for dy in 0..height {
        chunk.set(base.x, base.y + dy, base.z, log);
    }

    let top = base.y + height - 1;
    for dy in -2..=1 {
        let r = if dy >= 0 { 1 } else { radius };
        for dx in -r..=r {
            for dz in -r..=r {
                if r > 1 && dx.abs() == r && dz.abs() == r {
                    continue;
                }
                let (x, y, z) = (base.x + dx, top + dy, base.z + dz);
                if chunk.is_empty(x, y, z) {
                    chunk.set(x, y, z, leaves);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use strata_config::{BiomeConfig, DecorationConfig};

    fn grass_chunk(height: i32) -> Chunk {
        let mut chunk = Chunk::new();
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..height {
                    chunk.set(x, y, z, Material::Dirt);
                }
                chunk.set(x, height, z, Material::Grass);
            }
        }
        chunk
    }

    fn table_with(kind: &str, density: f64) -> BiomeTable {
        let mut biomes = BTreeMap::new();
        biomes.insert(
            "plains".to_string(),
            BiomeConfig {
                decorations: vec![DecorationConfig {
                    kind: kind.to_string(),
                    density,
                }],
                ..Default::default()
            },
        );
        BiomeTable::from_config(&biomes)
    }

    fn plains(_: i32, _: i32) -> BiomeTag {
        BiomeTag::Plains
    }

    #[test]
    fn test_zero_density_places_nothing() {
        let scatter = DecorationScatter::new(1);
        let mut chunk = grass_chunk(30);
        let placed = scatter.decorate(&mut chunk, 0, 0, &table_with("flower", 0.0), &plains);
        assert_eq!(placed, 0);
        assert_eq!(chunk, grass_chunk(30));
    }

    #[test]
    fn test_full_density_plants_every_column() {
        let scatter = DecorationScatter::new(1);
        let mut chunk = grass_chunk(30);
        let placed = scatter.decorate(&mut chunk, 0, 0, &table_with("tall_grass", 1.0), &plains);
        assert_eq!(placed, 256);
        for x in 0..16 {
            for z in 0..16 {
                assert_eq!(chunk.get(x, 31, z), Material::TallGrass);
            }
        }
    }

    #[test]
    fn test_decorations_sit_on_surface() {
        let scatter = DecorationScatter::new(4);
        let mut chunk = grass_chunk(20);
        scatter.decorate(&mut chunk, 2, 2, &table_with("cactus", 0.2), &plains);
        for x in 0..16 {
            for z in 0..16 {
                assert_eq!(chunk.get(x, 20, z), Material::Grass, "surface untouched");
                if chunk.get(x, 22, z) == Material::Cactus {
                    assert_eq!(chunk.get(x, 21, z), Material::Cactus, "floating cactus");
                }
            }
        }
    }

    #[test]
    fn test_empty_column_skips_silently() {
        let scatter = DecorationScatter::new(1);
        let mut chunk = Chunk::new();
        let placed = scatter.decorate(&mut chunk, 0, 0, &table_with("oak_tree", 1.0), &plains);
        assert_eq!(placed, 0);
        assert_eq!(chunk, Chunk::new());
    }

    #[test]
    fn test_biome_without_decorations_is_bare() {
        let scatter = DecorationScatter::new(1);
        let mut chunk = grass_chunk(30);
        let table = BiomeTable::from_config(&BTreeMap::new());
        let placed = scatter.decorate(&mut chunk, 0, 0, &table, &|_, _| BiomeTag::Desert);
        assert_eq!(placed, 0);
    }

    #[test]
    fn test_unlisted_biome_is_bare_even_when_plains_is_decorated() {
        let scatter = DecorationScatter::new(1);
        let mut chunk = grass_chunk(30);
        let table = table_with("tall_grass", 1.0);
        let placed = scatter.decorate(&mut chunk, 0, 0, &table, &|_, _| BiomeTag::Desert);
        assert_eq!(placed, 0);
        assert_eq!(chunk, grass_chunk(30));
    }

    #[test]
    fn test_placement_is_deterministic() {
        let scatter = DecorationScatter::new(77);
        let table = table_with("oak_tree", 0.05);
        let mut a = grass_chunk(40);
        let mut b = grass_chunk(40);
        scatter.decorate(&mut a, -3, 8, &table, &plains);
        scatter.decorate(&mut b, -3, 8, &table, &plains);
        assert_eq!(a, b);
    }

    #[test]
    fn test_oak_tree_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut chunk = grass_chunk(10);
        place_decoration(&mut chunk, &mut rng, DecorationKind::OakTree, IVec3::new(8, 11, 8));

        assert_eq!(chunk.get(8, 11, 8), Material::OakLog);
        assert_eq!(chunk.get(8, 14, 8), Material::OakLog, "trunk at least four tall");
        let leaves = chunk.count(Material::OakLeaves);
        assert!(leaves > 20, "crown too small: {leaves}");
        assert_eq!(chunk.get(8, 10, 8), Material::Grass, "ground untouched");
    }

    #[test]
    fn test_plants_do_not_replace_blocks() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut chunk = grass_chunk(10);
        place_decoration(&mut chunk, &mut rng, DecorationKind::Flower, IVec3::new(3, 10, 3));
        assert_eq!(chunk.get(3, 10, 3), Material::Grass);
    }
}
