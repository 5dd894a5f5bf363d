//! Structure placement: villages, dungeons and ruins stamped into a chunk.
//!
//! Each kind is visited in a fixed order and rolls against its rarity once per
//! chunk. A successful roll picks an anchor column, finds its surface, and
//! hands off to the kind's builder. Writes that fall outside the chunk are
//! clipped by [`Chunk::set`].

mod dungeon;
mod ruins;
mod village;

use glam::IVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use strata_config::StructuresConfig;
use strata_voxel::{CHUNK_SIZE, Chunk, Material};

use crate::seed::{STRUCTURE_SALT, WorldSeed, chunk_rng};

pub use dungeon::{CORRIDOR_HEIGHT, place_dungeon};
pub use ruins::{RUIN_DECAY, place_ruins};
pub use village::{Building, BuildingPicker, place_village};

/// The structure kinds, in placement order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Village,
    Dungeon,
    Ruins,
}

impl StructureKind {
    /// Every kind in placement order.
    pub const ALL: [StructureKind; 3] = [
        StructureKind::Village,
        StructureKind::Dungeon,
        StructureKind::Ruins,
    ];

    /// Configuration name.
    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Village => "village",
            StructureKind::Dungeon => "dungeon",
            StructureKind::Ruins => "ruins",
        }
    }

    fn salt(self) -> u64 {
        STRUCTURE_SALT.wrapping_add(self as u64)
    }
}

/// A structure stamped into a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedStructure {
    pub kind: StructureKind,
    /// Chunk-local anchor: the surface cell of the chosen column.
    pub anchor: IVec3,
}

/// Returns `true` if a draw `u` in `[0, 1)` triggers an attempt at `rarity`.
///
/// Rarity 0 never attempts, even on an exact zero draw.
pub fn should_attempt(u: f64, rarity: f64) -> bool {
    rarity > 0.0 && u <= rarity
}

/// Places structures into chunks according to the structure table.
#[derive(Clone, Debug)]
pub struct StructurePlacer {
    seed: WorldSeed,
    config: StructuresConfig,
    buildings: BuildingPicker,
}

impl StructurePlacer {
    /// Create a placer for a world seed.
    pub fn new(seed: WorldSeed, config: &StructuresConfig) -> Self {
        Self {
            seed,
            config: config.clone(),
            buildings: BuildingPicker::from_config(&config.village.buildings),
        }
    }

    /// Returns the structure table.
    pub fn config(&self) -> &StructuresConfig {
        &self.config
    }

    fn kind_settings(&self, kind: StructureKind) -> (bool, f64) {
        match kind {
            StructureKind::Village => (self.config.village.enabled, self.config.village.rarity),
            StructureKind::Dungeon => (self.config.dungeon.enabled, self.config.dungeon.rarity),
            StructureKind::Ruins => (self.config.ruins.enabled, self.config.ruins.rarity),
        }
    }

    /// Roll and stamp every enabled kind into chunk `(chunk_x, chunk_z)`.
    ///
    /// Each kind draws from its own per-chunk stream, so one kind's attempt
    /// never shifts what the next kind sees.
    pub fn place_structures(
        &self,
        chunk: &mut Chunk,
        chunk_x: i32,
        chunk_z: i32,
    ) -> Vec<PlacedStructure> {
        let mut placed = Vec::new();
        if !self.config.enabled {
            return placed;
        }

        for kind in StructureKind::ALL {
            let (enabled, rarity) = self.kind_settings(kind);
            if !enabled {
                continue;
            }

            let mut rng = chunk_rng(self.seed, chunk_x, chunk_z, kind.salt());
            let u: f64 = rng.random();
            if !should_attempt(u, rarity) {
                continue;
            }

            let size = CHUNK_SIZE as i32;
            let lx = rng.random_range(0..size);
            let lz = rng.random_range(0..size);
            let Some(surface) = chunk.surface_y(lx, lz) else {
                tracing::debug!(
                    "Skipping {} in chunk ({}, {}): empty anchor column",
                    kind.name(),
                    chunk_x,
                    chunk_z
                );
                continue;
            };

            let anchor = IVec3::new(lx, surface, lz);
            self.build(kind, chunk, &mut rng, anchor);
            tracing::debug!(
                "Placed {} in chunk ({}, {}) at {}",
                kind.name(),
                chunk_x,
                chunk_z,
                anchor
            );
            placed.push(PlacedStructure { kind, anchor });
        }

        placed
    }

    fn build(&self, kind: StructureKind, chunk: &mut Chunk, rng: &mut ChaCha8Rng, anchor: IVec3) {
        match kind {
            StructureKind::Village => {
                place_village(chunk, rng, anchor, &self.config.village, &self.buildings);
            }
            StructureKind::Dungeon => {
                place_dungeon(chunk, rng, anchor, &self.config.dungeon);
            }
            StructureKind::Ruins => {
                place_ruins(chunk, rng, anchor, &self.config.ruins);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Stamping helpers
// ---------------------------------------------------------------------------

/// Uniform integer in `[min, max]`, tolerating reversed bounds.
fn count_between(rng: &mut ChaCha8Rng, min: u32, max: u32) -> u32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(lo..=hi)
}

/// Fill the inclusive box `min..=max`.
fn fill_box(chunk: &mut Chunk, min: IVec3, max: IVec3, material: Material) {
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                chunk.set(x, y, z, material);
            }
        }
    }
}

/// Fill the faces of the inclusive box `min..=max` with `shell` and its inside with Air.
fn hollow_box(chunk: &mut Chunk, min: IVec3, max: IVec3, shell: Material) {
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                let on_face = x == min.x
                    || x == max.x
                    || y == min.y
                    || y == max.y
                    || z == min.z
                    || z == max.z;
                let material = if on_face { shell } else { Material::Air };
                chunk.set(x, y, z, material);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_config::{DungeonConfig, RuinsConfig, VillageConfig};

    /// A chunk with flat ground: stone up to y = 40.
    fn flat_chunk() -> Chunk {
        let mut chunk = Chunk::new();
        fill_box(&mut chunk, IVec3::ZERO, IVec3::new(15, 40, 15), Material::Stone);
        chunk
    }

    fn table(village: f64, dungeon: f64, ruins: f64) -> StructuresConfig {
        StructuresConfig {
            enabled: true,
            village: VillageConfig {
                rarity: village,
                ..Default::default()
            },
            dungeon: DungeonConfig {
                rarity: dungeon,
                ..Default::default()
            },
            ruins: RuinsConfig {
                rarity: ruins,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_should_attempt_edges() {
        assert!(!should_attempt(0.0, 0.0), "rarity 0 never attempts");
        assert!(should_attempt(0.0, 1.0));
        assert!(should_attempt(0.999_999, 1.0));
        assert!(should_attempt(0.25, 0.25));
        assert!(!should_attempt(0.250_001, 0.25));
    }

    #[test]
    fn test_rarity_zero_never_places() {
        let placer = StructurePlacer::new(42, &table(0.0, 0.0, 0.0));
        let mut chunk = flat_chunk();
        for i in 0..10_000 {
            let placed = placer.place_structures(&mut chunk, i % 100, i / 100);
            assert!(placed.is_empty(), "placed a structure at rarity 0 in draw {i}");
        }
        assert_eq!(chunk, flat_chunk());
    }

    #[test]
    fn test_rarity_one_always_attempts() {
        let placer = StructurePlacer::new(42, &table(1.0, 1.0, 1.0));
        for i in 0..50 {
            let mut chunk = flat_chunk();
            let placed = placer.place_structures(&mut chunk, i, -i);
            let kinds: Vec<_> = placed.iter().map(|p| p.kind).collect();
            assert_eq!(kinds, StructureKind::ALL.to_vec(), "chunk {i}");
            // Later kinds may anchor on top of earlier ones.
            assert_eq!(placed[0].anchor.y, 40, "village must sit on the ground");
            for p in &placed {
                assert!(p.anchor.y >= 40, "anchor below the surface: {:?}", p);
            }
        }
    }

    #[test]
    fn test_empty_anchor_column_aborts_attempt() {
        let placer = StructurePlacer::new(7, &table(1.0, 1.0, 1.0));
        let mut chunk = Chunk::new();
        let placed = placer.place_structures(&mut chunk, 0, 0);
        assert!(placed.is_empty());
        assert_eq!(chunk, Chunk::new());
    }

    #[test]
    fn test_global_switch_disables_everything() {
        let mut config = table(1.0, 1.0, 1.0);
        config.enabled = false;
        let placer = StructurePlacer::new(7, &config);
        let mut chunk = flat_chunk();
        assert!(placer.place_structures(&mut chunk, 0, 0).is_empty());
        assert_eq!(chunk, flat_chunk());
    }

    #[test]
    fn test_disabled_kind_is_skipped() {
        let mut config = table(1.0, 1.0, 1.0);
        config.dungeon.enabled = false;
        let placer = StructurePlacer::new(7, &config);
        let mut chunk = flat_chunk();
        let kinds: Vec<_> = placer
            .place_structures(&mut chunk, 2, 2)
            .iter()
            .map(|p| p.kind)
            .collect();
        assert_eq!(kinds, vec![StructureKind::Village, StructureKind::Ruins]);
    }

    #[test]
    fn test_kind_streams_are_independent() {
        // Whether a village attempts must not change where ruins land.
        let with_village = StructurePlacer::new(5, &table(1.0, 0.0, 1.0));
        let without_village = StructurePlacer::new(5, &table(0.0, 0.0, 1.0));
        for i in 0..20 {
            let mut a = flat_chunk();
            let mut b = flat_chunk();
            let ruins_a = with_village
                .place_structures(&mut a, i, 3)
                .into_iter()
                .find(|p| p.kind == StructureKind::Ruins);
            let ruins_b = without_village
                .place_structures(&mut b, i, 3)
                .into_iter()
                .find(|p| p.kind == StructureKind::Ruins);
            assert_eq!(ruins_a.map(|p| (p.anchor.x, p.anchor.z)), ruins_b.map(|p| (p.anchor.x, p.anchor.z)));
        }
    }

    #[test]
    fn test_placement_is_deterministic() {
        let placer = StructurePlacer::new(99, &table(0.5, 0.5, 0.5));
        for i in 0..30 {
            let mut a = flat_chunk();
            let mut b = flat_chunk();
            assert_eq!(
                placer.place_structures(&mut a, i, i * 2),
                placer.place_structures(&mut b, i, i * 2)
            );
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_hollow_box_has_air_interior() {
        let mut chunk = Chunk::new();
        hollow_box(&mut chunk, IVec3::new(1, 1, 1), IVec3::new(3, 3, 3), Material::Cobblestone);
        assert_eq!(chunk.get(2, 2, 2), Material::Air);
        assert_eq!(chunk.get(1, 2, 2), Material::Cobblestone);
        assert_eq!(chunk.get(2, 3, 2), Material::Cobblestone);
        assert_eq!(chunk.count(Material::Cobblestone), 26);
    }
}
