//! Villages: a handful of small building templates scattered around an anchor.

use glam::IVec3;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_chacha::ChaCha8Rng;
use strata_config::{BuildingWeight, VillageConfig};
use strata_voxel::{Chunk, Material};

use super::count_between;

/// Village building archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Building {
    House,
    Hut,
    Well,
    Farm,
}

impl Building {
    /// Every archetype.
    pub const ALL: [Building; 4] = [Building::House, Building::Hut, Building::Well, Building::Farm];

    /// Configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Building::House => "house",
            Building::Hut => "hut",
            Building::Well => "well",
            Building::Farm => "farm",
        }
    }

    /// Lookup by configuration name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Building> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Cells of this building relative to its footprint centre, floor at `y = 0`.
    pub fn blocks(self) -> Vec<(IVec3, Material)> {
        let mut blocks = Vec::new();
        match self {
            Building::House => {
                for x in -2i32..=2 {
                    for z in -2i32..=2 {
                        blocks.push((IVec3::new(x, 0, z), Material::Planks));
                        blocks.push((IVec3::new(x, 4, z), Material::Planks));
                        let corner = x.abs() == 2 && z.abs() == 2;
                        let edge = x.abs() == 2 || z.abs() == 2;
                        for y in 1..=3 {
                            let material = if corner {
                                Material::OakLog
                            } else if edge {
                                Material::Planks
                            } else {
                                Material::Air
                            };
                            blocks.push((IVec3::new(x, y, z), material));
                        }
                    }
                }
                // Door and windows
                blocks.push((IVec3::new(0, 1, -2), Material::Air));
                blocks.push((IVec3::new(0, 2, -2), Material::Air));
                blocks.push((IVec3::new(-2, 2, 0), Material::Air));
                blocks.push((IVec3::new(2, 2, 0), Material::Air));
            }
            Building::Hut => {
                for x in -1..=1 {
                    for z in -1..=1 {
                        blocks.push((IVec3::new(x, 0, z), Material::Planks));
                        blocks.push((IVec3::new(x, 3, z), Material::OakLeaves));
                        let wall = x != 0 || z != 0;
                        for y in 1..=2 {
                            let material = if wall { Material::Planks } else { Material::Air };
                            blocks.push((IVec3::new(x, y, z), material));
                        }
                    }
                }
                blocks.push((IVec3::new(0, 1, -1), Material::Air));
            }
            Building::Well => {
                for x in -1..=1 {
                    for z in -1..=1 {
                        let centre = x == 0 && z == 0;
                        let floor = if centre { Material::Water } else { Material::Cobblestone };
                        blocks.push((IVec3::new(x, 0, z), floor));
                        blocks.push((IVec3::new(x, 3, z), Material::Planks));
                        if x != 0 && z != 0 {
                            blocks.push((IVec3::new(x, 1, z), Material::OakLog));
                            blocks.push((IVec3::new(x, 2, z), Material::OakLog));
                        }
                    }
                }
            }
            Building::Farm => {
                for x in -2i32..=2 {
                    for z in -2i32..=2 {
                        let border = x.abs() == 2 || z.abs() == 2;
                        if border {
                            blocks.push((IVec3::new(x, 0, z), Material::OakLog));
                        } else if x == 0 {
                            blocks.push((IVec3::new(x, 0, z), Material::Water));
                        } else {
                            blocks.push((IVec3::new(x, 0, z), Material::Dirt));
                            blocks.push((IVec3::new(x, 1, z), Material::TallGrass));
                        }
                    }
                }
            }
        }
        blocks
    }

    /// Stamp this building with its footprint centre at `origin`.
    pub fn stamp(self, chunk: &mut Chunk, origin: IVec3) {
        for (offset, material) in self.blocks() {
            let p = origin + offset;
            chunk.set(p.x, p.y, p.z, material);
        }
    }
}

/// Chooses building archetypes by configured weight.
#[derive(Clone, Debug)]
pub struct BuildingPicker {
    kinds: Vec<Building>,
    weights: Option<WeightedIndex<f64>>,
}

impl BuildingPicker {
    /// Resolve the configured weights.
    ///
    /// Unknown archetype names become houses. With no entries the choice is
    /// uniform over every archetype; with unusable weights (all zero, negative
    /// or non-finite) it is uniform over the configured archetypes.
    pub fn from_config(entries: &[BuildingWeight]) -> Self {
        if entries.is_empty() {
            return Self {
                kinds: Building::ALL.to_vec(),
                weights: None,
            };
        }

        let kinds = entries
            .iter()
            .map(|entry| {
                Building::from_name(&entry.kind).unwrap_or_else(|| {
                    tracing::warn!("Unknown building {:?}, using house", entry.kind);
                    Building::House
                })
            })
            .collect();
        let weights = WeightedIndex::new(entries.iter().map(|entry| entry.weight)).ok();
        if weights.is_none() {
            tracing::warn!("Village building weights unusable, picking uniformly");
        }

        Self { kinds, weights }
    }

    /// Candidate archetypes, in configuration order.
    pub fn kinds(&self) -> &[Building] {
        &self.kinds
    }

    /// Draw one archetype.
    pub fn pick(&self, rng: &mut ChaCha8Rng) -> Building {
        let index = match &self.weights {
            Some(weights) => weights.sample(rng),
            None => rng.random_range(0..self.kinds.len()),
        };
        self.kinds[index]
    }
}

/// Stamp a village around `anchor`. Returns the number of buildings placed.
pub fn place_village(
    chunk: &mut Chunk,
    rng: &mut ChaCha8Rng,
    anchor: IVec3,
    config: &VillageConfig,
    picker: &BuildingPicker,
) -> u32 {
    let count = count_between(rng, config.min_size, config.max_size);
    let spread = config.spread.abs();

    for _ in 0..count {
        let building = picker.pick(rng);
        let dx = rng.random_range(-spread..=spread);
        let dz = rng.random_range(-spread..=spread);
        building.stamp(chunk, anchor + IVec3::new(dx, 0, dz));
    }

    count
}
