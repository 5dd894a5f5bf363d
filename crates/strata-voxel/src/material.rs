//! The closed set of cell materials and name resolution.
//!
//! Air is always ID 0 so that a freshly allocated chunk is empty space.
//! Configuration refers to materials by lowercase name; [`Material::resolve`]
//! is the single place where those names become cells.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A cell material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Material {
    /// Empty space.
    #[default]
    Air = 0,
    Grass,
    Dirt,
    Stone,
    Sand,
    /// The only fluid. Floods columns below sea level.
    Water,
    Bedrock,
    Sandstone,
    Gravel,
    OakLog,
    OakLeaves,
    BirchLog,
    BirchLeaves,
    Cactus,
    CoalOre,
    Cobblestone,
    MossyCobblestone,
    Planks,
    TallGrass,
    Flower,
    DeadBush,
}

/// Returned by [`Material::from_str`] for names outside the material table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown material name: {0}")]
pub struct UnknownMaterial(pub String);

impl Material {
    /// Every material in ID order.
    pub const ALL: [Material; 21] = [
        Material::Air,
        Material::Grass,
        Material::Dirt,
        Material::Stone,
        Material::Sand,
        Material::Water,
        Material::Bedrock,
        Material::Sandstone,
        Material::Gravel,
        Material::OakLog,
        Material::OakLeaves,
        Material::BirchLog,
        Material::BirchLeaves,
        Material::Cactus,
        Material::CoalOre,
        Material::Cobblestone,
        Material::MossyCobblestone,
        Material::Planks,
        Material::TallGrass,
        Material::Flower,
        Material::DeadBush,
    ];

    /// Numeric ID of this material.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Material with the given numeric ID.
    pub fn from_id(id: u8) -> Option<Material> {
        Self::ALL.get(id as usize).copied()
    }

    /// Lowercase configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Material::Air => "air",
            Material::Grass => "grass",
            Material::Dirt => "dirt",
            Material::Stone => "stone",
            Material::Sand => "sand",
            Material::Water => "water",
            Material::Bedrock => "bedrock",
            Material::Sandstone => "sandstone",
            Material::Gravel => "gravel",
            Material::OakLog => "oak_log",
            Material::OakLeaves => "oak_leaves",
            Material::BirchLog => "birch_log",
            Material::BirchLeaves => "birch_leaves",
            Material::Cactus => "cactus",
            Material::CoalOre => "coal_ore",
            Material::Cobblestone => "cobblestone",
            Material::MossyCobblestone => "mossy_cobblestone",
            Material::Planks => "planks",
            Material::TallGrass => "tall_grass",
            Material::Flower => "flower",
            Material::DeadBush => "dead_bush",
        }
    }

    /// Exact lookup by configuration name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Material> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Resolve a configuration name, falling back to [`Material::Stone`].
    pub fn resolve(name: &str) -> Material {
        match Self::from_name(name) {
            Some(material) => material,
            None => {
                tracing::warn!("Unknown material name {:?}, using stone", name);
                Material::Stone
            }
        }
    }

    /// Returns `true` for [`Material::Air`].
    pub fn is_air(self) -> bool {
        self == Material::Air
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}
