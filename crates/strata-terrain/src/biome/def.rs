//! Resolved biome profile: surface materials and decoration entries.

use strata_voxel::Material;

use super::BiomeTag;

/// The decoration archetypes the scatter pass knows how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    OakTree,
    BirchTree,
    Cactus,
    TallGrass,
    Flower,
    DeadBush,
    Boulder,
}

impl DecorationKind {
    /// Every decoration kind.
    pub const ALL: [DecorationKind; 7] = [
        DecorationKind::OakTree,
        DecorationKind::BirchTree,
        DecorationKind::Cactus,
        DecorationKind::TallGrass,
        DecorationKind::Flower,
        DecorationKind::DeadBush,
        DecorationKind::Boulder,
    ];

    /// Configuration name.
    pub fn name(self) -> &'static str {
        match self {
            DecorationKind::OakTree => "oak_tree",
            DecorationKind::BirchTree => "birch_tree",
            DecorationKind::Cactus => "cactus",
            DecorationKind::TallGrass => "tall_grass",
            DecorationKind::Flower => "flower",
            DecorationKind::DeadBush => "dead_bush",
            DecorationKind::Boulder => "boulder",
        }
    }

    /// Lookup by configuration name (case-insensitive).
    pub fn from_name(name: &str) -> Option<DecorationKind> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

/// A decoration entry with its per-column probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    /// Probability per column, in `[0, 1]`.
    pub density: f64,
}

/// Full descriptor for one biome after name resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeProfile {
    /// The biome this profile was resolved for.
    pub tag: BiomeTag,
    /// Material of the topmost occupied cell.
    pub surface: Material,
    /// Material of the cell directly below the surface.
    pub subsurface: Material,
    /// Decorations rolled once per column, in configuration order.
    pub decorations: Vec<Decoration>,
}

impl BiomeProfile {
    /// Grass over dirt with no decorations.
    pub fn bare(tag: BiomeTag) -> Self {
        Self {
            tag,
            surface: Material::Grass,
            subsurface: Material::Dirt,
            decorations: Vec::new(),
        }
    }
}
