//! Generator preset structs with documented defaults and RON persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Preset loaded when the host does not name one.
pub const DEFAULT_PRESET: &str = "default";

/// Top-level generator configuration for one preset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Vertical extent and sea level.
    pub world: WorldSettings,
    /// Surface height noise.
    pub terrain: TerrainNoiseConfig,
    /// Climate feature-point field.
    pub biome: BiomeNoiseConfig,
    /// Cave noise.
    pub cave: CaveNoiseConfig,
    /// Material layers read top-down from the surface.
    pub layers: Vec<LayerConfig>,
    /// Material used below the last layer, down to the world floor.
    pub default_fill: String,
    /// Per-biome surface materials and decorations, keyed by biome name.
    pub biomes: BTreeMap<String, BiomeConfig>,
    /// Structure placement table.
    pub structures: StructuresConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Vertical world settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldSettings {
    /// Columns whose surface lies below this height are flooded up to it.
    pub sea_level: i32,
    /// Total world height in cells. Also the upper bound of the height range.
    pub total_height: i32,
}

/// Shape of the surface height field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainNoiseConfig {
    /// Number of fractal octaves summed per sample.
    pub octaves: u32,
    /// Per-octave amplitude decay.
    pub persistence: f64,
    /// Frequency of the first octave.
    pub scale: f64,
    /// Transform applied to the normalized noise before it becomes a height.
    pub curve: TerrainCurve,
}

/// Transform applied to normalized terrain noise.
///
/// Unknown names deserialize to [`TerrainCurve::Standard`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TerrainCurve {
    /// Identity, kept as its own name for presets that spell it out.
    Plains,
    /// `n * |n|`: flattens lowlands and sharpens peaks.
    Mountains,
    /// `sin(n * PI) * 0.5 + 0.5`: rolling terrain remapped onto `[0, 1]`.
    Hills,
    /// Identity. Unrecognized names deserialize to this variant, which must stay last.
    #[default]
    #[serde(other)]
    Standard,
}

/// Climate feature-point field settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeNoiseConfig {
    /// Number of scattered feature points.
    pub points: u32,
    /// Multiplier applied to world coordinates before the nearest-point scan.
    pub scale: f64,
}

/// Cave noise settings. Octave count and persistence are fixed by the carver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaveNoiseConfig {
    /// Frequency of the first cave octave.
    pub scale: f64,
    /// Cells whose normalized cave noise exceeds this value are cleared.
    pub threshold: f64,
}

/// One material layer below the surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayerConfig {
    /// Thickness of the layer in cells.
    pub depth: u32,
    /// Material name, resolved through the material table.
    pub block: String,
}

/// Materials and decorations of one biome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeConfig {
    /// Material of the topmost occupied cell.
    pub surface: String,
    /// Material of the cell directly below the surface.
    pub subsurface: String,
    /// Decorations rolled once per column.
    pub decorations: Vec<DecorationConfig>,
}

/// A decoration entry within a biome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecorationConfig {
    /// Decoration kind name (e.g. "oak_tree", "cactus").
    pub kind: String,
    /// Probability per column, in `[0, 1]`.
    pub density: f64,
}

/// Structure placement table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StructuresConfig {
    /// Global switch for all structure kinds.
    pub enabled: bool,
    /// Village settings.
    pub village: VillageConfig,
    /// Dungeon settings.
    pub dungeon: DungeonConfig,
    /// Ruins settings.
    pub ruins: RuinsConfig,
}

/// Village placement settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VillageConfig {
    /// Whether villages are attempted at all.
    pub enabled: bool,
    /// Probability, per chunk, of an attempt.
    pub rarity: f64,
    /// Minimum building count.
    pub min_size: u32,
    /// Maximum building count.
    pub max_size: u32,
    /// Maximum horizontal offset of a building from the village anchor.
    pub spread: i32,
    /// Building archetypes with selection weights. Empty means uniform.
    pub buildings: Vec<BuildingWeight>,
}

/// A building archetype and its selection weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildingWeight {
    /// Archetype name ("house", "hut", "well", "farm").
    pub kind: String,
    /// Relative weight.
    pub weight: f64,
}

/// Dungeon placement settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DungeonConfig {
    /// Whether dungeons are attempted at all.
    pub enabled: bool,
    /// Probability, per chunk, of an attempt.
    pub rarity: f64,
    /// Minimum room count, including the anchor room.
    pub min_rooms: u32,
    /// Maximum room count, including the anchor room.
    pub max_rooms: u32,
}

/// Ruins placement settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuinsConfig {
    /// Whether ruins are attempted at all.
    pub enabled: bool,
    /// Probability, per chunk, of an attempt.
    pub rarity: f64,
    /// Minimum number of wall fragments.
    pub min_fragments: u32,
    /// Maximum number of wall fragments.
    pub max_fragments: u32,
    /// Maximum horizontal offset of a fragment from the anchor.
    pub radius: i32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GeneratorConfig {
    fn default() -> Self {
        let biome = |surface: &str, subsurface: &str, decorations: &[(&str, f64)]| BiomeConfig {
            surface: surface.to_string(),
            subsurface: subsurface.to_string(),
            decorations: decorations
                .iter()
                .map(|&(kind, density)| DecorationConfig {
                    kind: kind.to_string(),
                    density,
                })
                .collect(),
        };

        let mut biomes = BTreeMap::new();
        biomes.insert(
            "plains".to_string(),
            biome(
                "grass",
                "dirt",
                &[("tall_grass", 0.12), ("flower", 0.03), ("oak_tree", 0.004)],
            ),
        );
        biomes.insert(
            "forest".to_string(),
            biome(
                "grass",
                "dirt",
                &[("oak_tree", 0.025), ("birch_tree", 0.015), ("tall_grass", 0.06)],
            ),
        );
        biomes.insert(
            "desert".to_string(),
            biome("sand", "sandstone", &[("cactus", 0.01), ("dead_bush", 0.02)]),
        );
        biomes.insert(
            "mountains".to_string(),
            biome("stone", "gravel", &[("boulder", 0.004)]),
        );
        biomes.insert("ocean".to_string(), biome("sand", "sand", &[]));

        Self {
            world: WorldSettings::default(),
            terrain: TerrainNoiseConfig::default(),
            biome: BiomeNoiseConfig::default(),
            cave: CaveNoiseConfig::default(),
            layers: vec![
                LayerConfig {
                    depth: 1,
                    block: "grass".to_string(),
                },
                LayerConfig {
                    depth: 3,
                    block: "dirt".to_string(),
                },
            ],
            default_fill: "stone".to_string(),
            biomes,
            structures: StructuresConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            sea_level: 62,
            total_height: 128,
        }
    }
}

impl Default for TerrainNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            scale: 0.01,
            curve: TerrainCurve::Standard,
        }
    }
}

impl Default for BiomeNoiseConfig {
    fn default() -> Self {
        Self {
            points: 50,
            scale: 0.005,
        }
    }
}

impl Default for CaveNoiseConfig {
    fn default() -> Self {
        Self {
            scale: 0.05,
            threshold: 0.4,
        }
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            block: "stone".to_string(),
        }
    }
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            surface: "grass".to_string(),
            subsurface: "dirt".to_string(),
            decorations: Vec::new(),
        }
    }
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            kind: "tall_grass".to_string(),
            density: 0.0,
        }
    }
}

impl Default for StructuresConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            village: VillageConfig::default(),
            dungeon: DungeonConfig::default(),
            ruins: RuinsConfig::default(),
        }
    }
}

impl Default for VillageConfig {
    fn default() -> Self {
        let weight = |kind: &str, weight: f64| BuildingWeight {
            kind: kind.to_string(),
            weight,
        };
        Self {
            enabled: true,
            rarity: 0.05,
            min_size: 2,
            max_size: 5,
            spread: 6,
            buildings: vec![
                weight("house", 4.0),
                weight("hut", 3.0),
                weight("farm", 2.0),
                weight("well", 1.0),
            ],
        }
    }
}

impl Default for BuildingWeight {
    fn default() -> Self {
        Self {
            kind: "house".to_string(),
            weight: 1.0,
        }
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rarity: 0.03,
            min_rooms: 2,
            max_rooms: 5,
        }
    }
}

impl Default for RuinsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rarity: 0.08,
            min_fragments: 2,
            max_fragments: 6,
            radius: 4,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

/// Default directory holding preset files (`<os config dir>/strata`).
///
/// Falls back to `./strata` when the OS provides no config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("strata"))
        .unwrap_or_else(|| PathBuf::from("strata"))
}

impl GeneratorConfig {
    /// Path of the preset file `<config_dir>/<preset>.ron`.
    ///
    /// An empty preset name maps to [`DEFAULT_PRESET`].
    pub fn preset_path(config_dir: &Path, preset: &str) -> PathBuf {
        let name = if preset.is_empty() {
            DEFAULT_PRESET
        } else {
            preset
        };
        config_dir.join(format!("{name}.ron"))
    }

    /// Load a preset from the given directory, or create it with defaults.
    pub fn load_or_create(config_dir: &Path, preset: &str) -> Result<Self, ConfigError> {
        let preset_path = Self::preset_path(config_dir, preset);

        if preset_path.exists() {
            let contents = std::fs::read_to_string(&preset_path).map_err(ConfigError::ReadError)?;
            let config: GeneratorConfig =
                ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded preset from {}", preset_path.display());
            Ok(config)
        } else {
            let config = GeneratorConfig::default();
            config.save(config_dir, preset)?;
            log::info!("Created default preset at {}", preset_path.display());
            Ok(config)
        }
    }

    /// Save this configuration as `<config_dir>/<preset>.ron`.
    pub fn save(&self, config_dir: &Path, preset: &str) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let preset_path = Self::preset_path(config_dir, preset);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&preset_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path, preset: &str) -> Result<Option<Self>, ConfigError> {
        let preset_path = Self::preset_path(config_dir, preset);
        let contents = std::fs::read_to_string(&preset_path).map_err(ConfigError::ReadError)?;
        let new_config: GeneratorConfig =
            ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Preset {} reloaded with changes", preset_path.display());
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
