//! Configuration system for the Strata terrain generator.
//!
//! Generator presets persist to disk as RON files, one file per preset. Every
//! key has a documented default so that partial or missing presets still yield
//! a usable generator. Supports CLI overrides via clap and hot-reload detection.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BiomeConfig, BiomeNoiseConfig, BuildingWeight, CaveNoiseConfig, DEFAULT_PRESET, DebugConfig,
    DecorationConfig, DungeonConfig, GeneratorConfig, LayerConfig, RuinsConfig, StructuresConfig,
    TerrainCurve, TerrainNoiseConfig, VillageConfig, WorldSettings, default_config_dir,
};
pub use error::ConfigError;
