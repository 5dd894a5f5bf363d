//! Command-line argument parsing for the Strata demo host.

use std::path::PathBuf;

use clap::Parser;

use crate::{GeneratorConfig, TerrainCurve};

/// Strata command-line arguments.
///
/// CLI values override settings loaded from the selected preset file.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Strata terrain generator")]
pub struct CliArgs {
    /// World name.
    #[arg(long)]
    pub world: Option<String>,

    /// Seed string. Hashed into a numeric seed; a random seed is drawn when absent.
    #[arg(long)]
    pub seed: Option<String>,

    /// Preset name, loaded from `<config dir>/<preset>.ron`.
    #[arg(long)]
    pub preset: Option<String>,

    /// Square radius, in chunks, generated around the spawn chunk.
    #[arg(long)]
    pub radius: Option<u32>,

    /// Number of generation worker threads.
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Sea level override.
    #[arg(long)]
    pub sea_level: Option<i32>,

    /// Terrain curve override (standard, plains, mountains, hills).
    #[arg(long)]
    pub curve: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Apply CLI overrides to a loaded preset.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(level) = args.sea_level {
            self.world.sea_level = level;
        }
        if let Some(ref curve) = args.curve {
            self.terrain.curve = match curve.to_ascii_lowercase().as_str() {
                "plains" => TerrainCurve::Plains,
                "mountains" => TerrainCurve::Mountains,
                "hills" => TerrainCurve::Hills,
                _ => TerrainCurve::Standard,
            };
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
