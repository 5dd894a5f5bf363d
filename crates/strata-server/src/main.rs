//! Strata demo host: creates a world from a preset and generates the chunks
//! around spawn on the worker pool.
//!
//! Run with: `cargo run -p strata-server -- --seed hello --radius 4`

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use strata_config::{CliArgs, DEFAULT_PRESET, GeneratorConfig, default_config_dir};
use strata_server::{DEFAULT_WORLD, WorldManager};
use strata_terrain::{AsyncChunkGenerator, BiomeTag, GenerationTask, SubmitError, hash_chunk};
use strata_voxel::{ChunkCoord, Material};
use tracing::{error, info, warn};

const DEFAULT_RADIUS: u32 = 2;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let preset = args.preset.as_deref().unwrap_or(DEFAULT_PRESET);

    let mut config = GeneratorConfig::load_or_create(&config_dir, preset).unwrap_or_else(|e| {
        eprintln!("Failed to load preset {preset:?}: {e}, using defaults");
        GeneratorConfig::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let world_name = args.world.as_deref().unwrap_or(DEFAULT_WORLD);
    let mut worlds = WorldManager::new(config);
    if !worlds.create_world(world_name, args.seed.as_deref()) {
        error!("World {:?} already exists", world_name);
        std::process::exit(1);
    }
    let Some(world) = worlds.get_world_mut(world_name) else {
        error!("World {:?} missing after creation", world_name);
        std::process::exit(1);
    };

    let generator = Arc::clone(world.generator());
    let pool = match args.threads {
        Some(threads) => AsyncChunkGenerator::new(Arc::clone(&generator), threads, 64, 128),
        None => AsyncChunkGenerator::with_defaults(Arc::clone(&generator)),
    };
    let pool = match pool {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to start generation workers: {e}");
            std::process::exit(1);
        }
    };

    let (spawn_x, spawn_y, spawn_z) = world.spawn_point();
    let spawn_chunk = ChunkCoord::from_world(spawn_x, spawn_z);
    let radius = args.radius.unwrap_or(DEFAULT_RADIUS) as i32;
    info!(
        "World {:?}: seed {}, spawn ({}, {}, {}), radius {}",
        world.name(),
        world.seed(),
        spawn_x,
        spawn_y,
        spawn_z,
        radius
    );

    // Nearest chunks first.
    let mut tasks: Vec<GenerationTask> = (-radius..=radius)
        .flat_map(|dx| (-radius..=radius).map(move |dz| (dx, dz)))
        .map(|(dx, dz)| GenerationTask {
            coord: spawn_chunk.offset(dx, dz),
            priority: (dx * dx + dz * dz) as u64,
        })
        .collect();
    tasks.sort_by_key(|task| task.priority);
    let expected = tasks.len();

    let mut total_time_us = 0u64;
    let mut received = 0usize;
    let mut queue = tasks.into_iter().peekable();
    while received < expected {
        while let Some(task) = queue.peek().copied() {
            match pool.submit(task) {
                Ok(()) => {
                    queue.next();
                }
                Err(SubmitError::QueueFull(_)) => break,
                Err(SubmitError::Disconnected) => {
                    error!("Generation workers exited early");
                    std::process::exit(1);
                }
            }
        }

        let results = pool.drain_results();
        if results.is_empty() {
            std::thread::sleep(Duration::from_millis(2));
            continue;
        }
        for generated in results {
            total_time_us += generated.generation_time_us;
            received += 1;
            world.insert_generated(generated);
        }
    }

    let mut surface_biomes = [0usize; BiomeTag::ALL.len()];
    let mut materials = [0usize; Material::ALL.len()];
    let mut combined = 0u64;
    for (_, chunk) in world.chunks().iter() {
        for &id in chunk.biomes() {
            if let Some(slot) = surface_biomes.get_mut(id as usize) {
                *slot += 1;
            }
        }
        for &material in chunk.cells() {
            materials[material.id() as usize] += 1;
        }
        combined = combined.wrapping_add(hash_chunk(chunk));
    }

    info!(
        "Generated {} chunks, average {} us per chunk, world hash {:016x}",
        received,
        total_time_us / received.max(1) as u64,
        combined
    );
    for tag in BiomeTag::ALL {
        info!("  {:<10} {} columns", tag.name(), surface_biomes[tag.id() as usize]);
    }
    for material in Material::ALL {
        let count = materials[material.id() as usize];
        if count > 0 && !material.is_air() {
            info!("  {:<18} {}", material.name(), count);
        }
    }
    if generator.cache().is_empty() {
        warn!("Column cache stayed empty");
    }
}
