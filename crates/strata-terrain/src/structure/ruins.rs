//! Ruins: short, partly collapsed cobblestone wall fragments around an anchor.

use glam::IVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use strata_config::RuinsConfig;
use strata_voxel::{Chunk, Material};

use super::count_between;

/// Probability that any one wall cell has crumbled away.
pub const RUIN_DECAY: f64 = 0.3;

/// Probability that a standing wall cell is mossy.
const MOSS_CHANCE: f64 = 0.4;

/// Stamp ruins around `anchor`. Returns the number of wall cells placed.
///
/// Fragments rise from the cell above the anchor's surface, run 1–3 cells
/// along x or z and stand 1–3 cells tall.
pub fn place_ruins(
    chunk: &mut Chunk,
    rng: &mut ChaCha8Rng,
    anchor: IVec3,
    config: &RuinsConfig,
) -> u32 {
    let fragments = count_between(rng, config.min_fragments, config.max_fragments);
    let radius = config.radius.abs();
    let mut placed = 0;

    for _ in 0..fragments {
        let dx = rng.random_range(-radius..=radius);
        let dz = rng.random_range(-radius..=radius);
        let along_x: bool = rng.random();
        let length = rng.random_range(1..=3);
        let height = rng.random_range(1..=3);
        let base = anchor + IVec3::new(dx, 1, dz);
        let step = if along_x { IVec3::X } else { IVec3::Z };

        for i in 0..length {
            for h in 0..height {
                if rng.random::<f64>() < RUIN_DECAY {
                    continue;
                }
                let material = if rng.random::<f64>() < MOSS_CHANCE {
                    Material::MossyCobblestone
                } else {
                    Material::Cobblestone
                };
                let p = base + step * i + IVec3::Y * h;
                chunk.set(p.x, p.y, p.z, material);
                placed += 1;
            }
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn is_ruin(material: Material) -> bool {
        matches!(material, Material::Cobblestone | Material::MossyCobblestone)
    }

    #[test]
    fn test_fragments_stay_near_anchor() {
        let config = RuinsConfig {
            radius: 2,
            ..Default::default()
        };
        let anchor = IVec3::new(8, 50, 8);
        for seed in 0..40 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut chunk = Chunk::new();
            place_ruins(&mut chunk, &mut rng, anchor, &config);

            for x in 0..16 {
                for z in 0..16 {
                    for y in 0..128 {
                        if !is_ruin(chunk.get(x, y, z)) {
                            continue;
                        }
                        assert!((6..=12).contains(&x), "x={x} outside reach");
                        assert!((6..=12).contains(&z), "z={z} outside reach");
                        assert!((51..=53).contains(&y), "y={y} outside wall height");
                    }
                }
            }
        }
    }

    #[test]
    fn test_ruins_use_only_cobblestone_variants() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut chunk = Chunk::new();
        let placed = place_ruins(&mut chunk, &mut rng, IVec3::new(8, 10, 8), &RuinsConfig::default());
        let stone_cells =
            chunk.count(Material::Cobblestone) + chunk.count(Material::MossyCobblestone);
        assert!(stone_cells <= placed as usize);
        assert_eq!(
            stone_cells + chunk.count(Material::Air),
            strata_voxel::CHUNK_VOLUME
        );
    }

    #[test]
    fn test_decay_leaves_gaps() {
        // 400 fragments of up to 9 cells: some must have crumbled.
        let config = RuinsConfig {
            min_fragments: 400,
            max_fragments: 400,
            radius: 0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut chunk = Chunk::new();
        let placed = place_ruins(&mut chunk, &mut rng, IVec3::new(8, 10, 8), &config);
        assert!(placed > 0);
        assert!(placed < 400 * 9);
    }
}
