//! Deterministic seed utilities.
//!
//! Per-chunk RNG derivation from the world seed and chunk coordinates,
//! seed strings hashed to numeric seeds, deterministic math via `libm`, and
//! chunk content hashing for determinism checks.

use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use strata_voxel::Chunk;

/// The world seed: sole source of determinism for generation.
pub type WorldSeed = i64;

/// Salt of the per-chunk structure placement stream.
pub const STRUCTURE_SALT: u64 = 0x5354_5255_4354;

/// Salt of the per-chunk decoration stream.
pub const DECORATION_SALT: u64 = 0x4445_434f_5241;

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Derive a u64 seed for one chunk and one stochastic subsystem.
///
/// Combines the world seed, chunk coordinates and subsystem salt with
/// `FxHasher` and a splitmix64 finalizer. The result is stable across Rust
/// releases.
pub fn derive_chunk_seed(world_seed: WorldSeed, chunk_x: i32, chunk_z: i32, salt: u64) -> u64 {
    let mut hasher = FxHasher::default();
    world_seed.hash(&mut hasher);
    chunk_x.hash(&mut hasher);
    chunk_z.hash(&mut hasher);
    salt.hash(&mut hasher);
    splitmix64(hasher.finish())
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derive a deterministic RNG for one chunk and one subsystem.
///
/// The returned RNG produces an identical sequence for the same inputs,
/// regardless of thread or platform.
pub fn chunk_rng(world_seed: WorldSeed, chunk_x: i32, chunk_z: i32, salt: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_chunk_seed(world_seed, chunk_x, chunk_z, salt))
}

// ---------------------------------------------------------------------------
// Seed strings
// ---------------------------------------------------------------------------

/// Numeric world seed for a user-supplied seed string.
///
/// The CRC-32 checksum of the UTF-8 bytes, so the same string always names
/// the same world.
pub fn seed_from_string(seed: &str) -> WorldSeed {
    WorldSeed::from(crc32fast::hash(seed.as_bytes()))
}

// ---------------------------------------------------------------------------
// Deterministic math (libm)
// ---------------------------------------------------------------------------

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}

/// Deterministic sqrt using libm.
#[inline]
pub fn det_sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Hash every cell and the biome overlay of a chunk for determinism comparison.
pub fn hash_chunk(chunk: &Chunk) -> u64 {
    let mut hasher = FxHasher::default();
    for material in chunk.cells() {
        material.id().hash(&mut hasher);
    }
    chunk.biomes().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;
    use strata_voxel::Material;

    #[test]
    fn test_derive_chunk_seed_deterministic() {
        let seed_a = derive_chunk_seed(999, 42, 7, STRUCTURE_SALT);
        let seed_b = derive_chunk_seed(999, 42, 7, STRUCTURE_SALT);
        assert_eq!(seed_a, seed_b, "Same inputs must produce same derived seed");
    }

    #[test]
    fn test_derive_chunk_seed_different_coordinates() {
        let seed_a = derive_chunk_seed(42, 0, 0, STRUCTURE_SALT);
        let seed_b = derive_chunk_seed(42, 0, 1, STRUCTURE_SALT);
        let seed_c = derive_chunk_seed(42, 1, 0, STRUCTURE_SALT);
        assert_ne!(seed_a, seed_b, "Adjacent chunks should produce different seeds");
        assert_ne!(seed_b, seed_c, "Swapped coordinates should produce different seeds");
    }

    #[test]
    fn test_derive_chunk_seed_different_salts() {
        let structures = derive_chunk_seed(42, 3, 3, STRUCTURE_SALT);
        let decorations = derive_chunk_seed(42, 3, 3, DECORATION_SALT);
        assert_ne!(
            structures, decorations,
            "Subsystem streams must not share a seed"
        );
    }

    #[test]
    fn test_splitmix64_known_vectors() {
        assert_eq!(splitmix64(0), 0xE220_A839_7B1D_CDAF);
        assert_ne!(splitmix64(1), splitmix64(2));
    }

    #[test]
    fn test_chacha8_rng_deterministic() {
        let mut rng_a = chunk_rng(42, 10, -30, DECORATION_SALT);
        let mut rng_b = chunk_rng(42, 10, -30, DECORATION_SALT);

        for _ in 0..1000 {
            assert_eq!(
                rng_a.next_u64(),
                rng_b.next_u64(),
                "ChaCha8Rng sequences must match for same seed"
            );
        }
    }

    #[test]
    fn test_seed_strings_match_crc32_vectors() {
        assert_eq!(seed_from_string(""), 0);
        assert_eq!(seed_from_string("123456789"), 0xCBF4_3926);
        assert_eq!(
            seed_from_string("The quick brown fox jumps over the lazy dog"),
            0x414F_A339
        );
    }

    #[test]
    fn test_seed_from_string_is_stable() {
        assert_eq!(seed_from_string("hello"), seed_from_string("hello"));
        assert_eq!(seed_from_string("123456789"), 0xCBF4_3926);
        assert_ne!(seed_from_string("hello"), seed_from_string("world"));
        assert!(seed_from_string("anything") >= 0, "CRC seeds are non-negative");
    }

    #[test]
    fn test_deterministic_math_functions() {
        let x = 1.234_567_890_123_4;
        assert_eq!(det_sin(x), det_sin(x), "det_sin must be deterministic");
        assert_eq!(det_cos(x), det_cos(x), "det_cos must be deterministic");
        assert_eq!(det_sqrt(4.0), 2.0);
        assert!((det_sin(0.0)).abs() < 1e-15);
        assert!((det_cos(0.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_hash_chunk_sees_cells_and_biomes() {
        let empty = Chunk::new();
        let mut with_cell = Chunk::new();
        with_cell.set(3, 40, 9, Material::Dirt);
        let mut with_biome = Chunk::new();
        with_biome.set_biome_id(1, 1, 4);

        assert_eq!(hash_chunk(&empty), hash_chunk(&Chunk::new()));
        assert_ne!(hash_chunk(&empty), hash_chunk(&with_cell));
        assert_ne!(hash_chunk(&empty), hash_chunk(&with_biome));
    }
}
