//! Seeded multi-octave gradient noise over a shuffled permutation lattice.
//!
//! Each octave samples classic improved Perlin noise: the integer lattice cell
//! is wrapped mod 256, corner hashes go through a 512-entry permutation table,
//! corner gradients are selected from the low four bits of the hash, and the
//! contributions are blended with the quintic fade curve.

use ::noise::NoiseFn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shape of a fractal noise field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseConfig {
    /// Number of octaves summed per sample.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency of the first octave. Octave `i` runs at `scale * 2^i`.
    pub scale: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            scale: 0.01,
        }
    }
}

/// A deterministic fractal noise field for one seed.
///
/// The permutation table is fixed at construction, so sampling is a pure
/// function of the coordinates and safe to share between threads.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perm: [u8; 512],
    config: NoiseConfig,
    max_amplitude: f64,
}

impl NoiseField {
    /// Build a field whose permutation table is a Fisher–Yates shuffle seeded by `seed`.
    pub fn new(seed: i64, config: NoiseConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        for i in (1..table.len()).rev() {
            let j = rng.random_range(0..=i);
            table.swap(i, j);
        }

        let perm = std::array::from_fn(|i| table[i & 255]);

        let mut max_amplitude = 0.0;
        let mut amplitude = 1.0;
        for _ in 0..config.octaves {
            max_amplitude += amplitude;
            amplitude *= config.persistence;
        }

        Self {
            perm,
            config,
            max_amplitude,
        }
    }

    /// The configuration this field was built with.
    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    /// Sum of all octave amplitudes: the bound on the raw (unnormalized) output.
    pub fn max_amplitude(&self) -> f64 {
        self.max_amplitude
    }

    /// Sample the 2D field at `(x, z)`.
    ///
    /// With `normalized` the octave sum is divided by [`Self::max_amplitude`]
    /// and clamped to `[-1, 1]`.
    pub fn sample_2d(&self, x: f64, z: f64, normalized: bool) -> f64 {
        let total = self.fractal(|frequency| self.perlin_2d(x * frequency, z * frequency));
        self.finish(total, normalized)
    }

    /// Sample the 3D field at `(x, y, z)`. See [`Self::sample_2d`] for `normalized`.
    pub fn sample_3d(&self, x: f64, y: f64, z: f64, normalized: bool) -> f64 {
        let total = self.fractal(|frequency| {
            self.perlin_3d(x * frequency, y * frequency, z * frequency)
        });
        self.finish(total, normalized)
    }

    fn fractal(&self, mut octave: impl FnMut(f64) -> f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.config.scale;
        let mut amplitude = 1.0;

        for _ in 0..self.config.octaves {
            total += octave(frequency) * amplitude;
            frequency *= 2.0;
            amplitude *= self.config.persistence;
        }

        total
    }

    fn finish(&self, total: f64, normalized: bool) -> f64 {
        if !normalized {
            return total;
        }
        if self.max_amplitude == 0.0 {
            return 0.0;
        }
        (total / self.max_amplitude).clamp(-1.0, 1.0)
    }

    /// Single-octave 2D noise. Gradients use the 3D bit-pattern selection with a
    /// zero third component.
    fn perlin_2d(&self, x: f64, z: f64) -> f64 {
        let (xi, xf) = lattice(x);
        let (zi, zf) = lattice(z);
        let u = fade(xf);
        let v = fade(zf);

        let p = &self.perm;
        let a = p[xi] as usize;
        let b = p[xi + 1] as usize;
        let aa = p[a + zi];
        let ab = p[a + zi + 1];
        let ba = p[b + zi];
        let bb = p[b + zi + 1];

        lerp(
            v,
            lerp(u, grad(aa, xf, zf, 0.0), grad(ba, xf - 1.0, zf, 0.0)),
            lerp(
                u,
                grad(ab, xf, zf - 1.0, 0.0),
                grad(bb, xf - 1.0, zf - 1.0, 0.0),
            ),
        )
    }

    /// Single-octave 3D noise with trilinear blending.
    fn perlin_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xi, xf) = lattice(x);
        let (yi, yf) = lattice(y);
        let (zi, zf) = lattice(z);
        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], xf, yf, zf), grad(p[ba], xf - 1.0, yf, zf)),
                lerp(
                    u,
                    grad(p[ab], xf, yf - 1.0, zf),
                    grad(p[bb], xf - 1.0, yf - 1.0, zf),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], xf, yf, zf - 1.0),
                    grad(p[ba + 1], xf - 1.0, yf, zf - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], xf, yf - 1.0, zf - 1.0),
                    grad(p[bb + 1], xf - 1.0, yf - 1.0, zf - 1.0),
                ),
            ),
        )
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample_2d(point[0], point[1], true)
    }
}

impl NoiseFn<f64, 3> for NoiseField {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample_3d(point[0], point[1], point[2], true)
    }
}

/// Lattice cell index wrapped to `[0, 256)` and the fractional offset inside it.
#[inline]
fn lattice(coord: f64) -> (usize, f64) {
    let floor = coord.floor();
    ((floor as i64 & 255) as usize, coord - floor)
}

/// Quintic fade curve `t³(t(6t − 15) + 10)`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product of `(x, y, z)` with one of twelve edge gradients picked by `hash & 15`.
#[inline]
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terrain_field(seed: i64, octaves: u32) -> NoiseField {
        NoiseField::new(
            seed,
            NoiseConfig {
                octaves,
                persistence: 0.5,
                scale: 0.01,
            },
        )
    }

    #[test]
    fn test_determinism_same_seed_same_coord() {
        let a = terrain_field(42, 4);
        let b = terrain_field(42, 4);
        for i in 0..200 {
            let x = i as f64 * 3.7 - 300.0;
            let z = i as f64 * -1.3 + 17.0;
            assert_eq!(
                a.sample_2d(x, z, true).to_bits(),
                b.sample_2d(x, z, true).to_bits(),
                "2D noise differs at ({x}, {z})"
            );
            assert_eq!(
                a.sample_3d(x, z * 0.5, z, false).to_bits(),
                b.sample_3d(x, z * 0.5, z, false).to_bits(),
                "3D noise differs at ({x}, {z})"
            );
        }
    }

    #[test]
    fn test_permutation_is_mirrored_shuffle() {
        let field = terrain_field(7, 1);
        let mut first: Vec<u8> = field.perm[..256].to_vec();
        assert_eq!(&field.perm[..256], &field.perm[256..], "table must be mirrored");
        first.sort_unstable();
        let identity: Vec<u8> = (0..=255).collect();
        assert_eq!(first, identity, "first half must be a permutation of 0..=255");
    }

    #[test]
    fn test_different_seeds_produce_different_fields() {
        let a = terrain_field(1, 4);
        let b = terrain_field(2, 4);
        let differs = (0..64).any(|i| {
            let x = i as f64 * 13.1;
            a.sample_2d(x, x * 0.7, true) != b.sample_2d(x, x * 0.7, true)
        });
        assert!(differs, "different seeds should produce different noise");
    }

    #[test]
    fn test_normalized_output_within_unit_range() {
        for octaves in 1..=8 {
            let field = NoiseField::new(
                99,
                NoiseConfig {
                    octaves,
                    persistence: 1.0,
                    scale: 0.37,
                },
            );
            for i in 0..400 {
                let x = i as f64 * 1.618 - 200.0;
                let z = i as f64 * 0.577 + 40.0;
                let n2 = field.sample_2d(x, z, true);
                let n3 = field.sample_3d(x, z, x - z, true);
                assert!((-1.0..=1.0).contains(&n2), "2D out of range: {n2}");
                assert!((-1.0..=1.0).contains(&n3), "3D out of range: {n3}");
            }
        }
    }

    #[test]
    fn test_lattice_points_are_zero_for_single_octave() {
        let field = NoiseField::new(
            5,
            NoiseConfig {
                octaves: 1,
                persistence: 0.5,
                scale: 1.0,
            },
        );
        assert_eq!(field.sample_2d(5.0, -7.0, false), 0.0);
        assert_eq!(field.sample_3d(3.0, 12.0, -1.0, false), 0.0);
    }

    #[test]
    fn test_3d_noise_varies_along_y() {
        let field = NoiseField::new(
            11,
            NoiseConfig {
                octaves: 3,
                persistence: 0.5,
                scale: 0.05,
            },
        );
        let first = field.sample_3d(10.3, 0.0, 20.7, true);
        let varies = (1..128).any(|y| field.sample_3d(10.3, y as f64, 20.7, true) != first);
        assert!(varies, "3D noise must not be constant along y");
    }

    #[test]
    fn test_smooth_gradient_no_discontinuities() {
        let field = terrain_field(3, 4);
        let step = 0.01;
        let mut prev = field.sample_2d(0.0, 0.0, true);
        for i in 1..1000 {
            let current = field.sample_2d(i as f64 * step, 0.0, true);
            assert!(
                (current - prev).abs() < 0.05,
                "jump of {} at step {i}",
                (current - prev).abs()
            );
            prev = current;
        }
    }

    #[test]
    fn test_max_amplitude_calculation() {
        let field = terrain_field(0, 4);
        assert!((field.max_amplitude() - 1.875).abs() < 1e-12);
        let single = terrain_field(0, 1);
        assert_eq!(single.max_amplitude(), 1.0);
    }

    #[test]
    fn test_zero_octaves_returns_zero() {
        let field = terrain_field(0, 0);
        assert_eq!(field.sample_2d(12.5, 3.25, true), 0.0);
        assert_eq!(field.sample_2d(12.5, 3.25, false), 0.0);
    }

    #[test]
    fn test_noise_fn_matches_normalized_sample() {
        let field = terrain_field(21, 4);
        let via_trait_2d = NoiseFn::<f64, 2>::get(&field, [31.5, -8.25]);
        let via_trait_3d = NoiseFn::<f64, 3>::get(&field, [31.5, 4.0, -8.25]);
        assert_eq!(via_trait_2d, field.sample_2d(31.5, -8.25, true));
        assert_eq!(via_trait_3d, field.sample_3d(31.5, 4.0, -8.25, true));
    }

    #[test]
    fn test_grad_bit_patterns() {
        assert_eq!(grad(0, 1.0, 2.0, 3.0), 3.0);
        assert_eq!(grad(1, 1.0, 2.0, 3.0), 1.0);
        assert_eq!(grad(3, 1.0, 2.0, 3.0), -3.0);
        assert_eq!(grad(8, 1.0, 2.0, 3.0), 5.0);
        assert_eq!(grad(12, 1.0, 2.0, 3.0), 3.0);
        assert_eq!(grad(14, 1.0, 2.0, 3.0), 1.0);
        assert_eq!(grad(16, 1.0, 2.0, 3.0), grad(0, 1.0, 2.0, 3.0));
    }
}
