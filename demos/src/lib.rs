//! Shared densities for the demo binaries.

use isomesh_rs::DensityFn;

/// Smooth 3D value noise summed over a few octaves, in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct ValueNoise {
    /// Lattice hash seed.
    pub seed: u32,
    /// Number of octaves.
    pub octaves: u32,
}

impl ValueNoise {
    /// Create a noise field.
    pub const fn new(seed: u32, octaves: u32) -> Self {
        Self { seed, octaves }
    }

    fn hash(&self, x: i32, y: i32, z: i32) -> f32 {
        let mut h = self.seed
            ^ (x as u32).wrapping_mul(0x8DA6_B343)
            ^ (y as u32).wrapping_mul(0xD816_3841)
            ^ (z as u32).wrapping_mul(0xCB1A_B31F);
        h ^= h >> 15;
        h = h.wrapping_mul(0x2C1B_3C6D);
        h ^= h >> 12;
        h = h.wrapping_mul(0x297A_2D39);
        h ^= h >> 15;
        (h & 0x00FF_FFFF) as f32 / 0x00FF_FFFF as f32
    }

    fn octave(&self, x: f32, y: f32, z: f32) -> f32 {
        let (x0, y0, z0) = (x.floor(), y.floor(), z.floor());
        let (ix, iy, iz) = (x0 as i32, y0 as i32, z0 as i32);
        let fade = |t: f32| t * t * (3.0 - 2.0 * t);
        let (u, v, w) = (fade(x - x0), fade(y - y0), fade(z - z0));
        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;

        let mut corners = [0.0f32; 8];
        for (c, value) in corners.iter_mut().enumerate() {
            let (dx, dy, dz) = isomesh_core::corner_from_index(c);
            *value = self.hash(ix + dx as i32, iy + dy as i32, iz + dz as i32);
        }

        let x00 = lerp(corners[0], corners[1], u);
        let x10 = lerp(corners[2], corners[3], u);
        let x01 = lerp(corners[4], corners[5], u);
        let x11 = lerp(corners[6], corners[7], u);
        lerp(lerp(x00, x10, v), lerp(x01, x11, v), w)
    }
}

impl DensityFn for ValueNoise {
    fn density(&self, x: f32, y: f32, z: f32) -> f32 {
        let mut total = 0.0;
        let mut weight = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..self.octaves.max(1) {
            total += amplitude * self.octave(x * frequency, y * frequency, z * frequency);
            weight += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        total / weight
    }
}

/// Noise biased by height, so the bottom of the grid is solid and the top is air.
#[derive(Debug, Clone, Copy)]
pub struct Terrain {
    /// Detail noise.
    pub noise: ValueNoise,
    /// World-space height of the grid top, in density coordinates.
    pub height: f32,
}

impl DensityFn for Terrain {
    fn density(&self, x: f32, y: f32, z: f32) -> f32 {
        let gradient = (y / self.height).clamp(0.0, 1.0);
        (0.55 * self.noise.density(x, y, z) + 0.9 * gradient - 0.2).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_range_and_determinism() {
        let noise = ValueNoise::new(7, 3);
        for i in 0..100 {
            let p = i as f32 * 0.37;
            let v = noise.density(p, p * 0.5, -p);
            assert!((0.0..=1.0).contains(&v));
            assert_eq!(v, noise.density(p, p * 0.5, -p));
        }
    }

    #[test]
    fn test_terrain_is_solid_below_and_open_above() {
        let terrain = Terrain {
            noise: ValueNoise::new(1, 2),
            height: 3.2,
        };
        assert!(terrain.density(0.0, 0.0, 0.0) < 0.5);
        assert!(terrain.density(0.0, 3.2, 0.0) > 0.5);
    }
}
