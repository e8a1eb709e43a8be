//! Tileable noise tables and the hash fallback.

use std::f64::consts::TAU;

use glam::Vec2;
use noise::{NoiseFn, Perlin};

use crate::mask::{Channel, MaskTable};
use crate::math::fract;

/// Hash pseudo-noise in [0, 1): `fract(sin(dot(uv, k)) * 43758.5453)`.
///
/// Stands in for the noise texture when none is loaded.
pub fn hash_noise(uv: Vec2) -> f32 {
    let h = uv.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.5453;
    // fract can round up to exactly 1.0 for tiny negative inputs
    fract(h).min(0.999_999_9)
}

/// Scalar noise grid sampled with bilinear filtering and repeat addressing.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseTable {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl NoiseTable {
    /// Wrap a row-major value buffer. Returns `None` if the shape is wrong.
    pub fn from_values(width: usize, height: usize, values: Vec<f32>) -> Option<Self> {
        if width == 0 || height == 0 || values.len() != width * height {
            return None;
        }
        Some(Self { width, height, values })
    }

    /// Use one channel of a decoded noise texture.
    pub fn from_mask(table: &MaskTable, channel: Channel) -> Self {
        Self {
            width: table.width() as usize,
            height: table.height() as usize,
            values: table.channel_values(channel),
        }
    }

    /// Generate a seamlessly tiling `size x size` Perlin table.
    ///
    /// Each axis is mapped onto a circle in 4D noise space, so opposite
    /// edges match. `frequency` is the circle radius: higher = busier.
    pub fn generate(size: usize, seed: u32, frequency: f64) -> Self {
        let size = size.max(1);
        let perlin = Perlin::new(seed);
        let mut values = Vec::with_capacity(size * size);
        for y in 0..size {
            let ay = TAU * y as f64 / size as f64;
            for x in 0..size {
                let ax = TAU * x as f64 / size as f64;
                let n = perlin.get([
                    ax.cos() * frequency,
                    ax.sin() * frequency,
                    ay.cos() * frequency,
                    ay.sin() * frequency,
                ]);
                values.push(((n + 1.0) * 0.5).clamp(0.0, 1.0) as f32);
            }
        }
        Self { width: size, height: size, values }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn value(&self, x: i64, y: i64) -> f32 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.values[y * self.width + x]
    }

    /// Bilinear sample with texel centres at `(i + 0.5) / width`; UV wraps.
    pub fn sample(&self, uv: Vec2) -> f32 {
        let (w, h) = (self.width as f32, self.height as f32);
        // Reduce to one period before any integer conversion
        let fx = (uv.x.rem_euclid(1.0) * w - 0.5).rem_euclid(w);
        let fy = (uv.y.rem_euclid(1.0) * h - 0.5).rem_euclid(h);
        if !fx.is_finite() || !fy.is_finite() {
            return self.values[0];
        }
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let a = self.value(x0, y0) * (1.0 - tx) + self.value(x0 + 1, y0) * tx;
        let b = self.value(x0, y0 + 1) * (1.0 - tx) + self.value(x0 + 1, y0 + 1) * tx;
        a * (1.0 - ty) + b * ty
    }
}
