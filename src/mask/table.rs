//! Decoded mask image with nearest and bilinear sampling.

use std::path::Path;

use glam::Vec2;
use log::{debug, warn};

use crate::core::{Error, Result};

/// Color channel to read from a mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    #[inline]
    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }
}

/// RGBA8 pixel buffer, row 0 at `v = 0`.
///
/// Sampling never flips: callers convert world positions to UV with
/// [`super::UvMapping`] first.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskTable {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl MaskTable {
    /// "No water anywhere": blue channel is zero.
    pub const NEUTRAL_WATER: [u8; 4] = [0, 0, 0, 255];
    /// "No fog anywhere": red channel is white.
    pub const NEUTRAL_FOG: [u8; 4] = [255, 255, 255, 255];

    /// Wrap a raw RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Decode(format!("empty image {}x{}", width, height)));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::Decode(format!(
                "RGBA buffer is {} bytes, expected {} for {}x{}",
                data.len(), expected, width, height
            )));
        }
        let pixels = data
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
            .collect();
        Ok(Self { width, height, pixels })
    }

    /// Decode an encoded image (PNG and the other formats `image` enables).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        debug!("Decoded mask {}x{}", width, height);
        Self::from_rgba8(width, height, img.as_raw())
    }

    /// Decode, substituting a uniform `neutral` table on failure.
    pub fn decode_or_neutral(bytes: &[u8], neutral: [u8; 4]) -> Self {
        match Self::decode(bytes) {
            Ok(table) => table,
            Err(e) => {
                warn!("Mask decode failed ({}), using neutral {:?}", e, neutral);
                Self::uniform(neutral)
            }
        }
    }

    /// Read and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::decode(&bytes)
    }

    /// Like [`MaskTable::open`], falling back to a neutral table on any error.
    pub fn open_or_neutral(path: impl AsRef<Path>, neutral: [u8; 4]) -> Self {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(table) => table,
            Err(e) => {
                warn!("Mask {} unavailable ({}), using neutral {:?}", path.display(), e, neutral);
                Self::uniform(neutral)
            }
        }
    }

    /// 1x1 table returning the same pixel everywhere.
    pub fn uniform(rgba: [u8; 4]) -> Self {
        Self { width: 1, height: 1, pixels: vec![rgba] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn texel(&self, x: u32, y: u32, channel: Channel) -> f32 {
        self.pixels[(y * self.width + x) as usize][channel.index()] as f32 / 255.0
    }

    /// Nearest-pixel sample in [0, 1].
    ///
    /// `u` maps to column `round(u * (width - 1))`, `v` to row
    /// `round(v * (height - 1))`, both clamped to the image.
    pub fn sample(&self, u: f32, v: f32, channel: Channel) -> f32 {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        // NaN clamps to NaN and casts to 0
        let x = (u * max_x).round().clamp(0.0, max_x) as u32;
        let y = (v * max_y).round().clamp(0.0, max_y) as u32;
        self.texel(x, y, channel)
    }

    pub fn sample_uv(&self, uv: Vec2, channel: Channel) -> f32 {
        self.sample(uv.x, uv.y, channel)
    }

    /// Bilinear sample in [0, 1] with clamp-to-edge addressing.
    pub fn sample_bilinear(&self, u: f32, v: f32, channel: Channel) -> f32 {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let fx = (u * max_x).clamp(0.0, max_x);
        let fy = (v * max_y).clamp(0.0, max_y);
        let fx = if fx.is_nan() { 0.0 } else { fx };
        let fy = if fy.is_nan() { 0.0 } else { fy };

        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let a = self.texel(x0, y0, channel) * (1.0 - tx) + self.texel(x1, y0, channel) * tx;
        let b = self.texel(x0, y1, channel) * (1.0 - tx) + self.texel(x1, y1, channel) * tx;
        a * (1.0 - ty) + b * ty
    }

    /// One channel as a row-major float buffer.
    pub fn channel_values(&self, channel: Channel) -> Vec<f32> {
        self.pixels
            .iter()
            .map(|p| p[channel.index()] as f32 / 255.0)
            .collect()
    }
}
