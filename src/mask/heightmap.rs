//! Terrain heights read from a grayscale heightmap image.

use super::{Channel, MaskTable, UvMapping};
use crate::terrain::HeightSource;

/// Heightmap image as a [`HeightSource`]: `base + red * height_scale`.
#[derive(Clone, Debug)]
pub struct HeightmapImage {
    pub table: MaskTable,
    pub mapping: UvMapping,
    /// World height of a fully white texel above `base`.
    pub height_scale: f32,
    pub base: f32,
}

impl HeightmapImage {
    /// Height span of the exported terrain object.
    pub const DEFAULT_HEIGHT_SCALE: f32 = 22.4135;

    pub fn new(table: MaskTable, mapping: UvMapping) -> Self {
        Self {
            table,
            mapping,
            height_scale: Self::DEFAULT_HEIGHT_SCALE,
            base: 0.0,
        }
    }
}

impl HeightSource for HeightmapImage {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let uv = self.mapping.world_to_uv(x, z);
        self.base + self.table.sample_bilinear(uv.x, uv.y, Channel::Red) * self.height_scale
    }
}
