//! World XZ to mask UV mapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Affine world-to-UV transform shared by every mask lookup.
///
/// `u = (x + offset.x) * scale.x`, `v = (z + offset.y) * scale.y`, then
/// `v = 1 - v` when `flip_v` is set. The default covers the 256 x 256 unit
/// terrain plane centred on the origin, with images authored top row first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvMapping {
    pub offset: Vec2,
    pub scale: Vec2,
    pub flip_v: bool,
}

impl Default for UvMapping {
    fn default() -> Self {
        Self {
            offset: Vec2::new(128.0, 128.0),
            scale: Vec2::new(1.0 / 256.0, 1.0 / 256.0),
            flip_v: true,
        }
    }
}

impl UvMapping {
    /// Mapping that covers `[min, min + size]` on both axes.
    pub fn for_extent(min: Vec2, size: Vec2, flip_v: bool) -> Self {
        Self {
            offset: -min,
            scale: Vec2::ONE / size,
            flip_v,
        }
    }

    /// UV of a world position, clamped to [0, 1].
    pub fn world_to_uv(&self, x: f32, z: f32) -> Vec2 {
        let u = (x + self.offset.x) * self.scale.x;
        let mut v = (z + self.offset.y) * self.scale.y;
        if self.flip_v {
            v = 1.0 - v;
        }
        Vec2::new(u, v).clamp(Vec2::ZERO, Vec2::ONE)
    }
}
